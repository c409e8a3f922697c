use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Employee,
    HrEmployee,
    ExternalUser,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Employee => Entity::has_one(super::employee::Entity).into(),
            Relation::HrEmployee => Entity::has_one(super::hr_employee::Entity).into(),
            Relation::ExternalUser => Entity::has_one(super::external_user::Entity).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
