use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[sea_orm(indexed)]
    pub hr_employee_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hr_employee::Entity",
        from = "Column::HrEmployeeId",
        to = "super::hr_employee::Column::PersonId",
        on_delete = "SetNull"
    )]
    HrEmployee,
}

impl Related<super::hr_employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HrEmployee.def()
    }
}

impl Related<super::employee_project::Entity> for Entity {
    fn to() -> RelationDef {
        super::employee_project::Relation::Project.def().rev()
    }
}

impl Related<super::external_request::Entity> for Entity {
    fn to() -> RelationDef {
        super::external_request::Relation::Project.def().rev()
    }
}

impl ActiveModelBehavior for ActiveModel {}
