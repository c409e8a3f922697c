use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Person {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PasswordHash,
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    PersonId,
    RoleId,
    HireDate,
    Qualifications,
}

#[derive(DeriveIden)]
enum HrEmployee {
    Table,
    PersonId,
    Department,
}

#[derive(DeriveIden)]
enum ExternalUser {
    Table,
    PersonId,
    Username,
}

#[derive(DeriveIden)]
enum Role {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Project {
    Table,
    Id,
    Name,
    Description,
    HrEmployeeId,
}

#[derive(DeriveIden)]
enum LeaveRequest {
    Table,
    Id,
    EmployeeId,
    HrEmployeeId,
    StartDate,
    EndDate,
    RequestType,
    Status,
    Reason,
}

#[derive(DeriveIden)]
enum ExternalRequest {
    Table,
    Id,
    UserId,
    ProjectId,
    HrEmployeeId,
    Description,
    Status,
    Response,
}

#[derive(DeriveIden)]
enum EmployeeProject {
    Table,
    EmployeeId,
    ProjectId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Person::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Person::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Person::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Person::LastName).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Person::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Person::PasswordHash).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Role::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Role::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Role::Name).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employee::PersonId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employee::RoleId).uuid().not_null())
                    .col(ColumnDef::new(Employee::HireDate).date().not_null())
                    .col(
                        ColumnDef::new(Employee::Qualifications)
                            .string_len(500)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_person")
                            .from(Employee::Table, Employee::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_role")
                            .from(Employee::Table, Employee::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_role_id")
                    .table(Employee::Table)
                    .col(Employee::RoleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HrEmployee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HrEmployee::PersonId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(HrEmployee::Department)
                            .string_len(100)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hr_employee_person")
                            .from(HrEmployee::Table, HrEmployee::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExternalUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExternalUser::PersonId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExternalUser::Username)
                            .string_len(50)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_external_user_person")
                            .from(ExternalUser::Table, ExternalUser::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Project::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Project::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Project::Description)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Project::HrEmployeeId).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_hr_employee")
                            .from(Project::Table, Project::HrEmployeeId)
                            .to(HrEmployee::Table, HrEmployee::PersonId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeaveRequest::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LeaveRequest::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(LeaveRequest::HrEmployeeId).uuid())
                    .col(ColumnDef::new(LeaveRequest::StartDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequest::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(LeaveRequest::RequestType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeaveRequest::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(LeaveRequest::Reason).string_len(500))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_request_employee")
                            .from(LeaveRequest::Table, LeaveRequest::EmployeeId)
                            .to(Employee::Table, Employee::PersonId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_request_hr_employee")
                            .from(LeaveRequest::Table, LeaveRequest::HrEmployeeId)
                            .to(HrEmployee::Table, HrEmployee::PersonId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_leave_request_employee_id")
                    .table(LeaveRequest::Table)
                    .col(LeaveRequest::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExternalRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExternalRequest::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExternalRequest::UserId).uuid().not_null())
                    .col(ColumnDef::new(ExternalRequest::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(ExternalRequest::HrEmployeeId).uuid())
                    .col(
                        ColumnDef::new(ExternalRequest::Description)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExternalRequest::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(ExternalRequest::Response).string_len(500))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_external_request_user")
                            .from(ExternalRequest::Table, ExternalRequest::UserId)
                            .to(ExternalUser::Table, ExternalUser::PersonId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_external_request_project")
                            .from(ExternalRequest::Table, ExternalRequest::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_external_request_hr_employee")
                            .from(ExternalRequest::Table, ExternalRequest::HrEmployeeId)
                            .to(HrEmployee::Table, HrEmployee::PersonId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_external_request_user_id")
                    .table(ExternalRequest::Table)
                    .col(ExternalRequest::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmployeeProject::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EmployeeProject::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(EmployeeProject::ProjectId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(EmployeeProject::EmployeeId)
                            .col(EmployeeProject::ProjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_project_employee")
                            .from(EmployeeProject::Table, EmployeeProject::EmployeeId)
                            .to(Employee::Table, Employee::PersonId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_project_project")
                            .from(EmployeeProject::Table, EmployeeProject::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeeProject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExternalRequest::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeaveRequest::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Project::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExternalUser::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HrEmployee::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Role::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Person::Table).to_owned())
            .await?;
        Ok(())
    }
}
