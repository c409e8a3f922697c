use axum::{extract::State, routing::get, Json, Router};
use chrono::NaiveDate;
use entity::{employee_project, project, role};
use platform_authz::{Permission, RoleTag};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Serialize;
use uuid::Uuid;

use crate::{context::AuthContext, error::{ApiError, ApiResult}, http::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employee/dashboard", get(dashboard_handler))
        .route("/employee/me", get(personal_info_handler))
}

#[derive(Serialize)]
struct UserSummary {
    name: String,
    email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardResponse {
    user: UserSummary,
    assigned_projects: Vec<project::Model>,
}

async fn dashboard_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> ApiResult<Json<DashboardResponse>> {
    ctx.require_role(RoleTag::Employee)?;
    let person = ctx.person();

    let assignments = employee_project::Entity::find()
        .filter(employee_project::Column::EmployeeId.eq(ctx.person_id()))
        .all(&state.pool)
        .await?;
    let project_ids: Vec<Uuid> = assignments.iter().map(|a| a.project_id).collect();
    let assigned_projects = if project_ids.is_empty() {
        vec![]
    } else {
        project::Entity::find()
            .filter(project::Column::Id.is_in(project_ids))
            .all(&state.pool)
            .await?
    };

    Ok(Json(DashboardResponse {
        user: UserSummary {
            name: format!("{} {}", person.first_name, person.last_name),
            email: person.email.clone(),
        },
        assigned_projects,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersonalInfoResponse {
    first_name: String,
    last_name: String,
    email: String,
    hire_date: NaiveDate,
    qualifications: String,
    role: Option<String>,
}

async fn personal_info_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> ApiResult<Json<PersonalInfoResponse>> {
    ctx.require(Permission::ViewPersonalInfo)?;
    let employee = ctx.employee().ok_or(ApiError::NotFound("Employee"))?;
    let person = ctx.person();

    let role_name = role::Entity::find_by_id(employee.role_id)
        .one(&state.pool)
        .await?
        .map(|r| r.name);

    Ok(Json(PersonalInfoResponse {
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        email: person.email.clone(),
        hire_date: employee.hire_date,
        qualifications: employee.qualifications.clone(),
        role: role_name,
    }))
}
