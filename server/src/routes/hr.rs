use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use entity::{employee, employee_project, external_request, leave_request, person, project, role};
use platform_authz::{Permission, RoleTag};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    context::AuthContext,
    error::{ApiError, ApiResult},
    http::AppState,
    routes::{normalize_email, validate_required},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hr/dashboard", get(dashboard_handler))
        .route("/hr/external-requests", get(list_external_requests_handler))
        .route(
            "/hr/external-requests/{id}/respond",
            post(respond_external_request_handler),
        )
        .route(
            "/hr/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route(
            "/hr/employees/{id}",
            put(update_employee_handler).delete(delete_employee_handler),
        )
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
    incoming_requests: Vec<external_request::Model>,
}

async fn dashboard_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> ApiResult<Json<DashboardResponse>> {
    ctx.require_role(RoleTag::Hr)?;
    let person = ctx.person();

    let assigned_projects = project::Entity::find()
        .filter(project::Column::HrEmployeeId.eq(ctx.person_id()))
        .all(&state.pool)
        .await?;
    let incoming_requests = external_request::Entity::find()
        .filter(external_request::Column::HrEmployeeId.eq(ctx.person_id()))
        .all(&state.pool)
        .await?;

    Ok(Json(DashboardResponse {
        user: UserSummary {
            name: format!("{} {}", person.first_name, person.last_name),
            email: person.email.clone(),
        },
        assigned_projects,
        incoming_requests,
    }))
}

async fn list_external_requests_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> ApiResult<Json<Vec<external_request::Model>>> {
    ctx.require(Permission::ViewAllExternalRequests)?;
    let requests = external_request::Entity::find().all(&state.pool).await?;
    Ok(Json(requests))
}

#[derive(Deserialize)]
struct RespondInput {
    response: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RespondResponse {
    message: &'static str,
    request_id: Uuid,
}

async fn respond_external_request_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(request_id): Path<Uuid>,
    Json(input): Json<RespondInput>,
) -> ApiResult<Json<RespondResponse>> {
    ctx.require(Permission::RespondToExternalRequests)?;
    let response_text = validate_required("response", &input.response, 500)?;

    let request = external_request::Entity::find_by_id(request_id)
        .one(&state.pool)
        .await?
        .ok_or(ApiError::NotFound("Request"))?;

    let mut active: external_request::ActiveModel = request.into();
    active.response = Set(Some(response_text));
    active.status = Set(external_request::Status::Responded);
    active.hr_employee_id = Set(Some(ctx.person_id()));
    active.update(&state.pool).await?;

    Ok(Json(RespondResponse {
        message: "Response sent",
        request_id,
    }))
}

/// Employee row joined with its person identity; the password hash never
/// leaves the store.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeView {
    person_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    role_id: Uuid,
    hire_date: NaiveDate,
    qualifications: String,
}

impl EmployeeView {
    fn from_models(employee: employee::Model, person: person::Model) -> Self {
        Self {
            person_id: employee.person_id,
            first_name: person.first_name,
            last_name: person.last_name,
            email: person.email,
            role_id: employee.role_id,
            hire_date: employee.hire_date,
            qualifications: employee.qualifications,
        }
    }
}

async fn list_employees_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> ApiResult<Json<Vec<EmployeeView>>> {
    ctx.require(Permission::ViewAllEmployees)?;
    let rows = employee::Entity::find()
        .find_also_related(person::Entity)
        .all(&state.pool)
        .await?;
    let views = rows
        .into_iter()
        .filter_map(|(employee, person)| person.map(|p| EmployeeView::from_models(employee, p)))
        .collect();
    Ok(Json(views))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEmployeeInput {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    role_id: Uuid,
    hire_date: NaiveDate,
    qualifications: String,
}

async fn create_employee_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(input): Json<CreateEmployeeInput>,
) -> ApiResult<(StatusCode, Json<EmployeeView>)> {
    ctx.require(Permission::CreateEmployee)?;
    let email = normalize_email(&input.email)?;
    let first_name = validate_required("firstName", &input.first_name, 50)?;
    let last_name = validate_required("lastName", &input.last_name, 50)?;
    let qualifications = validate_required("qualifications", &input.qualifications, 500)?;
    if input.password.chars().count() < 8 {
        return Err(ApiError::validation("password must be at least 8 characters"));
    }

    let existing = person::Entity::find()
        .filter(person::Column::Email.eq(email.as_str()))
        .one(&state.pool)
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Email already exists".into()));
    }
    role::Entity::find_by_id(input.role_id)
        .one(&state.pool)
        .await?
        .ok_or(ApiError::NotFound("Role"))?;

    let password_hash = platform_authn::hash_password(&input.password).map_err(ApiError::internal)?;
    let person_id = Uuid::new_v4();

    let txn = state.pool.begin().await?;
    let person_model = person::ActiveModel {
        id: Set(person_id),
        first_name: Set(first_name),
        last_name: Set(last_name),
        email: Set(email),
        password_hash: Set(password_hash),
    }
    .insert(&txn)
    .await?;
    let employee_model = employee::ActiveModel {
        person_id: Set(person_id),
        role_id: Set(input.role_id),
        hire_date: Set(input.hire_date),
        qualifications: Set(qualifications),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(%person_id, "employee created");
    Ok((
        StatusCode::CREATED,
        Json(EmployeeView::from_models(employee_model, person_model)),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateEmployeeInput {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    role_id: Option<Uuid>,
    hire_date: Option<NaiveDate>,
    qualifications: Option<String>,
}

async fn update_employee_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(employee_id): Path<Uuid>,
    Json(input): Json<UpdateEmployeeInput>,
) -> ApiResult<Json<EmployeeView>> {
    ctx.require(Permission::EditEmployee)?;

    let (employee_model, person_model) = employee::Entity::find_by_id(employee_id)
        .find_also_related(person::Entity)
        .one(&state.pool)
        .await?
        .and_then(|(e, p)| p.map(|p| (e, p)))
        .ok_or(ApiError::NotFound("Employee"))?;

    if let Some(role_id) = input.role_id {
        role::Entity::find_by_id(role_id)
            .one(&state.pool)
            .await?
            .ok_or(ApiError::NotFound("Role"))?;
    }

    let mut person_active: person::ActiveModel = person_model.into();
    if let Some(first_name) = &input.first_name {
        person_active.first_name = Set(validate_required("firstName", first_name, 50)?);
    }
    if let Some(last_name) = &input.last_name {
        person_active.last_name = Set(validate_required("lastName", last_name, 50)?);
    }
    if let Some(email) = &input.email {
        person_active.email = Set(normalize_email(email)?);
    }

    let mut employee_active: employee::ActiveModel = employee_model.into();
    if let Some(role_id) = input.role_id {
        employee_active.role_id = Set(role_id);
    }
    if let Some(hire_date) = input.hire_date {
        employee_active.hire_date = Set(hire_date);
    }
    if let Some(qualifications) = &input.qualifications {
        employee_active.qualifications =
            Set(validate_required("qualifications", qualifications, 500)?);
    }

    let txn = state.pool.begin().await?;
    let person_updated = person_active.update(&txn).await?;
    let employee_updated = employee_active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(EmployeeView::from_models(
        employee_updated,
        person_updated,
    )))
}

#[derive(Serialize)]
struct DeleteResponse {
    message: &'static str,
}

/// Cascading delete in one unit of work: project assignments and leave
/// requests go first, then the employee row and its person identity. Any
/// constraint violation rolls the whole transaction back.
async fn delete_employee_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(employee_id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    ctx.require(Permission::DeleteEmployee)?;

    let employee_model = employee::Entity::find_by_id(employee_id)
        .one(&state.pool)
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;

    let txn = state.pool.begin().await?;
    employee_project::Entity::delete_many()
        .filter(employee_project::Column::EmployeeId.eq(employee_id))
        .exec(&txn)
        .await?;
    leave_request::Entity::delete_many()
        .filter(leave_request::Column::EmployeeId.eq(employee_id))
        .exec(&txn)
        .await?;
    employee_model.delete(&txn).await?;
    person::Entity::delete_by_id(employee_id).exec(&txn).await?;
    txn.commit().await?;

    info!(%employee_id, "employee deleted");
    Ok(Json(DeleteResponse {
        message: "Employee deleted successfully",
    }))
}
