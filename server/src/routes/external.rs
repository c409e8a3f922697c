use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use entity::{external_request, project};
use platform_authz::{Permission, RoleTag};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    context::AuthContext,
    error::{ApiError, ApiResult},
    http::AppState,
    routes::validate_required,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/external/dashboard", get(dashboard_handler))
        .route("/external/requests/me", get(my_requests_handler))
        .route("/external/requests", post(create_request_handler))
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
    projects: Vec<project::Model>,
    my_requests: Vec<external_request::Model>,
}

async fn dashboard_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> ApiResult<Json<DashboardResponse>> {
    ctx.require_role(RoleTag::External)?;
    let person = ctx.person();

    let projects = project::Entity::find().all(&state.pool).await?;
    let my_requests = external_request::Entity::find()
        .filter(external_request::Column::UserId.eq(ctx.person_id()))
        .all(&state.pool)
        .await?;

    Ok(Json(DashboardResponse {
        user: UserSummary {
            name: format!("{} {}", person.first_name, person.last_name),
            email: person.email.clone(),
        },
        projects,
        my_requests,
    }))
}

async fn my_requests_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> ApiResult<Json<Vec<external_request::Model>>> {
    ctx.require(Permission::SendRequest)?;
    let requests = external_request::Entity::find()
        .filter(external_request::Column::UserId.eq(ctx.person_id()))
        .all(&state.pool)
        .await?;
    Ok(Json(requests))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequestInput {
    project_id: Uuid,
    description: String,
}

#[derive(Serialize)]
struct CreateRequestResponse {
    message: &'static str,
    request: external_request::Model,
}

async fn create_request_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(input): Json<CreateRequestInput>,
) -> ApiResult<(StatusCode, Json<CreateRequestResponse>)> {
    ctx.require(Permission::SendRequest)?;
    let description = validate_required("description", &input.description, 500)?;

    project::Entity::find_by_id(input.project_id)
        .one(&state.pool)
        .await?
        .ok_or(ApiError::NotFound("Project"))?;

    let request = external_request::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(ctx.person_id()),
        project_id: Set(input.project_id),
        hr_employee_id: Set(None),
        description: Set(description),
        status: Set(external_request::Status::Pending),
        response: Set(None),
    }
    .insert(&state.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRequestResponse {
            message: "External request submitted successfully.",
            request,
        }),
    ))
}
