use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use entity::role;
use platform_authz::Permission;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, ModelTrait};
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
        .route("/roles", get(list_roles_handler).post(create_role_handler))
        .route(
            "/roles/{id}",
            put(update_role_handler).delete(delete_role_handler),
        )
}

async fn list_roles_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> ApiResult<Json<Vec<role::Model>>> {
    ctx.require(Permission::ViewAllEmployees)?;
    let roles = role::Entity::find().all(&state.pool).await?;
    Ok(Json(roles))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoleInput {
    role_name: String,
}

async fn create_role_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(input): Json<RoleInput>,
) -> ApiResult<(StatusCode, Json<role::Model>)> {
    ctx.require(Permission::CreateEmployee)?;
    let name = validate_required("roleName", &input.role_name, 50)?;

    let created = role::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
    }
    .insert(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_role_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(role_id): Path<Uuid>,
    Json(input): Json<RoleInput>,
) -> ApiResult<Json<role::Model>> {
    ctx.require(Permission::EditEmployee)?;
    let name = validate_required("roleName", &input.role_name, 50)?;

    let existing = role::Entity::find_by_id(role_id)
        .one(&state.pool)
        .await?
        .ok_or(ApiError::NotFound("Role"))?;

    let mut active: role::ActiveModel = existing.into();
    active.name = Set(name);
    let updated = active.update(&state.pool).await?;
    Ok(Json(updated))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRoleResponse {
    message: &'static str,
    role_id: Uuid,
}

async fn delete_role_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(role_id): Path<Uuid>,
) -> ApiResult<Json<DeleteRoleResponse>> {
    ctx.require(Permission::DeleteEmployee)?;

    let existing = role::Entity::find_by_id(role_id)
        .one(&state.pool)
        .await?
        .ok_or(ApiError::NotFound("Role"))?;
    existing.delete(&state.pool).await?;

    Ok(Json(DeleteRoleResponse {
        message: "Role deleted",
        role_id,
    }))
}
