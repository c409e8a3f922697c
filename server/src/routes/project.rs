use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use entity::{employee_project, hr_employee, project};
use platform_authz::{Permission, RoleTag};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    context::AuthContext,
    error::{ApiError, ApiResult},
    http::AppState,
    routes::{validate_length, validate_required},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(list_projects_handler).post(create_project_handler),
        )
        .route("/projects/me", get(my_projects_handler))
        .route(
            "/projects/{id}",
            put(update_project_handler).delete(delete_project_handler),
        )
}

async fn list_projects_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> ApiResult<Json<Vec<project::Model>>> {
    ctx.require(Permission::ViewProjects)?;
    let projects = project::Entity::find().all(&state.pool).await?;
    Ok(Json(projects))
}

async fn my_projects_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> ApiResult<Json<Vec<project::Model>>> {
    ctx.require_role(RoleTag::Employee)?;
    let assignments = employee_project::Entity::find()
        .filter(employee_project::Column::EmployeeId.eq(ctx.person_id()))
        .all(&state.pool)
        .await?;
    let project_ids: Vec<Uuid> = assignments.iter().map(|a| a.project_id).collect();
    let projects = if project_ids.is_empty() {
        vec![]
    } else {
        project::Entity::find()
            .filter(project::Column::Id.is_in(project_ids))
            .all(&state.pool)
            .await?
    };
    Ok(Json(projects))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectInput {
    project_name: String,
    description: String,
    hr_employee_id: Option<Uuid>,
}

#[derive(Serialize)]
struct ProjectResponse {
    message: &'static str,
    project: project::Model,
}

async fn create_project_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(input): Json<CreateProjectInput>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    ctx.require(Permission::CreateProject)?;
    let name = validate_required("projectName", &input.project_name, 100)?;
    let description = validate_required("description", &input.description, 500)?;
    if let Some(hr_id) = input.hr_employee_id {
        hr_employee::Entity::find_by_id(hr_id)
            .one(&state.pool)
            .await?
            .ok_or(ApiError::NotFound("HR employee"))?;
    }

    let created = project::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        description: Set(description),
        hr_employee_id: Set(input.hr_employee_id),
    }
    .insert(&state.pool)
    .await?;

    info!(project_id = %created.id, "project created");
    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse {
            message: "Project created",
            project: created,
        }),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProjectInput {
    project_name: Option<String>,
    description: Option<String>,
    hr_employee_id: Option<Uuid>,
}

async fn update_project_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(project_id): Path<Uuid>,
    Json(input): Json<UpdateProjectInput>,
) -> ApiResult<Json<ProjectResponse>> {
    ctx.require(Permission::EditProject)?;

    let existing = project::Entity::find_by_id(project_id)
        .one(&state.pool)
        .await?
        .ok_or(ApiError::NotFound("Project"))?;

    if let Some(hr_id) = input.hr_employee_id {
        hr_employee::Entity::find_by_id(hr_id)
            .one(&state.pool)
            .await?
            .ok_or(ApiError::NotFound("HR employee"))?;
    }

    let mut active: project::ActiveModel = existing.into();
    if let Some(name) = &input.project_name {
        active.name = Set(validate_required("projectName", name, 100)?);
    }
    if let Some(description) = &input.description {
        validate_length("description", description, 500)?;
        active.description = Set(description.trim().to_string());
    }
    if input.hr_employee_id.is_some() {
        active.hr_employee_id = Set(input.hr_employee_id);
    }
    let updated = active.update(&state.pool).await?;

    Ok(Json(ProjectResponse {
        message: "Project updated",
        project: updated,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteProjectResponse {
    message: &'static str,
    project_id: Uuid,
}

async fn delete_project_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<DeleteProjectResponse>> {
    ctx.require(Permission::DeleteProject)?;

    let existing = project::Entity::find_by_id(project_id)
        .one(&state.pool)
        .await?
        .ok_or(ApiError::NotFound("Project"))?;
    existing.delete(&state.pool).await?;

    info!(%project_id, "project deleted");
    Ok(Json(DeleteProjectResponse {
        message: "Project deleted",
        project_id,
    }))
}
