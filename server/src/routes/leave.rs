use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use entity::leave_request;
use platform_authz::Permission;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    context::AuthContext,
    error::{ApiError, ApiResult},
    http::AppState,
    routes::{validate_length, validate_required},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/leaves", post(create_leave_handler))
        .route("/leaves/me", get(my_leaves_handler))
        .route("/leaves/all", get(all_leaves_handler))
        .route("/leaves/{id}/respond", post(respond_leave_handler))
}

async fn my_leaves_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> ApiResult<Json<Vec<leave_request::Model>>> {
    ctx.require(Permission::ViewAllLeaveRequests)?;
    let requests = leave_request::Entity::find()
        .filter(leave_request::Column::EmployeeId.eq(ctx.person_id()))
        .all(&state.pool)
        .await?;
    Ok(Json(requests))
}

async fn all_leaves_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> ApiResult<Json<Vec<leave_request::Model>>> {
    ctx.require(Permission::ViewAllLeaveRequests)?;
    let requests = leave_request::Entity::find().all(&state.pool).await?;
    Ok(Json(requests))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateLeaveInput {
    start_date: NaiveDate,
    end_date: NaiveDate,
    request_type: String,
    reason: Option<String>,
}

#[derive(Serialize)]
struct CreateLeaveResponse {
    message: &'static str,
    request: leave_request::Model,
}

async fn create_leave_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(input): Json<CreateLeaveInput>,
) -> ApiResult<(StatusCode, Json<CreateLeaveResponse>)> {
    ctx.require(Permission::SendLeaveRequest)?;
    let request_type = validate_required("requestType", &input.request_type, 50)?;
    if let Some(reason) = &input.reason {
        validate_length("reason", reason, 500)?;
    }
    if input.end_date < input.start_date {
        return Err(ApiError::validation("endDate must not precede startDate"));
    }

    let request = leave_request::ActiveModel {
        id: Set(Uuid::new_v4()),
        employee_id: Set(ctx.person_id()),
        hr_employee_id: Set(None),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        request_type: Set(request_type),
        status: Set(leave_request::Status::Pending),
        reason: Set(input.reason.map(|r| r.trim().to_string())),
    }
    .insert(&state.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateLeaveResponse {
            message: "Leave request submitted",
            request,
        }),
    ))
}

#[derive(Deserialize)]
struct RespondLeaveInput {
    status: String,
}

#[derive(Serialize)]
struct RespondLeaveResponse {
    message: &'static str,
    request: leave_request::Model,
}

async fn respond_leave_handler(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(request_id): Path<Uuid>,
    Json(input): Json<RespondLeaveInput>,
) -> ApiResult<Json<RespondLeaveResponse>> {
    ctx.require(Permission::ApproveDenyLeaveRequests)?;

    let decision = match input.status.as_str() {
        "approved" => leave_request::Status::Approved,
        "denied" => leave_request::Status::Denied,
        _ => {
            return Err(ApiError::validation(
                "Status must be 'approved' or 'denied'",
            ))
        }
    };

    let request = leave_request::Entity::find_by_id(request_id)
        .one(&state.pool)
        .await?
        .ok_or(ApiError::NotFound("Leave request"))?;

    let mut active: leave_request::ActiveModel = request.into();
    active.status = Set(decision);
    active.hr_employee_id = Set(Some(ctx.person_id()));
    let updated = active.update(&state.pool).await?;

    Ok(Json(RespondLeaveResponse {
        message: "Leave request updated",
        request: updated,
    }))
}
