use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Form, Json, Router,
};
use entity::{employee, external_user, hr_employee, person};
use platform_authn::{hash_password, issue_token, verify_password};
use platform_authz::RoleTag;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    http::AppState,
    routes::{normalize_email, validate_required},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterInput {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    message: &'static str,
    user_id: Uuid,
}

/// Self-registration. There is no employee self-registration path: emails on
/// the organizational domain become HR accounts, everything else external.
async fn register_handler(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let email = normalize_email(&input.email)?;
    let first_name = validate_required("firstName", &input.first_name, 50)?;
    let last_name = validate_required("lastName", &input.last_name, 50)?;
    if input.password.chars().count() < 8 {
        return Err(ApiError::validation("password must be at least 8 characters"));
    }

    let existing = person::Entity::find()
        .filter(person::Column::Email.eq(email.as_str()))
        .one(&state.pool)
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let password_hash = hash_password(&input.password).map_err(ApiError::internal)?;
    let person_id = Uuid::new_v4();

    let txn = state.pool.begin().await?;
    person::ActiveModel {
        id: Set(person_id),
        first_name: Set(first_name),
        last_name: Set(last_name),
        email: Set(email.clone()),
        password_hash: Set(password_hash),
    }
    .insert(&txn)
    .await?;

    if state.config.is_hr_email(&email) {
        let department = if email.contains("hr") { "HR" } else { "Default" };
        hr_employee::ActiveModel {
            person_id: Set(person_id),
            department: Set(department.to_string()),
        }
        .insert(&txn)
        .await?;
    } else {
        let username = email.split('@').next().unwrap_or_default().to_string();
        external_user::ActiveModel {
            person_id: Set(person_id),
            username: Set(username),
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;

    info!(%person_id, "account registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
            user_id: person_id,
        }),
    ))
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct TokenResponse {
    access_token: String,
    token_type: &'static str,
}

/// Password login. The role claim derives from the matched specialization,
/// probed in HR, external, employee order.
async fn login_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let email = form.username.trim().to_lowercase();
    let person = person::Entity::find()
        .filter(person::Column::Email.eq(email.as_str()))
        .one(&state.pool)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&form.password, &person.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let role = resolve_role(&state, person.id).await?;
    let token =
        issue_token(&person.email, role.as_str(), &state.auth).map_err(ApiError::from)?;
    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer",
    }))
}

async fn resolve_role(state: &AppState, person_id: Uuid) -> Result<RoleTag, ApiError> {
    if hr_employee::Entity::find_by_id(person_id)
        .one(&state.pool)
        .await?
        .is_some()
    {
        return Ok(RoleTag::Hr);
    }
    if external_user::Entity::find_by_id(person_id)
        .one(&state.pool)
        .await?
        .is_some()
    {
        return Ok(RoleTag::External);
    }
    if employee::Entity::find_by_id(person_id)
        .one(&state.pool)
        .await?
        .is_some()
    {
        return Ok(RoleTag::Employee);
    }
    Err(ApiError::InvalidCredentials)
}
