use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use entity::{employee, external_user, hr_employee, person};
use platform_authn::{verify_token, TokenError};
use platform_authz::{require, Permission, RoleTag};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{error::ApiError, http::AppState};

/// The authenticated identity: the shared person row plus its exclusive
/// specialization payload for the role claimed by the token.
#[derive(Debug, Clone)]
pub enum Principal {
    Employee {
        person: person::Model,
        employee: employee::Model,
    },
    Hr {
        person: person::Model,
        hr: hr_employee::Model,
    },
    External {
        person: person::Model,
        external: external_user::Model,
    },
}

/// Authorization context attached to each request. Permissions derive
/// purely from the role tag.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub principal: Principal,
    pub role: RoleTag,
}

impl AuthContext {
    pub fn person(&self) -> &person::Model {
        match &self.principal {
            Principal::Employee { person, .. } => person,
            Principal::Hr { person, .. } => person,
            Principal::External { person, .. } => person,
        }
    }

    pub fn person_id(&self) -> Uuid {
        self.person().id
    }

    pub fn employee(&self) -> Option<&employee::Model> {
        match &self.principal {
            Principal::Employee { employee, .. } => Some(employee),
            _ => None,
        }
    }

    /// Permission gate; every handler calls this before touching the store.
    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        require(self.role, permission).map_err(ApiError::from)
    }

    pub fn require_role(&self, role: RoleTag) -> Result<(), ApiError> {
        if self.role == role {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Not authorized".into()))
        }
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Token(TokenError::Invalid))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Token(TokenError::Invalid))?;
        let claims = verify_token(token, &state.auth)?;
        let role = RoleTag::parse(&claims.role).ok_or(ApiError::Token(TokenError::Invalid))?;

        let person = person::Entity::find()
            .filter(person::Column::Email.eq(claims.sub.as_str()))
            .one(&state.pool)
            .await?
            .ok_or(ApiError::NotFound("User"))?;

        let principal = match role {
            RoleTag::Hr => {
                let hr = hr_employee::Entity::find_by_id(person.id)
                    .one(&state.pool)
                    .await?
                    .ok_or(ApiError::NotFound("User"))?;
                Principal::Hr { person, hr }
            }
            RoleTag::External => {
                let external = external_user::Entity::find_by_id(person.id)
                    .one(&state.pool)
                    .await?
                    .ok_or(ApiError::NotFound("User"))?;
                Principal::External { person, external }
            }
            RoleTag::Employee => {
                let employee = employee::Entity::find_by_id(person.id)
                    .one(&state.pool)
                    .await?
                    .ok_or(ApiError::NotFound("User"))?;
                Principal::Employee { person, employee }
            }
        };

        Ok(AuthContext { principal, role })
    }
}
