use super::WireEnum;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts},
};
use serde::{Deserialize, Serialize};
use track_core::error::AppError;
use track_core::middleware::REQUEST_ID_HEADER;

pub const USER_ID_HEADER: &str = "X-User-ID";
pub const USER_NAME_HEADER: &str = "X-User-Name";
pub const USER_ROLE_HEADER: &str = "X-User-Role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    Employee,
    Hr,
    Admin,
}

impl WireEnum for Role {
    const VARIANTS: &'static [Self] = &[Self::Employee, Self::Hr, Self::Admin];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Hr => "hr",
            Self::Admin => "admin",
        }
    }
}

impl_wire_enum!(Role, "role");

/// Caller identity forwarded by the authentication proxy.
///
/// The proxy in front of the dashboard authenticates the browser session and
/// sets `X-User-ID`, `X-User-Name` and `X-User-Role`. The browser cookie and
/// request id ride along so backend calls carry the same credentials and can
/// be correlated.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
    pub name: String,
    pub role: Role,
    pub cookie: Option<String>,
    pub request_id: Option<String>,
}

impl CurrentUser {
    pub fn new(user_id: &str, name: &str, role: Role) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
            role,
            cookie: None,
            request_id: None,
        }
    }

    /// HR and Admin decide on claims and answer complaints.
    pub fn can_review(&self) -> bool {
        matches!(self.role, Role::Hr | Role::Admin)
    }

    pub fn require_reviewer(&self) -> Result<(), AppError> {
        if self.can_review() {
            Ok(())
        } else {
            tracing::warn!(user_id = %self.user_id, role = %self.role, "Review action denied");
            Err(AppError::Forbidden(anyhow::anyhow!(
                "Only HR or Admin can perform this action"
            )))
        }
    }
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_value(parts, USER_ID_HEADER).ok_or_else(|| {
            AppError::Unauthorized(anyhow::anyhow!("Please sign in to continue"))
        })?;

        let name = header_value(parts, USER_NAME_HEADER).unwrap_or_else(|| user_id.clone());

        let role = match header_value(parts, USER_ROLE_HEADER) {
            Some(raw) => raw
                .parse::<Role>()
                .map_err(|e| AppError::Unauthorized(anyhow::anyhow!(e)))?,
            None => Role::Employee,
        };

        tracing::Span::current().record("user_id", user_id.as_str());

        Ok(CurrentUser {
            user_id,
            name,
            role,
            cookie: header_value(parts, COOKIE.as_str()),
            request_id: header_value(parts, REQUEST_ID_HEADER),
        })
    }
}
