//! The access gate: bearer-token resolution plus a declarative authorization
//! policy table evaluated once before dispatch.

use axum::extract::{MatchedPath, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::domain::{AuthUser, Role};
use crate::error::AuthError;

use super::error::ApiError;
use super::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No credential required; the handler never sees an identity.
    Public,
    /// Any authenticated user.
    Authenticated,
    /// Authenticated user with a specific role.
    RequireRole(Role),
}

struct Policy {
    method: Method,
    path: &'static str,
    access: Access,
}

/// One row per route. Routes matched by the router but missing here fall back
/// to `Authenticated`.
static POLICIES: &[Policy] = &[
    Policy { method: Method::GET, path: "/products", access: Access::Public },
    Policy { method: Method::POST, path: "/products", access: Access::RequireRole(Role::Farmer) },
    Policy { method: Method::DELETE, path: "/products/{id}", access: Access::Authenticated },
    Policy { method: Method::GET, path: "/cart", access: Access::Authenticated },
    Policy { method: Method::POST, path: "/cart/add", access: Access::Authenticated },
    Policy { method: Method::DELETE, path: "/cart/{product_id}", access: Access::Authenticated },
    Policy { method: Method::GET, path: "/orders", access: Access::Authenticated },
    Policy { method: Method::POST, path: "/orders", access: Access::Authenticated },
];

pub fn required_access(method: &Method, path: &str) -> Access {
    POLICIES
        .iter()
        .find(|policy| policy.method == *method && policy.path == path)
        .map(|policy| policy.access)
        .unwrap_or(Access::Authenticated)
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Middleware applied to the whole router. Resolves the bearer credential
/// against the session store, checks the policy table, and stashes the
/// resolved [`AuthUser`] in request extensions for the handlers.
pub async fn access_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // MatchedPath is the route template ("/products/{id}"), present only for
    // requests the router actually matched; anything else falls through to the
    // router's own 404.
    let Some(path) = request.extensions().get::<MatchedPath>().map(|m| m.as_str().to_string()) else {
        return Ok(next.run(request).await);
    };

    let access = required_access(request.method(), &path);
    if access == Access::Public {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(request.headers()).ok_or(AuthError::MissingToken)?;
    let session = state
        .sessions
        .get_session(token.to_string())
        .await?
        .ok_or(AuthError::InvalidToken)?;
    if session.is_expired() {
        return Err(AuthError::InvalidToken.into());
    }

    let user = AuthUser { id: session.user_id, role: session.role };
    if let Access::RequireRole(required) = access {
        if user.role != required {
            return Err(AuthError::Forbidden("Only farmers can add products".to_string()).into());
        }
    }

    debug!(user_id = %user.id, ?user.role, %path, "Request authenticated");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
