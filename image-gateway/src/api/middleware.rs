use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejection;

use crate::error::AppError;
use crate::utils::jwt::{ADMIN_ROLE, Claims, decode};
use crate::utils::state::AppState;

/// Every route needs a valid bearer token; its claims are handed on through
/// the request extensions.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer
        .map_err(|e| AppError::Forbidden(format!("missing or malformed bearer token: {e}")))?;
    let claims = decode(&state.config.jwt_secret, bearer.token())?;
    tracing::debug!(sub = %claims.sub, roles = ?claims.roles, "authenticated");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Route layer for administrator-only endpoints. Runs after `authenticate`.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| AppError::Forbidden("not authenticated".to_string()))?;
    if !claims.has_role(ADMIN_ROLE) {
        return Err(AppError::Forbidden(format!(
            "{} lacks role {ADMIN_ROLE}",
            claims.sub
        )));
    }
    Ok(next.run(req).await)
}
