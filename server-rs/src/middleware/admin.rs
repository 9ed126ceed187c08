use axum::{extract::Request, middleware::Next, response::Response};

use crate::authz;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;

/// Middleware: requires the admin panel gate. Must run after `authenticate`.
/// `DEV` does not pass this gate; dev-facing user management lives outside
/// `/admin`.
pub async fn require_admin_panel(req: Request, next: Next) -> Result<Response, AppError> {
    let AuthUser(actor) = req
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

    if !authz::can_access_admin_panel(Some(&actor)) {
        tracing::warn!(user = %actor.id, role = %actor.role, "admin panel access denied");
        return Err(AppError::Forbidden("Requires ADMIN or OWNER role".into()));
    }

    Ok(next.run(req).await)
}
