//! Admin login and logout.

use axum::{Json, extract::State, http::StatusCode};
use nosso_sushi_core::RecordStore;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::AuthService;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Verify the password and start an authenticated session.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login<S: RecordStore>(
    State(state): State<AppState<S>>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<CurrentAdmin>> {
    let account = AuthService::new(state.store())
        .login(&form.email, &form.password)
        .await
        .inspect_err(|_| tracing::warn!("admin login failed"))?;

    let admin = CurrentAdmin::from(account);
    set_current_admin(&session, &admin).await?;
    set_sentry_user(admin.id.as_i32(), admin.email.as_str());
    tracing::info!(admin_id = %admin.id, "admin logged in");

    Ok(Json(admin))
}

#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}

/// The admin behind the current session.
pub async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> Json<CurrentAdmin> {
    Json(admin)
}
