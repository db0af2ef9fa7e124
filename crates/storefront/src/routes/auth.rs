//! Account handlers: register, login, logout and session lookup.
//!
//! Register and login wait out the simulated latency without holding the
//! visitor lock, so the visitor's other requests are not blocked meanwhile.

use axum::Json;
use serde::Deserialize;
use sunbag_core::{Email, PublicUser};
use tracing::instrument;

use crate::app::Snapshot;
use crate::error::{AppError, Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::middleware::Visitor;
use crate::services::auth::AuthService;

/// Register form data.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

fn parse_email(raw: &str) -> Result<Email> {
    Email::parse(raw).map_err(|e| {
        tracing::debug!(error = %e, "Rejected email");
        AppError::BadRequest("Adresse email invalide.".to_owned())
    })
}

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_CHARS: usize = 6;

fn require_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(AppError::BadRequest(
            "Veuillez saisir un mot de passe.".to_owned(),
        ));
    }
    Ok(())
}

fn require_new_password(password: &str) -> Result<()> {
    require_password(password)?;
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::BadRequest(format!(
            "Le mot de passe doit contenir au moins {MIN_PASSWORD_CHARS} caractères."
        )));
    }
    Ok(())
}

/// Create an account and log it in.
///
/// # Errors
///
/// Returns 400 for a blank name, an invalid email or a password shorter than
/// [`MIN_PASSWORD_CHARS`], and
/// 409 if the email is already registered (the current session is kept).
#[instrument(skip(visitor, form), fields(visitor_id = %visitor.id, email = %form.email))]
pub async fn register(visitor: Visitor, Json(form): Json<RegisterForm>) -> Result<Json<Snapshot>> {
    if form.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Veuillez indiquer votre nom.".to_owned(),
        ));
    }
    let email = parse_email(&form.email)?;
    require_new_password(&form.password)?;

    let (store, registry, timings) = {
        let storefront = visitor.handle.lock().await;
        (storefront.store(), storefront.registry(), storefront.timings())
    };
    let user = AuthService::new(&registry, store.as_ref(), timings.auth_latency)
        .register(&form.name, email, &form.password)
        .await?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    add_breadcrumb("auth", "Registered", Some(&[("user_id", user.id.as_str())]));

    let mut storefront = visitor.handle.lock().await;
    storefront.login_succeeded(user);
    Ok(Json(storefront.snapshot()))
}

/// Log in with an email and password.
///
/// # Errors
///
/// Returns 400 for an invalid email or an empty password, and 401 if no
/// account matches the pair exactly.
#[instrument(skip(visitor, form), fields(visitor_id = %visitor.id, email = %form.email))]
pub async fn login(visitor: Visitor, Json(form): Json<LoginForm>) -> Result<Json<Snapshot>> {
    let email = parse_email(&form.email)?;
    require_password(&form.password)?;

    let (store, registry, timings) = {
        let storefront = visitor.handle.lock().await;
        (storefront.store(), storefront.registry(), storefront.timings())
    };
    let user = AuthService::new(&registry, store.as_ref(), timings.auth_latency)
        .login(email.as_str(), &form.password)
        .await?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    add_breadcrumb("auth", "Logged in", Some(&[("user_id", user.id.as_str())]));

    let mut storefront = visitor.handle.lock().await;
    storefront.login_succeeded(user);
    Ok(Json(storefront.snapshot()))
}

/// Log out and go home. Registered accounts are kept.
///
/// # Errors
///
/// Returns 500 if the session marker cannot be removed; the in-memory
/// session is cleared regardless.
#[instrument(skip(visitor), fields(visitor_id = %visitor.id))]
pub async fn logout(visitor: Visitor) -> Result<Json<Snapshot>> {
    let mut storefront = visitor.handle.lock().await;
    let result = storefront.logout();
    clear_sentry_user();
    result?;
    Ok(Json(storefront.snapshot()))
}

/// The logged-in user, or `null`.
pub async fn session(visitor: Visitor) -> Json<Option<PublicUser>> {
    let storefront = visitor.handle.lock().await;
    Json(storefront.user().map(PublicUser::from))
}
