//! Auth Router

use axum::{Router, middleware, routing::get};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::identity_provider::IdentityProvider;
use crate::domain::repository::AuthStore;
use crate::error::AuthResult;
use crate::infra::google::GoogleIdentityProvider;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_session;

/// Create the Auth router with PostgreSQL repository and Google sign-in
pub fn auth_router(
    repo: PgAuthRepository,
    provider: GoogleIdentityProvider,
    config: AuthConfig,
) -> AuthResult<Router> {
    auth_router_generic(repo, provider, config)
}

/// Create a generic Auth router for any repository and identity provider
///
/// Fails only if the configured hashing parameters are invalid.
pub fn auth_router_generic<R, P>(repo: R, provider: P, config: AuthConfig) -> AuthResult<Router>
where
    R: AuthStore,
    P: IdentityProvider + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        provider: Arc::new(provider),
        hasher: Arc::new(config.password_hasher()?),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/secrets", get(handlers::secrets))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<R, P>,
        ));

    let router = Router::new()
        .route("/", get(handlers::home))
        .route(
            "/login",
            get(handlers::login_page).post(handlers::login_submit::<R, P>),
        )
        .route(
            "/register",
            get(handlers::register_page).post(handlers::register_submit::<R, P>),
        )
        .route("/logout", get(handlers::logout::<R, P>))
        .route("/auth/google", get(handlers::google_begin::<R, P>))
        .route(
            "/auth/google/secrets",
            get(handlers::google_callback::<R, P>),
        )
        .merge(protected)
        .with_state(state);

    Ok(router)
}
