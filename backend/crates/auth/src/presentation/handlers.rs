//! HTTP Handlers

use axum::Extension;
use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordHasher};

use crate::application::config::AuthConfig;
use crate::application::{
    AuthOutcome, Authenticator, Credentials, FederatedSignInUseCase, SessionManager, SignUpInput,
    SignUpUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::identity_provider::IdentityProvider;
use crate::domain::repository::AuthStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{CredentialsForm, OAuthCallbackQuery};
use crate::presentation::middleware::CurrentUser;
use crate::presentation::pages;

/// Shared state for auth handlers
pub struct AuthAppState<R, P>
where
    R: AuthStore,
    P: IdentityProvider + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub provider: Arc<P>,
    pub hasher: Arc<PasswordHasher>,
    pub config: Arc<AuthConfig>,
}

impl<R, P> Clone for AuthAppState<R, P>
where
    R: AuthStore,
    P: IdentityProvider + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            provider: Arc::clone(&self.provider),
            hasher: Arc::clone(&self.hasher),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R, P> AuthAppState<R, P>
where
    R: AuthStore,
    P: IdentityProvider + Send + Sync + 'static,
{
    pub fn session_manager(&self) -> SessionManager<R> {
        SessionManager::new(Arc::clone(&self.repo), Arc::clone(&self.config))
    }

    /// Session cookie value from the request, if any
    pub fn session_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        platform::cookie::extract_cookie(headers, &self.config.session_cookie_name)
    }
}

// ============================================================================
// Pages
// ============================================================================

/// GET /
pub async fn home() -> Html<&'static str> {
    Html(pages::HOME)
}

/// GET /login
pub async fn login_page() -> Html<&'static str> {
    Html(pages::LOGIN)
}

/// GET /register
pub async fn register_page() -> Html<&'static str> {
    Html(pages::REGISTER)
}

/// GET /secrets (behind `require_session`)
pub async fn secrets(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Html<String> {
    Html(pages::secrets(user.email.as_str()))
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register_submit<R, P>(
    State(state): State<AuthAppState<R, P>>,
    Form(form): Form<CredentialsForm>,
) -> AuthResult<Response>
where
    R: AuthStore,
    P: IdentityProvider + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.hasher.clone());

    let input = SignUpInput {
        email: form.username,
        password: form.password,
    };

    let user = use_case.execute(input).await?;

    start_session(&state, &user).await
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login_submit<R, P>(
    State(state): State<AuthAppState<R, P>>,
    Form(form): Form<CredentialsForm>,
) -> AuthResult<Response>
where
    R: AuthStore,
    P: IdentityProvider + Send + Sync + 'static,
{
    let authenticator = Authenticator::new(state.repo.clone(), state.hasher.clone());

    let credentials = Credentials::Local {
        email: form.username,
        password: ClearTextPassword::new(form.password),
    };

    match authenticator.verify(credentials).await {
        AuthOutcome::Success(user) => start_session(&state, &user).await,
        // Unknown email and wrong password look the same from outside.
        AuthOutcome::Failure(_) => {
            AuthError::InvalidCredentials.log();
            Ok(Redirect::to("/login").into_response())
        }
        AuthOutcome::Error(e) => Err(e),
    }
}

// ============================================================================
// Logout
// ============================================================================

/// GET /logout
pub async fn logout<R, P>(State(state): State<AuthAppState<R, P>>, headers: HeaderMap) -> Response
where
    R: AuthStore,
    P: IdentityProvider + Send + Sync + 'static,
{
    if let Some(token) = state.session_token(&headers) {
        // The cookie is cleared regardless; a leftover row expires on its own.
        if let Err(e) = state.session_manager().destroy(token).await {
            e.log();
        }
    }

    (
        [(header::SET_COOKIE, state.config.session_cookie().clear_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

// ============================================================================
// Google
// ============================================================================

/// GET /auth/google
pub async fn google_begin<R, P>(State(state): State<AuthAppState<R, P>>) -> Response
where
    R: AuthStore,
    P: IdentityProvider + Send + Sync + 'static,
{
    match federated_use_case(&state).begin().await {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(e) => {
            e.log();
            Redirect::to("/login").into_response()
        }
    }
}

/// GET /auth/google/secrets
pub async fn google_callback<R, P>(
    State(state): State<AuthAppState<R, P>>,
    Query(query): Query<OAuthCallbackQuery>,
) -> AuthResult<Response>
where
    R: AuthStore,
    P: IdentityProvider + Send + Sync + 'static,
{
    if let Some(error) = &query.error {
        tracing::info!(error = %error, "Federated sign-in declined");
        return Ok(Redirect::to("/login").into_response());
    }

    let (Some(code), Some(oauth_state)) = (query.code.as_deref(), query.state.as_deref()) else {
        tracing::debug!("Federated callback without code or state");
        return Ok(Redirect::to("/login").into_response());
    };

    match federated_use_case(&state).complete(code, oauth_state).await {
        AuthOutcome::Success(user) => start_session(&state, &user).await,
        AuthOutcome::Failure(_) => Ok(Redirect::to("/login").into_response()),
        AuthOutcome::Error(e @ (AuthError::ProviderError(_) | AuthError::InvalidEmail(_))) => {
            e.log();
            Ok(Redirect::to("/login").into_response())
        }
        AuthOutcome::Error(e) => Err(e),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn federated_use_case<R, P>(state: &AuthAppState<R, P>) -> FederatedSignInUseCase<R, P>
where
    R: AuthStore,
    P: IdentityProvider + Send + Sync + 'static,
{
    FederatedSignInUseCase::new(
        state.repo.clone(),
        state.provider.clone(),
        state.hasher.clone(),
        state.config.clone(),
    )
}

/// Create a session, set its cookie and send the user to the gated page
async fn start_session<R, P>(state: &AuthAppState<R, P>, user: &User) -> AuthResult<Response>
where
    R: AuthStore,
    P: IdentityProvider + Send + Sync + 'static,
{
    let issued = state.session_manager().create(user).await?;
    let cookie: HeaderValue = state
        .config
        .session_cookie()
        .set_cookie(&issued.token)
        .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {e}")))?;

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/secrets")).into_response())
}
