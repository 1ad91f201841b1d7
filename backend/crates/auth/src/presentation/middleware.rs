//! Auth Middleware
//!
//! Route guard for pages that require a signed-in user.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::domain::entity::user::User;
use crate::domain::identity_provider::IdentityProvider;
use crate::domain::repository::AuthStore;
use crate::presentation::handlers::AuthAppState;

/// The signed-in user, inserted into request extensions by [`require_session`]
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that requires a valid auth session
///
/// - session resolves to a user: the request proceeds with [`CurrentUser`] set
/// - no cookie, bad signature, expired, or user gone: `303 See Other` to `/login`
/// - datastore failure: generic `503`
pub async fn require_session<R, P>(
    State(state): State<AuthAppState<R, P>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AuthStore,
    P: IdentityProvider + Send + Sync + 'static,
{
    let Some(token) = state.session_token(req.headers()).map(str::to_owned) else {
        return Redirect::to("/login").into_response();
    };

    match state.session_manager().resolve(&token).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        Ok(None) => Redirect::to("/login").into_response(),
        Err(e) => e.into_response(),
    }
}
