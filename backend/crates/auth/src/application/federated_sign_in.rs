//! Federated Sign In Use Case
//!
//! Drives the authorization-code handshake with an identity provider:
//!
//! 1. [`begin`](FederatedSignInUseCase::begin) records a pending authorization
//!    and returns the consent URL to redirect to.
//! 2. [`complete`](FederatedSignInUseCase::complete) consumes the pending
//!    authorization named by the returned `state`, exchanges the code, and
//!    runs the federated strategy on the verified email.

use std::sync::Arc;

use platform::password::PasswordHasher;

use crate::application::authenticate::{AuthOutcome, Authenticator, Credentials};
use crate::application::config::AuthConfig;
use crate::domain::entity::pending_authorization::PendingAuthorization;
use crate::domain::identity_provider::IdentityProvider;
use crate::domain::repository::{OAuthStateRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Federated sign in use case
pub struct FederatedSignInUseCase<R, P>
where
    R: UserRepository + OAuthStateRepository,
    P: IdentityProvider,
{
    repo: Arc<R>,
    provider: Arc<P>,
    hasher: Arc<PasswordHasher>,
    config: Arc<AuthConfig>,
}

impl<R, P> FederatedSignInUseCase<R, P>
where
    R: UserRepository + OAuthStateRepository,
    P: IdentityProvider,
{
    pub fn new(
        repo: Arc<R>,
        provider: Arc<P>,
        hasher: Arc<PasswordHasher>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            provider,
            hasher,
            config,
        }
    }

    /// Start the handshake; returns the provider consent URL
    pub async fn begin(&self) -> AuthResult<String> {
        let request = self.provider.authorization_request()?;

        let pending = PendingAuthorization::new(
            request.csrf_state,
            self.provider.name(),
            request.pkce_verifier,
            self.config.oauth_state_ttl_chrono(),
        );
        self.repo.save_state(&pending).await?;

        tracing::debug!(provider = self.provider.name(), "Federated sign-in started");

        Ok(request.url)
    }

    /// Finish the handshake for the callback's `code` and `state`
    pub async fn complete(&self, code: &str, state: &str) -> AuthOutcome {
        let pending = match self.repo.take_state(state).await {
            Ok(Some(pending)) if pending.provider == self.provider.name() => pending,
            Ok(_) => {
                return AuthOutcome::Error(AuthError::ProviderError(
                    "unknown or expired authorization state".into(),
                ));
            }
            Err(e) => return AuthOutcome::Error(e),
        };

        let identity = match self.provider.exchange(code, &pending.pkce_verifier).await {
            Ok(identity) => identity,
            Err(e) => return AuthOutcome::Error(e),
        };

        Authenticator::new(Arc::clone(&self.repo), Arc::clone(&self.hasher))
            .verify(Credentials::Federated {
                provider: self.provider.name(),
                email: identity.email,
            })
            .await
    }
}
