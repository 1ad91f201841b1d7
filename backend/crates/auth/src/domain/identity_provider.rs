//! Identity Provider Port
//!
//! An external service that vouches for an email address through an
//! authorization-code redirect. `infra::google` is the production
//! implementation.

use crate::error::AuthResult;

/// Where to send the browser, plus what must be remembered until it returns
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Provider consent URL
    pub url: String,
    /// CSRF state embedded in `url`
    pub csrf_state: String,
    /// PKCE verifier for the challenge embedded in `url`
    pub pkce_verifier: String,
}

/// Identity asserted by the provider after a successful code exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Provider-verified email, as the provider returned it
    pub email: String,
}

#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Short provider name, stored alongside pending authorizations
    fn name(&self) -> &'static str;

    /// Build a consent URL with fresh CSRF state and PKCE challenge
    fn authorization_request(&self) -> AuthResult<AuthorizationRequest>;

    /// Exchange an authorization code for a verified identity.
    ///
    /// Any failure (rejected code, network error, missing or unverified
    /// email) is `AuthError::ProviderError`.
    async fn exchange(&self, code: &str, pkce_verifier: &str) -> AuthResult<VerifiedIdentity>;
}
