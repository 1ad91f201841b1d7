//! Google Identity Provider
//!
//! Authorization Code flow with PKCE against Google's OAuth 2.0 endpoints,
//! requesting the `profile` and `email` scopes. After the code exchange the
//! email is read from the OpenID userinfo endpoint and accepted only if
//! Google reports it as verified.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::domain::identity_provider::{AuthorizationRequest, IdentityProvider, VerifiedIdentity};
use crate::error::{AuthError, AuthResult};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Registered OAuth client credentials
#[derive(Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Absolute URL of the callback route (`/auth/google/secrets`)
    pub redirect_url: String,
}

impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_url", &self.redirect_url)
            .finish()
    }
}

/// Subset of the userinfo response we rely on
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    email: Option<String>,
    email_verified: Option<bool>,
}

/// Google implementation of [`IdentityProvider`]
pub struct GoogleIdentityProvider {
    client: ConfiguredClient,
    http: reqwest::Client,
}

impl GoogleIdentityProvider {
    pub fn new(config: GoogleConfig) -> AuthResult<Self> {
        let invalid = |e: oauth2::url::ParseError| AuthError::Internal(format!("Invalid OAuth URL: {e}"));

        let client = BasicClient::new(ClientId::new(config.client_id))
            .set_client_secret(ClientSecret::new(config.client_secret))
            .set_auth_uri(AuthUrl::new(GOOGLE_AUTH_URL.to_string()).map_err(invalid)?)
            .set_token_uri(TokenUrl::new(GOOGLE_TOKEN_URL.to_string()).map_err(invalid)?)
            .set_redirect_uri(RedirectUrl::new(config.redirect_url).map_err(invalid)?);

        // Token endpoint redirects must not be followed.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self { client, http })
    }

    async fn fetch_user_info(&self, access_token: &str) -> AuthResult<GoogleUserInfo> {
        let response = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::ProviderError(format!("userinfo request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AuthError::ProviderError(format!(
                "userinfo returned {}",
                response.status()
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AuthError::ProviderError(format!("userinfo body: {e}")))
    }
}

impl IdentityProvider for GoogleIdentityProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn authorization_request(&self) -> AuthResult<AuthorizationRequest> {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (url, csrf_state) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("profile".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        Ok(AuthorizationRequest {
            url: url.to_string(),
            csrf_state: csrf_state.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        })
    }

    async fn exchange(&self, code: &str, pkce_verifier: &str) -> AuthResult<VerifiedIdentity> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::ProviderError(format!("token exchange failed: {e}")))?;

        let info = self.fetch_user_info(token.access_token().secret()).await?;
        verified_email(info).map(|email| VerifiedIdentity { email })
    }
}

fn verified_email(info: GoogleUserInfo) -> AuthResult<String> {
    match (info.email, info.email_verified) {
        (Some(email), Some(true)) if !email.is_empty() => Ok(email),
        (Some(_), _) => Err(AuthError::ProviderError("email not verified".into())),
        (None, _) => Err(AuthError::ProviderError("no email in profile".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GoogleIdentityProvider {
        GoogleIdentityProvider::new(GoogleConfig {
            client_id: "client-id".into(),
            client_secret: "client-secret".into(),
            redirect_url: "http://localhost:3000/auth/google/secrets".into(),
        })
        .unwrap()
    }

    #[test]
    fn test_authorization_url() {
        let request = provider().authorization_request().unwrap();

        assert!(request.url.starts_with(GOOGLE_AUTH_URL));
        assert!(request.url.contains("client_id=client-id"));
        assert!(request.url.contains("scope=profile+email"));
        assert!(request.url.contains("code_challenge_method=S256"));
        assert!(request.url.contains(&format!("state={}", request.csrf_state)));
        assert!(!request.url.contains(&request.pkce_verifier));
        assert!(!request.url.contains("client-secret"));
    }

    #[test]
    fn test_each_request_is_fresh() {
        let provider = provider();
        let a = provider.authorization_request().unwrap();
        let b = provider.authorization_request().unwrap();
        assert_ne!(a.csrf_state, b.csrf_state);
        assert_ne!(a.pkce_verifier, b.pkce_verifier);
    }

    #[test]
    fn test_invalid_redirect_url() {
        let result = GoogleIdentityProvider::new(GoogleConfig {
            client_id: "id".into(),
            client_secret: "secret".into(),
            redirect_url: "not a url".into(),
        });
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[test]
    fn test_verified_email_rules() {
        let parse = |json: &str| serde_json::from_str::<GoogleUserInfo>(json).unwrap();

        assert_eq!(
            verified_email(parse(r#"{"sub":"1","email":"a@example.com","email_verified":true}"#))
                .unwrap(),
            "a@example.com"
        );
        assert!(matches!(
            verified_email(parse(r#"{"sub":"1","email":"a@example.com","email_verified":false}"#)),
            Err(AuthError::ProviderError(_))
        ));
        assert!(matches!(
            verified_email(parse(r#"{"sub":"1"}"#)),
            Err(AuthError::ProviderError(_))
        ));
    }
}
