//! Shared OAuth 2.0 client used by every provider.

use reqwest::header::ACCEPT;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::token::AccessToken;
use super::AuthorizationRequest;
use crate::error::{api_error, oauth_error, ApiErrorKind, Error, OAuthErrorKind};
use crate::providers::ProviderConfig;

/// Token endpoint response.
///
/// GitHub reports a rejected code with status 200 and an `error` field, so
/// every field is optional and checked after decoding.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Request to exchange authorization code for a token
#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
    grant_type: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// OAuth client bound to one provider configuration.
pub struct OAuthClient {
    config: ProviderConfig,
    http_client: reqwest::Client,
}

impl OAuthClient {
    pub fn new(config: ProviderConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Generate the authorization URL the user is redirected to.
    pub fn authorization_url(&self, state: &str) -> AuthorizationRequest {
        let scopes = self.config.scopes.join(" ");

        let url = format!(
            "{}?\
            client_id={}&\
            redirect_uri={}&\
            response_type=code&\
            scope={}&\
            state={}&\
            access_type=offline",
            self.config.auth_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(&scopes),
            urlencoding::encode(state)
        );

        AuthorizationRequest {
            url,
            state: state.to_string(),
        }
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<AccessToken, Error> {
        let provider = self.config.provider;
        let request = TokenExchangeRequest {
            grant_type: "authorization_code",
            code,
            redirect_uri: &self.config.redirect_uri,
            client_id: &self.config.client_id,
            client_secret: self.config.client_secret.expose_secret(),
        };

        debug!("Exchanging {} OAuth code for an access token", provider);

        let response = self
            .http_client
            .post(&self.config.token_url)
            .header(ACCEPT, "application/json")
            .form(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach {} token endpoint: {:?}", provider, e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: crate::ErrorKind::OAuth(OAuthErrorKind::Network),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| Error {
            source: Some(Box::new(e)),
            error_kind: crate::ErrorKind::OAuth(OAuthErrorKind::Network),
        })?;

        if !status.is_success() {
            warn!("{} token endpoint returned {}: {}", provider, status, body);
            return Err(oauth_error(
                OAuthErrorKind::TokenExchangeFailed,
                &format!("token endpoint returned {}", status),
            ));
        }

        let tokens: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse {} token response: {:?}", provider, e);
            Error {
                source: Some(Box::new(e)),
                error_kind: crate::ErrorKind::OAuth(OAuthErrorKind::InvalidResponse),
            }
        })?;

        if let Some(error) = tokens.error {
            let description = tokens.error_description.unwrap_or_default();
            warn!("{} rejected the OAuth code: {} {}", provider, error, description);
            return Err(oauth_error(
                OAuthErrorKind::TokenExchangeFailed,
                &format!("{}: {}", error, description),
            ));
        }

        match tokens.access_token {
            Some(access_token) if !access_token.is_empty() => {
                info!("Successfully exchanged {} OAuth code for a token", provider);
                Ok(AccessToken::new(access_token))
            }
            _ => Err(oauth_error(
                OAuthErrorKind::InvalidResponse,
                "token response did not contain an access token",
            )),
        }
    }

    /// Issue a bearer-authenticated GET against the provider API and decode the JSON body.
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the API base URL, including any query string
    /// * `access_token` - Token sent as `Authorization: Bearer`
    /// * `accept` - Value of the `Accept` header
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: &AccessToken,
        accept: &str,
    ) -> Result<T, Error> {
        let url = format!("{}{}", self.config.api_base_url, path);
        let provider = self.config.provider;

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token.secret())
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to call {} API {}: {:?}", provider, path, e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: crate::ErrorKind::Api(ApiErrorKind::Network),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("{} API {} returned {}: {}", provider, path, status, error_text);
            return Err(api_error(ApiErrorKind::Status(status.as_u16()), &error_text));
        }

        response.json::<T>().await.map_err(|e| {
            warn!("Failed to decode {} API {} response: {:?}", provider, path, e);
            Error {
                source: Some(Box::new(e)),
                error_kind: crate::ErrorKind::Api(ApiErrorKind::Decode),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::providers::{github_config, gitlab_config};
    use mockito::{Matcher, Server};

    fn client_for(config: ProviderConfig) -> OAuthClient {
        OAuthClient::new(config, reqwest::Client::new())
    }

    #[test]
    fn test_authorization_url_embeds_client_scopes_and_state() {
        let client = client_for(github_config(
            "my client",
            "secret",
            "https://backend.example.com/github/auth/callback",
        ));
        let request = client.authorization_url("state");

        assert!(request
            .url
            .starts_with("https://github.com/login/oauth/authorize?"));
        assert!(request.url.contains("client_id=my%20client"));
        assert!(request
            .url
            .contains("redirect_uri=https%3A%2F%2Fbackend.example.com%2Fgithub%2Fauth%2Fcallback"));
        assert!(request.url.contains("scope=read%3Auser%20user%3Aemail"));
        assert!(request.url.contains("response_type=code"));
        assert!(request.url.contains("state=state"));
        assert_eq!(request.state, "state");
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth/token")
            .match_header("accept", "application/json")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("code".into(), "abc123".into()),
                Matcher::UrlEncoded("client_id".into(), "id".into()),
                Matcher::UrlEncoded("client_secret".into(), "secret".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"glpat-token","token_type":"Bearer","expires_in":7200}"#)
            .create_async()
            .await;

        let client = client_for(
            gitlab_config("id", "secret", "cb").with_token_url(format!("{}/oauth/token", server.url())),
        );

        let token = client.exchange_code("abc123").await.unwrap();
        assert_eq!(token.secret(), "glpat-token");
    }

    #[tokio::test]
    async fn test_exchange_code_error_field_with_200_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/login/oauth/access_token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error":"bad_verification_code","error_description":"The code passed is incorrect or expired."}"#,
            )
            .create_async()
            .await;

        let client = client_for(
            github_config("id", "secret", "cb")
                .with_token_url(format!("{}/login/oauth/access_token", server.url())),
        );

        let err = client.exchange_code("expired").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed)
        );
    }

    #[tokio::test]
    async fn test_exchange_code_non_success_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth/token")
            .with_status(401)
            .with_body(r#"{"error":"invalid_client"}"#)
            .create_async()
            .await;

        let client = client_for(
            gitlab_config("", "", "cb").with_token_url(format!("{}/oauth/token", server.url())),
        );

        let err = client.exchange_code("abc").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed)
        );
    }

    #[tokio::test]
    async fn test_exchange_code_missing_access_token() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth/token")
            .with_status(200)
            .with_body(r#"{"token_type":"Bearer"}"#)
            .create_async()
            .await;

        let client = client_for(
            gitlab_config("id", "secret", "cb").with_token_url(format!("{}/oauth/token", server.url())),
        );

        let err = client.exchange_code("abc").await.unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::OAuth(OAuthErrorKind::InvalidResponse));
    }

    #[tokio::test]
    async fn test_exchange_code_network_failure() {
        // Nothing listens on port 9 of the loopback interface.
        let client = client_for(
            gitlab_config("id", "secret", "cb").with_token_url("http://127.0.0.1:9/oauth/token"),
        );

        let err = client.exchange_code("abc").await.unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::OAuth(OAuthErrorKind::Network));
    }

    #[tokio::test]
    async fn test_get_json_non_success_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/user")
            .with_status(401)
            .with_body(r#"{"message":"Bad credentials"}"#)
            .create_async()
            .await;

        let client = client_for(github_config("id", "secret", "cb").with_api_base_url(server.url()));

        let err = client
            .get_json::<serde_json::Value>("/user", &AccessToken::new("bad"), "application/json")
            .await
            .unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::Api(ApiErrorKind::Status(401)));
    }

    #[tokio::test]
    async fn test_get_json_decode_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/user")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = client_for(github_config("id", "secret", "cb").with_api_base_url(server.url()));

        let err = client
            .get_json::<serde_json::Value>("/user", &AccessToken::new("tok"), "application/json")
            .await
            .unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::Api(ApiErrorKind::Decode));
    }

    #[tokio::test]
    async fn test_get_json_network_failure() {
        let client = client_for(
            gitlab_config("id", "secret", "cb").with_api_base_url("http://127.0.0.1:9"),
        );

        let err = client
            .get_json::<serde_json::Value>("/user", &AccessToken::new("tok"), "application/json")
            .await
            .unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::Api(ApiErrorKind::Network));
    }
}
