use crate::controller::{
    dashboard_controller, health_check_controller, oauth_controller, review_controller,
};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Review Platform API"
        ),
        paths(
            health_check_controller::health_check,
            oauth_controller::authorize,
            oauth_controller::callback,
            oauth_controller::logout,
            dashboard_controller::user,
            dashboard_controller::repos,
            review_controller::toggle,
        ),
        components(
            schemas(
                crate::params::review::ToggleParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "review_platform", description = "GitHub and GitLab repository review API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our cookie session requirement for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "id",
                    "Session id value returned from a completed provider login via Set-Cookie header",
                ))),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(oauth_routes(app_state.clone()))
        .merge(dashboard_routes(app_state.clone()))
        .merge(review_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn oauth_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/{provider}", get(oauth_controller::authorize))
        .route("/{provider}/auth/callback", get(oauth_controller::callback))
        .route("/{provider}/logout", get(oauth_controller::logout))
        .with_state(app_state)
}

fn dashboard_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/{provider}/dashboard", get(dashboard_controller::user))
        .route("/{provider}/dashboard/repo", get(dashboard_controller::repos))
        .with_state(app_state)
}

fn review_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/{provider}/review", post(review_controller::toggle))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use clap::Parser;
    use domain::Platform;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::Value;
    use service::config::Config;
    use tower::ServiceExt;

    fn test_app(server: &ServerGuard) -> Router {
        test_app_with_gitlab_api(server, &server.url())
    }

    fn test_app_with_gitlab_api(server: &ServerGuard, gitlab_api_url: &str) -> Router {
        let github_token_url = format!("{}/login/oauth/access_token", server.url());
        let gitlab_token_url = format!("{}/oauth/token", server.url());
        let config = Config::try_parse_from([
            "review_platform_rs",
            "--github-client-id",
            "gh-id",
            "--gitlab-client-id",
            "gl-id",
            "--github-token-url",
            github_token_url.as_str(),
            "--github-api-url",
            server.url().as_str(),
            "--gitlab-token-url",
            gitlab_token_url.as_str(),
            "--gitlab-api-url",
            gitlab_api_url,
            "--frontend-base-url",
            "http://localhost:3000",
            "--repo-list-limit",
            "2",
        ])
        .unwrap();
        let platform = Platform::from_config(&config).unwrap();
        crate::app(AppState::new(config, platform))
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn toggle_request(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn session_cookie(response: &Response) -> String {
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .expect("login should set a session cookie");
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn login(app: &Router, provider: &str) -> String {
        let response = app
            .clone()
            .oneshot(get_request(
                &format!("/{}/auth/callback?code=abc&state=state", provider),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "http://localhost:3000/dashboard"
        );
        session_cookie(&response)
    }

    async fn mock_gitlab_token(server: &mut ServerGuard) -> mockito::Mock {
        server
            .mock("POST", "/oauth/token")
            .with_status(200)
            .with_body(r#"{"access_token":"glpat-token","token_type":"Bearer"}"#)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = Server::new_async().await;
        let response = test_app(&server)
            .oneshot(get_request("/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_authorize_redirects_to_provider() {
        let server = Server::new_async().await;
        let response = test_app(&server)
            .oneshot(get_request("/github", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap();
        assert!(location.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(location.contains("client_id=gh-id"));
        assert!(location.contains("state=state"));
    }

    #[tokio::test]
    async fn test_unknown_provider_is_not_found() {
        let server = Server::new_async().await;
        let app = test_app(&server);

        let response = app
            .clone()
            .oneshot(get_request("/bitbucket", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(get_request("/bitbucket/dashboard/repo", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_callback_without_code_is_bad_request() {
        let server = Server::new_async().await;
        let response = test_app(&server)
            .oneshot(get_request("/gitlab/auth/callback", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Code not found");
    }

    #[tokio::test]
    async fn test_rejected_code_is_unauthorized() {
        let mut server = Server::new_async().await;
        let _token = server
            .mock("POST", "/oauth/token")
            .with_status(401)
            .with_body(r#"{"error":"invalid_grant"}"#)
            .create_async()
            .await;

        let response = test_app(&server)
            .oneshot(get_request("/gitlab/auth/callback?code=stale", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_dashboard_without_session_is_unauthorized() {
        let server = Server::new_async().await;
        let app = test_app(&server);

        for uri in ["/gitlab/dashboard", "/github/dashboard/repo"] {
            let response = app.clone().oneshot(get_request(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        let response = app
            .oneshot(toggle_request("/gitlab/review", None, r#"{"id":7}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_gitlab_login_list_toggle_logout() {
        let mut server = Server::new_async().await;
        let _token = mock_gitlab_token(&mut server).await;
        let _user = server
            .mock("GET", "/user")
            .match_header("authorization", "Bearer glpat-token")
            .with_status(200)
            .with_body(r#"{"id":1,"username":"jdoe","name":"Jane Doe","avatar_url":null}"#)
            .create_async()
            .await;
        let _projects = server
            .mock("GET", "/projects")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer glpat-token")
            .with_status(200)
            .with_body(
                r#"[{"id":7,"name":"widgets"},{"id":8,"name":"gadgets"},{"id":9,"name":"gizmos"}]"#,
            )
            .create_async()
            .await;

        let app = test_app(&server);
        let cookie = login(&app, "gitlab").await;

        let response = app
            .clone()
            .oneshot(get_request("/gitlab/dashboard", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["user"]["display_name"], "Jane Doe");

        let response = app
            .clone()
            .oneshot(toggle_request(
                "/gitlab/review",
                Some(&cookie),
                r#"{"id":7,"name":"widgets"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["isReviewed"], true);
        assert_eq!(body["repoId"], 7);

        let response = app
            .clone()
            .oneshot(get_request("/gitlab/dashboard/repo", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let repos = json_body(response).await["repos"].clone();
        let repos = repos.as_array().unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0]["id"], 7);
        assert_eq!(repos[0]["reviewed"], true);
        assert_eq!(repos[1]["reviewed"], false);

        let response = app
            .clone()
            .oneshot(get_request("/gitlab/logout", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["message"], "Logout successful");

        let response = app
            .oneshot(get_request("/gitlab/dashboard", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_gitlab_session_does_not_open_github() {
        let mut server = Server::new_async().await;
        let _token = mock_gitlab_token(&mut server).await;

        let app = test_app(&server);
        let cookie = login(&app, "gitlab").await;

        let response = app
            .oneshot(get_request("/github/dashboard", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_toggle_is_bad_request() {
        let mut server = Server::new_async().await;
        let _token = mock_gitlab_token(&mut server).await;

        let app = test_app(&server);
        let cookie = login(&app, "gitlab").await;

        // GitHub style body sent to the GitLab route.
        let response = app
            .clone()
            .oneshot(toggle_request(
                "/gitlab/review",
                Some(&cookie),
                r#"{"repoFullName":"acme/widgets"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(toggle_request("/gitlab/review", Some(&cookie), "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unreachable_provider_api_is_bad_gateway() {
        let mut server = Server::new_async().await;
        let _token = mock_gitlab_token(&mut server).await;

        // Nothing listens on port 9 of the loopback interface.
        let app = test_app_with_gitlab_api(&server, "http://127.0.0.1:9");
        let cookie = login(&app, "gitlab").await;

        let response = app
            .oneshot(get_request("/gitlab/dashboard/repo", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            json_body(response).await["error"],
            "Failed to fetch data from provider"
        );
    }

    #[tokio::test]
    async fn test_logout_without_session_succeeds() {
        let server = Server::new_async().await;
        let response = test_app(&server)
            .oneshot(get_request("/github/logout", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
