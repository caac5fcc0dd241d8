//! HTTP client tests against a mock REST server.

use catalog_api::{
    ApiClient, ApiError, AuthApi, ContentApi, HttpAuthApi, HttpContentApi, LoginRequest,
    PasswordChange, ProfileUpdate, RegisterRequest,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json() -> serde_json::Value {
    json!({
        "id": "u1",
        "email": "a@b.com",
        "name": "Ada",
        "createdAt": "2024-01-01T00:00:00Z"
    })
}

fn content_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Heat",
        "genre": ["Crime"],
        "cast": ["Al Pacino"],
        "type": "movie",
        "createdAt": "2024-01-01T00:00:00Z"
    })
}

async fn auth_api(server: &MockServer) -> HttpAuthApi {
    HttpAuthApi::new(ApiClient::new(&format!("{}/api", server.uri())).expect("client"))
}

async fn content_api(server: &MockServer) -> HttpContentApi {
    HttpContentApi::new(ApiClient::new(&format!("{}/api/", server.uri())).expect("client"))
}

mod auth {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn login_success_returns_user_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "email": "a@b.com", "password": "secret1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": user_json(),
                "access_token": "tok-123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = auth_api(&server).await;
        let response = api
            .login(&LoginRequest::new("a@b.com", "secret1"))
            .await
            .expect("login");

        assert_eq!(response.access_token, "tok-123");
        assert_eq!(response.user.id, "u1");
        assert_eq!(response.user.name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn login_rejection_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let api = auth_api(&server).await;
        let err = api
            .login(&LoginRequest::new("a@b.com", "short"))
            .await
            .expect_err("rejected");

        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn rejection_without_message_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let api = auth_api(&server).await;
        let err = api
            .register(&RegisterRequest {
                email: "a@b.com".to_string(),
                password: "secret1".to_string(),
                name: None,
            })
            .await
            .expect_err("rejected");

        assert_eq!(
            err,
            ApiError::Rejected {
                status: 500,
                message: "Registration failed".to_string()
            }
        );
    }

    #[tokio::test]
    async fn register_sends_sanitized_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(json!({
                "email": "a@b.com",
                "password": "secret1",
                "name": "Ada"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "user": user_json(),
                "access_token": "tok-new"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = auth_api(&server).await;
        let response = api
            .register(&RegisterRequest {
                email: " a@b.com ".to_string(),
                password: "secret1".to_string(),
                name: Some("<i>Ada</i>".to_string()),
            })
            .await
            .expect("register");

        assert_eq!(response.access_token, "tok-new");
    }

    #[tokio::test]
    async fn get_profile_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .expect(1)
            .mount(&server)
            .await;

        let api = auth_api(&server).await;
        let user = api.get_profile("tok-123").await.expect("profile");
        assert_eq!(user.email, "a@b.com");
    }

    #[tokio::test]
    async fn update_profile_drops_empty_and_unsafe_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/auth/profile"))
            .and(body_json(json!({ "name": "Bo", "profileImage": "" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .expect(1)
            .mount(&server)
            .await;

        let api = auth_api(&server).await;
        let update = ProfileUpdate {
            email: Some(String::new()),
            name: Some(" Bo ".to_string()),
            profile_image: Some("javascript:alert(1)".to_string()),
        };
        api.update_profile("tok-123", &update)
            .await
            .expect("update profile");
    }

    #[tokio::test]
    async fn change_password_ignores_success_body_and_reports_wrong_password() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/auth/password"))
            .and(body_json(json!({
                "currentPassword": "old-secret",
                "newPassword": "new-secret"
            })))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/auth/password"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "message": "Current password is incorrect" })),
            )
            .mount(&server)
            .await;

        let api = auth_api(&server).await;
        api.change_password(
            "tok-123",
            &PasswordChange {
                current_password: "old-secret".to_string(),
                new_password: "new-secret".to_string(),
            },
        )
        .await
        .expect("password changed");

        let err = api
            .change_password(
                "tok-123",
                &PasswordChange {
                    current_password: "wrong".to_string(),
                    new_password: "new-secret".to_string(),
                },
            )
            .await
            .expect_err("wrong password");
        assert_eq!(err.to_string(), "Current password is incorrect");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let api = HttpAuthApi::new(ApiClient::new("http://127.0.0.1:9").expect("client"));
        let err = api
            .login(&LoginRequest::new("a@b.com", "secret1"))
            .await
            .expect_err("unreachable");
        assert!(matches!(err, ApiError::Network(_)));
    }
}

mod content {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn fetch_all_without_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/streaming"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([content_json("c1"), content_json("c2")])),
            )
            .mount(&server)
            .await;

        let api = content_api(&server).await;
        let items = api.fetch_all(None).await.expect("fetch all");
        let ids: Vec<_> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[tokio::test]
    async fn fetch_all_passes_search_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/streaming"))
            .and(query_param("search", "heat wave"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([content_json("c1")])))
            .expect(1)
            .mount(&server)
            .await;

        let api = content_api(&server).await;
        let items = api.fetch_all(Some(" heat wave ")).await.expect("search");
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn fetch_by_id_failure_uses_details_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/streaming/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let api = content_api(&server).await;
        let err = api.fetch_by_id("missing").await.expect_err("not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Failed to fetch content details");
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/streaming/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let api = content_api(&server).await;
        let err = api.fetch_by_id("c1").await.expect_err("parse");
        assert!(matches!(err, ApiError::Parse(_)));
    }
}
