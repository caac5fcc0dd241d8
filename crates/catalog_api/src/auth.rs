//! Auth API contract and its HTTP implementation.

use std::{future::Future, pin::Pin};

use crate::{
    client::ApiClient,
    error::ApiResult,
    model::{AuthResponse, AuthUser, LoginRequest, PasswordChange, ProfileUpdate, RegisterRequest},
    sanitize::{sanitize_optional_text, sanitize_text, sanitize_url},
};

/// Object-safe boxed future used by [`AuthApi`] methods.
pub type AuthApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Auth collaborator consumed by the session container.
///
/// Sign-out has no network effect and is therefore not part of this contract; clearing the
/// durable auth keys is owned by the session storage.
pub trait AuthApi {
    /// Exchanges credentials for a user and bearer token.
    fn login<'a>(&'a self, request: &'a LoginRequest) -> AuthApiFuture<'a, ApiResult<AuthResponse>>;

    /// Creates an account and signs it in.
    fn register<'a>(
        &'a self,
        request: &'a RegisterRequest,
    ) -> AuthApiFuture<'a, ApiResult<AuthResponse>>;

    /// Loads the profile for `token`; fails when the token is invalid or expired.
    fn get_profile<'a>(&'a self, token: &'a str) -> AuthApiFuture<'a, ApiResult<AuthUser>>;

    /// Applies a partial profile update and returns the stored user.
    fn update_profile<'a>(
        &'a self,
        token: &'a str,
        update: &'a ProfileUpdate,
    ) -> AuthApiFuture<'a, ApiResult<AuthUser>>;

    /// Changes the password; fails when `current_password` is wrong.
    fn change_password<'a>(
        &'a self,
        token: &'a str,
        change: &'a PasswordChange,
    ) -> AuthApiFuture<'a, ApiResult<()>>;
}

/// [`AuthApi`] over the `/auth/*` REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    /// Wraps a configured [`ApiClient`].
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl AuthApi for HttpAuthApi {
    fn login<'a>(&'a self, request: &'a LoginRequest) -> AuthApiFuture<'a, ApiResult<AuthResponse>> {
        Box::pin(async move {
            let url = self.client.endpoint("auth/login");
            leptos::logging::log!("auth login requested");
            let builder = self.client.http().post(url).json(request);
            self.client.send_json(builder, "Login failed").await
        })
    }

    fn register<'a>(
        &'a self,
        request: &'a RegisterRequest,
    ) -> AuthApiFuture<'a, ApiResult<AuthResponse>> {
        Box::pin(async move {
            let sanitized = RegisterRequest {
                email: sanitize_text(&request.email),
                password: request.password.clone(),
                name: sanitize_optional_text(request.name.as_deref()),
            };
            let url = self.client.endpoint("auth/register");
            let builder = self.client.http().post(url).json(&sanitized);
            self.client.send_json(builder, "Registration failed").await
        })
    }

    fn get_profile<'a>(&'a self, token: &'a str) -> AuthApiFuture<'a, ApiResult<AuthUser>> {
        Box::pin(async move {
            let url = self.client.endpoint("auth/me");
            let builder = self.client.http().get(url).bearer_auth(token);
            self.client.send_json(builder, "Failed to fetch profile").await
        })
    }

    fn update_profile<'a>(
        &'a self,
        token: &'a str,
        update: &'a ProfileUpdate,
    ) -> AuthApiFuture<'a, ApiResult<AuthUser>> {
        Box::pin(async move {
            let sanitized = ProfileUpdate {
                email: sanitize_optional_text(update.email.as_deref()),
                name: sanitize_optional_text(update.name.as_deref()),
                profile_image: update
                    .profile_image
                    .as_deref()
                    .filter(|url| !url.is_empty())
                    .map(sanitize_url),
            };
            let url = self.client.endpoint("auth/profile");
            let builder = self
                .client
                .http()
                .put(url)
                .bearer_auth(token)
                .json(&sanitized);
            self.client
                .send_json(builder, "Failed to update profile")
                .await
        })
    }

    fn change_password<'a>(
        &'a self,
        token: &'a str,
        change: &'a PasswordChange,
    ) -> AuthApiFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            let url = self.client.endpoint("auth/password");
            let builder = self
                .client
                .http()
                .put(url)
                .bearer_auth(token)
                .json(change);
            self.client
                .send_empty(builder, "Failed to change password")
                .await
        })
    }
}
