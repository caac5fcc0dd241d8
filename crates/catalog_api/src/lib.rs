//! REST collaborators for the Zenithflix catalog client.
//!
//! - **Auth**: login, registration, profile and password management ([`AuthApi`])
//! - **Content**: catalog listing, search and detail lookups ([`ContentApi`])
//!
//! Both contracts return boxed, non-`Send` futures so the same code runs on the browser's
//! single-threaded executor and under native test runtimes.
//!
//! # Example
//!
//! ```ignore
//! use catalog_api::{ApiClient, AuthApi, HttpAuthApi, LoginRequest};
//!
//! let client = ApiClient::new("http://localhost:3001/api")?;
//! let auth = HttpAuthApi::new(client);
//! let response = auth.login(&LoginRequest::new("a@b.com", "secret1")).await?;
//! println!("signed in as {}", response.user.email);
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod auth;
mod client;
mod content;
mod error;
mod model;
pub mod sanitize;

pub use auth::{AuthApi, AuthApiFuture, HttpAuthApi};
pub use client::ApiClient;
pub use content::{ContentApi, ContentApiFuture, HttpContentApi};
pub use error::{ApiError, ApiResult};
pub use model::{
    AuthResponse, AuthUser, ContentItem, LoginRequest, PasswordChange, ProfileUpdate,
    RegisterRequest,
};
