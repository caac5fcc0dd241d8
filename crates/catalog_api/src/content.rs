//! Content API contract and its HTTP implementation.

use std::{future::Future, pin::Pin};

use crate::{client::ApiClient, error::ApiResult, model::ContentItem};

/// Object-safe boxed future used by [`ContentApi`] methods.
pub type ContentApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Content catalog collaborator consumed by browsing views.
pub trait ContentApi {
    /// Lists catalog items, optionally filtered by a free-text `search`.
    fn fetch_all<'a>(
        &'a self,
        search: Option<&'a str>,
    ) -> ContentApiFuture<'a, ApiResult<Vec<ContentItem>>>;

    /// Loads one catalog item.
    fn fetch_by_id<'a>(&'a self, id: &'a str) -> ContentApiFuture<'a, ApiResult<ContentItem>>;
}

/// [`ContentApi`] over the `/streaming` REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpContentApi {
    client: ApiClient,
}

impl HttpContentApi {
    /// Wraps a configured [`ApiClient`].
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl ContentApi for HttpContentApi {
    fn fetch_all<'a>(
        &'a self,
        search: Option<&'a str>,
    ) -> ContentApiFuture<'a, ApiResult<Vec<ContentItem>>> {
        Box::pin(async move {
            let mut builder = self.client.http().get(self.client.endpoint("streaming"));
            if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
                builder = builder.query(&[("search", search)]);
            }
            self.client
                .send_json(builder, "Failed to fetch streaming content")
                .await
        })
    }

    fn fetch_by_id<'a>(&'a self, id: &'a str) -> ContentApiFuture<'a, ApiResult<ContentItem>> {
        Box::pin(async move {
            let url = self.client.endpoint(&format!("streaming/{id}"));
            let builder = self.client.http().get(url);
            self.client
                .send_json(builder, "Failed to fetch content details")
                .await
        })
    }
}
