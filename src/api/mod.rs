//! Shared HTTP client for the upstream online test API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod errors;
pub mod paths;

pub use errors::{ApiError, ApiResult};
pub use paths::ApiPath;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// JSON client bound to a fixed base URL.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ApiError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Joins `path` onto the base URL, percent-encoding every segment.
    fn url(&self, path: &ApiPath) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.segments());
        }
        url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &ApiPath) -> ApiResult<T> {
        let body = self.execute(self.http.get(self.url(path))).await?;
        decode(&body)
    }

    /// GET with `query` appended; blank values are dropped.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &ApiPath,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let mut url = self.url(path);
        url.set_query(paths::encode_query(query).as_deref());
        let body = self.execute(self.http.get(url)).await?;
        decode(&body)
    }

    pub async fn post<B, T>(&self, path: &ApiPath, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.execute(self.http.post(self.url(path)).json(body)).await?;
        decode(&body)
    }

    pub async fn put<B, T>(&self, path: &ApiPath, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.execute(self.http.put(self.url(path)).json(body)).await?;
        decode(&body)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &ApiPath) -> ApiResult<T> {
        let body = self.execute(self.http.delete(self.url(path))).await?;
        decode(&body)
    }

    /// DELETE whose response body is ignored.
    pub async fn delete_unit(&self, path: &ApiPath) -> ApiResult<()> {
        self.execute(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    async fn execute(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        log::warn!("Upstream API answered {status}: {}", message.as_deref().unwrap_or(""));
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::page::ListPage;

    /// Trailing slashes on the configured base URL do not double up.
    #[test]
    fn base_url_trailing_slash_is_ignored() {
        for base in ["http://localhost:5000/api/", "http://localhost:5000/api"] {
            let client = ApiClient::new(base, DEFAULT_TIMEOUT).unwrap();
            assert_eq!(
                client.url(&paths::books()).as_str(),
                "http://localhost:5000/api/books"
            );
        }
    }

    /// Identifiers are encoded as a single segment, never as query or path.
    #[test]
    fn identifiers_cannot_escape_their_segment() {
        let client = ApiClient::new("http://localhost:5000/api", DEFAULT_TIMEOUT).unwrap();

        let url = client.url(&paths::book("b1?limit=1000#top"));
        assert_eq!(url.path(), "/api/books/b1%3Flimit=1000%23top");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);

        let url = client.url(&paths::book("../users/u1"));
        assert_eq!(url.path(), "/api/books/..%2Fusers%2Fu1");
    }

    #[test]
    fn unusable_base_url_is_rejected() {
        assert!(matches!(
            ApiClient::new("not a url", DEFAULT_TIMEOUT),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn malformed_bodies_become_decode_errors() {
        let err = decode::<ListPage<String>>(r#"{"data":"nope"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
