//! Resolver reached over HTTP.

use async_trait::async_trait;

use locksmith_core::resolver::{
    AvailabilityResolver, ResolveRequest, ResolverError, ResolverResponse, Result,
};

/// POSTs `{"address", "company"}` as JSON to a fixed URL.
///
/// A non-2xx status is reported as a function error on the response rather
/// than as a failure; the dispatcher re-reads the cache either way.
#[derive(Debug, Clone)]
pub struct HttpResolver {
    client: reqwest::Client,
    url: String,
}

impl HttpResolver {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl AvailabilityResolver for HttpResolver {
    async fn invoke(&self, request: &ResolveRequest) -> Result<ResolverResponse> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let function_error = (!status.is_success()).then(|| format!("HTTP {status}"));

        Ok(ResolverResponse::from_bytes(&body, function_error))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ResolverError {
    if err.is_connect() || err.is_timeout() {
        ResolverError::Unreachable(err.to_string())
    } else {
        ResolverError::InvocationFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    type Seen = Arc<Mutex<Vec<Value>>>;

    async fn serve(status: StatusCode) -> (String, Seen) {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route(
                "/eta",
                post(
                    move |State(seen): State<Seen>, Json(body): Json<Value>| async move {
                        seen.lock().unwrap().push(body);
                        (status, Json(json!({ "statusCode": status.as_u16() })))
                    },
                ),
            )
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/eta"), seen)
    }

    #[tokio::test]
    async fn test_posts_request_payload() {
        let (url, seen) = serve(StatusCode::OK).await;
        let resolver = HttpResolver::new(url);

        let response = resolver
            .invoke(&ResolveRequest::new("AcmeLocks", Some("1 Main St".to_string())))
            .await
            .unwrap();

        assert!(response.function_error.is_none());
        assert_eq!(response.payload["statusCode"], 200);
        assert_eq!(
            seen.lock().unwrap()[0],
            json!({ "address": "1 Main St", "company": "AcmeLocks" })
        );
    }

    #[tokio::test]
    async fn test_error_status_is_function_error() {
        let (url, _seen) = serve(StatusCode::BAD_GATEWAY).await;
        let resolver = HttpResolver::new(url);

        let response = resolver
            .invoke(&ResolveRequest::new("AcmeLocks", None))
            .await
            .unwrap();

        assert_eq!(
            response.function_error.as_deref(),
            Some("HTTP 502 Bad Gateway")
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let resolver = HttpResolver::new(format!("http://{addr}/eta"));

        let err = resolver
            .invoke(&ResolveRequest::new("AcmeLocks", None))
            .await
            .unwrap_err();

        assert!(matches!(err, ResolverError::Unreachable(_)), "{err:?}");
    }
}
