//! Download route.
//!
//! Dispatches to the transfer strategy configured for this deployment and
//! turns the resulting [`Delivery`] into an HTTP response.

use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{
        HeaderMap, HeaderValue,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
    routing::get,
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{DirectLinkResponse, DownloadQuery};
use crate::api::server::AppState;
use crate::config::{DEFAULT_FORMAT, TransferMode};
use crate::transfer::{Delivery, direct, local, proxy};

/// Create the download router.
pub fn router() -> Router<AppState> {
    Router::new().route("/download", get(download))
}

async fn download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> ApiResult<Response> {
    // Validated before any extraction or transfer is attempted.
    let url = query
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing required query parameter: url"))?;

    let format = query.format.as_deref().unwrap_or(DEFAULT_FORMAT);
    let extractor = state.extractor.as_ref();

    let delivery = match state.config.transfer_mode {
        TransferMode::LocalDownload => {
            local::download_and_stream(extractor, &state.config.temp_dir, url, format).await
        }
        TransferMode::DirectLink => direct::resolve_link(extractor, url, format).await,
        TransferMode::ProxyStream => {
            proxy::open_stream(extractor, &state.http_client, url, format).await
        }
    }
    .map_err(ApiError::from)?;

    delivery_response(delivery)
}

fn delivery_response(delivery: Delivery) -> ApiResult<Response> {
    match delivery {
        Delivery::Attachment { filename, body } => {
            let mut headers = HeaderMap::new();
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/octet-stream"),
            );
            headers.insert(
                CONTENT_DISPOSITION,
                HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
                    .map_err(|e| ApiError::internal(format!("Invalid header value: {e}")))?,
            );

            Ok((headers, Body::from_stream(body)).into_response())
        }
        Delivery::DirectLink {
            download_url,
            filename,
        } => Ok(Json(DirectLinkResponse {
            download_url,
            filename,
        })
        .into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::extractor::{ExtractorError, MediaExtractor, ResolvedMedia};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Extractor double that records how often it is called.
    struct MockExtractor {
        resolve_result: fn() -> Result<ResolvedMedia, ExtractorError>,
        calls: AtomicUsize,
    }

    impl MockExtractor {
        fn new(resolve_result: fn() -> Result<ResolvedMedia, ExtractorError>) -> Self {
            Self {
                resolve_result,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MediaExtractor for MockExtractor {
        async fn resolve(&self, _: &str, _: &str) -> Result<ResolvedMedia, ExtractorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.resolve_result)()
        }

        async fn download(&self, _: &str, _: &str, _: &str) -> Result<(), ExtractorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn link_mode_app(extractor: Arc<MockExtractor>) -> Router {
        let config = AppConfig {
            transfer_mode: TransferMode::DirectLink,
            ..Default::default()
        };
        let state = AppState::new(config, extractor);
        crate::api::routes::create_router(state)
    }

    fn resolved() -> Result<ResolvedMedia, ExtractorError> {
        Ok(ResolvedMedia {
            title: "My/Video".to_string(),
            ext: Some("mp4".to_string()),
            media_url: Some("https://cdn.example.com/v.mp4".to_string()),
        })
    }

    #[tokio::test]
    async fn test_missing_url_is_400_and_skips_extraction() {
        let extractor = Arc::new(MockExtractor::new(resolved));
        let app = link_mode_app(extractor.clone());

        let response = app
            .oneshot(Request::builder().uri("/download").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("url"));
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_url_is_400() {
        let app = link_mode_app(Arc::new(MockExtractor::new(resolved)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/download?url=%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_direct_link_response_shape() {
        let app = link_mode_app(Arc::new(MockExtractor::new(resolved)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/download?url=https://example.com/watch")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: DirectLinkResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.download_url, "https://cdn.example.com/v.mp4");
        assert_eq!(parsed.filename, "My-Video.mp4");
    }

    #[tokio::test]
    async fn test_unresolvable_url_is_404_with_reason() {
        let app = link_mode_app(Arc::new(MockExtractor::new(|| {
            Err(ExtractorError::NotFound(
                "ERROR: Unsupported URL: https://nope.example".to_string(),
            ))
        })));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/download?url=https://nope.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("Unsupported URL"));
    }

    #[tokio::test]
    async fn test_internal_failure_is_500_with_reason() {
        let app = link_mode_app(Arc::new(MockExtractor::new(|| {
            Err(ExtractorError::CommandFailed("network timed out".to_string()))
        })));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/download?url=https://example.com/watch")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("timed out"));
    }

    #[tokio::test]
    async fn test_attachment_headers() {
        use futures::stream;

        let delivery = Delivery::Attachment {
            filename: "My Video.mp4".to_string(),
            body: Box::pin(stream::iter(vec![Ok(bytes::Bytes::from_static(b"abc"))])),
        };

        let response = delivery_response(delivery).unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"My Video.mp4\""
        );
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/octet-stream"
        );
    }
}
