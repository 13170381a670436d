use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::config;

pub(crate) fn build_app(data_dir: &str) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(health))
        .nest_service("/data", ServeDir::new(data_dir))
        .fallback_service(
            ServeDir::new(config::CLIENT_DIST_DIR)
                .precompressed_br()
                .precompressed_gzip(),
        )
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(set_cache_control))
}

async fn health() -> &'static str {
    "ok"
}

async fn set_cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if response.status().is_success()
        && let Some(cache_control) = cache_control_for_path(&path)
    {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        );
    }

    response
}

/// Trunk embeds a content hash in bundle filenames, so those can be
/// cached forever; the data files change between deployments and get a
/// short lifetime instead.
fn cache_control_for_path(path: &str) -> Option<&'static str> {
    if path.starts_with("/data/") {
        return Some("public, max-age=3600");
    }
    if is_hashed_bundle_asset(path) {
        return Some("public, max-age=31536000, immutable");
    }
    None
}

fn is_hashed_bundle_asset(path: &str) -> bool {
    let Some(ext) = Path::new(path).extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    if !matches!(ext, "wasm" | "js" | "css") {
        return false;
    }

    let Some(filename) = Path::new(path).file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    filename
        .split(['-', '_', '.'])
        .any(|segment| segment.len() >= 8 && segment.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    use super::{build_app, cache_control_for_path};

    #[tokio::test]
    async fn health_endpoint_responds() {
        let app = build_app("data");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn data_files_get_a_short_cache_lifetime() {
        assert_eq!(
            cache_control_for_path("/data/mxStateStats.csv"),
            Some("public, max-age=3600")
        );
    }

    #[test]
    fn hashed_bundles_cache_forever() {
        assert_eq!(
            cache_control_for_path("/coropleta-client-71578f6b278221f3_bg.wasm"),
            Some("public, max-age=31536000, immutable")
        );
        assert_eq!(cache_control_for_path("/index.html"), None);
        assert_eq!(cache_control_for_path("/"), None);
    }
}
