use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(request).await;
    let duration = start.elapsed();

    info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration = ?duration,
        "request handled"
    );

    response
}

/// The allow-list decision, independent of any framework callback shape.
pub fn origin_allowed(origin: &HeaderValue, allowlist: &[String]) -> bool {
    origin
        .to_str()
        .map(|origin| allowlist.iter().any(|allowed| allowed == origin))
        .unwrap_or(false)
}

/// CORS policy over a fixed origin allow-list. Browser requests from any
/// other origin fail the preflight.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowlist = origins.to_vec();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin_allowed(origin, &allowlist)
        }))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn trace_layer(
) -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
}
