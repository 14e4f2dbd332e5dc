use tower_http::cors::CorsLayer;

/// Creates a fully permissive CORS layer for APIs consumed directly by
/// browser front ends without an intermediary.
///
/// Mirrors the request origin (so any origin is accepted), allows any
/// method and header, and allows credentials. Mirroring rather than `*`
/// is required because browsers reject wildcard origins on credentialed
/// requests.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::very_permissive()
}
