//! HTTP server exposing the GraphQL schema.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::{
    Router,
    response::{Html, IntoResponse},
    routing::{get, post_service},
};
use coursegraph_api::CourseSchema;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Path of the GraphQL endpoint.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Create the API router.
///
/// `POST /graphql` executes requests. With `graphiql` set, `GET /graphql`
/// serves the GraphiQL explorer.
pub fn create_router(schema: CourseSchema, graphiql: bool) -> Router {
    let endpoint = if graphiql {
        get(graphiql_handler).post_service(GraphQL::new(schema))
    } else {
        post_service(GraphQL::new(schema))
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(GRAPHQL_PATH, endpoint)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn graphiql_handler() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use coursegraph_api::build_schema;
    use coursegraph_store::{Catalog, ContentIndex, ContentStore};
    use tower::ServiceExt;

    use super::*;

    fn router(dir: &std::path::Path, graphiql: bool) -> Router {
        let store = ContentStore::new(dir, ContentIndex::new());
        create_router(build_schema(Catalog::new(Arc::new(store))), graphiql)
    }

    #[tokio::test]
    async fn test_post_executes_query() {
        let dir = tempfile::tempdir().expect("temp dir");
        let request = Request::builder()
            .method(Method::POST)
            .uri(GRAPHQL_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"query":"{ listCourses }"}"#))
            .expect("request");

        let response = router(dir.path(), true)
            .oneshot(request)
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json["data"]["listCourses"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_graphiql_toggle() {
        let dir = tempfile::tempdir().expect("temp dir");
        let get = || {
            Request::builder()
                .uri(GRAPHQL_PATH)
                .body(Body::empty())
                .expect("request")
        };

        let response = router(dir.path(), true)
            .oneshot(get())
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router(dir.path(), false)
            .oneshot(get())
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let dir = tempfile::tempdir().expect("temp dir");
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(GRAPHQL_PATH)
            .header(header::ORIGIN, "https://learn.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .expect("request");

        let response = router(dir.path(), true)
            .oneshot(request)
            .await
            .expect("response");
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
