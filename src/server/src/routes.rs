//! HTTP routes.
//!
//! - `GET /xetex/{fileformat}/{filename}`
//! - `GET /pdftex/{fileformat}/{filename}`
//! - `GET /pdftex/pk/{dpi}/{filename}`
//!
//! A found file is returned with its basename in a `fileid` (or `pkid`)
//! header. Not found is answered with status 301 and "File not found",
//! which is what existing engine clients expect. Failures are logged and
//! answered with a generic 500.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header::{ACCESS_CONTROL_EXPOSE_HEADERS, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use texfetch_core::{sanitize_filename, Category, RequestKey, Resolution};
use texfetch_runtime::LookupService;
use tower_http::cors::{Any, CorsLayer};

/// Build the router serving files through `lookup`.
pub fn router(lookup: Arc<LookupService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/xetex/:fileformat/:filename", get(xetex_file))
        .route("/pdftex/:fileformat/:filename", get(pdftex_file))
        .route("/pdftex/pk/:dpi/:filename", get(pdftex_pk))
        .layer(cors)
        .with_state(lookup)
}

async fn xetex_file(
    State(lookup): State<Arc<LookupService>>,
    Path((fileformat, filename)): Path<(u32, String)>,
) -> Response {
    serve(lookup, Category::Xetex, fileformat, &filename).await
}

async fn pdftex_file(
    State(lookup): State<Arc<LookupService>>,
    Path((fileformat, filename)): Path<(u32, String)>,
) -> Response {
    serve(lookup, Category::Pdftex, fileformat, &filename).await
}

async fn pdftex_pk(
    State(lookup): State<Arc<LookupService>>,
    Path((dpi, filename)): Path<(u32, String)>,
) -> Response {
    serve(lookup, Category::PdftexBitmap, dpi, &filename).await
}

async fn serve(
    lookup: Arc<LookupService>,
    category: Category,
    selector: u32,
    filename: &str,
) -> Response {
    let key = RequestKey::new(category, selector, sanitize_filename(filename));
    let request = key.to_string();

    // Resolution and file reads block
    let result = tokio::task::spawn_blocking(move || lookup.lookup(&key)).await;

    match result {
        Ok(Ok(resolution)) => file_response(category, &resolution),
        Ok(Err(e)) => {
            tracing::error!(
                request = %request,
                error = %e,
                retryable = e.is_retryable(),
                "Failed to serve file"
            );
            internal_error()
        }
        Err(e) => {
            tracing::error!(request = %request, error = %e, "Lookup task failed");
            internal_error()
        }
    }
}

fn file_response(category: Category, resolution: &Resolution) -> Response {
    let (Some(data), Some(file_id)) = (resolution.data(), resolution.file_id()) else {
        return not_found();
    };

    let id_value = match HeaderValue::from_str(&file_id) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(file_id = %file_id, error = %e, "File name is not a valid header value");
            return internal_error();
        }
    };
    let id_header = HeaderName::from_static(category.id_header());

    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/octet-stream")),
            (id_header, id_value),
            (
                ACCESS_CONTROL_EXPOSE_HEADERS,
                HeaderValue::from_static(category.id_header()),
            ),
        ],
        data.clone(),
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::MOVED_PERMANENTLY, "File not found").into_response()
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
