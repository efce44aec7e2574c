// src/http/handlers.rs

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;

use crate::export::{BufferedResponse, PdfFileRequest};
use crate::http::error::HttpError;
use crate::http::state::AppState;

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}

/// `POST /pdf`: render the requested page and return it as an attachment.
pub async fn create_pdf(
    State(state): State<AppState>,
    Json(body): Json<PdfFileRequest>,
) -> Result<Response, HttpError> {
    let request = body.into_export_request()?;

    let mut sink = BufferedResponse::new();
    state.creator.create(&request, &mut sink).await?;

    into_download_response(sink)
}

/// Turn a successfully filled sink into a `200 OK` download.
fn into_download_response(sink: BufferedResponse) -> Result<Response, HttpError> {
    let (body, content_type, content_disposition) = sink.into_parts();

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    if let Some(value) = content_type {
        headers.insert(header::CONTENT_TYPE, header_value(&value)?);
    }
    if let Some(value) = content_disposition {
        headers.insert(header::CONTENT_DISPOSITION, header_value(&value)?);
    }

    Ok(response)
}

fn header_value(value: &str) -> Result<HeaderValue, HttpError> {
    HeaderValue::from_str(value).map_err(|e| {
        tracing::error!(value, error = %e, "response header value rejected");
        HttpError::Internal("PDF generation failed".to_string())
    })
}
