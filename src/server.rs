//! HTTP boundary: one multipart upload route returning the sketch PNG.
//!
//! Flow per request: collect the file part → decode → sketch → PNG-encode →
//! persist original then sketch → respond with the PNG. Every stage error is
//! flattened here into a 500 with a `{"error": ...}` body; the variant
//! distinction only survives into the logs.
//!
//! Decode, transform, and encode all complete before the first byte is
//! persisted, so their failures leave no artifacts behind. A storage failure
//! after the original was written can leave the pair inconsistent; accepted.
use std::convert::Infallible;
use std::sync::Arc;

use bytes::BufMut;
use futures::TryStreamExt;
use serde::Serialize;
use warp::http::header::CONTENT_TYPE;
use warp::http::StatusCode;
use warp::multipart::{FormData, Part};
use warp::{Filter, Rejection, Reply};

use crate::config::ServiceConfig;
use crate::error::{SketchError, SketchResult};
use crate::image::codec;
use crate::sketch::{sketch, SketchParams};
use crate::storage::ArtifactStore;

/// Per-process state shared by every request.
#[derive(Clone, Debug)]
pub struct ServiceContext {
    pub store: ArtifactStore,
    pub params: SketchParams,
}

impl ServiceContext {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            store: ArtifactStore::new(&config.uploads_dir, &config.outputs_dir),
            params: config.sketch.clone(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// `POST /process-image` with CORS applied.
pub fn routes(
    ctx: Arc<ServiceContext>,
    max_upload_bytes: u64,
    allowed_origin: Option<&str>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let ctx = warp::any().map(move || ctx.clone());
    warp::path("process-image")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::multipart::form().max_length(max_upload_bytes))
        .and(ctx)
        .and_then(handle_upload)
        .recover(recover_rejection)
        .with(cors_layer(allowed_origin))
}

/// Run the service until the process is stopped.
pub async fn serve(config: ServiceConfig) {
    let ctx = Arc::new(ServiceContext::from_config(&config));
    tracing::info!(
        listen = %config.listen,
        uploads = %config.uploads_dir.display(),
        outputs = %config.outputs_dir.display(),
        "starting sketch service"
    );
    let filter = routes(ctx, config.max_upload_bytes, config.allowed_origin.as_deref());
    warp::serve(filter).run(config.listen).await;
}

fn cors_layer(allowed_origin: Option<&str>) -> warp::filters::cors::Cors {
    let cors = warp::cors()
        .allow_credentials(true)
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"])
        .allow_headers(vec!["content-type", "authorization", "accept", "origin"]);
    match allowed_origin {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_any_origin(),
    }
    .build()
}

async fn handle_upload(
    form: FormData,
    ctx: Arc<ServiceContext>,
) -> Result<Box<dyn Reply>, Rejection> {
    let reply: Box<dyn Reply> = match read_file_part(form).await {
        Ok((filename, bytes)) => match process_upload(&ctx, &filename, &bytes) {
            Ok(png) => Box::new(warp::reply::with_header(png, CONTENT_TYPE, "image/png")),
            Err(err) => {
                tracing::error!(%filename, error = %err, "request failed");
                error_reply(&err)
            }
        },
        Err(err) => {
            tracing::warn!(error = %err, "upload rejected");
            error_reply(&err)
        }
    };
    Ok(reply)
}

fn error_reply(err: &SketchError) -> Box<dyn Reply> {
    Box::new(json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        err.to_string(),
    ))
}

fn json_error(status: StatusCode, message: String) -> impl Reply {
    warp::reply::with_status(warp::reply::json(&ErrorBody { error: message }), status)
}

/// Convert filter rejections (oversized upload, missing multipart framing,
/// wrong method or path) into the same JSON error body the pipeline uses, so
/// callers never see a plain-text failure.
async fn recover_rejection(rejection: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "no such route".to_string())
    } else if rejection
        .find::<warp::reject::PayloadTooLarge>()
        .is_some()
    {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "upload exceeds the configured size limit".to_string(),
        )
    } else if rejection
        .find::<warp::reject::MethodNotAllowed>()
        .is_some()
    {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".to_string())
    } else {
        (
            StatusCode::BAD_REQUEST,
            format!("malformed request: {rejection:?}"),
        )
    };
    tracing::warn!(%status, %message, "request rejected before the pipeline");
    Ok(json_error(status, message))
}

/// Drain the multipart form and return the file part's name and bytes.
///
/// Prefers the part named `file`; falls back to the first part so permissive
/// clients still work.
async fn read_file_part(form: FormData) -> SketchResult<(String, Vec<u8>)> {
    let mut parts: Vec<Part> = form
        .try_collect()
        .await
        .map_err(|e| SketchError::upload(format!("malformed multipart stream: {e}")))?;
    if parts.is_empty() {
        return Err(SketchError::upload("no file part in upload"));
    }
    let idx = parts.iter().position(|p| p.name() == "file").unwrap_or(0);
    let part = parts.swap_remove(idx);

    let filename = crate::storage::safe_file_name(part.filename().unwrap_or(""));
    let bytes = part
        .stream()
        .try_fold(Vec::new(), |mut acc, data| {
            acc.put(data);
            async move { Ok(acc) }
        })
        .await
        .map_err(|e| SketchError::upload(format!("failed to read upload: {e}")))?;
    Ok((filename, bytes))
}

/// Boundary orchestration: decode, sketch, encode, persist, return the PNG.
pub fn process_upload(
    ctx: &ServiceContext,
    filename: &str,
    bytes: &[u8],
) -> SketchResult<Vec<u8>> {
    let input = codec::decode_rgb(bytes)?;
    tracing::info!(%filename, width = input.w, height = input.h, "image received");
    let result = sketch(&input, &ctx.params)?;
    let png = codec::encode_gray_png(&result)?;
    ctx.store.store_original(filename, bytes)?;
    ctx.store.store_sketch(filename, &png)?;
    Ok(png)
}
