mod common;

use std::fs;
use std::sync::Arc;

use common::synthetic_image::solid_png;
use pencil_sketch::server::{routes, ServiceContext};
use pencil_sketch::sketch::SketchParams;
use pencil_sketch::storage::ArtifactStore;
use tempfile::TempDir;

const MAX_UPLOAD: u64 = 25 * 1024 * 1024;
const BOUNDARY: &str = "test-multipart-boundary";

fn test_context(tmp: &TempDir) -> Arc<ServiceContext> {
    Arc::new(ServiceContext {
        store: ArtifactStore::new(tmp.path().join("uploads"), tmp.path().join("outputs")),
        params: SketchParams::default(),
    })
}

fn multipart_body(filename: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn post_image(
    ctx: Arc<ServiceContext>,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> warp::http::Response<bytes::Bytes> {
    let filter = routes(ctx, MAX_UPLOAD, None);
    warp::test::request()
        .method("POST")
        .path("/process-image")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(multipart_body(filename, content_type, bytes))
        .reply(&filter)
        .await
}

#[tokio::test]
async fn solid_red_upload_returns_a_light_sketch_png() {
    let tmp = tempfile::tempdir().unwrap();
    let png = solid_png(100, 100, [255, 0, 0]);

    let resp = post_image(test_context(&tmp), "red.png", "image/png", &png).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "image/png");

    let decoded = image::load_from_memory(resp.body())
        .expect("response body must be a decodable image")
        .to_luma8();
    assert_eq!((decoded.width(), decoded.height()), (100, 100));

    let pixels = decoded.as_raw();
    let mean: f64 = pixels.iter().map(|&v| v as f64).sum::<f64>() / pixels.len() as f64;
    assert!(mean > 200.0, "solid input should sketch near-white, mean {mean:.1}");
}

#[tokio::test]
async fn undecodable_blob_yields_error_body_and_no_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let blob = b"\x00\x01\x02 this is not any image container \xff\xfe";

    let resp = post_image(test_context(&tmp), "garbage.bin", "application/octet-stream", blob).await;

    assert_eq!(resp.status(), 500);
    let body: serde_json::Value =
        serde_json::from_slice(resp.body()).expect("failure body must be JSON");
    let message = body["error"].as_str().expect("error field must be a string");
    assert!(
        message.contains("decode"),
        "error should describe the decode failure: {message}"
    );

    // decode fails before the first write, so the areas were never created
    assert!(!tmp.path().join("uploads").exists());
    assert!(!tmp.path().join("outputs").exists());
}

#[tokio::test]
async fn upload_persists_original_and_derived_sketch() {
    let tmp = tempfile::tempdir().unwrap();
    let png = solid_png(64, 48, [10, 200, 120]);

    let resp = post_image(test_context(&tmp), "cat.jpg", "image/jpeg", &png).await;
    assert_eq!(resp.status(), 200);

    let original = tmp.path().join("uploads").join("cat.jpg");
    assert_eq!(
        fs::read(&original).expect("original must be persisted"),
        png,
        "persisted original must be byte-identical to the upload"
    );

    let sketch_path = tmp.path().join("outputs").join("cat_sketch.png");
    let sketch_bytes = fs::read(&sketch_path).expect("sketch must be persisted");
    assert_eq!(
        sketch_bytes.as_slice(),
        resp.body().as_ref(),
        "persisted sketch must match the response body"
    );

    let decoded = image::load_from_memory(&sketch_bytes).unwrap().to_luma8();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));
}

#[tokio::test]
async fn empty_multipart_form_is_reported_as_upload_error() {
    let tmp = tempfile::tempdir().unwrap();
    let filter = routes(test_context(&tmp), MAX_UPLOAD, None);

    let body = format!("--{BOUNDARY}--\r\n");
    let resp = warp::test::request()
        .method("POST")
        .path("/process-image")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), 500);
    let parsed: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert!(parsed["error"].as_str().unwrap().contains("upload"));
}

#[tokio::test]
async fn oversized_upload_is_reported_as_json() {
    let tmp = tempfile::tempdir().unwrap();
    // cap well below the body size so the multipart filter refuses it
    let filter = routes(test_context(&tmp), 64, None);

    let png = solid_png(100, 100, [255, 0, 0]);
    let body = multipart_body("red.png", "image/png", &png);
    assert!(body.len() > 64);

    let resp = warp::test::request()
        .method("POST")
        .path("/process-image")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .reply(&filter)
        .await;

    assert_eq!(resp.status(), 413);
    let parsed: serde_json::Value =
        serde_json::from_slice(resp.body()).expect("rejection body must be JSON");
    let message = parsed["error"].as_str().expect("error field must be a string");
    assert!(
        message.contains("size limit"),
        "error should describe the size cap: {message}"
    );
    assert!(!tmp.path().join("uploads").exists());
}

#[tokio::test]
async fn non_multipart_request_is_reported_as_json() {
    let tmp = tempfile::tempdir().unwrap();
    let filter = routes(test_context(&tmp), MAX_UPLOAD, None);

    let resp = warp::test::request()
        .method("POST")
        .path("/process-image")
        .body("plain body, no multipart framing")
        .reply(&filter)
        .await;

    assert!(!resp.status().is_success());
    let parsed: serde_json::Value =
        serde_json::from_slice(resp.body()).expect("rejection body must be JSON");
    assert!(parsed["error"].is_string());
    assert!(!tmp.path().join("uploads").exists());
}
