use lark_image_resolver::{
    auth::MockTokenClient,
    image::{
        ContentAcquirer, ImageApiService, ImageKeyCache, ImageResolver, LruImageKeyCache,
        OpenApiImageClient,
    },
    models::{GET_IMAGE_PATH, UPLOAD_IMAGE_PATH},
    openapi::OpenApiHttpClient,
    Error,
};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    resolver: ImageResolver,
    api: Arc<OpenApiImageClient>,
    cache: Arc<LruImageKeyCache>,
    tokens: MockTokenClient,
}

fn harness(server: &MockServer, capacity: usize) -> Harness {
    let tokens = MockTokenClient::new().with_token("t-integration".to_string());
    let api = Arc::new(OpenApiImageClient::new(
        OpenApiHttpClient::new_with_client(server.uri(), reqwest::Client::new()),
        Arc::new(tokens.clone()),
    ));
    let cache = Arc::new(LruImageKeyCache::new(capacity));
    let resolver = ImageResolver::new(ContentAcquirer::default(), api.clone(), cache.clone());

    Harness {
        resolver,
        api,
        cache,
        tokens,
    }
}

fn upload_ok(image_key: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "code": 0,
        "msg": "ok",
        "data": { "image_key": image_key }
    }))
}

#[tokio::test]
async fn test_resolve_path_uploads_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_IMAGE_PATH))
        .and(header("Authorization", "Bearer t-integration"))
        .and(body_string_contains("name=\"image_type\"\r\n\r\nmessage"))
        .respond_with(upload_ok("img_v2_abc"))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, 100);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"fake png image").unwrap();
    let image_path = file.path().to_string_lossy().to_string();

    let first = h
        .resolver
        .resolve("tenant", "cli_app", "", &image_path)
        .await
        .unwrap();
    let second = h
        .resolver
        .resolve("tenant", "cli_app", "", &image_path)
        .await
        .unwrap();

    assert_eq!(first, "img_v2_abc");
    assert_eq!(second, "img_v2_abc");
    assert_eq!(h.cache.get(&image_path).as_deref(), Some("img_v2_abc"));
    assert_eq!(h.tokens.get_issue_count(), 1);
}

#[tokio::test]
async fn test_resolve_url_uses_last_segment_as_filename() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dir/pic.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fake jpeg bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_IMAGE_PATH))
        .and(body_string_contains("filename=\"pic.jpg\""))
        .respond_with(upload_ok("img_v2_url"))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, 100);
    let url = format!("{}/dir/pic.jpg", server.uri());

    let key = h.resolver.resolve("tenant", "cli_app", &url, "").await.unwrap();

    assert_eq!(key, "img_v2_url");
    assert_eq!(h.cache.get(&url).as_deref(), Some("img_v2_url"));
}

#[tokio::test]
async fn test_download_failure_skips_upload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dir/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(upload_ok("never"))
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, 100);
    let url = format!("{}/dir/missing.jpg", server.uri());

    let err = h
        .resolver
        .resolve("tenant", "cli_app", &url, "")
        .await
        .unwrap_err();

    match err {
        Error::GenerateImageFailed(inner) => {
            assert!(matches!(*inner, Error::DownloadFailed { .. }))
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(h.cache.is_empty());
}

#[tokio::test]
async fn test_token_expired_disables_token_and_leaves_cache() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 99991663,
            "msg": "token expired"
        })))
        .mount(&server)
        .await;

    let h = harness(&server, 100);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"img").unwrap();
    let image_path = file.path().to_string_lossy().to_string();

    let err = h
        .resolver
        .resolve("tenant", "cli_app", "", &image_path)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::OpenApiReturnError { code: 99991663, .. }));
    assert_eq!(
        h.tokens.get_disabled(),
        vec![("cli_app".to_string(), "tenant".to_string(), 99991663)]
    );
    assert!(h.cache.is_empty());
}

#[tokio::test]
async fn test_dropped_resolve_leaves_cache_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_IMAGE_PATH))
        .respond_with(upload_ok("img_v2_slow").set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let h = harness(&server, 100);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"img").unwrap();
    let image_path = file.path().to_string_lossy().to_string();

    let result = tokio::time::timeout(
        Duration::from_millis(200),
        h.resolver.resolve("tenant", "cli_app", "", &image_path),
    )
    .await;

    assert!(result.is_err());
    assert!(h.cache.is_empty());
}

#[tokio::test]
async fn test_fetch_image_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GET_IMAGE_PATH))
        .and(query_param("image_key", "img_v2_abc"))
        .and(header("Authorization", "Bearer t-integration"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNG raw".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, 100);

    let bytes = h
        .api
        .get_image("tenant", "cli_app", "img_v2_abc")
        .await
        .unwrap();
    assert_eq!(bytes, b"\x89PNG raw".to_vec());
}
