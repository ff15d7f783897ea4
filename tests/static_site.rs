use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use temp_dir::TempDir;
use tower::ServiceExt;

mod helpers;

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.child("index.html"), "<div id=\"root\"></div>").unwrap();
    std::fs::create_dir(dir.child("assets")).unwrap();
    std::fs::write(dir.path().join("assets/index-3f2a.js"), "console.log(1)").unwrap();
    dir
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_static_site_served_alongside_relay() {
    let dir = site();
    let mut config = helpers::test_config();
    config.server.static_dir = Some(dir.path().to_string_lossy().into_owned());
    let mailer = helpers::RecordingMailer::new();
    let app = helpers::app_with(config, mailer.clone());

    for page in ["/", "/about", "/products", "/contact"] {
        let response = app.clone().oneshot(get(page)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "page: {page}");
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "no-store, no-cache, must-revalidate"
        );
        assert!(helpers::read_text(response).await.contains("id=\"root\""));
    }

    let response = app
        .clone()
        .oneshot(get("/assets/index-3f2a.js"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "public, max-age=31536000, immutable"
    );

    let response = app
        .oneshot(helpers::send_email_request(None, &helpers::jane()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(mailer.calls(), 1);
}

#[tokio::test]
async fn test_no_static_site_by_default() {
    let app = helpers::app(helpers::RecordingMailer::new());

    let response = app.oneshot(get("/about")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bundle_loads_from_its_own_origin() {
    let dir = site();
    let mut config = helpers::test_config();
    config.server.static_dir = Some(dir.path().to_string_lossy().into_owned());
    let mailer = helpers::RecordingMailer::new();
    let app = helpers::app_with(config, mailer.clone());

    // Module scripts are fetched in CORS mode, so the browser declares the page origin
    for uri in ["/", "/assets/index-3f2a.js"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::HOST, "localhost:3000")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "uri: {uri}");
    }

    let mut request = helpers::send_email_request(Some("http://localhost:3000"), &helpers::jane());
    request
        .headers_mut()
        .insert(header::HOST, "localhost:3000".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(mailer.calls(), 1);
}
