//! HTTP fetching against a local axum server
//!
//! The server mimics the raw-content host: `/<cookbook>/main/<file>`.

mod helpers;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use helpers::{card_urls, document_with_placeholders, filter_tags, ids};
use pythia_common::config::TomlConfig;
use pythia_common::tree::find_all_by_type;
use pythia_gallery::config::{ConfigOverrides, GallerySettings};
use pythia_gallery::fetcher::{DocumentSource, HttpDocumentSource};
use pythia_gallery::FetchError;
use std::time::Duration;

async fn document(Path((id, file)): Path<(String, String)>) -> Response {
    match (id.as_str(), file.as_str()) {
        ("slow", _) => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            "project:\n  title: Slow\n".into_response()
        }
        ("broken", "_gallery_info.yml") => {
            (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
        }
        ("garbage", "_gallery_info.yml") => "thumbnail: [unclosed".into_response(),
        (_, "myst.yml") => format!("project:\n  title: {} Cookbook\n", id).into_response(),
        (_, "_gallery_info.yml") => format!(
            "thumbnail: images/{}.png\ntags:\n  domains: [{}]\n  packages: [xarray]\n",
            id, id
        )
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Start the server on an ephemeral port; returns its base URL
async fn serve() -> String {
    let app = Router::new().route("/:id/main/:file", get(document));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_source_returns_body() {
    let base = serve().await;
    let source = HttpDocumentSource::new(Duration::from_secs(5)).unwrap();

    let body = source.fetch(&format!("{}/ocean/main/myst.yml", base)).await.unwrap();

    assert_eq!(body, "project:\n  title: ocean Cookbook\n");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_source_reports_status() {
    let base = serve().await;
    let source = HttpDocumentSource::new(Duration::from_secs(5)).unwrap();

    let err = source
        .fetch(&format!("{}/broken/main/_gallery_info.yml", base))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500, .. }), "got {:?}", err);

    let err = source
        .fetch(&format!("{}/ocean/main/README.md", base))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }), "got {:?}", err);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_source_request_timeout() {
    let base = serve().await;
    let source = HttpDocumentSource::new(Duration::from_millis(200)).unwrap();

    let err = source
        .fetch(&format!("{}/slow/main/myst.yml", base))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }), "got {:?}", err);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_source_connection_refused() {
    // Bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpDocumentSource::new(Duration::from_secs(2)).unwrap();
    let err = source
        .fetch(&format!("http://{}/a/main/myst.yml", addr))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }), "got {:?}", err);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pipeline_over_http_skips_failures() {
    let base = serve().await;
    let overrides = ConfigOverrides {
        raw_base_url: Some(base.clone()),
        book_base_url: Some("http://books.test".to_string()),
        workers: Some(4),
        task_timeout_secs: Some(1),
        ..Default::default()
    };
    let settings = GallerySettings::resolve(&overrides, &TomlConfig::default()).unwrap();
    let pipeline = pythia_gallery::build_pipeline(&settings).unwrap();

    let outcome = pipeline
        .build(&ids(&["ocean", "broken", "slow", "garbage", "radar"]))
        .await;

    assert_eq!(
        card_urls(&outcome.fragment),
        ["http://books.test/ocean", "http://books.test/radar"]
    );
    assert_eq!(filter_tags(&outcome.fragment, "domains"), ["ocean", "radar"]);
    assert_eq!(filter_tags(&outcome.fragment, "packages"), ["xarray"]);
    assert_eq!(outcome.stats.fetch_failed, 3);

    let image = outcome.fragment.children()[1].children()[0].children()[1].children()[0]
        .prop("url")
        .cloned();
    assert_eq!(image, Some(serde_json::json!(format!("{}/ocean/main/images/ocean.png", base))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_transform_over_http() {
    let base = serve().await;
    let dir = tempfile::TempDir::new().unwrap();
    let list = dir.path().join("cookbook_gallery.txt");
    std::fs::write(&list, "radar\nocean\n").unwrap();

    let overrides = ConfigOverrides {
        raw_base_url: Some(base),
        resource_list: Some(list),
        ..Default::default()
    };
    let settings = GallerySettings::resolve(&overrides, &TomlConfig::default()).unwrap();
    let pipeline = pythia_gallery::build_pipeline(&settings).unwrap();

    let output = pipeline
        .transform(document_with_placeholders(1), &settings.resource_list)
        .await
        .unwrap();

    assert!(find_all_by_type(&output, "pythia-cookbooks").is_empty());
    let titles = find_all_by_type(&output, "cardTitle");
    let titles: Vec<&str> = titles
        .iter()
        .map(|t| t["children"][0]["value"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["radar Cookbook", "ocean Cookbook"]);
}
