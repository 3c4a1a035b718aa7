#![allow(dead_code)]

use std::sync::Arc;

use bcra_dolar::{Bucket, Settings};
use object_store::{ObjectStore, local::LocalFileSystem, memory::InMemory, path::Path};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const PAGE_PATH: &str = "/PublicacionesEstadisticas/Evolucion_moneda.asp";

pub fn page(headers: &[&str], rows: &[&[&str]]) -> String {
    let head: String = headers.iter().map(|h| format!("<th>{}</th>", h)).collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row.iter().map(|c| format!("<td>{}</td>", c)).collect();
            format!("<tr>{}</tr>\n", cells)
        })
        .collect();
    format!(
        "<html><body>\n<table class=\"form-table\">\n<tr>{}</tr>\n{}</table>\n</body></html>",
        head, body
    )
}

pub fn bcra_page() -> String {
    page(
        &["Fecha", "Dólar Estadounidense", "Euro"],
        &[
            &["29/02/2024", "849,75", "919,10"],
            &["01/03/2024", "850,25", "920,40"],
        ],
    )
}

pub async fn serve_page(body: String) -> MockServer {
    serve_status(200, body).await
}

pub async fn serve_status(status: u16, body: String) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAGE_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(&server)
        .await;
    server
}

pub fn settings_for(server: &MockServer) -> Settings {
    Settings {
        url: format!("{}{}", server.uri(), PAGE_PATH),
        bucket: "test-bucket".to_string(),
        ..Settings::default()
    }
}

pub fn memory_bucket() -> Bucket {
    Bucket::new("test-bucket", Arc::new(InMemory::new()))
}

pub async fn stored(bucket: &Bucket, key: &str) -> Option<String> {
    let got = bucket.store().get(&Path::from(key)).await.ok()?;
    let bytes = got.bytes().await.ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// A bucket rooted at a regular file, so every write fails.
pub fn unwritable_bucket(name: &str) -> Bucket {
    let file = std::env::temp_dir().join(format!("bcra-dolar-{}-{}", name, std::process::id()));
    std::fs::write(&file, b"").unwrap();
    let store = LocalFileSystem::new_with_prefix(&file).unwrap();
    Bucket::new("broken-bucket", Arc::new(store))
}

/// URL on a local port nothing listens on.
pub fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, PAGE_PATH)
}
