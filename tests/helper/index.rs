//! Version index test utilities

use mockito::{Mock, ServerGuard};

/// Trimmed copy of the Node.js release index, newest first
pub const NODE_INDEX: &str = r#"[
    {"version": "v10.2.0", "date": "2018-05-23", "npm": "5.6.0", "lts": false},
    {"version": "v10.1.0", "date": "2018-05-08", "npm": "5.6.0", "lts": false},
    {"version": "v10.0.0", "date": "2018-04-24", "npm": "5.6.0", "lts": false},
    {"version": "v9.11.1", "date": "2018-04-05", "npm": "5.6.0", "lts": false},
    {"version": "v8.11.2", "date": "2018-05-15", "npm": "5.6.0", "lts": "Carbon"},
    {"version": "v8.11.1", "date": "2018-03-29", "npm": "5.6.0", "lts": "Carbon"},
    {"version": "v8.9.0", "date": "2017-10-31", "npm": "5.5.1", "lts": "Carbon"},
    {"version": "v6.14.2", "date": "2018-04-30", "npm": "3.10.10", "lts": "Boron"},
    {"version": "v0.10.48", "date": "2016-10-18", "npm": "2.15.1", "lts": false}
]"#;

/// Serve `body` as the version index, expecting `hits` requests.
/// Returns the mock and the index URL.
pub async fn serve_index(
    server: &mut ServerGuard,
    status: usize,
    body: &str,
    hits: usize,
) -> (Mock, String) {
    let mock = server
        .mock("GET", "/dist/index.json")
        .with_status(status)
        .expect(hits)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    (mock, format!("{}/dist/index.json", server.url()))
}
