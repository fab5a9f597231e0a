use assert_cmd::Command;
use axum::routing::post;
use axum::Router;
use predicates::str::contains;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

fn wobserver(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wobserver").unwrap();
    cmd.env("WOBSERVER_STORAGE_PATH", dir.path().join("storage.json"));
    cmd.env("WOBSERVER_LOG_DIR", dir.path().join("logs"));
    cmd.env_remove("WOBSERVER_AJAX_SERVER");
    cmd.timeout(std::time::Duration::from_secs(30));
    cmd
}

#[test]
fn doc_id_prints_the_document_id() {
    let dir = TempDir::new().unwrap();
    wobserver(&dir)
        .args(["doc-id", "https://docs.google.com/document/d/abc123XYZ/edit"])
        .assert()
        .success()
        .stdout("abc123XYZ\n");
}

#[test]
fn doc_id_rejects_other_urls() {
    let dir = TempDir::new().unwrap();
    wobserver(&dir)
        .args(["doc-id", "https://docs.google.com/document/d/abc123XYZ"])
        .assert()
        .failure()
        .stderr(contains("Not a Google Docs document URL"));
}

#[test]
fn set_server_is_reported_by_info() {
    let dir = TempDir::new().unwrap();

    wobserver(&dir)
        .args(["set-server", "http://localhost:8888/webapi/"])
        .assert()
        .success()
        .stdout(contains("Stored endpoint set to http://localhost:8888/webapi/"));

    wobserver(&dir)
        .args(["info", "--json"])
        .assert()
        .success()
        .stdout(contains("\"endpoint\": \"http://localhost:8888/webapi/\""));

    wobserver(&dir)
        .args(["set-server", "--clear"])
        .assert()
        .success()
        .stdout(contains("Stored endpoint removed."));

    wobserver(&dir)
        .args(["info"])
        .assert()
        .success()
        .stdout(contains("Endpoint:         https://writing.hopto.org/webapi/"));
}

#[test]
fn set_server_rejects_invalid_urls() {
    let dir = TempDir::new().unwrap();
    wobserver(&dir)
        .args(["set-server", "not a url"])
        .assert()
        .failure()
        .stderr(contains("invalid server url"));
}

#[test]
fn send_rejects_invalid_json() {
    let dir = TempDir::new().unwrap();
    wobserver(&dir)
        .args(["send", "{not json"])
        .assert()
        .failure()
        .stderr(contains("Failed to parse telemetry record"));
}

#[tokio::test(flavor = "multi_thread")]
async fn send_posts_the_record_to_the_configured_server() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let app = Router::new().route(
        "/webapi/",
        post(move |body: String| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(body);
            }
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/webapi/", listener.local_addr().unwrap());
    tokio::spawn(async move { axum::serve(listener, app).await });

    let dir = TempDir::new().unwrap();
    let mut cmd = wobserver(&dir);
    cmd.env("WOBSERVER_AJAX_SERVER", &url);
    cmd.args(["send", r#"{"event":"keystroke","keyCode":65}"#]);

    let assert = tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap();
    assert.success().stdout(contains(format!("Record dispatched to {}", url)));

    let body = rx.recv().await.unwrap();
    assert_eq!(body, r#"{"event":"keystroke","keyCode":65}"#);
}
