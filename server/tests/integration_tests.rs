use std::collections::HashMap;
use task_server::config::{Config, LogFormat};
use task_server::setup::{create_server, create_store, ensure_database_directory};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn file_config(temp_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.database.url = Some(format!(
        "sqlite://{}",
        temp_dir.path().join("tasks.db").display()
    ));
    config
}

/// Minimal HTTP/1.1 exchange; returns the raw response text
async fn raw_request(
    addr: std::net::SocketAddr,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let body = body.unwrap_or("");
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
         Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_server_startup_with_sqlite() {
    let temp_dir = TempDir::new().unwrap();
    let config = file_config(&temp_dir);

    let store = create_store(&config).await;
    assert!(store.is_ok(), "Failed to create store: {:?}", store.err());
}

#[test]
fn test_configuration_loading() {
    let config = Config::load(None, &HashMap::new()).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.server.listen_addr, "127.0.0.1");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_environment_overrides() {
    let vars: HashMap<String, String> = [
        ("DATABASE_URL", "sqlite://test_env.db"),
        ("LISTEN_ADDR", "0.0.0.0"),
        ("LOG_LEVEL", "debug"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let config = Config::load(None, &vars).unwrap();

    assert_eq!(config.database.url, Some("sqlite://test_env.db".to_string()));
    assert_eq!(config.server.listen_addr, "0.0.0.0");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_database_directory_creation() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("dir").join("test.db");
    let database_url = format!("sqlite://{}", db_path.display());

    assert!(ensure_database_directory(&database_url).is_ok());
    assert!(db_path.parent().unwrap().exists());
}

#[tokio::test]
async fn test_serves_tasks_over_tcp_and_shuts_down() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_store(&file_config(&temp_dir)).await.unwrap();
    let server = create_server(store);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_listener(listener, async {
        let _ = shutdown_rx.await;
    }));

    let health = raw_request(addr, "GET", "/health", None).await;
    assert!(health.starts_with("HTTP/1.1 200"), "{health}");
    assert!(health.ends_with("OK"));

    let body =
        r#"{"title":"Buy milk","author":"Jo","description":"milk","priority":3,"complete":false}"#;
    let created = raw_request(addr, "POST", "/tasks", Some(body)).await;
    assert!(created.starts_with("HTTP/1.1 201"), "{created}");

    let fetched = raw_request(addr, "GET", "/tasks/1", None).await;
    assert!(fetched.starts_with("HTTP/1.1 200"), "{fetched}");
    assert!(fetched.contains("\"title\":\"Buy milk\""));

    let invalid = raw_request(addr, "GET", "/tasks/0", None).await;
    assert!(invalid.starts_with("HTTP/1.1 422"), "{invalid}");

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_data_survives_store_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let config = file_config(&temp_dir);

    {
        let store = create_store(&config).await.unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(create_server(store.clone()).serve_listener(listener, async {
            let _ = rx.await;
        }));

        let body =
            r#"{"title":"Persist me","author":"Jo","description":"kept on disk","priority":2}"#;
        let created = raw_request(addr, "POST", "/tasks", Some(body)).await;
        assert!(created.starts_with("HTTP/1.1 201"), "{created}");

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
        store.close().await;
    }

    let reopened = create_store(&config).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(create_server(reopened).serve_listener(listener, async {
        let _ = rx.await;
    }));

    let listed = raw_request(addr, "GET", "/tasks", None).await;
    assert!(listed.contains("Persist me"), "{listed}");

    tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
