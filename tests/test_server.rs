//! End-to-end tests running the real listener on an ephemeral port.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use staticd::config::ServerConfig;
use staticd::http::mime::MimeMap;
use staticd::server::{ServerState, listener};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

fn config_for(root: &Path, auto_index: bool) -> ServerConfig {
    ServerConfig {
        port: 0,
        root: root.to_path_buf(),
        index: "index.html".to_string(),
        mime_map: None,
        auto_index,
        log_requests: false,
        timeout_secs: 30,
    }
}

/// Binds an ephemeral port, spawns the accept loop, returns the address.
fn start(cfg: ServerConfig) -> SocketAddr {
    let socket = listener::bind(cfg.listen_addr()).unwrap();
    let addr = socket.local_addr().unwrap();
    let state = Arc::new(ServerState {
        config: cfg,
        mime: MimeMap::new(),
    });

    tokio::spawn(async move {
        let _ = listener::serve(socket, state).await;
    });

    addr
}

async fn send(addr: SocketAddr, raw: &str) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

fn split_response(response: &[u8]) -> (String, Vec<u8>) {
    let pos = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no header terminator in response");
    (
        String::from_utf8_lossy(&response[..pos]).into_owned(),
        response[pos + 4..].to_vec(),
    )
}

#[tokio::test]
async fn test_serves_file_byte_identical() {
    let tmp = TempDir::new().unwrap();
    // Larger than one write chunk, to cross the streaming boundary.
    let content: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
    fs::write(tmp.path().join("data.bin"), &content).unwrap();

    let addr = start(config_for(tmp.path(), false));
    let response = send(addr, "GET /data.bin HTTP/1.1\r\nHost: test\r\n\r\n").await;
    let (head, body) = split_response(&response);

    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.contains("Content-Length: 20000\r\n"));
    assert_eq!(body, content);
}

#[tokio::test]
async fn test_content_type_from_extension() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("notes.txt"), "hello").unwrap();

    let addr = start(config_for(tmp.path(), false));
    let response = send(addr, "GET /notes.txt HTTP/1.1\r\nHost: test\r\n\r\n").await;
    let (head, body) = split_response(&response);

    assert!(head.contains("Content-Type: text/plain\r\n"));
    assert_eq!(body, b"hello");
}

#[tokio::test]
async fn test_missing_path_is_404_with_canned_page() {
    let tmp = TempDir::new().unwrap();

    let addr = start(config_for(tmp.path(), false));
    let response = send(addr, "GET /nope.html HTTP/1.1\r\nHost: test\r\n\r\n").await;
    let (head, body) = split_response(&response);

    assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(head.contains("Content-Length: 142\r\n"));
    assert_eq!(body.len(), 142);
}

#[tokio::test]
async fn test_non_get_method_is_501_with_allow() {
    let tmp = TempDir::new().unwrap();

    let addr = start(config_for(tmp.path(), false));
    let response = send(addr, "POST / HTTP/1.1\r\nHost: test\r\n\r\n").await;
    let (head, body) = split_response(&response);

    assert!(head.starts_with("HTTP/1.1 501 Method Not Implemented\r\n"));
    assert!(head.contains("Allow: GET\r\n"));
    assert!(head.contains("Content-Length: 168\r\n"));
    assert_eq!(body.len(), 168);
}

#[tokio::test]
async fn test_malformed_request_is_501() {
    let tmp = TempDir::new().unwrap();

    let addr = start(config_for(tmp.path(), false));
    let response = send(addr, "NONSENSE\r\n\r\n").await;
    let (head, _) = split_response(&response);

    assert!(head.starts_with("HTTP/1.1 501 Method Not Implemented\r\n"));
}

#[tokio::test]
async fn test_directory_without_slash_redirects() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();

    let addr = start(config_for(tmp.path(), false));
    let response = send(addr, "GET /sub HTTP/1.1\r\nHost: test\r\n\r\n").await;
    let (head, body) = split_response(&response);

    assert!(head.starts_with("HTTP/1.1 301 Moved Permanently\r\n"));
    assert!(head.contains("Location: /sub/\r\n"));
    assert_eq!(body.len(), 158);
}

#[tokio::test]
async fn test_index_file_served_for_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("index.html"), "<html>home</html>").unwrap();

    let addr = start(config_for(tmp.path(), false));
    let response = send(addr, "GET / HTTP/1.1\r\nHost: test\r\n\r\n").await;
    let (head, body) = split_response(&response);

    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.contains("Content-Type: text/html\r\n"));
    assert_eq!(body, b"<html>home</html>");
}

#[tokio::test]
async fn test_autoindex_lists_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.txt"), "a").unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();

    let addr = start(config_for(tmp.path(), true));
    let response = send(addr, "GET / HTTP/1.1\r\nHost: test\r\n\r\n").await;
    let (head, body) = split_response(&response);
    let page = String::from_utf8(body).unwrap();

    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.contains("Content-Type: text/html\r\n"));
    assert!(page.contains("<a href=\"a.txt\">a.txt</a>"));
    assert!(page.contains("<a href=\"sub/\">sub/</a>"));
    assert_eq!(page.matches("<p><a href=").count(), 2);
}

#[tokio::test]
async fn test_missing_index_without_autoindex_is_404() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.txt"), "a").unwrap();

    let addr = start(config_for(tmp.path(), false));
    let response = send(addr, "GET / HTTP/1.1\r\nHost: test\r\n\r\n").await;
    let (head, _) = split_response(&response);

    assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[tokio::test]
async fn test_traversal_cannot_reach_outside_root() {
    let parent = TempDir::new().unwrap();
    let root = parent.path().join("www");
    fs::create_dir(&root).unwrap();
    fs::write(parent.path().join("secret.txt"), "top secret").unwrap();

    let addr = start(config_for(&root, false));

    for raw in [
        "GET /../secret.txt HTTP/1.1\r\n\r\n",
        "GET /../../secret.txt HTTP/1.1\r\n\r\n",
        "GET /%2e%2e/secret.txt HTTP/1.1\r\n\r\n",
    ] {
        let response = send(addr, raw).await;
        let (head, body) = split_response(&response);
        assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"), "{}", raw);
        assert!(!body.windows(10).any(|w| w == b"top secret"), "{}", raw);
    }
}

#[tokio::test]
async fn test_concurrent_clients_are_isolated() {
    let tmp = TempDir::new().unwrap();
    for i in 0..8 {
        fs::write(
            tmp.path().join(format!("file{}.txt", i)),
            format!("contents of file {}", i),
        )
        .unwrap();
    }

    let addr = start(config_for(tmp.path(), false));

    let mut handles = Vec::new();
    for i in 0..8 {
        handles.push(tokio::spawn(async move {
            let raw = format!("GET /file{}.txt HTTP/1.1\r\nHost: test\r\n\r\n", i);
            let response = send(addr, &raw).await;
            let (head, body) = split_response(&response);
            assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
            assert_eq!(body, format!("contents of file {}", i).into_bytes());
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn test_repeated_get_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("page.html"), "<html>same</html>").unwrap();

    let addr = start(config_for(tmp.path(), false));
    let first = send(addr, "GET /page.html HTTP/1.1\r\nHost: test\r\n\r\n").await;
    let second = send(addr, "GET /page.html HTTP/1.1\r\nHost: test\r\n\r\n").await;

    assert_eq!(first, second);
}
