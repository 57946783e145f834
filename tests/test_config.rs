use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use staticd::config::ServerConfig;

#[test]
fn test_config_defaults() {
    let cfg = ServerConfig::try_parse_from(["staticd"]).unwrap();

    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.root, PathBuf::from("."));
    assert_eq!(cfg.index, "index.html");
    assert_eq!(cfg.mime_map, None);
    assert!(!cfg.auto_index);
    assert!(!cfg.log_requests);
    assert_eq!(cfg.timeout_secs, 30);
}

#[test]
fn test_config_long_flags() {
    let cfg = ServerConfig::try_parse_from([
        "staticd",
        "--port",
        "9090",
        "--root",
        "/srv/www",
        "--index",
        "home.html",
        "--mime-map",
        "/etc/mime.types",
        "--auto-index",
        "--log-requests",
        "--timeout-secs",
        "5",
    ])
    .unwrap();

    assert_eq!(cfg.port, 9090);
    assert_eq!(cfg.root, PathBuf::from("/srv/www"));
    assert_eq!(cfg.index, "home.html");
    assert_eq!(cfg.mime_map, Some(PathBuf::from("/etc/mime.types")));
    assert!(cfg.auto_index);
    assert!(cfg.log_requests);
    assert_eq!(cfg.timeout_secs, 5);
}

#[test]
fn test_config_short_flags() {
    let cfg = ServerConfig::try_parse_from([
        "staticd", "-p", "3000", "-r", "/tmp", "-i", "idx.html", "-a", "-l",
    ])
    .unwrap();

    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.root, PathBuf::from("/tmp"));
    assert_eq!(cfg.index, "idx.html");
    assert!(cfg.auto_index);
    assert!(cfg.log_requests);
}

#[test]
fn test_config_rejects_invalid_port() {
    assert!(ServerConfig::try_parse_from(["staticd", "-p", "notaport"]).is_err());
    assert!(ServerConfig::try_parse_from(["staticd", "-p", "99999"]).is_err());
}

#[test]
fn test_listen_addr_covers_all_interfaces() {
    let cfg = ServerConfig::try_parse_from(["staticd", "-p", "8080"]).unwrap();

    let addr: SocketAddr = cfg.listen_addr();
    assert_eq!(addr.to_string(), "0.0.0.0:8080");
}

#[test]
fn test_io_timeout_from_seconds() {
    let cfg = ServerConfig::try_parse_from(["staticd", "--timeout-secs", "7"]).unwrap();

    assert_eq!(cfg.io_timeout(), Duration::from_secs(7));
}
