//! staticd - Minimal Static-File HTTP Server
//!
//! Core library for serving a directory tree over HTTP/1.1.

pub mod config;
pub mod fs;
pub mod http;
pub mod server;
