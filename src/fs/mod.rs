//! Filesystem mapping
//!
//! This module maps request paths to locations beneath the web root:
//! percent-decoding, redirect detection, traversal neutralization,
//! index/auto-index fallback, and directory listing generation.

pub mod autoindex;
pub mod resolver;

pub use resolver::{ResolvedTarget, decode_path, normalize_path, resolve};
