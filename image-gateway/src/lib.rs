//! HTTP gateway in front of a single object-storage bucket.
//!
//! `GET /image/<key>` and `GET /download/<key>` return a stored object with its
//! declared content type, `POST /upload` stores a multipart file under
//! `<key>/<uuid>/original` and answers with that key in `Location`.

pub mod api;
pub mod config;
pub mod error;
pub mod service;
pub mod storage;
pub mod utils;

pub use api::create_router;
pub use utils::state::AppState;
