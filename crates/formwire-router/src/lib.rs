//! # formwire-router
//!
//! A lightweight async URL router and the request-parsing primitives that
//! `formwire` forms are served through.
//!
//! This crate provides:
//! - Path pattern matching with `:name` and `:name{regex}` parameters
//! - HTTP method-based routing with 404/405 fallbacks
//! - Query string, url-encoded and multipart body parsing into [`FormData`]
//!
//! ## Quick Start
//!
//! ```
//! use formwire_router::{Request, Response, Router};
//!
//! async fn user_handler(req: Request) -> Response {
//!     let id = req.params.get("id").unwrap_or("unknown");
//!     Response::text(format!("User: {id}"))
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let router = Router::new().get(r"/users/:id{\d+}", user_handler);
//!
//! let response = router.handle(Request::get("/users/123")).await;
//! assert_eq!(response.body_string(), Some("User: 123".to_string()));
//! # });
//! ```
//!
//! ## Form Bodies
//!
//! ```ignore
//! async fn submit(req: Request) -> Response {
//!     match req.form_data().await {
//!         Ok(data) => Response::text(data.text("name").unwrap_or_default().to_string()),
//!         Err(_) => Response::bad_request(),
//!     }
//! }
//! ```

mod body;
mod error;
mod path;
mod request;
mod response;
mod router;

pub use body::{FormData, FormPart, UploadedFile};
pub use error::{Result, RouterError};
pub use path::PathPattern;
pub use request::{Method, PathParams, Request};
pub use response::Response;
pub use router::{BoxFuture, Handler, Route, Router};
