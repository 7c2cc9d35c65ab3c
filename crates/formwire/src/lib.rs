//! # formwire
//!
//! Declare a form once and get its markup, its validator and its route handler
//! from the same field list.
//!
//! This crate provides:
//! - A closed set of typed field kinds with per-kind options
//! - HTML rendering with path parameter substitution
//! - Validation and coercion of submitted values into a typed record
//! - A submission pipeline registered on a [`formwire_router::Router`]
//!
//! ## Quick Start
//!
//! ```
//! use formwire::{FormBuilder, NumberOptions, RenderOptions, TextOptions};
//! use formwire_router::{Request, Response, Router};
//!
//! let form = FormBuilder::new("/signup")
//!     .add_text("name", "Name", TextOptions::new().min_length(2))
//!     .add_number("age", "Age", NumberOptions::new().min(18.0).integer())
//!     .side_effect(|_req, data| async move {
//!         assert_eq!(data.integer("age"), Some(18));
//!         Ok(())
//!     })
//!     .on_success(|_req| async { Response::redirect("/welcome") })
//!     .on_error(|_req, err| async move { Response::unprocessable_entity().body(err.to_string()) })
//!     .build()
//!     .unwrap();
//!
//! let html = form.render(&RenderOptions::new()).unwrap();
//! assert!(html.starts_with(r#"<form action="/signup" method="POST">"#));
//!
//! let mut router = Router::new();
//! form.register_route(&mut router).unwrap();
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let res = router.handle(Request::post("/signup").form_body("name=Jo&age=18")).await;
//! assert_eq!(res.status, 302);
//!
//! let res = router.handle(Request::post("/signup").form_body("name=J&age=17")).await;
//! assert_eq!(res.status, 422);
//! # });
//! ```
//!
//! ## Path Parameters
//!
//! The form path may carry `:name` and `:name{regex}` parameters. Rendering
//! needs a value for each, and constrained values must match in full:
//!
//! ```
//! use formwire::{FormBuilder, FormError, RenderOptions};
//! use formwire_router::Response;
//!
//! let form = FormBuilder::new(r"/posts/:id{\d+}/comments")
//!     .on_success(|_req| async { Response::ok() })
//!     .on_error(|_req, _err| async { Response::bad_request() })
//!     .build()
//!     .unwrap();
//!
//! let html = form.render(&RenderOptions::new().url_param("id", "7")).unwrap();
//! assert!(html.contains(r#"action="/posts/7/comments""#));
//!
//! let err = form.render(&RenderOptions::new().url_param("id", "seven")).unwrap_err();
//! assert!(matches!(err, FormError::InvalidPathParameters(_)));
//! ```

mod error;
pub mod fields;
mod form;
mod path;
mod pipeline;
mod schema;
pub mod validation;
mod value;
pub mod widgets;

pub use error::{BoxError, FormError, Result, SubmissionError, ValidationErrors};
pub use fields::{
    CheckboxOptions, DateOptions, FieldKind, FieldSpec, FileOptions, NumberOptions, RangeOptions,
    SelectOption, SelectOptions, TextOptions,
};
pub use form::{Form, FormBuilder, RenderOptions};
pub use path::{parse_path_params, PathParam};
pub use pipeline::{ErrorHandler, RouteTarget, SideEffect, SuccessHandler};
pub use value::{FieldValue, ValidatedData};
