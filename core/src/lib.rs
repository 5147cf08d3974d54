//! Headless client core for the author/post/comment browser.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps every panel of the
//! client as a plain state machine: the user dropdown, the post list, the
//! post details pane and the comment form.
//!
//! # Design
//! - `BlogClient` is stateless; it holds only `base_url`.
//! - `Dashboard` owns all panel state. Actions return a `PendingCall`; the host
//!   executes the request and reports back through `Dashboard::complete`.
//! - Responses are matched to requests by `RequestToken`, so out-of-order
//!   replies for an older selection are dropped.
//! - `view` derives display flags from state on demand.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod dashboard;
pub mod details;
pub mod error;
pub mod form;
pub mod http;
pub mod load;
pub mod pointer;
pub mod selection;
pub mod types;
pub mod users;
pub mod view;

pub use client::BlogClient;
pub use dashboard::{Call, Completion, Dashboard, PendingCall};
pub use error::ApiError;
pub use form::{CommentForm, Field, FieldErrors};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use load::{LoadState, RequestToken};
pub use pointer::{PointerBus, PointerEvent, Region};
pub use types::{Comment, CommentData, NewComment, Post, User};
pub use users::USER_SELECTOR;
