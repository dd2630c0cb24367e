//! Synchronous client core for the pet record API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that sit the three
//! client screens (add, list, update), which drive the API through a
//! `Session` wrapping a host-supplied `Transport`.
//!
//! # Design
//! - `RecordClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the core stays deterministic.
//! - Screens hold only in-memory form/list state for the session.
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod screens;
pub mod session;
pub mod types;

pub use client::RecordClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use screens::{AddScreen, ListScreen, Navigation, UpdateScreen};
pub use session::Session;
pub use types::{Confirmation, ErrorBody, PetRecord, RecordForm};
