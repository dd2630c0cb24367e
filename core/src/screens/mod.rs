//! The three client screens: add, list, and update.
//!
//! # Design
//! A screen owns only its in-memory form or list state and talks to the API
//! through a `Session`. Failures are absorbed into the screen's `error`
//! string (the server's `message`, or a fixed fallback) and also returned to
//! the caller, so a host can both render the screen and log the cause.

mod add;
mod list;
mod update;

pub use add::AddScreen;
pub use list::ListScreen;
pub use update::UpdateScreen;

use crate::error::ApiError;

/// Where the host should go after an update screen submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    ToList,
    Stay,
}

fn user_message(err: &ApiError, fallback: &str) -> String {
    err.server_message().unwrap_or(fallback).to_string()
}
