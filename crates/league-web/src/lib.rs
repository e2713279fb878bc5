//! Futsal league web entrypoint and common exports.
//!
//! This crate hosts the Dioxus UI. All remote work goes through the
//! view-models in `league-client`; the pages here only render their state
//! and forward user input.

pub mod app;
pub mod app_root;

pub use app::{components, pages, routes};
