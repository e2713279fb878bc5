//! Shared type definitions for the league manager
//!
//! This crate contains the lightweight types used by both the client
//! view-models and the WASM web UI: remote record shapes, drafts, list
//! filters, session snapshots and the display rows the views render.

pub mod auth;
pub mod display;
pub mod filter;
pub mod nav;
pub mod records;
pub mod validation;

pub use auth::{SessionClaims, SessionSnapshot, SignUpOutcome, UserAttribute};
pub use filter::ListFilter;
pub use nav::Destination;
pub use records::{Draft, Match, MatchDraft, Record, RecordId, Standing, Team};
pub use validation::ValidationError;
