//! Boundary layer for transport adapters (CLI today).
//!
//! # Responsibility
//! - Own request validation that the services assume has already happened.
//! - Expose typed request/response envelopes with serde support.

pub mod classroom_api;
pub mod dto;
