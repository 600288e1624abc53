//! JSON request handlers for the render and publish paths.
//!
//! Handlers never fail: every outcome is a structured payload.

pub(crate) mod publish;
pub(crate) mod render;
