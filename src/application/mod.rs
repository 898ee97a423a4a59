//! Application layer
//!
//! Use cases that orchestrate domain logic for the pages. Auth use cases
//! drive a caller-owned session client; the rest read through ports.

pub mod auth;
pub mod dashboard;
pub mod profile;
