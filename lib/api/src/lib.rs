//! # vendorq API
//!
//! HTTP surface for the qualification engine. One POST endpoint runs
//! qualification queries; the GET endpoints expose corpus introspection
//! and service health.

pub mod rest;

pub use rest::RestApi;
