//! Synchronous client core for a courier shipping API.
//!
//! # Overview
//! Builds `ApiRequest` values and decodes `ApiResponse` values without
//! touching the network (host-does-IO pattern). The caller supplies a
//! [`Transport`] that executes the actual HTTP round-trip, making the
//! core fully deterministic and testable.
//!
//! # Design
//! - `CourierClient` holds the endpoint configuration and an error log
//!   scoped to the client instance; the transport is injected.
//! - Each carrier command is split into payload construction
//!   (`payload::*`) and reply decoding (`response::decode`), so the I/O
//!   boundary is explicit.
//! - Every call ends in a typed [`Outcome`] instead of terminating the
//!   process; the caller decides what a 502 or a 400 means for it.
//! - Label bytes leave through a [`LabelSink`], so the same workflow can
//!   write to disk or into an HTTP response body.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod outcome;
pub mod payload;
pub mod response;
pub mod sink;
pub mod transport;
pub mod types;

pub use client::{ClientConfig, CourierClient};
pub use outcome::Outcome;
pub use sink::{FileSink, LabelSink, ResponseSink};
pub use transport::{ApiRequest, Transport};
pub use types::{OrderDetails, ShipmentParams};
