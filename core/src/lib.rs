//! Blocking API client for the demo service.
//!
//! # Overview
//! `DemoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). A `Transport`
//! executes the round-trip; `Caller` pairs the two into one wrapper per route
//! that logs its outcome, plus sequential and concurrent orchestration over
//! all four routes.
//!
//! # Design
//! - `DemoClient` is stateless: it holds only the base URL.
//! - Each route is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - DTOs are defined independently from the demo-server crate; integration
//!   tests catch schema drift.

pub mod calls;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use calls::{join_detached, Caller, Scenario};
pub use client::DemoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Average, AverageReport, DeleteReport, Greeting, Shout, ShoutReport};
