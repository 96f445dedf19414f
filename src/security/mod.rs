//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → rate_limit.rs (per-IP fixed-window budget, 429 on exhaustion)
//!     → body size cap (tower-http, wired in http/server.rs)
//!     → headers.rs (CORS + security response headers)
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any check failure
//! - Rate limiting runs before any other processing
//! - No trust in client input

pub mod headers;
pub mod rate_limit;
