//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (overlay BOT_TOKEN/CHAT_ID/SECRET_KEY/PORT from env)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults so a bare environment-only deployment works
//! - Missing upstream credentials are a startup warning, a request-time error
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::RelayConfig;
pub use schema::ListenerConfig;
pub use schema::PolicyConfig;
pub use schema::RateLimitConfig;
pub use schema::TelegramConfig;
