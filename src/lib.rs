//! Dockhand Provider - async API client for the Dockhand container platform.
//!
//! The client core of a Terraform provider for Dockhand:
//! - **Authentication**: log in once, then send the `dockhand_session` cookie
//! - **Execution**: one pooled HTTP client, bounded retries for GET/DELETE,
//!   capped bodies, cancellation and an overall deadline
//! - **Normalization**: tolerant parsing of the stack list payload
//! - **Typed endpoints**: settings, registries, git, config sets,
//!   notifications, environments, stacks, containers, images, networks,
//!   volumes, users, schedules, license and scanner settings
//!
//! ## Quick Start
//!
//! All configuration is loaded from environment variables. Create a `.env` file:
//!
//! ```text
//! DOCKHAND_ENDPOINT=dockhand.example.com:3000
//! DOCKHAND_USERNAME=admin
//! DOCKHAND_PASSWORD=change-me
//! DOCKHAND_DEFAULT_ENV=1
//! ```
//!
//! Then connect and call the API:
//!
//! ```ignore
//! use dockhand_provider::{DockhandClient, DockhandConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = DockhandConfig::from_env()?;
//!     let client = DockhandClient::connect(&cfg).await?;
//!
//!     for stack in client.list_stacks("").await?.data {
//!         println!("{} ({})", stack.name, stack.status);
//!     }
//!
//!     match client.get_user("42").await {
//!         Err(e) if e.is_not_found() => println!("user 42 is gone"),
//!         other => println!("{:?}", other?.data),
//!     }
//!
//!     Ok(())
//! }
//! ```

// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy for strict discipline
#![deny(clippy::all)]                 // All standard Clippy lints
#![deny(clippy::pedantic)]            // Very strict Clippy lints
#![deny(clippy::unwrap_used)]         // unwrap() is forbidden
#![deny(clippy::expect_used)]         // expect() is forbidden
#![deny(clippy::panic)]               // panic!() is forbidden
#![deny(clippy::print_stdout)]        // println!() is forbidden in production
#![deny(clippy::todo)]                // TODO is forbidden
#![deny(clippy::unimplemented)]       // unimplemented!() is forbidden
#![deny(clippy::unwrap_in_result)]    // unwrap() in Result is forbidden
#![deny(clippy::redundant_clone)]     // Useless clones are forbidden
#![deny(clippy::too_many_arguments)]  // Limit function arguments
#![deny(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// Tests may unwrap and panic freely
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

// ============================================================================
// Modules
// ============================================================================

/// Error type shared by all operations.
pub mod dockhand_error;

/// Retry policy, backoff schedule and body caps.
pub mod dockhand_retry;

/// HTTP transport and the [`Transport`] seam.
pub mod dockhand_transport;

/// Request descriptors and typed responses.
pub mod dockhand_request;

/// Request execution: URL building, headers, attempt loop, status evaluation.
pub mod dockhand_client;

/// Wire types for every endpoint.
pub mod dockhand_types;

/// Stack list normalization and JSON coercion helpers.
pub mod dockhand_stacks;

/// Typed endpoint methods on [`DockhandClient`].
pub mod dockhand_api;

/// Session login and [`DockhandClient::connect`].
pub mod dockhand_auth;

/// Configuration from environment variables.
pub mod dockhand_config;

/// `tracing` subscriber setup.
pub mod dockhand_logging;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use dockhand_auth::{login, session_cookie_from_headers};
pub use dockhand_client::DockhandClient;
pub use dockhand_config::DockhandConfig;
pub use dockhand_error::DockhandError;
pub use dockhand_logging::{init_logging, init_logging_with_default};
pub use dockhand_request::{ApiRequest, ApiResponse};
pub use dockhand_retry::{Attempt, should_retry};
pub use dockhand_stacks::{StackListShape, coerce_to_i64, coerce_to_string, parse_stacks};
pub use dockhand_transport::{ReqwestTransport, Transport};
