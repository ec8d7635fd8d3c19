//! Application layer - Use cases and orchestration
//!
//! Contains the trigger classifier, the playbook engine and the services that
//! wrap a language model around them. Ports describe what the outer layers
//! must provide.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
