//! Domain layer for the InnerNode Equalizer
//!
//! Contains the trigger classification and playbook value objects, chat messages,
//! and domain errors. This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
