//! Core domain models for osvim
//!
//! This crate contains:
//! - Heat template model (parameters and resources sections)
//! - Property collections in flat and typed shapes
//! - The error taxonomy shared by the other crates

pub mod error;
pub mod properties;
pub mod template;

pub use error::{Error, Result};
pub use properties::{KeyProperty, PropertyCollection, TypedProperty, UsedProperties};
pub use template::Template;
