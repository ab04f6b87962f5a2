//! Core invoice types and builders.
//!
//! This module provides the invoice data model for XRechnung based on the
//! EN 16931 semantic model. All values are plain data; builders produce
//! them, the writer in [`crate::xrechnung`] only reads them.

mod builder;
mod error;
mod types;

pub use builder::*;
pub use error::*;
pub use types::*;
