//! # Codex Registry
//!
//! The "Node Bible" crate - contains the codex node records, their attribute
//! vocabulary (elements, geometric forms, colors), and the read-only registry
//! the creative engine draws from. This crate holds data and validation only;
//! it does not contain any generation logic.

pub mod attributes;
pub mod nodes;
pub mod registry;

pub use attributes::*;
pub use nodes::*;
pub use registry::*;
