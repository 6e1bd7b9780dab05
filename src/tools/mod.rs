//! Tool infrastructure — catalog, typed argument schemas, validation.
//!
//! The catalog owns tool *metadata* (names, descriptions, argument schemas);
//! command assembly lives in [`crate::dispatch`]. Built once at startup and
//! never mutated afterwards.

pub mod catalog;

pub use catalog::{ParamDef, ParamType, ToolCatalog, ToolEntry};
