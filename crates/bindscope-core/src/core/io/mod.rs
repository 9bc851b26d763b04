//! Provides input/output functionality for molecular coordinate formats.
//!
//! Readers turn raw text into an immutable [`Structure`](crate::core::models::structure::Structure);
//! writers emit a structure back as text. All formats share the [`traits::StructureFile`]
//! interface.

pub mod pdb;
pub mod traits;
