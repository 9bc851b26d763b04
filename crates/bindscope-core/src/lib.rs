//! # bindscope
//!
//! Detection and comparison of non-covalent ligand-receptor interactions in
//! macromolecular structures.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Immutable structure models, the PDB reader and writer,
//!   and residue/element classification tables.
//!
//! - **[`engine`]: The Logic Core.** Ligand resolution, the distance/element heuristic,
//!   the adapter around an external binding-site analyzer, and the engine selector that
//!   decides between them.
//!
//! - **[`workflows`]: The Public API.** `detect`, `compare` and `inspect`, each a
//!   synchronous function from structure text to a serializable result.

pub mod core;
pub mod engine;
pub mod workflows;
