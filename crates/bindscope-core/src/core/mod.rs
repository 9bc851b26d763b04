//! # Core Module
//!
//! The foundation layer of bindscope: stateless data models for macromolecular
//! structures, the residue classification rules every engine agrees on, and file I/O.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, chains and the structure root
//! - **File I/O** ([`io`]) - Reading and writing coordinate files
//! - **Classification** ([`utils`]) - Fixed residue and element tables with pure predicates

pub mod io;
pub mod models;
pub mod utils;
