//! # Core Models Module
//!
//! This module contains the data structures used to represent a parsed macromolecular
//! structure in bindscope.
//!
//! ## Overview
//!
//! A [`structure::Structure`] owns an ordered list of [`chain::Chain`]s, each chain owns
//! its [`residue::Residue`]s, and each residue owns its [`atom::Atom`]s. Nothing is
//! shared between owners, and a structure is never mutated after the
//! [`builder::StructureBuilder`] hands it out.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom with element, name and coordinates
//! - [`residue`] - Residue with heteroflag and the classification predicates
//! - [`chain`] - Ordered residue container
//! - [`structure`] - Root of the hierarchy with flattened iteration
//! - [`builder`] - Incremental construction used by the file readers
//!
//! ## Usage
//!
//! ```ignore
//! use bindscope::core::models::{atom::Atom, builder::StructureBuilder};
//!
//! let mut builder = StructureBuilder::new();
//! builder.start_chain("A");
//! builder.start_residue(1, None, "SER", false)?;
//! builder.add_atom(Atom::new(1, "OG", "O", Point3::new(0.0, 0.0, 0.0)))?;
//! let structure = builder.build();
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod residue;
pub mod structure;
