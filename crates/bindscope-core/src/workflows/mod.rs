//! # Workflows Module
//!
//! The public entry points of the library. Each workflow takes raw structure text,
//! runs the full pipeline and returns a serializable result.
//!
//! - **Detection** ([`detect`]) - Interactions between one ligand and its receptor, with
//!   engine selection and fallback
//! - **Comparison** ([`compare`]) - Receptor-side interaction signatures shared between two
//!   complexes and unique to each
//! - **Inspection** ([`inspect`]) - Chain roles and heteroatom ligand inventory

pub mod compare;
pub mod detect;
pub mod inspect;
