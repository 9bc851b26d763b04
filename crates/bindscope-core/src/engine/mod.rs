//! # Engine Module
//!
//! Interaction detection between a ligand and its receptor.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Ligand selectors, engine modes and request validation
//! - **Ligand Resolution** ([`ligand`]) - Maps a selector onto the residues forming the ligand
//! - **Heuristic Engine** ([`heuristic`]) - Distance and element rules over a k-d tree of ligand atoms
//! - **External Engine** ([`external`]) - Adapter around a black-box binding-site analyzer
//! - **Engine Selection** ([`selector`]) - Chooses an engine and decides on fallback warnings
//! - **Results** ([`interaction`]) - Interactions, signatures and detection results
//! - **Error Handling** ([`error`]) - The engine error taxonomy

pub mod config;
pub mod error;
pub mod external;
pub mod heuristic;
pub mod interaction;
pub mod ligand;
pub mod selector;
