use thiserror::Error;

use super::config::{ConfigError, LigandSelector};
use super::external::tool::ToolError;
use crate::core::io::pdb::PdbError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to parse structure: {source}")]
    Parse {
        #[from]
        source: PdbError,
    },

    #[error("No ligand-like HETATM residues were found in the structure.")]
    NoLigandFound,

    #[error("Ligand {selector} was not found.")]
    LigandNotFound { selector: LigandSelector },

    #[error("Invalid engine '{0}'. Use one of: auto, plip, heuristic.")]
    InvalidEngine(String),

    #[error(
        "PLIP mode is not supported for chain-as-ligand selection. Use engine=heuristic or auto."
    )]
    UnsupportedSelector,

    #[error("External interaction engine is unavailable: {reason}")]
    EngineUnavailable { reason: String },

    #[error("No binding site matching ligand {selector} was reported (detected: {detected:?})")]
    NoBindingSiteFound {
        selector: LigandSelector,
        detected: Vec<String>,
    },

    #[error("External interaction tool failed: {source}")]
    Tool {
        #[from]
        source: ToolError,
    },

    #[error("Invalid request: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
