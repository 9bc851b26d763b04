use super::config::{EngineMode, LigandSelector};
use super::error::EngineError;
use super::interaction::EngineKind;

pub const CHAIN_AS_LIGAND_WARNING: &str = "Chain-as-ligand selection detected; using heuristic engine (PLIP is small-molecule focused).";
pub const FALLBACK_WARNING: &str = "PLIP not available; using heuristic interaction model instead.";

/// The engine chosen for a request and the warning to attach to its result, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub engine: EngineKind,
    pub warning: Option<String>,
}

impl Decision {
    fn heuristic(warning: Option<&str>) -> Self {
        Self {
            engine: EngineKind::Heuristic,
            warning: warning.map(str::to_string),
        }
    }

    fn external() -> Self {
        Self {
            engine: EngineKind::External,
            warning: None,
        }
    }
}

/// Chooses an engine from the selector, the requested mode and whether the external
/// tool is usable.
///
/// Chain-as-ligand selections never reach the external tool: forcing it is an error and
/// `auto` falls back to the heuristic engine with a warning.
pub fn decide(
    selector: &LigandSelector,
    mode: EngineMode,
    external_available: bool,
) -> Result<Decision, EngineError> {
    if selector.is_chain_as_ligand() {
        return match mode {
            EngineMode::ForcedExternal => Err(EngineError::UnsupportedSelector),
            EngineMode::Auto => Ok(Decision::heuristic(Some(CHAIN_AS_LIGAND_WARNING))),
            EngineMode::ForcedHeuristic => Ok(Decision::heuristic(None)),
        };
    }

    match (mode, external_available) {
        (EngineMode::ForcedHeuristic, _) => Ok(Decision::heuristic(None)),
        (EngineMode::Auto | EngineMode::ForcedExternal, true) => Ok(Decision::external()),
        (EngineMode::Auto, false) => Ok(Decision::heuristic(Some(FALLBACK_WARNING))),
        (EngineMode::ForcedExternal, false) => Err(EngineError::EngineUnavailable {
            reason: "PLIP engine requested but not available. Install PLIP and OpenBabel dependencies."
                .to_string(),
        }),
    }
}
