use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::Structure;
use crate::engine::config::{DetectionRequest, validate_cutoff};
use crate::engine::error::EngineError;
use crate::engine::external::{self, tool::InteractionTool};
use crate::engine::interaction::{DetectionResult, EngineKind};
use crate::engine::selector::{Decision, decide};
use crate::engine::{heuristic, ligand};
use tracing::{info, instrument, warn};

/// Detects the non-covalent interactions between a ligand and its receptor.
///
/// The structure is parsed up front, so malformed input fails with a parse error
/// whichever engine is selected. When the external engine was chosen and the tool turns
/// out to be unavailable, the engine is chosen once more knowing that; in `auto` mode
/// this falls back to the heuristic engine with a warning.
///
/// # Errors
///
/// Returns an [`EngineError`] describing the first failure. Partial results are never
/// returned.
#[instrument(skip_all, name = "detect_workflow", fields(ligand = %request.selector, mode = %request.mode))]
pub fn run(
    text: &str,
    request: &DetectionRequest,
    tool: &dyn InteractionTool,
) -> Result<DetectionResult, EngineError> {
    validate_cutoff(request.cutoff)?;
    let structure = PdbFile::read_from_str(text)?;
    info!(
        chains = structure.chains().len(),
        atoms = structure.atom_count(),
        "Parsed input structure."
    );

    let decision = decide(&request.selector, request.mode, true)?;
    info!(engine = %decision.engine, "Selected interaction engine.");

    match decision.engine {
        EngineKind::Heuristic => run_heuristic(&structure, request, decision),
        EngineKind::External => match external::detect(tool, text, &request.selector) {
            Ok(result) => Ok(result.with_warning(decision.warning)),
            Err(EngineError::EngineUnavailable { reason }) => {
                warn!(%reason, "External interaction engine is unavailable.");
                let fallback = decide(&request.selector, request.mode, false)?;
                info!(engine = %fallback.engine, "Falling back to another engine.");
                run_heuristic(&structure, request, fallback)
            }
            Err(e) => Err(e),
        },
    }
}

fn run_heuristic(
    structure: &Structure,
    request: &DetectionRequest,
    decision: Decision,
) -> Result<DetectionResult, EngineError> {
    let ligand = ligand::resolve(structure, &request.selector)?;
    let interactions = heuristic::detect(structure, &ligand, request.cutoff)?;
    Ok(
        DetectionResult::new(ligand.descriptor, interactions, EngineKind::Heuristic)
            .with_warning(decision.warning),
    )
}
