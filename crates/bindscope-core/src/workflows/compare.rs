use super::detect;
use crate::engine::config::{DEFAULT_CUTOFF_ANGSTROMS, DetectionRequest, EngineMode, LigandSelector};
use crate::engine::error::EngineError;
use crate::engine::external::tool::InteractionTool;
use crate::engine::interaction::{
    DetectionResult, EngineKind, Interaction, InteractionKind, LigandDescriptor, Signature,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, instrument};

/// One side of a comparison: the structure text and how to find its ligand.
#[derive(Debug, Clone)]
pub struct ComplexInput<'a> {
    pub text: &'a str,
    pub selector: LigandSelector,
}

impl<'a> ComplexInput<'a> {
    pub fn new(text: &'a str, selector: LigandSelector) -> Self {
        Self { text, selector }
    }
}

/// Settings shared by both detections of a comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    pub cutoff: f64,
    pub mode: EngineMode,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF_ANGSTROMS,
            mode: EngineMode::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexSummary {
    pub ligand: LigandDescriptor,
    pub interaction_count: usize,
    pub engine_used: EngineKind,
    pub warnings: Vec<String>,
}

impl From<&DetectionResult> for ComplexSummary {
    fn from(result: &DetectionResult) -> Self {
        Self {
            ligand: result.ligand.clone(),
            interaction_count: result.interaction_count,
            engine_used: result.engine_used,
            warnings: result.warnings.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRow {
    pub interaction_type: InteractionKind,
    pub receptor_chain: String,
    pub receptor_resseq: isize,
    pub receptor_resname: String,
    pub signature_key: String,
}

impl From<&Signature> for SignatureRow {
    fn from(sig: &Signature) -> Self {
        Self {
            interaction_type: sig.kind,
            receptor_chain: sig.chain.clone(),
            receptor_resseq: sig.seq,
            receptor_resname: sig.resname.clone(),
            signature_key: sig.key(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub complex_1: ComplexSummary,
    pub complex_2: ComplexSummary,
    pub shared: Vec<SignatureRow>,
    pub only_in_complex_1: Vec<SignatureRow>,
    pub only_in_complex_2: Vec<SignatureRow>,
    pub example_interactions_complex_1: IndexMap<String, Interaction>,
    pub example_interactions_complex_2: IndexMap<String, Interaction>,
}

fn signature_set(result: &DetectionResult) -> BTreeSet<Signature> {
    result.interactions.iter().map(Interaction::signature).collect()
}

fn to_rows<'a>(signatures: impl Iterator<Item = &'a Signature>) -> Vec<SignatureRow> {
    signatures.map(SignatureRow::from).collect()
}

/// The first interaction seen for each signature, keyed by signature key.
fn representatives(result: &DetectionResult) -> IndexMap<String, Interaction> {
    let mut examples = IndexMap::new();
    for interaction in &result.interactions {
        examples
            .entry(interaction.signature_key())
            .or_insert_with(|| interaction.clone());
    }
    examples
}

/// Diffs the receptor-side interaction signatures of two detection results.
pub fn compare_results(first: &DetectionResult, second: &DetectionResult) -> ComparisonResult {
    let set_1 = signature_set(first);
    let set_2 = signature_set(second);

    ComparisonResult {
        complex_1: first.into(),
        complex_2: second.into(),
        shared: to_rows(set_1.intersection(&set_2)),
        only_in_complex_1: to_rows(set_1.difference(&set_2)),
        only_in_complex_2: to_rows(set_2.difference(&set_1)),
        example_interactions_complex_1: representatives(first),
        example_interactions_complex_2: representatives(second),
    }
}

/// Detects interactions in two complexes and compares their signature sets.
///
/// Both detections use the same cutoff and engine mode. They run concurrently when the
/// `parallel` feature is enabled; results are always reported in input order, and when
/// both fail the first complex's error is returned.
#[instrument(skip_all, name = "compare_workflow", fields(mode = %options.mode))]
pub fn run(
    first: ComplexInput<'_>,
    second: ComplexInput<'_>,
    options: &CompareOptions,
    tool: &dyn InteractionTool,
) -> Result<ComparisonResult, EngineError> {
    let request_for = |input: &ComplexInput<'_>| DetectionRequest {
        selector: input.selector.clone(),
        cutoff: options.cutoff,
        mode: options.mode,
    };
    let request_1 = request_for(&first);
    let request_2 = request_for(&second);

    let detect_1 = || detect::run(first.text, &request_1, tool);
    let detect_2 = || detect::run(second.text, &request_2, tool);

    #[cfg(feature = "parallel")]
    let (result_1, result_2) = rayon::join(detect_1, detect_2);
    #[cfg(not(feature = "parallel"))]
    let (result_1, result_2) = (detect_1(), detect_2());

    let result_1 = result_1?;
    let result_2 = result_2?;

    let comparison = compare_results(&result_1, &result_2);
    info!(
        shared = comparison.shared.len(),
        only_in_complex_1 = comparison.only_in_complex_1.len(),
        only_in_complex_2 = comparison.only_in_complex_2.len(),
        "Comparison complete."
    );
    Ok(comparison)
}
