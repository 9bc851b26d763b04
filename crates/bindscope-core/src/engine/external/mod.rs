//! Adapter around an external binding-site analyzer.
//!
//! The tool is a black box that reads a PDB file and reports every binding site it
//! finds. This module hands it the structure text, selects the binding site matching the
//! ligand selector, and normalizes the tool's heterogeneous records into [`Interaction`]s.

pub mod record;
pub mod tool;

use self::record::{BindingSiteReport, InteractionSet, ToolCategory, aliases};
use self::tool::{InteractionTool, ToolError};
use super::config::LigandSelector;
use super::error::EngineError;
use super::interaction::{
    DetectionResult, EngineKind, Interaction, LigandDescriptor, round_distance,
};
use std::io::Write;
use tracing::{debug, info, instrument};

/// The parts of a binding-site id `RESNAME:CHAIN:SEQNUM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSiteId {
    pub resname: String,
    pub chain: Option<String>,
    pub seq: isize,
}

impl BindingSiteId {
    pub fn parse(id: &str) -> Self {
        let parts: Vec<&str> = id.split(':').collect();
        Self {
            resname: parts.first().map(|p| p.trim()).unwrap_or_default().to_string(),
            chain: parts.get(1).map(|p| p.trim().to_string()),
            seq: parts
                .get(2)
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(-1),
        }
    }
}

/// Whether a binding-site id matches the selector. Absent selector fields match anything;
/// ids with fewer than two parts never match.
pub fn match_bsid(id: &str, selector: &LigandSelector) -> bool {
    let parts: Vec<&str> = id.split(':').collect();
    if parts.len() < 2 {
        return false;
    }
    let (resname, chain) = (parts[0].trim(), parts[1].trim());
    selector.name().is_none_or(|n| n == resname) && selector.chain_id().is_none_or(|c| c == chain)
}

/// Picks the matching binding site with the most records. The tool's order breaks ties.
pub fn select_binding_site<'r>(
    report: &'r BindingSiteReport,
    selector: &LigandSelector,
) -> Option<(&'r str, &'r InteractionSet)> {
    let mut best: Option<(&str, &InteractionSet, usize)> = None;
    for (id, set) in report.iter().filter(|(id, _)| match_bsid(id, selector)) {
        let total = set.total();
        if best.is_none_or(|(_, _, best_total)| total > best_total) {
            best = Some((id.as_str(), set, total));
        }
    }
    best.map(|(id, set, _)| (id, set))
}

/// Normalizes the records of one binding site into interactions sorted by
/// (distance, receptor chain, receptor sequence number).
pub fn normalize_interactions(site: &BindingSiteId, set: &InteractionSet) -> Vec<Interaction> {
    let ligand_chain = site.chain.clone().unwrap_or_else(|| "?".to_string());
    let mut interactions: Vec<Interaction> = ToolCategory::ALL
        .iter()
        .flat_map(|&category| {
            set.records(category).iter().map(move |r| (category, r))
        })
        .map(|(category, r)| Interaction {
            kind: category.kind(),
            receptor_chain: r.text(aliases::RECEPTOR_CHAIN, "?"),
            receptor_resname: r.text(aliases::RECEPTOR_RESNAME, "UNK"),
            receptor_resseq: r.integer(aliases::RECEPTOR_SEQ, -1),
            receptor_atom: r.text(aliases::RECEPTOR_ATOM, "?"),
            ligand_chain: ligand_chain.clone(),
            ligand_resname: site.resname.clone(),
            ligand_resseq: site.seq,
            ligand_atom: r.text(aliases::LIGAND_ATOM, "?"),
            distance: round_distance(r.float(aliases::DISTANCE, 0.0)),
        })
        .collect();

    interactions.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.receptor_chain.cmp(&b.receptor_chain))
            .then(a.receptor_resseq.cmp(&b.receptor_resseq))
    });
    interactions
}

/// Runs the external tool on `text` and reports the interactions of the binding site
/// matching `selector`.
///
/// The structure is written to a temporary `.pdb` file that is removed when this
/// function returns, whatever the outcome.
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedSelector`] for chain-as-ligand selectors,
/// [`EngineError::EngineUnavailable`] when the tool is not installed, and
/// [`EngineError::NoBindingSiteFound`] when no reported site matches.
#[instrument(skip_all, name = "external_engine", fields(ligand = %selector))]
pub fn detect(
    tool: &dyn InteractionTool,
    text: &str,
    selector: &LigandSelector,
) -> Result<DetectionResult, EngineError> {
    if selector.is_chain_as_ligand() {
        return Err(EngineError::UnsupportedSelector);
    }

    let report = {
        let mut file = tempfile::Builder::new()
            .prefix("bindscope-")
            .suffix(".pdb")
            .tempfile()
            .map_err(ToolError::from)?;
        file.write_all(text.as_bytes()).map_err(ToolError::from)?;
        file.flush().map_err(ToolError::from)?;

        tool.analyze(file.path()).map_err(|e| match e {
            ToolError::Unavailable { .. } => EngineError::EngineUnavailable {
                reason: e.to_string(),
            },
            other => EngineError::from(other),
        })?
    };
    debug!(sites = report.len(), "Tool reported binding sites");

    let (id, set) =
        select_binding_site(&report, selector).ok_or_else(|| EngineError::NoBindingSiteFound {
            selector: selector.clone(),
            detected: report.keys().cloned().collect(),
        })?;

    let site = BindingSiteId::parse(id);
    let interactions = normalize_interactions(&site, set);
    info!(
        binding_site = id,
        interactions = interactions.len(),
        "External analysis complete."
    );

    let ligand = LigandDescriptor {
        name: site.resname,
        chain: site.chain,
        residues: vec![id.to_string()],
    };
    Ok(DetectionResult::new(ligand, interactions, EngineKind::External))
}
