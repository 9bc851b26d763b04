use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleHint {
    ProteinLike,
    LigandLike,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSummary {
    pub chain: String,
    pub residue_count: usize,
    pub protein_residues: usize,
    pub het_residues: usize,
    pub role_hint: RoleHint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HetLigandSummary {
    pub chain: String,
    pub resname: String,
    pub instances: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InspectionReport {
    pub chains: Vec<ChainSummary>,
    pub het_ligands: Vec<HetLigandSummary>,
}

/// Summarizes the chains and heteroatom ligands of a structure.
///
/// Water is ignored. A residue counts as protein when its name is a canonical amino acid,
/// otherwise as a ligand when it is a heteroatom group. Chains left empty are omitted.
pub fn inspect(structure: &Structure) -> InspectionReport {
    let mut chains = Vec::new();
    let mut het_ligands: BTreeMap<(String, String), usize> = BTreeMap::new();

    for chain in structure.chains() {
        let (mut total, mut protein, mut het) = (0, 0, 0);
        for residue in chain.non_water_residues() {
            total += 1;
            if residue.is_protein_like() {
                protein += 1;
            } else if residue.is_ligand_like() {
                het += 1;
                *het_ligands
                    .entry((chain.id.clone(), residue.name.clone()))
                    .or_insert(0) += 1;
            }
        }
        if total == 0 {
            continue;
        }
        chains.push(ChainSummary {
            chain: chain.id.clone(),
            residue_count: total,
            protein_residues: protein,
            het_residues: het,
            role_hint: if protein >= het {
                RoleHint::ProteinLike
            } else {
                RoleHint::LigandLike
            },
        });
    }
    chains.sort_by(|a, b| a.chain.cmp(&b.chain));

    InspectionReport {
        chains,
        het_ligands: het_ligands
            .into_iter()
            .map(|((chain, resname), instances)| HetLigandSummary {
                chain,
                resname,
                instances,
            })
            .collect(),
    }
}

/// Parses `text` and summarizes its chains and heteroatom ligands.
#[instrument(skip_all, name = "inspect_workflow")]
pub fn run(text: &str) -> Result<InspectionReport, EngineError> {
    let structure = PdbFile::read_from_str(text)?;
    let report = inspect(&structure);
    info!(
        chains = report.chains.len(),
        het_ligands = report.het_ligands.len(),
        "Inspection complete."
    );
    Ok(report)
}
