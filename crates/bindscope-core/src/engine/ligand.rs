use super::config::LigandSelector;
use super::error::EngineError;
use super::interaction::LigandDescriptor;
use crate::core::models::residue::{Residue, ResidueKey};
use crate::core::models::structure::Structure;
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

/// Name reported for a ligand made of a whole chain.
pub const CHAIN_LIGAND_NAME: &str = "CHAIN";

/// The residues that make up the ligand, borrowed from the structure they were found in.
#[derive(Debug, Clone)]
pub struct ResolvedLigand<'a> {
    pub descriptor: LigandDescriptor,
    pub residues: Vec<&'a Residue>,
}

impl ResolvedLigand<'_> {
    pub fn residue_keys(&self) -> HashSet<ResidueKey> {
        self.residues.iter().map(|r| r.key()).collect()
    }
}

/// Finds the ligand-like group with the most atoms.
///
/// Groups are keyed by (chain, residue name). When several groups share the maximum
/// atom count, the one appearing first in the structure wins.
pub fn autodetect(structure: &Structure) -> Result<(String, String), EngineError> {
    let mut counts: IndexMap<(&str, &str), usize> = IndexMap::new();
    for residue in structure.residues().filter(|r| r.is_ligand_like()) {
        *counts
            .entry((residue.chain_id.as_str(), residue.name.as_str()))
            .or_insert(0) += residue.atom_count();
    }

    let mut best: Option<((&str, &str), usize)> = None;
    for (&key, &count) in &counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((key, count));
        }
    }

    let ((chain, name), count) = best.ok_or(EngineError::NoLigandFound)?;
    debug!(chain, name, atoms = count, "Autodetected ligand group");
    Ok((chain.to_string(), name.to_string()))
}

/// Resolves `selector` to the set of ligand residues in `structure`.
pub fn resolve<'a>(
    structure: &'a Structure,
    selector: &LigandSelector,
) -> Result<ResolvedLigand<'a>, EngineError> {
    let (name, chain, residues): (String, Option<String>, Vec<&Residue>) =
        match (selector.name(), selector.chain_id()) {
            (None, Some(chain)) => {
                let residues = structure
                    .chain(chain)
                    .map(|c| c.non_water_residues().filter(|r| r.is_standard()).collect())
                    .unwrap_or_default();
                (CHAIN_LIGAND_NAME.to_string(), Some(chain.to_string()), residues)
            }
            (None, None) => {
                let (chain, name) = autodetect(structure)?;
                let residues = select_by_name(structure, &name, Some(&chain));
                (name, Some(chain), residues)
            }
            (Some(name), chain) => {
                let residues = select_by_name(structure, name, chain);
                (name.to_string(), chain.map(str::to_string), residues)
            }
        };

    if residues.is_empty() {
        return Err(EngineError::LigandNotFound {
            selector: selector.clone(),
        });
    }

    debug!(
        ligand = %name,
        residues = residues.len(),
        "Resolved ligand residues"
    );
    Ok(ResolvedLigand {
        descriptor: LigandDescriptor {
            name,
            chain,
            residues: residues.iter().map(|r| r.label()).collect(),
        },
        residues,
    })
}

fn select_by_name<'a>(structure: &'a Structure, name: &str, chain: Option<&str>) -> Vec<&'a Residue> {
    structure
        .residues()
        .filter(|r| r.is_ligand_like() && r.name == name)
        .filter(|r| chain.is_none_or(|c| r.chain_id == c))
        .collect()
}
