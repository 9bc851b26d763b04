use super::config::validate_cutoff;
use super::error::EngineError;
use super::interaction::{Interaction, InteractionKind, round_distance};
use super::ligand::ResolvedLigand;
use crate::core::models::atom::Atom;
use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use crate::core::utils::identifiers::{
    is_aromatic_residue, is_negative_residue, is_polar_element, is_positive_residue,
};
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use std::cmp::Ordering;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const HBOND_MAX_DISTANCE: f64 = 3.5;
const SALT_BRIDGE_MAX_DISTANCE: f64 = 4.0;
const HYDROPHOBIC_MAX_DISTANCE: f64 = 4.5;
const AROMATIC_MAX_DISTANCE: f64 = 5.0;
const CLOSE_CONTACT_MAX_DISTANCE: f64 = 4.0;

// Added to the k-d tree search radius; every candidate is re-checked against the exact cutoff.
const SEARCH_PADDING: f64 = 1e-6;

/// Classifies a receptor/ligand atom pair at distance `d`.
///
/// Rules are tried in priority order and the first match wins. Pairs matching no rule
/// produce `None`.
pub fn classify(
    receptor_resname: &str,
    receptor_element: &str,
    ligand_element: &str,
    d: f64,
) -> Option<InteractionKind> {
    let re = receptor_element.trim().to_ascii_uppercase();
    let le = ligand_element.trim().to_ascii_uppercase();
    let rr = receptor_resname.trim();

    if d <= HBOND_MAX_DISTANCE && is_polar_element(&re) && is_polar_element(&le) {
        return Some(InteractionKind::HydrogenBondLike);
    }
    if d <= SALT_BRIDGE_MAX_DISTANCE
        && ((is_positive_residue(rr) && le == "O") || (is_negative_residue(rr) && le == "N"))
    {
        return Some(InteractionKind::SaltBridgeLike);
    }
    if d <= HYDROPHOBIC_MAX_DISTANCE && re == "C" && le == "C" {
        return Some(InteractionKind::HydrophobicContact);
    }
    if d <= AROMATIC_MAX_DISTANCE && is_aromatic_residue(rr) && le == "C" {
        return Some(InteractionKind::AromaticContact);
    }
    if d <= CLOSE_CONTACT_MAX_DISTANCE {
        return Some(InteractionKind::CloseContact);
    }
    None
}

/// Orders interactions by distance, then receptor chain, sequence number and atom name.
fn compare_interactions(a: &Interaction, b: &Interaction) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.receptor_chain.cmp(&b.receptor_chain))
        .then(a.receptor_resseq.cmp(&b.receptor_resseq))
        .then_with(|| a.receptor_atom.cmp(&b.receptor_atom))
}

struct LigandAtomIndex<'a> {
    atoms: Vec<(&'a Residue, &'a Atom)>,
    tree: ImmutableKdTree<f64, 3>,
}

impl<'a> LigandAtomIndex<'a> {
    fn new(ligand: &ResolvedLigand<'a>) -> Self {
        let atoms: Vec<(&Residue, &Atom)> = ligand
            .residues
            .iter()
            .flat_map(|&residue| residue.atoms().iter().map(move |atom| (residue, atom)))
            .collect();
        let positions: Vec<[f64; 3]> = atoms
            .iter()
            .map(|(_, a)| [a.position.x, a.position.y, a.position.z])
            .collect();
        // Unresolved atoms are often written at one shared coordinate; the immutable tree
        // accepts any number of coincident points.
        let tree = ImmutableKdTree::new_from_slice(&positions);
        Self { atoms, tree }
    }

    /// Ligand atoms within `radius` of `atom`, in ligand scan order.
    fn candidates(&self, atom: &Atom, radius: f64) -> Vec<(&'a Residue, &'a Atom)> {
        let query = [atom.position.x, atom.position.y, atom.position.z];
        let mut indices: Vec<usize> = self
            .tree
            .within_unsorted::<SquaredEuclidean>(&query, radius * radius)
            .into_iter()
            .map(|n| n.item as usize)
            .collect();
        indices.sort_unstable();
        indices.into_iter().map(|i| self.atoms[i]).collect()
    }
}

fn scan_residue(
    receptor: &Residue,
    index: &LigandAtomIndex<'_>,
    cutoff: f64,
) -> Vec<Interaction> {
    let mut found = Vec::new();
    for receptor_atom in receptor.atoms() {
        for (ligand_residue, ligand_atom) in index.candidates(receptor_atom, cutoff + SEARCH_PADDING) {
            let d = receptor_atom.distance_to(ligand_atom);
            if d > cutoff {
                continue;
            }
            let Some(kind) = classify(
                &receptor.name,
                &receptor_atom.element,
                &ligand_atom.element,
                d,
            ) else {
                continue;
            };
            found.push(Interaction {
                kind,
                receptor_chain: receptor.chain_id.clone(),
                receptor_resname: receptor.name.clone(),
                receptor_resseq: receptor.seq,
                receptor_atom: receptor_atom.name.clone(),
                ligand_chain: ligand_residue.chain_id.clone(),
                ligand_resname: ligand_residue.name.clone(),
                ligand_resseq: ligand_residue.seq,
                ligand_atom: ligand_atom.name.clone(),
                distance: round_distance(d),
            });
        }
    }
    found
}

/// Runs the distance/element heuristic between every protein-like residue outside the
/// ligand and every ligand atom.
#[instrument(skip_all, name = "heuristic_engine", fields(ligand = %ligand.descriptor.name))]
pub fn detect(
    structure: &Structure,
    ligand: &ResolvedLigand<'_>,
    cutoff: f64,
) -> Result<Vec<Interaction>, EngineError> {
    let cutoff = validate_cutoff(cutoff)?;
    let excluded = ligand.residue_keys();
    let receptors: Vec<&Residue> = structure
        .residues()
        .filter(|r| r.is_protein_like() && !excluded.contains(&r.key()))
        .collect();
    let index = LigandAtomIndex::new(ligand);

    #[cfg(not(feature = "parallel"))]
    let iterator = receptors.iter();
    #[cfg(feature = "parallel")]
    let iterator = receptors.par_iter();

    let per_residue: Vec<Vec<Interaction>> = iterator
        .map(|&residue| scan_residue(residue, &index, cutoff))
        .collect();

    let mut interactions: Vec<Interaction> = per_residue.into_iter().flatten().collect();
    interactions.sort_by(compare_interactions);

    info!(
        receptors = receptors.len(),
        ligand_atoms = index.atoms.len(),
        interactions = interactions.len(),
        "Heuristic scan complete."
    );
    Ok(interactions)
}
