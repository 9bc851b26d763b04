use super::atom::Atom;
use super::chain::Chain;
use super::residue::Residue;

/// Represents a parsed macromolecular structure.
///
/// A `Structure` is the root of the chain → residue → atom hierarchy. It is built once
/// per request by a [`StructureBuilder`](super::builder::StructureBuilder) and is
/// read-only afterwards: every downstream component traverses it through shared
/// references and nothing can mutate it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub(crate) chains: Vec<Chain>,
}

impl Structure {
    /// Returns the chains in the order they first appeared in the source.
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Finds a chain by its identifier.
    ///
    /// # Arguments
    ///
    /// * `id` - The chain identifier to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Chain)` if the chain exists, otherwise `None`.
    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    /// Returns an iterator over all residues, chain by chain.
    pub fn residues(&self) -> impl Iterator<Item = &Residue> {
        self.chains.iter().flat_map(|c| c.residues.iter())
    }

    /// Returns an iterator over all atoms, residue by residue.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.residues().flat_map(|r| r.atoms.iter())
    }

    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(|c| c.residues.len()).sum()
    }

    pub fn atom_count(&self) -> usize {
        self.residues().map(Residue::atom_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.atom_count() == 0
    }
}
