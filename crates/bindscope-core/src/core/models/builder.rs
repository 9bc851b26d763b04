use super::atom::Atom;
use super::chain::Chain;
use super::residue::Residue;
use super::structure::Structure;
use crate::core::utils::identifiers::is_water_residue;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Atom '{0}' was added before any residue was started")]
    NoCurrentResidue(String),
    #[error("A residue was started before any chain was started")]
    NoCurrentChain,
}

/// Record class of a residue. Heteroatom groups carry their name, so two different
/// groups sharing a sequence number stay apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HetField {
    Polymer,
    Water,
    Hetero(String),
}

impl HetField {
    pub fn new(name: &str, hetero: bool) -> Self {
        let name = name.trim();
        match (hetero, is_water_residue(name)) {
            (false, _) => HetField::Polymer,
            (true, true) => HetField::Water,
            (true, false) => HetField::Hetero(name.to_string()),
        }
    }
}

/// Residue identity within a chain: record class, sequence number, insertion code.
pub type ResidueSlot = (HetField, isize, Option<char>);

pub struct StructureBuilder {
    structure: Structure,

    // --- Builder-specific state for efficient construction ---
    chain_index_map: HashMap<String, usize>,
    residue_index_maps: Vec<HashMap<ResidueSlot, usize>>,
    current_chain_idx: Option<usize>,
    current_residue_idx: Option<usize>,
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self {
            structure: Structure::default(),
            chain_index_map: HashMap::new(),
            residue_index_maps: Vec::new(),
            current_chain_idx: None,
            current_residue_idx: None,
        }
    }

    /// Makes `id` the current chain. A chain id seen before is continued rather than
    /// duplicated.
    pub fn start_chain(&mut self, id: &str) -> &mut Self {
        let idx = match self.chain_index_map.get(id) {
            Some(&idx) => idx,
            None => {
                let idx = self.structure.chains.len();
                self.structure.chains.push(Chain::new(id));
                self.residue_index_maps.push(HashMap::new());
                self.chain_index_map.insert(id.to_string(), idx);
                idx
            }
        };
        self.current_chain_idx = Some(idx);
        self.current_residue_idx = None;
        self
    }

    /// Makes the residue identified by its [`ResidueSlot`] on the current chain the current
    /// residue, creating it on first sight.
    pub fn start_residue(
        &mut self,
        seq: isize,
        insertion_code: Option<char>,
        name: &str,
        hetero: bool,
    ) -> Result<&mut Self, BuildError> {
        let chain_idx = self.current_chain_idx.ok_or(BuildError::NoCurrentChain)?;
        let chain = &mut self.structure.chains[chain_idx];
        let chain_id = chain.id.clone();
        let slot = (HetField::new(name, hetero), seq, insertion_code);

        let res_idx = *self.residue_index_maps[chain_idx]
            .entry(slot)
            .or_insert_with(|| {
                let index = chain.residues.len();
                chain
                    .residues
                    .push(Residue::new(&chain_id, seq, insertion_code, name, hetero));
                index
            });
        self.current_residue_idx = Some(res_idx);
        Ok(self)
    }

    /// Appends an atom to the current residue. An atom whose name already exists in the
    /// residue (an alternate conformer) is ignored, so the first conformer wins.
    pub fn add_atom(&mut self, atom: Atom) -> Result<&mut Self, BuildError> {
        let (chain_idx, res_idx) = match (self.current_chain_idx, self.current_residue_idx) {
            (Some(c), Some(r)) => (c, r),
            _ => return Err(BuildError::NoCurrentResidue(atom.name)),
        };
        let residue = &mut self.structure.chains[chain_idx].residues[res_idx];
        if !residue.has_atom_named(&atom.name) {
            residue.add_atom(atom);
        }
        Ok(self)
    }

    pub fn atom_count(&self) -> usize {
        self.structure.atom_count()
    }

    pub fn build(self) -> Structure {
        self.structure
    }
}
