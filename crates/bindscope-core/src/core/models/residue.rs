use super::atom::Atom;
use crate::core::utils::identifiers;

/// Identity of a residue for exclusion and grouping purposes: chain, sequence number
/// and trimmed residue name.
pub type ResidueKey = (String, isize, String);

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub chain_id: String,               // Identifier of the owning chain
    pub name: String,                   // Trimmed residue name (e.g., "SER", "HOH", "LIG")
    pub seq: isize,                     // Residue sequence number from source file
    pub insertion_code: Option<char>,   // Insertion code, if any
    pub hetero: bool,                   // True for HETATM groups
    pub(crate) atoms: Vec<Atom>,        // Atoms in record order
}

impl Residue {
    pub(crate) fn new(
        chain_id: &str,
        seq: isize,
        insertion_code: Option<char>,
        name: &str,
        hetero: bool,
    ) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            name: name.trim().to_string(),
            seq,
            insertion_code,
            hetero,
            atoms: Vec::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn has_atom_named(&self, name: &str) -> bool {
        self.atoms.iter().any(|a| a.name == name)
    }

    pub fn key(&self) -> ResidueKey {
        (self.chain_id.clone(), self.seq, self.name.clone())
    }

    /// Display label in the form `"{chain}:{resname}:{seqnum}"`.
    pub fn label(&self) -> String {
        format!("{}:{}:{}", self.chain_id, self.name, self.seq)
    }

    pub fn is_protein_like(&self) -> bool {
        identifiers::is_protein_residue(&self.name)
    }

    pub fn is_water(&self) -> bool {
        identifiers::is_water_residue(&self.name)
    }

    /// A heteroatom group that is not a water molecule.
    pub fn is_ligand_like(&self) -> bool {
        self.hetero && !self.is_water()
    }

    pub fn is_standard(&self) -> bool {
        self.is_protein_like() || self.is_ligand_like()
    }
}
