use super::residue::Residue;

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: String,                     // Chain identifier (e.g., "A", "B")
    pub(crate) residues: Vec<Residue>,  // Residues in record order
}

impl Chain {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            residues: Vec::new(),
        }
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Residues on this chain that are not water molecules.
    pub fn non_water_residues(&self) -> impl Iterator<Item = &Residue> {
        self.residues.iter().filter(|r| !r.is_water())
    }
}
