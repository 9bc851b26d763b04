use phf::{Set, phf_set};

static PROTEIN_RESIDUES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
};

static WATER_RESIDUES: Set<&'static str> = phf_set! { "HOH", "WAT", "H2O" };

static AROMATIC_RESIDUES: Set<&'static str> = phf_set! { "PHE", "TYR", "TRP", "HIS" };

static POSITIVE_RESIDUES: Set<&'static str> = phf_set! { "ARG", "LYS", "HIS" };

static NEGATIVE_RESIDUES: Set<&'static str> = phf_set! { "ASP", "GLU" };

static POLAR_ELEMENTS: Set<&'static str> = phf_set! { "N", "O", "S", "P" };

pub fn is_protein_residue(residue_name: &str) -> bool {
    PROTEIN_RESIDUES.contains(residue_name.trim())
}

pub fn is_water_residue(residue_name: &str) -> bool {
    WATER_RESIDUES.contains(residue_name.trim())
}

pub fn is_aromatic_residue(residue_name: &str) -> bool {
    AROMATIC_RESIDUES.contains(residue_name.trim())
}

/// Residues whose side chain can carry a positive charge.
pub fn is_positive_residue(residue_name: &str) -> bool {
    POSITIVE_RESIDUES.contains(residue_name.trim())
}

/// Residues whose side chain can carry a negative charge.
pub fn is_negative_residue(residue_name: &str) -> bool {
    NEGATIVE_RESIDUES.contains(residue_name.trim())
}

/// Elements that can take part in a hydrogen bond as donor or acceptor heavy atom.
/// Expects an upper-cased symbol.
pub fn is_polar_element(element: &str) -> bool {
    POLAR_ELEMENTS.contains(element)
}
