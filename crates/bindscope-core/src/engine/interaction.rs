use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The canonical interaction categories.
///
/// The `*_like` kinds come from the distance/element heuristic; the others come from the
/// external tool's geometric detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    HydrogenBondLike,
    SaltBridgeLike,
    HydrophobicContact,
    AromaticContact,
    CloseContact,
    HydrogenBond,
    WaterBridge,
    SaltBridge,
    PiStacking,
    CationPi,
    HalogenBond,
    MetalComplex,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::HydrogenBondLike => "hydrogen_bond_like",
            InteractionKind::SaltBridgeLike => "salt_bridge_like",
            InteractionKind::HydrophobicContact => "hydrophobic_contact",
            InteractionKind::AromaticContact => "aromatic_contact",
            InteractionKind::CloseContact => "close_contact",
            InteractionKind::HydrogenBond => "hydrogen_bond",
            InteractionKind::WaterBridge => "water_bridge",
            InteractionKind::SaltBridge => "salt_bridge",
            InteractionKind::PiStacking => "pi_stacking",
            InteractionKind::CationPi => "cation_pi",
            InteractionKind::HalogenBond => "halogen_bond",
            InteractionKind::MetalComplex => "metal_complex",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Kinds order by their serialized name so signature rows sort the same way in every output.
impl Ord for InteractionKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for InteractionKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Rounds a distance to three decimals, the precision every reported distance carries.
pub fn round_distance(distance: f64) -> f64 {
    (distance * 1000.0).round() / 1000.0
}

/// One receptor-atom to ligand-atom contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(rename = "interaction_type")]
    pub kind: InteractionKind,
    pub receptor_chain: String,
    pub receptor_resname: String,
    pub receptor_resseq: isize,
    pub receptor_atom: String,
    pub ligand_chain: String,
    pub ligand_resname: String,
    pub ligand_resseq: isize,
    pub ligand_atom: String,
    pub distance: f64,
}

impl Interaction {
    /// The receptor-side identity used to compare interaction patterns across complexes.
    pub fn signature(&self) -> Signature {
        Signature {
            kind: self.kind,
            chain: self.receptor_chain.clone(),
            seq: self.receptor_resseq,
            resname: self.receptor_resname.clone(),
        }
    }

    pub fn signature_key(&self) -> String {
        self.signature().key()
    }
}

/// (kind, receptor chain, receptor sequence number, receptor residue name).
///
/// Field order defines the ordering of signature rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    pub kind: InteractionKind,
    pub chain: String,
    pub seq: isize,
    pub resname: String,
}

impl Signature {
    /// `"{kind}|{chain}|{seq}|{resname}"`
    pub fn key(&self) -> String {
        format!("{}|{}|{}|{}", self.kind, self.chain, self.seq, self.resname)
    }
}

/// The engine that produced a detection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineKind {
    #[serde(rename = "heuristic")]
    Heuristic,
    #[serde(rename = "plip")]
    External,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Heuristic => "heuristic",
            EngineKind::External => "plip",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LigandDescriptor {
    pub name: String,
    pub chain: Option<String>,
    pub residues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub ligand: LigandDescriptor,
    pub interaction_count: usize,
    pub interactions: Vec<Interaction>,
    pub engine_used: EngineKind,
    pub warnings: Vec<String>,
}

impl DetectionResult {
    pub fn new(ligand: LigandDescriptor, interactions: Vec<Interaction>, engine: EngineKind) -> Self {
        Self {
            ligand,
            interaction_count: interactions.len(),
            interactions,
            engine_used: engine,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: Option<String>) -> Self {
        self.warnings.extend(warning);
        self
    }
}
