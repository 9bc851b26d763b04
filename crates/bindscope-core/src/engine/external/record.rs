use crate::engine::interaction::InteractionKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// The interaction categories reported by the external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolCategory {
    HydrophobicContacts,
    HbondsProteinDonor,
    HbondsLigandDonor,
    WaterBridges,
    SaltBridgeLigandNegative,
    SaltBridgeProteinNegative,
    PiStacking,
    PiCation,
    HalogenBonds,
    MetalComplexes,
}

impl ToolCategory {
    /// Every category, in the order records are collected.
    pub const ALL: [ToolCategory; 10] = [
        ToolCategory::HydrophobicContacts,
        ToolCategory::HbondsProteinDonor,
        ToolCategory::HbondsLigandDonor,
        ToolCategory::WaterBridges,
        ToolCategory::SaltBridgeLigandNegative,
        ToolCategory::SaltBridgeProteinNegative,
        ToolCategory::PiStacking,
        ToolCategory::PiCation,
        ToolCategory::HalogenBonds,
        ToolCategory::MetalComplexes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::HydrophobicContacts => "hydrophobic_contacts",
            ToolCategory::HbondsProteinDonor => "hbonds_pdon",
            ToolCategory::HbondsLigandDonor => "hbonds_ldon",
            ToolCategory::WaterBridges => "water_bridges",
            ToolCategory::SaltBridgeLigandNegative => "saltbridge_lneg",
            ToolCategory::SaltBridgeProteinNegative => "saltbridge_pneg",
            ToolCategory::PiStacking => "pistacking",
            ToolCategory::PiCation => "pication",
            ToolCategory::HalogenBonds => "halogen_bonds",
            ToolCategory::MetalComplexes => "metal_complexes",
        }
    }

    pub fn kind(&self) -> InteractionKind {
        match self {
            ToolCategory::HydrophobicContacts => InteractionKind::HydrophobicContact,
            ToolCategory::HbondsProteinDonor | ToolCategory::HbondsLigandDonor => {
                InteractionKind::HydrogenBond
            }
            ToolCategory::WaterBridges => InteractionKind::WaterBridge,
            ToolCategory::SaltBridgeLigandNegative | ToolCategory::SaltBridgeProteinNegative => {
                InteractionKind::SaltBridge
            }
            ToolCategory::PiStacking => InteractionKind::PiStacking,
            ToolCategory::PiCation => InteractionKind::CationPi,
            ToolCategory::HalogenBonds => InteractionKind::HalogenBond,
            ToolCategory::MetalComplexes => InteractionKind::MetalComplex,
        }
    }
}

/// Alias lists for each normalized record field, tried in order.
pub mod aliases {
    pub const RECEPTOR_CHAIN: &[&str] = &["reschain", "chain"];
    pub const RECEPTOR_RESNAME: &[&str] = &["restype", "resname"];
    pub const RECEPTOR_SEQ: &[&str] = &["resnr", "resid"];
    pub const RECEPTOR_ATOM: &[&str] = &["protatom", "rest_atom", "atype"];
    pub const LIGAND_ATOM: &[&str] = &["ligatom", "lig_atom", "dtype"];
    pub const DISTANCE: &[&str] = &["dist", "distance"];
}

/// One raw interaction record as emitted by the tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolRecord(pub Map<String, Value>);

impl ToolRecord {
    /// The first alias present with a non-null value.
    pub fn lookup(&self, aliases: &[&str]) -> Option<&Value> {
        aliases
            .iter()
            .filter_map(|name| self.0.get(*name))
            .find(|v| !v.is_null())
    }

    pub fn text(&self, aliases: &[&str], default: &str) -> String {
        match self.lookup(aliases) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => default.to_string(),
        }
    }

    /// Integers may arrive as JSON integers, floats (truncated) or numeric strings.
    pub fn integer(&self, aliases: &[&str], default: isize) -> isize {
        self.lookup(aliases).and_then(value_to_int).unwrap_or(default)
    }

    pub fn float(&self, aliases: &[&str], default: f64) -> f64 {
        match self.lookup(aliases) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            Some(Value::Bool(b)) => f64::from(u8::from(*b)),
            _ => default,
        }
    }
}

pub(crate) fn value_to_int(value: &Value) -> Option<isize> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .and_then(|i| isize::try_from(i).ok()),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(isize::from(*b)),
        _ => None,
    }
}

/// All records of one binding site, keyed by category name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionSet(pub HashMap<String, Vec<ToolRecord>>);

impl InteractionSet {
    pub fn records(&self, category: ToolCategory) -> &[ToolRecord] {
        self.0.get(category.as_str()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of records across the known categories.
    pub fn total(&self) -> usize {
        ToolCategory::ALL.iter().map(|&c| self.records(c).len()).sum()
    }
}

/// Binding-site id (`RESNAME:CHAIN:SEQNUM`) to interaction set, in the tool's order.
pub type BindingSiteReport = IndexMap<String, InteractionSet>;
