use super::error::EngineError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CUTOFF_ANGSTROMS: f64 = 5.0;
pub const DEFAULT_TOOL_PROGRAM: &str = "plip-bridge";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Distance cutoff must be a finite positive number (got {0})")]
    InvalidCutoff(f64),
}

/// How the engine is chosen for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineMode {
    /// Prefer the external tool and fall back to the heuristic engine when it is missing.
    #[default]
    Auto,
    ForcedExternal,
    ForcedHeuristic,
}

impl EngineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineMode::Auto => "auto",
            EngineMode::ForcedExternal => "plip",
            EngineMode::ForcedHeuristic => "heuristic",
        }
    }
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(EngineMode::Auto),
            "plip" | "external" => Ok(EngineMode::ForcedExternal),
            "heuristic" => Ok(EngineMode::ForcedHeuristic),
            _ => Err(EngineError::InvalidEngine(s.trim().to_string())),
        }
    }
}

/// Which residues of a structure form the ligand.
///
/// Both fields are normalized on construction: surrounding whitespace is removed, the
/// residue name is upper-cased, and empty strings become `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct LigandSelector {
    name: Option<String>,
    chain: Option<String>,
}

fn normalize(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl LigandSelector {
    pub fn new(name: Option<&str>, chain: Option<&str>) -> Self {
        Self {
            name: normalize(name).map(str::to_uppercase),
            chain: normalize(chain).map(str::to_string),
        }
    }

    /// Select the largest ligand-like group automatically.
    pub fn autodetect() -> Self {
        Self::default()
    }

    pub fn by_name(name: &str) -> Self {
        Self::new(Some(name), None)
    }

    /// Treat every standard residue on `chain` as the ligand.
    pub fn chain(chain: &str) -> Self {
        Self::new(None, Some(chain))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn chain_id(&self) -> Option<&str> {
        self.chain.as_deref()
    }

    pub fn is_autodetect(&self) -> bool {
        self.name.is_none() && self.chain.is_none()
    }

    pub fn is_chain_as_ligand(&self) -> bool {
        self.name.is_none() && self.chain.is_some()
    }
}

impl fmt::Display for LigandSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.chain) {
            (None, None) => f.write_str("<autodetect>"),
            (Some(name), None) => write!(f, "'{name}'"),
            (None, Some(chain)) => write!(f, "chain '{chain}'"),
            (Some(name), Some(chain)) => write!(f, "'{name}' on chain '{chain}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRequest {
    pub selector: LigandSelector,
    pub cutoff: f64,
    pub mode: EngineMode,
}

impl Default for DetectionRequest {
    fn default() -> Self {
        Self {
            selector: LigandSelector::default(),
            cutoff: DEFAULT_CUTOFF_ANGSTROMS,
            mode: EngineMode::Auto,
        }
    }
}

#[derive(Default)]
pub struct DetectionRequestBuilder {
    selector: Option<LigandSelector>,
    cutoff: Option<f64>,
    mode: Option<EngineMode>,
}

impl DetectionRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selector(mut self, selector: LigandSelector) -> Self {
        self.selector = Some(selector);
        self
    }
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn mode(mut self, mode: EngineMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn build(self) -> Result<DetectionRequest, ConfigError> {
        let cutoff = validate_cutoff(self.cutoff.unwrap_or(DEFAULT_CUTOFF_ANGSTROMS))?;
        Ok(DetectionRequest {
            selector: self.selector.unwrap_or_default(),
            cutoff,
            mode: self.mode.unwrap_or_default(),
        })
    }
}

pub(crate) fn validate_cutoff(cutoff: f64) -> Result<f64, ConfigError> {
    if cutoff.is_finite() && cutoff > 0.0 {
        Ok(cutoff)
    } else {
        Err(ConfigError::InvalidCutoff(cutoff))
    }
}

/// How to launch the external interaction tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalToolConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ExternalToolConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_TOOL_PROGRAM.to_string(),
            args: Vec::new(),
        }
    }
}
