use crate::cli::EngineArgs;
use crate::error::{CliError, Result};
use bindscope::engine::config::{
    DEFAULT_CUTOFF_ANGSTROMS, DetectionRequest, DetectionRequestBuilder, EngineMode,
    ExternalToolConfig, LigandSelector,
};
use bindscope::workflows::compare::CompareOptions;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialDetectionConfig {
    cutoff: Option<f64>,
    engine: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialToolConfig {
    program: Option<String>,
    args: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    detection: Option<PartialDetectionConfig>,
    #[serde(rename = "external-tool")]
    external_tool: Option<PartialToolConfig>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub cutoff: f64,
    pub mode: EngineMode,
    pub tool: ExternalToolConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF_ANGSTROMS,
            mode: EngineMode::Auto,
            tool: ExternalToolConfig::default(),
        }
    }
}

impl AppConfig {
    /// Builds a detection request for `selector`, validating the cutoff.
    pub fn request(&self, selector: LigandSelector) -> Result<DetectionRequest> {
        DetectionRequestBuilder::new()
            .selector(selector)
            .cutoff(self.cutoff)
            .mode(self.mode)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            cutoff: self.cutoff,
            mode: self.mode,
        }
    }
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the explicit `path`, or the user config file when it exists, or nothing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No configuration file found; using built-in defaults.");
                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli(mut self, set_values: &[String], args: &EngineArgs) -> Result<AppConfig> {
        self.apply_set_values(set_values)?;

        let detection = self.detection.take().unwrap_or_default();
        let tool = self.external_tool.take().unwrap_or_default();
        let defaults = AppConfig::default();

        let engine = args.engine.as_deref().or(detection.engine.as_deref());
        let mode = match engine {
            Some(raw) => raw.parse::<EngineMode>()?,
            None => defaults.mode,
        };

        Ok(AppConfig {
            cutoff: args.cutoff.or(detection.cutoff).unwrap_or(defaults.cutoff),
            mode,
            tool: ExternalToolConfig {
                program: tool.program.unwrap_or(defaults.tool.program),
                args: tool.args.unwrap_or(defaults.tool.args),
            },
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            let value_str = value_str.trim();

            match key {
                "detection.cutoff" => {
                    let cutoff = value_str.parse::<f64>().map_err(|_| {
                        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                    })?;
                    self.detection.get_or_insert_with(Default::default).cutoff = Some(cutoff);
                }
                "detection.engine" => {
                    self.detection.get_or_insert_with(Default::default).engine =
                        Some(value_str.to_string());
                }
                "external-tool.program" => {
                    self.external_tool
                        .get_or_insert_with(Default::default)
                        .program = Some(value_str.to_string());
                }
                "external-tool.args" => {
                    let args = value_str
                        .split(',')
                        .map(str::trim)
                        .filter(|a| !a.is_empty())
                        .map(str::to_string)
                        .collect();
                    self.external_tool.get_or_insert_with(Default::default).args = Some(args);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unknown configuration key for --set: {}",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "bindscope", "bindscope")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Resolves the effective configuration: CLI flags, then `--set` values, then the config
/// file, then built-in defaults.
pub fn resolve(config: Option<&Path>, set_values: &[String], args: &EngineArgs) -> Result<AppConfig> {
    let config = PartialAppConfig::load(config)?.merge_with_cli(set_values, args)?;
    debug!(?config, "Resolved configuration.");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use bindscope::engine::error::EngineError;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn engine_args(argv: &[&str]) -> (Cli, EngineArgs) {
        let cli = Cli::parse_from(argv);
        let args = match &cli.command {
            Commands::Detect(args) => args.engine.clone(),
            Commands::Compare(args) => args.engine.clone(),
            Commands::Inspect(_) => EngineArgs::default(),
        };
        (cli, args)
    }

    #[test]
    fn defaults_apply_without_any_source() {
        let config = PartialAppConfig::default()
            .merge_with_cli(&[], &EngineArgs::default())
            .unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.tool.program, "plip-bridge");
    }

    #[test]
    fn file_values_are_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [detection]
            cutoff = 4.0
            engine = "heuristic"

            [external-tool]
            program = "/opt/plip/bridge"
            args = ["--quiet"]
            "#,
        )
        .unwrap();

        let config = resolve(Some(&path), &[], &EngineArgs::default()).unwrap();
        assert_eq!(config.cutoff, 4.0);
        assert_eq!(config.mode, EngineMode::ForcedHeuristic);
        assert_eq!(config.tool.program, "/opt/plip/bridge");
        assert_eq!(config.tool.args, ["--quiet"]);
    }

    #[test]
    fn precedence_is_cli_then_set_then_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[detection]\ncutoff = 4.0\nengine = \"plip\"\n").unwrap();
        let path_str = path.to_str().unwrap();

        let (cli, args) = engine_args(&[
            "bindscope", "-c", path_str, "-S", "detection.cutoff=4.5", "-S",
            "detection.engine=auto", "detect", "-i", "a.pdb", "--cutoff", "6",
        ]);
        let config = resolve(cli.config.as_deref(), &cli.set_values, &args).unwrap();
        assert_eq!(config.cutoff, 6.0);
        assert_eq!(config.mode, EngineMode::Auto);

        let (cli, args) = engine_args(&[
            "bindscope", "-c", path_str, "-S", "detection.cutoff=4.5", "detect", "-i", "a.pdb",
        ]);
        let config = resolve(cli.config.as_deref(), &cli.set_values, &args).unwrap();
        assert_eq!(config.cutoff, 4.5);
        assert_eq!(config.mode, EngineMode::ForcedExternal);
    }

    #[test]
    fn set_tool_args_are_comma_separated() {
        let mut partial = PartialAppConfig::default();
        partial
            .apply_set_values(&["external-tool.args=--a, --b,,".to_string()])
            .unwrap();
        let config = partial.merge_with_cli(&[], &EngineArgs::default()).unwrap();
        assert_eq!(config.tool.args, ["--a", "--b"]);
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        let mut partial = PartialAppConfig::default();
        for bad in ["detection.cutoff", "detection.cutoff=abc", "unknown.key=1"] {
            let result = partial.apply_set_values(&[bad.to_string()]);
            assert!(matches!(result, Err(CliError::Config(_))), "{bad} was accepted");
        }
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[detection]\nradius = 4.0\n").unwrap();
        let result = PartialAppConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn invalid_engine_name_surfaces_engine_error() {
        let args = EngineArgs {
            engine: Some("docking".into()),
            cutoff: None,
        };
        let result = PartialAppConfig::default().merge_with_cli(&[], &args);
        assert!(matches!(
            result,
            Err(CliError::Core(EngineError::InvalidEngine(_)))
        ));
    }

    #[test]
    fn request_validates_cutoff() {
        let config = AppConfig {
            cutoff: -1.0,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.request(LigandSelector::autodetect()),
            Err(CliError::Config(_))
        ));
    }
}
