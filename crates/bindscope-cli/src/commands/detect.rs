use crate::cli::DetectArgs;
use crate::config;
use crate::error::Result;
use crate::utils::{input, output};
use bindscope::engine::config::LigandSelector;
use bindscope::engine::external::tool::ProcessTool;
use bindscope::workflows;
use std::path::Path;
use tracing::{info, warn};

pub fn run(
    args: DetectArgs,
    config_path: Option<&Path>,
    set_values: &[String],
    output_path: Option<&Path>,
) -> Result<()> {
    let config = config::resolve(config_path, set_values, &args.engine)?;
    let selector = LigandSelector::new(args.ligand.as_deref(), args.chain.as_deref());
    let request = config.request(selector)?;
    let tool = ProcessTool::from_config(&config.tool);

    info!("Loading input structure from {:?}", &args.input);
    let text = input::read_structure_text(&args.input)?;

    info!("Invoking the core detection workflow...");
    let result = workflows::detect::run(&text, &request, &tool)?;
    for warning in &result.warnings {
        warn!("{}", warning);
    }
    info!(
        "Detected {} interaction(s) with the {} engine.",
        result.interaction_count, result.engine_used
    );

    output::write_json(&result, output_path)
}
