use crate::cli::CompareArgs;
use crate::config;
use crate::error::Result;
use crate::utils::{input, output};
use bindscope::engine::config::LigandSelector;
use bindscope::engine::external::tool::ProcessTool;
use bindscope::workflows::compare::{self, ComplexInput};
use std::path::Path;
use tracing::info;

pub fn run(
    args: CompareArgs,
    config_path: Option<&Path>,
    set_values: &[String],
    output_path: Option<&Path>,
) -> Result<()> {
    let config = config::resolve(config_path, set_values, &args.engine)?;
    // Validates the shared cutoff before any file is read.
    config.request(LigandSelector::autodetect())?;
    let tool = ProcessTool::from_config(&config.tool);

    info!("Loading complexes {:?} and {:?}", &args.first, &args.second);
    let first_text = input::read_structure_text(&args.first)?;
    let second_text = input::read_structure_text(&args.second)?;

    let first = ComplexInput::new(
        &first_text,
        LigandSelector::new(args.ligand_1.as_deref(), args.chain_1.as_deref()),
    );
    let second = ComplexInput::new(
        &second_text,
        LigandSelector::new(args.ligand_2.as_deref(), args.chain_2.as_deref()),
    );

    info!("Invoking the core comparison workflow...");
    let result = compare::run(first, second, &config.compare_options(), &tool)?;
    info!(
        "{} shared signature(s), {} only in the first complex, {} only in the second.",
        result.shared.len(),
        result.only_in_complex_1.len(),
        result.only_in_complex_2.len()
    );

    output::write_json(&result, output_path)
}
