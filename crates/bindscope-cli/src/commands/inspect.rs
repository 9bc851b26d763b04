use crate::cli::InspectArgs;
use crate::error::Result;
use crate::utils::{input, output};
use bindscope::workflows;
use std::path::Path;
use tracing::info;

pub fn run(args: InspectArgs, output_path: Option<&Path>) -> Result<()> {
    info!("Loading input structure from {:?}", &args.input);
    let text = input::read_structure_text(&args.input)?;
    let report = workflows::inspect::run(&text)?;
    output::write_json(&report, output_path)
}
