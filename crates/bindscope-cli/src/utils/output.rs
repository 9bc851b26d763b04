use crate::error::{CliError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes `value` as pretty-printed JSON to `path`, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_to(value, &mut writer)?;
            writer.flush()?;
            info!("Result written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_to(value, &mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}

fn write_to<T: Serialize, W: Write>(value: &T, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).map_err(|e| CliError::Other(e.into()))?;
    writeln!(writer)?;
    Ok(())
}
