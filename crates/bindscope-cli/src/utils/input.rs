use crate::error::{CliError, Result};
use std::path::Path;
use tracing::debug;

const ACCEPTED_EXTENSIONS: [&str; 3] = ["pdb", "ent", "txt"];

/// Checks that `path` names a PDB-format file by its extension (case-insensitive).
pub fn validate_extension(path: &Path) -> Result<()> {
    let accepted = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });
    if accepted {
        Ok(())
    } else {
        Err(CliError::Argument(format!(
            "Unsupported file type for '{}'. Use .pdb, .ent or .txt (PDB format).",
            path.display()
        )))
    }
}

/// Reads a structure file as text. Invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_structure_text(path: &Path) -> Result<String> {
    validate_extension(path)?;
    let bytes = std::fs::read(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read input structure");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
