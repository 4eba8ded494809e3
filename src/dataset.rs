//! JSONL dataset output
//!
//! One compact chat example per line, lines separated by `\n`, nothing else
//! in the file.

use crate::errors::Result;
use crate::types::TrainingRecord;
use std::fs;
use std::path::Path;

/// Serialize records as JSONL, in record order
pub fn to_jsonl(records: &[TrainingRecord]) -> Result<String> {
    let lines = records
        .iter()
        .map(|record| serde_json::to_string(&record.to_chat_example()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(lines.join("\n"))
}

/// Write records to `path` as JSONL, creating parent directories
pub fn write_jsonl(path: &Path, records: &[TrainingRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, to_jsonl(records)?)?;
    Ok(())
}
