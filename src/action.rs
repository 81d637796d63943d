//! GitHub Actions runner I/O: step outputs and workflow commands.

use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;

use crate::error::ActionError;

/// Name of the step output carrying the generated notes.
pub const RELEASE_NOTES_OUTPUT: &str = "release-notes";

/// Set a step output.
///
/// Appends to the file named by `GITHUB_OUTPUT`. Outside a runner (variable
/// unset) the legacy `::set-output` command is printed instead.
pub fn set_output(name: &str, value: &str) -> Result<(), ActionError> {
    match env::var_os("GITHUB_OUTPUT") {
        Some(path) if !path.is_empty() => write_output_file(Path::new(&path), name, value),
        _ => {
            println!("{}", format_legacy_output(name, value));
            Ok(())
        }
    }
}

/// Append a heredoc-style `name<<DELIM` record to an output file.
pub fn write_output_file(path: &Path, name: &str, value: &str) -> Result<(), ActionError> {
    let delimiter = format!(
        "ghadelimiter_{}",
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    );
    write_output_record(path, name, value, &delimiter)
}

fn write_output_record(
    path: &Path,
    name: &str,
    value: &str,
    delimiter: &str,
) -> Result<(), ActionError> {
    if name.contains(delimiter) || value.contains(delimiter) {
        return Err(ActionError::DelimiterCollision(name.to_string()));
    }

    let record = format_output_record(name, value, delimiter);

    let write_err = |source| ActionError::WriteOutput {
        name: name.to_string(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    file.write_all(record.as_bytes()).map_err(write_err)?;

    Ok(())
}

fn format_output_record(name: &str, value: &str, delimiter: &str) -> String {
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

fn format_legacy_output(name: &str, value: &str) -> String {
    format!("::set-output name={}::{}", name, escape_command_data(value))
}

/// Treat a blank action input as unset.
///
/// The runner exports every declared input, using an empty string for ones
/// the workflow leaves out.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Escape data for a workflow command (`::command::data`).
pub fn escape_command_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format the `::error::` line that marks the step as failed.
pub fn format_failure(message: &str) -> String {
    format!(
        "::error::{}",
        escape_command_data(&format!("Action failed with error: {}", message))
    )
}
