//! JSON output to stdout or a file.

use std::io::Write;

use camino::Utf8Path;
use log::info;
use serde::Serialize;

use crate::CliError;

/// Serialise `value` as pretty JSON to `path`, or to `writer` when no path is given.
///
/// Parent directories of `path` are created as needed.
pub(crate) fn write_json<T: Serialize>(
    writer: &mut dyn Write,
    path: Option<&Utf8Path>,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    let Some(target) = path else {
        return write_payload(writer, &payload);
    };
    let mut file = folio_fs::create_utf8_file(target).map_err(|source| CliError::CreateOutput {
        path: target.to_path_buf(),
        source,
    })?;
    write_payload(&mut file, &payload)?;
    info!("wrote output to {target}");
    Ok(())
}

fn write_payload(writer: &mut dyn Write, payload: &str) -> Result<(), CliError> {
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    writer.flush().map_err(CliError::WriteOutput)
}
