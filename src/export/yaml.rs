//! YAML export
//!
//! Same content as the JSON export, in a format meant for reading.

use std::io::Write;

use crate::error::{SetAsideError, SetAsideResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full store as YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> SetAsideResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(
        writer,
        "# SetAside export, generated {} by version {}",
        export.exported_at, export.app_version
    )
    .map_err(|e| SetAsideError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SetAsideError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| SetAsideError::Export(e.to_string()))?;

    Ok(())
}
