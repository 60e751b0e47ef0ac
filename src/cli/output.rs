//! Writing rendered mass entry text to its destination

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{ConversionError, ConversionResult};

/// Write `content` to `path`, or to stdout when no path (or `-`) is given.
///
/// Files are written through a temporary file in the destination directory
/// and renamed into place, so a failed run leaves no partial output.
pub fn write_output(path: Option<&Path>, content: &str) -> ConversionResult<()> {
    match path {
        Some(path) if path.as_os_str() != "-" => write_atomic(path, content),
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content).map_err(|e| ConversionError::io(None, e))?;
            handle.flush().map_err(|e| ConversionError::io(None, e))
        }
    }
}

fn write_atomic(path: &Path, content: &str) -> ConversionResult<()> {
    let io_err = |e: io::Error| ConversionError::io(Some(path.to_path_buf()), e);

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(io_err)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(io_err)?;
    tmp.write_all(content.as_bytes()).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
