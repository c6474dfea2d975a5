//! Loading source text from disk.

use std::path::Path;

use crate::errors::SourceError;

/// Read `path` as UTF-8 text, rejecting files larger than `max_bytes`.
pub fn read_source(path: &Path, max_bytes: u64) -> Result<String, SourceError> {
    let io_err = |source: std::io::Error| SourceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > max_bytes {
        return Err(SourceError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: max_bytes,
        });
    }

    let bytes = std::fs::read(path).map_err(io_err)?;
    String::from_utf8(bytes).map_err(|_| SourceError::NotUtf8 {
        path: path.to_path_buf(),
    })
}
