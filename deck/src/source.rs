//! Reading presentation sources from disk or standard input.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::Error;

/// Read a presentation file, refusing anything that is not a regular file.
pub fn read_file(path: &Path) -> Result<String, Error> {
    let metadata = fs::metadata(path).map_err(|_| Error::NotFound(path.to_path_buf()))?;
    let file_type = metadata.file_type();

    if file_type.is_dir() {
        return Err(Error::Directory(path.to_path_buf()));
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if file_type.is_char_device() {
            return Err(Error::CharDevice(path.to_path_buf()));
        }
        if file_type.is_block_device() {
            return Err(Error::BlockDevice(path.to_path_buf()));
        }
        if file_type.is_fifo() {
            return Err(Error::Pipe(path.to_path_buf()));
        }
        if file_type.is_socket() {
            return Err(Error::Socket(path.to_path_buf()));
        }
    }

    debug!(path = %path.display(), bytes = metadata.len(), "reading presentation");
    Ok(fs::read_to_string(path)?)
}

/// Read a presentation piped through standard input. An interactive
/// terminal has nothing to read.
pub fn read_stdin(mut reader: impl Read, is_terminal: bool) -> Result<String, Error> {
    if is_terminal {
        return Err(Error::NoInput);
    }
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(content)
}

/// True when `path` names standard input rather than a file.
pub fn is_stdin(path: &str) -> bool {
    path.is_empty() || path == "-"
}
