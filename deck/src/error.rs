use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a presentation source.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read file {}", .0.display())]
    NotFound(PathBuf),
    #[error("can not read directory {}", .0.display())]
    Directory(PathBuf),
    #[error("can not read char device {}", .0.display())]
    CharDevice(PathBuf),
    #[error("can not read block device {}", .0.display())]
    BlockDevice(PathBuf),
    #[error("can not read pipe {}", .0.display())]
    Pipe(PathBuf),
    #[error("can not read socket {}", .0.display())]
    Socket(PathBuf),
    #[error("no input provided")]
    NoInput,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
