//! Remote transfer of backup artifacts.
//!
//! The two transports are separate implementations picked explicitly by
//! their callers: the JSON backup pushes through SFTP, the daily full
//! backup through the cloud drive API.

pub mod cloud;
pub mod sftp;

use crate::errors::{AppError, AppResult};
use std::path::Path;

pub use cloud::CloudDriveUploader;
pub use sftp::SftpUploader;

/// Upload an artifact and return its remote identifier (the remote path).
pub trait ArtifactUploader {
    /// Short transport name used in messages and the internal log.
    fn name(&self) -> &'static str;

    fn upload(&self, local_path: &Path) -> AppResult<String>;
}

/// File name of the artifact, as used on the remote side.
pub(crate) fn artifact_name(local_path: &Path) -> AppResult<String> {
    local_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Other(format!("Not a file path: {}", local_path.display())))
}

/// `dir` + `/` + `name`, without doubling the separator.
pub(crate) fn join_remote(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}
