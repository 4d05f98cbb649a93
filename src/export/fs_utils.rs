// src/export/fs_utils.rs

use crate::errors::AppResult;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Create the parent directory of `path` if it is missing.
pub(crate) fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

/// Write `path` through a sibling `.part` file renamed into place once
/// complete. On failure the `.part` file is removed and `path` is untouched.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> AppResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> AppResult<()>,
{
    let tmp = part_path(path);

    let outcome: AppResult<()> = (|| {
        let mut out = BufWriter::new(File::create(&tmp)?);
        write(&mut out)?;
        out.flush()?;
        out.get_ref().sync_all()?;
        drop(out);
        fs::rename(&tmp, path)?;
        Ok(())
    })();

    if outcome.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    outcome
}
