use crate::config::{Config, DumpConfig};
use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportLogic;
use crate::remote::{ArtifactUploader, CloudDriveUploader, SftpUploader};
use crate::ui::messages::{info, success, warning};
use crate::utils::time::{ARTIFACT_TS_FMT, now_utc};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use zip::ZipWriter;
use zip::write::FileOptions;

/// Local artifact and, when uploaded, its remote path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOutcome {
    pub local_path: PathBuf,
    pub remote_path: Option<String>,
}

pub struct BackupLogic;

impl BackupLogic {
    /// JSON snapshot `backup_<UTC ts>.json` in the backup directory,
    /// optionally zipped and pushed through SFTP.
    ///
    /// The local artifact is kept when the upload fails.
    pub fn create_backup(
        pool: &mut DbPool,
        cfg: &Config,
        upload_sftp: bool,
        compress: bool,
    ) -> AppResult<BackupOutcome> {
        let backup_dir = Path::new(&cfg.backup_dir);
        fs::create_dir_all(backup_dir)?;

        let ts = now_utc().format(ARTIFACT_TS_FMT).to_string();
        let json_path = backup_dir.join(format!("backup_{ts}.json"));

        ExportLogic::export_all_to_json(&pool.conn, &json_path)?;

        let local_path = if compress {
            let zipped = compress_backup(&json_path)?;
            if let Err(e) = fs::remove_file(&json_path) {
                warning(format!("Failed to remove uncompressed backup: {e}"));
            }
            zipped
        } else {
            json_path
        };

        ttlog_quiet(
            &pool.conn,
            "backup",
            &local_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );
        success(format!("Backup created: {}", local_path.display()));

        let remote_path = if upload_sftp {
            let uploader = SftpUploader::from_config(&cfg.sftp)?;
            Some(upload_artifact(&pool.conn, &uploader, &local_path)?)
        } else {
            None
        };

        Ok(BackupOutcome {
            local_path,
            remote_path,
        })
    }

    /// Plain-text SQL dump `full_backup_<UTC ts>.sql` produced by the
    /// external dump utility. A failed run leaves no dump file behind.
    pub fn create_full_sql_backup(cfg: &Config) -> AppResult<PathBuf> {
        let backup_dir = Path::new(&cfg.backup_dir);
        fs::create_dir_all(backup_dir)?;

        let ts = now_utc().format(ARTIFACT_TS_FMT).to_string();
        let out = backup_dir.join(format!("full_backup_{ts}.sql"));

        info(format!("Running {} for database '{}'", cfg.dump.program, cfg.dump.dbname));

        match run_dump(&cfg.dump, &out) {
            Ok(()) => {
                success(format!("SQL dump created: {}", out.display()));
                Ok(out)
            }
            Err(e) => {
                if out.exists()
                    && let Err(rm) = fs::remove_file(&out)
                {
                    warning(format!("Failed to remove partial dump {}: {rm}", out.display()));
                }
                Err(e)
            }
        }
    }

    /// Unattended routine: full SQL dump pushed to the cloud drive.
    pub fn daily_full_backup(cfg: &Config) -> AppResult<BackupOutcome> {
        // schema bootstrap is best effort; the dump targets the server database
        let conn = Connection::open(&cfg.database).ok();
        if let Some(conn) = &conn
            && let Err(e) = init_db(conn)
        {
            warning(format!("Database initialization skipped: {e}"));
        }

        let local_path = Self::create_full_sql_backup(cfg)?;

        let uploader = CloudDriveUploader::from_config(&cfg.cloud)?;
        let remote_path = match &conn {
            Some(conn) => upload_artifact(conn, &uploader, &local_path)?,
            None => uploader.upload(&local_path)?,
        };

        if let Some(conn) = &conn {
            ttlog_quiet(
                conn,
                "full_backup",
                &local_path.to_string_lossy(),
                &format!("Full backup uploaded to {remote_path}"),
            );
        }

        Ok(BackupOutcome {
            local_path,
            remote_path: Some(remote_path),
        })
    }
}

/// Push through `uploader`, reporting and logging the remote path.
pub fn upload_artifact(
    conn: &Connection,
    uploader: &dyn ArtifactUploader,
    local_path: &Path,
) -> AppResult<String> {
    info(format!(
        "Uploading {} via {}",
        local_path.display(),
        uploader.name()
    ));
    let remote = uploader.upload(local_path)?;

    ttlog_quiet(
        conn,
        "upload",
        &remote,
        &format!("Uploaded {} via {}", local_path.display(), uploader.name()),
    );
    success(format!("Uploaded via {}: {remote}", uploader.name()));
    Ok(remote)
}

/// Run the dump utility writing to `out`. The password travels only in the
/// child environment.
fn run_dump(dump: &DumpConfig, out: &Path) -> AppResult<()> {
    let mut cmd = Command::new(&dump.program);
    cmd.arg("-h")
        .arg(&dump.host)
        .arg("-p")
        .arg(dump.port.to_string())
        .arg("-U")
        .arg(&dump.user)
        .arg("-F")
        .arg("p")
        .arg("-f")
        .arg(out)
        .arg(&dump.dbname)
        .stdin(Stdio::null());

    if let Some(password) = &dump.password {
        cmd.env("PGPASSWORD", password);
    }

    let output = cmd.output()?;

    if output.status.success() {
        Ok(())
    } else {
        Err(AppError::DumpFailed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Other(format!("Not a file path: {}", path.display())))?;

    let mut f = fs::File::open(path)?;
    zip.start_file(entry, options)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish()?;

    info(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
