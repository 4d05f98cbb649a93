use crate::config::SftpConfig;
use crate::errors::{AppError, AppResult};
use crate::remote::{ArtifactUploader, artifact_name, join_remote};
use ssh2::{Session, Sftp};
use std::fs::File;
use std::io;
use std::net::TcpStream;
use std::path::Path;

/// The few remote file-system operations an upload needs.
pub trait RemoteFs {
    fn is_dir(&mut self, path: &str) -> bool;
    fn mkdir(&mut self, path: &str) -> AppResult<()>;
    /// Copy a local file to `remote`, returning the bytes written.
    fn put(&mut self, local: &Path, remote: &str) -> AppResult<u64>;
}

/// Make sure `dir` exists, creating each missing segment in turn.
/// Failures on single segments (usually "already exists") are ignored;
/// only the final check decides.
pub fn ensure_remote_dir<F: RemoteFs + ?Sized>(fs: &mut F, dir: &str) -> AppResult<()> {
    if fs.is_dir(dir) {
        return Ok(());
    }

    let mut path = if dir.starts_with('/') {
        String::from("/")
    } else {
        String::new()
    };

    for part in dir.split('/').filter(|p| !p.is_empty() && *p != ".") {
        if !path.is_empty() && !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(part);
        let _ = fs.mkdir(&path);
    }

    let target = if path.is_empty() { dir } else { path.as_str() };
    if fs.is_dir(target) {
        Ok(())
    } else {
        Err(AppError::Transfer(format!(
            "remote directory '{dir}' could not be created"
        )))
    }
}

/// Upload `local` into `remote_dir` and return the remote path.
pub fn push_file<F: RemoteFs + ?Sized>(
    fs: &mut F,
    local: &Path,
    remote_dir: &str,
) -> AppResult<String> {
    ensure_remote_dir(fs, remote_dir)?;
    let remote = join_remote(remote_dir, &artifact_name(local)?);
    fs.put(local, &remote)?;
    Ok(remote)
}

struct Ssh2Fs {
    sftp: Sftp,
}

impl RemoteFs for Ssh2Fs {
    fn is_dir(&mut self, path: &str) -> bool {
        self.sftp
            .stat(Path::new(path))
            .map(|st| st.is_dir())
            .unwrap_or(false)
    }

    fn mkdir(&mut self, path: &str) -> AppResult<()> {
        self.sftp.mkdir(Path::new(path), 0o755)?;
        Ok(())
    }

    fn put(&mut self, local: &Path, remote: &str) -> AppResult<u64> {
        let mut src = File::open(local)?;
        let mut dst = self.sftp.create(Path::new(remote))?;
        let written = io::copy(&mut src, &mut dst)?;
        Ok(written)
    }
}

/// SFTP push with password authentication.
#[derive(Debug, Clone)]
pub struct SftpUploader {
    host: String,
    port: u16,
    user: String,
    password: String,
    remote_dir: String,
}

impl SftpUploader {
    /// Fails with a configuration error when host or user is missing.
    pub fn from_config(cfg: &SftpConfig) -> AppResult<Self> {
        let host = non_empty(&cfg.host);
        let user = non_empty(&cfg.user);

        let (Some(host), Some(user)) = (host, user) else {
            return Err(AppError::Config(
                "SFTP is not configured (set sftp.host and sftp.user or HRTRACK_SFTP_*)"
                    .to_string(),
            ));
        };

        Ok(Self {
            host,
            port: cfg.port,
            user,
            password: cfg.password.clone().unwrap_or_default(),
            remote_dir: non_empty(&cfg.remote_dir).unwrap_or_else(|| ".".to_string()),
        })
    }

    pub fn remote_dir(&self) -> &str {
        &self.remote_dir
    }

    fn connect(&self) -> AppResult<Session> {
        let tcp = TcpStream::connect((self.host.as_str(), self.port))?;
        let mut session = Session::new()?;
        session.set_tcp_stream(tcp);
        session.handshake()?;
        session.userauth_password(&self.user, &self.password)?;

        if !session.authenticated() {
            return Err(AppError::Transfer(format!(
                "SFTP authentication rejected for user '{}'",
                self.user
            )));
        }
        Ok(session)
    }
}

impl ArtifactUploader for SftpUploader {
    fn name(&self) -> &'static str {
        "sftp"
    }

    fn upload(&self, local_path: &Path) -> AppResult<String> {
        if !local_path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Artifact not found: {}", local_path.display()),
            )
            .into());
        }

        let session = self.connect()?;
        let mut fs = Ssh2Fs {
            sftp: session.sftp()?,
        };

        let outcome = push_file(&mut fs, local_path, &self.remote_dir);

        drop(fs);
        let _ = session.disconnect(None, "upload finished", None);
        outcome
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
