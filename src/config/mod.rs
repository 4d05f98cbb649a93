use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const MASK: &str = "********";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub sftp: SftpConfig,
    #[serde(default)]
    pub cloud: CloudConfig,
    #[serde(default)]
    pub dump: DumpConfig,
}

/// Bootstrap administrator created by `init` when missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub login: String,
    pub password: String,
}

/// File-transfer push of JSON backups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SftpConfig {
    pub host: Option<String>,
    #[serde(default = "default_sftp_port")]
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub remote_dir: Option<String>,
}

/// Cloud drive HTTP API used by the daily full backup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    pub token: Option<String>,
    #[serde(default = "default_cloud_folder")]
    pub folder: String,
    #[serde(default = "default_cloud_api")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// External database dump utility and the server it dumps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    #[serde(default = "default_dump_program")]
    pub program: String,
    #[serde(default = "default_dump_host")]
    pub host: String,
    #[serde(default = "default_dump_port")]
    pub port: u16,
    #[serde(default = "default_dump_user")]
    pub user: String,
    pub password: Option<String>,
    #[serde(default = "default_dump_dbname")]
    pub dbname: String,
}

fn default_backup_dir() -> String {
    "backups".to_string()
}
fn default_sftp_port() -> u16 {
    22
}
fn default_cloud_folder() -> String {
    "/hr_backups".to_string()
}
fn default_cloud_api() -> String {
    "https://cloud-api.yandex.net/v1/disk".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_dump_program() -> String {
    "pg_dump".to_string()
}
fn default_dump_host() -> String {
    "localhost".to_string()
}
fn default_dump_port() -> u16 {
    5432
}
fn default_dump_user() -> String {
    "postgres".to_string()
}
fn default_dump_dbname() -> String {
    "postgres".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            login: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl Default for SftpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_sftp_port(),
            user: None,
            password: None,
            remote_dir: None,
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            token: None,
            folder: default_cloud_folder(),
            api_base: default_cloud_api(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            program: default_dump_program(),
            host: default_dump_host(),
            port: default_dump_port(),
            user: default_dump_user(),
            password: None,
            dbname: default_dump_dbname(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            backup_dir: default_backup_dir(),
            admin: AdminConfig::default(),
            sftp: SftpConfig::default(),
            cloud: CloudConfig::default(),
            dump: DumpConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.hrtrack`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hrtrack")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("hrtrack.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("hrtrack.sqlite")
    }

    /// Load configuration from the standard file (defaults when missing),
    /// then apply environment overrides.
    pub fn load() -> AppResult<Self> {
        let mut cfg = Self::load_from(&Self::config_file())?;
        cfg.apply_env()?;
        Ok(cfg)
    }

    /// Load configuration from a specific file without env overrides.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Write the configuration file, creating the config directory.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Override values from `HRTRACK_*` environment variables.
    /// Empty variables are ignored; a malformed port is an error.
    pub fn apply_env(&mut self) -> AppResult<()> {
        set_string(&mut self.database, "HRTRACK_DB");
        set_string(&mut self.backup_dir, "HRTRACK_BACKUP_DIR");
        set_string(&mut self.admin.login, "HRTRACK_ADMIN_LOGIN");
        set_string(&mut self.admin.password, "HRTRACK_ADMIN_PASSWORD");

        set_optional(&mut self.sftp.host, "HRTRACK_SFTP_HOST");
        set_port(&mut self.sftp.port, "HRTRACK_SFTP_PORT")?;
        set_optional(&mut self.sftp.user, "HRTRACK_SFTP_USER");
        set_optional(&mut self.sftp.password, "HRTRACK_SFTP_PASSWORD");
        set_optional(&mut self.sftp.remote_dir, "HRTRACK_SFTP_REMOTE_DIR");

        set_optional(&mut self.cloud.token, "HRTRACK_CLOUD_TOKEN");
        set_string(&mut self.cloud.folder, "HRTRACK_CLOUD_FOLDER");
        set_string(&mut self.cloud.api_base, "HRTRACK_CLOUD_API");

        set_string(&mut self.dump.program, "HRTRACK_DUMP_PROGRAM");
        set_string(&mut self.dump.host, "HRTRACK_DUMP_HOST");
        set_port(&mut self.dump.port, "HRTRACK_DUMP_PORT")?;
        set_string(&mut self.dump.user, "HRTRACK_DUMP_USER");
        set_optional(&mut self.dump.password, "HRTRACK_DUMP_PASSWORD");
        set_string(&mut self.dump.dbname, "HRTRACK_DUMP_DBNAME");
        Ok(())
    }

    /// Copy of the configuration safe to print.
    pub fn redacted(&self) -> Self {
        let mut out = self.clone();
        out.admin.password = MASK.to_string();
        mask(&mut out.sftp.password);
        mask(&mut out.cloud.token);
        mask(&mut out.dump.password);
        out
    }

    /// Initialize configuration and database files.
    /// The config file is not written in test mode.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let mut cfg = if is_test {
            let mut c = Config::default();
            c.apply_env()?;
            c
        } else {
            Self::load()?
        };

        if let Some(name) = custom_db {
            let p = Path::new(&name);
            cfg.database = if p.is_absolute() || is_test {
                p.to_string_lossy().to_string()
            } else {
                dir.join(p).to_string_lossy().to_string()
            };
        }

        if !is_test {
            cfg.save(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        let db_path = Path::new(&cfg.database);
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(cfg)
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn set_string(field: &mut String, key: &str) {
    if let Some(v) = env_value(key) {
        *field = v;
    }
}

fn set_optional(field: &mut Option<String>, key: &str) {
    if let Some(v) = env_value(key) {
        *field = Some(v);
    }
}

fn set_port(field: &mut u16, key: &str) -> AppResult<()> {
    if let Some(v) = env_value(key) {
        *field = parse_port(&v)
            .ok_or_else(|| AppError::Config(format!("{key}: invalid port '{v}'")))?;
    }
    Ok(())
}

/// TCP port in `1..=65535`.
pub fn parse_port(value: &str) -> Option<u16> {
    value.trim().parse().ok().filter(|p| *p != 0)
}

fn mask(field: &mut Option<String>) {
    if field.is_some() {
        *field = Some(MASK.to_string());
    }
}
