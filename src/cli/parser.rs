use clap::{Parser, Subcommand};

/// Command-line interface definition for hrtrack
#[derive(Parser)]
#[command(
    name = "hrtrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "HR records: work-time tracking, role-based views, backups and exports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Login of the user running the command
    #[arg(global = true, long = "user", env = "HRTRACK_USER")]
    pub user: Option<String>,

    /// Password of the user running the command
    #[arg(
        global = true,
        long = "password",
        env = "HRTRACK_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database, the configuration and the admin account
    Init,

    /// Print the effective configuration (secrets masked)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Clock in: start today's workday
    Start,

    /// Clock out: end today's workday
    End,

    /// Show the current work status and attendance history
    Status,

    /// List the employees visible to the logged-in user
    Employees,

    /// List department managers with the departments they head
    Managers,

    /// Create a JSON backup of all records
    Backup {
        #[arg(long, help = "Upload the backup through SFTP")]
        sftp: bool,

        #[arg(long, help = "Compress the backup into a .zip archive")]
        compress: bool,
    },

    /// Export all records as JSON or per-table CSV files
    Export {
        #[arg(long, value_name = "FILE", conflicts_with = "csv", required_unless_present = "csv")]
        json: Option<String>,

        #[arg(long, value_name = "DIR")]
        csv: Option<String>,
    },

    /// Full SQL dump uploaded to the cloud drive (for scheduled runs)
    FullBackup,
}
