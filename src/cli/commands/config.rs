use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config: true } = cmd {
        println!("📄 Config file: {}", Config::config_file().display());
        println!("📄 Effective configuration:\n");
        println!("{}", serde_yaml::to_string(&cfg.redacted())?);
    }
    Ok(())
}
