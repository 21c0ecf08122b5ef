use crate::config::ConfigManager;
use crate::error::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct PolicyArgs {}

/// Print the effective readiness policy as TOML
pub async fn run(_args: PolicyArgs) -> Result<()> {
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load_config()?;

    println!(
        "{} {}",
        "#".dimmed(),
        format!("from {}", config_manager.config_file().display()).dimmed()
    );
    print!("{}", config.policy.to_toml()?);

    Ok(())
}
