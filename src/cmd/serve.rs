use crate::config::ConfigManager;
use crate::error::Result;
use crate::server::{self, AppState};
use crate::service::ReadinessService;
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (default from config, then 127.0.0.1:7071)
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load_config()?;
    let service = ReadinessService::from_config(&config_manager, &config, None)?;

    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());

    println!(
        "{} Serving readiness API on {} (policy: {})",
        "→".cyan(),
        format!("http://{}", bind).bold(),
        service.policy().name
    );

    server::serve(&bind, AppState::new(service)).await
}
