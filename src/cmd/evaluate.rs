use crate::cmd::progress;
use crate::config::ConfigManager;
use crate::error::Result;
use crate::readiness::AuthMethodKind;
use crate::service::{EvaluationReport, ReadinessService};
use clap::Args;
use colored::Colorize;
use std::time::Duration;
use tracing::warn;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// User object ID or user principal name
    user_id: String,

    /// Print the evaluation as JSON
    #[arg(long)]
    json: bool,

    /// Re-evaluate every N seconds until interrupted
    #[arg(long, value_name = "SECS")]
    watch: Option<u64>,

    /// Use a pre-acquired Graph access token instead of app credentials
    #[arg(long, env = "PWREADY_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,
}

pub async fn run(args: EvaluateArgs) -> Result<()> {
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load_config()?;
    let service =
        ReadinessService::from_config(&config_manager, &config, args.access_token.clone())?;

    let Some(secs) = args.watch else {
        return evaluate_once(&service, &args.user_id, args.json).await;
    };

    let mut interval = tokio::time::interval(Duration::from_secs(secs.max(1)));
    loop {
        tokio::select! {
            _ = interval.tick() => {
                // Each run stands alone; a failure does not end the watch
                if let Err(e) = evaluate_once(&service, &args.user_id, args.json).await {
                    warn!(error = %e, "Evaluation failed");
                    eprintln!("{} {}", "Error:".red().bold(), e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\n{} Stopped watching", "→".cyan());
                return Ok(());
            }
        }
    }
}

async fn evaluate_once(service: &ReadinessService, user_id: &str, json: bool) -> Result<()> {
    let spinner = if json {
        progress::hidden_spinner()
    } else {
        progress::create_spinner(&format!("Evaluating {}...", user_id))
    };

    match service.evaluate(user_id).await {
        Ok(report) => {
            progress::finish_spinner_success(&spinner, "Evaluation complete");
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_scorecard(&report);
            }
            Ok(())
        }
        Err(e) => {
            progress::finish_spinner_error(&spinner, "Evaluation failed");
            Err(e)
        }
    }
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value {
        "Yes".green()
    } else {
        "No".red()
    }
}

fn print_scorecard(report: &EvaluationReport) {
    let user = &report.user;

    println!("\n{}", "Passwordless Readiness".bold());
    println!("{}", "═".repeat(60));

    println!("\n{}", "User".bold());
    println!("  Name:         {}", user.name());
    println!("  UPN:          {}", user.user_principal_name.as_deref().unwrap_or("-"));
    println!("  Mail:         {}", user.mail.as_deref().unwrap_or("-"));

    println!("\n{}", "Readiness".bold());
    println!("  {} {}%", progress::score_bar(report.score), report.score);
    let status = if report.ready {
        "Ready for passwordless sign-in".green().bold()
    } else if report.passwordless_active {
        "Passwordless in use, setup incomplete".yellow().bold()
    } else {
        "Not ready".red().bold()
    };
    println!("  Status:       {}", status);

    println!("\n{}", "Security Summary".bold());
    println!(
        "  Default method: {}",
        report
            .facts
            .default_method_kind
            .map(|k| k.as_str())
            .unwrap_or("-")
    );
    println!(
        "  Phone:          {}",
        report
            .first_of(AuthMethodKind::Phone)
            .and_then(|m| m.phone_number())
            .unwrap_or("-")
    );
    println!("  Authenticator:  {}", yes_no(report.facts.has_authenticator_app));
    println!("  MFA:            {}", yes_no(report.has_mfa));
    println!("  Windows Hello:  {}", yes_no(report.has_whfb));

    if !report.available_methods.is_empty() {
        println!("\n{}", "Registered Methods".bold());
        for method in &report.available_methods {
            let mut line = format!("  • {}", method.kind().as_str());
            if let Some(device) = method.device_display_name() {
                line.push_str(&format!(" ({})", device));
            } else if let Some(number) = method.phone_number() {
                line.push_str(&format!(" ({})", number));
            }
            if method.is_default {
                line.push_str(&format!(" {}", "[default]".cyan()));
            }
            println!("{}", line);
        }
    }

    println!("\n{}", "Recommended Actions".bold());
    if report.recommended_steps.is_empty() {
        println!("  {} No action required", "✓".green());
    } else {
        for (i, step) in report.recommended_steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step.title.bold());
            println!("     {}", step.description);
            println!("     {} {}", "→".cyan(), step.link.dimmed());
        }
    }

    println!();
}
