//! wageproc CLI — command-line client for the Quick Wage Processor server.
//!
//! Set WAGEPROC_API_URL (and optionally WAGEPROC_SESSION_FILE,
//! WAGEPROC_SESSION_TTL_SECS). The session survives between invocations in
//! the configured session file.

use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use wageproc_api_client::ApiClient;
use wageproc_cli::init_tracing;
use wageproc_core::{inline_url, now_ms, Config};
use wageproc_session::{FileBackend, SessionStore};
use wageproc_workflow::{
    decide, AccessGate, PayrollApi, PinReminder, RouteDecision, UploadEvent, UploadWorkflow,
};

#[derive(Parser)]
#[command(name = "wageproc", about = "Quick Wage Processor client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with your registered email and access PIN
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        pin: String,
    },
    /// Email yourself the access PIN
    ForgotPin {
        #[arg(long)]
        email: String,
        /// Stay running and show the resend cooldown counting down
        #[arg(long)]
        wait: bool,
    },
    /// Upload a payroll export (.html/.htm) and print the artifact links
    Upload {
        /// Path to the payroll export file
        file: std::path::PathBuf,
        /// Claim number (exactly 10 characters)
        #[arg(long)]
        claim_number: Option<String>,
        /// Date of loss, MM/DD/YYYY
        #[arg(long)]
        date_of_loss: Option<String>,
    },
    /// Show session status
    Status,
    /// Clear the stored session
    Logout,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Render the resend cooldown in place until it reaches zero. The ticker is
/// cancelled with this function's scope if the user interrupts.
async fn render_cooldown<A: PayrollApi>(reminder: &PinReminder<A>) {
    let _ticker = reminder.start_ticker();
    while reminder.cooldown_secs() > 0 {
        print!("\rSend again in {}s  ", reminder.cooldown_secs());
        let _ = std::io::stdout().flush();
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
    println!("\rYou can request another PIN now.");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    let client = ApiClient::from_config(&config).context("Failed to create API client")?;
    let mut store = SessionStore::new(
        FileBackend::new(config.session_file.clone()),
        config.session_ttl_ms(),
    );

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { email, pin } => {
            let mut gate = AccessGate::new(client);
            let now = now_ms();
            if gate.try_short_circuit(&mut store, now) {
                let holder = store.email(now).unwrap_or_default();
                println!("Already signed in as {}.", holder);
                return Ok(());
            }
            if let Err(err) = gate.submit(&mut store, &email, &pin, now_ms()).await {
                anyhow::bail!(err.user_message());
            }
            let holder = store.email(now_ms()).unwrap_or_default();
            println!("Signed in as {}.", holder);
        }
        Commands::ForgotPin { email, wait } => {
            let mut reminder = PinReminder::new(client);
            let outcome = reminder.send(&email).await;
            if outcome.is_ok() {
                println!("If the email is registered, the PIN has been sent.");
            }
            if wait && reminder.cooldown_secs() > 0 {
                render_cooldown(&reminder).await;
            }
            if let Err(err) = outcome {
                anyhow::bail!(err.user_message());
            }
        }
        Commands::Upload {
            file,
            claim_number,
            date_of_loss,
        } => {
            if decide(&mut store, now_ms()) == RouteDecision::RedirectToAccess {
                anyhow::bail!("Session expired or missing. Run `wageproc login` first.");
            }

            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("payroll.html");

            let mut workflow = UploadWorkflow::new(client);
            workflow.select_file(file_name, bytes);
            workflow.set_metadata(claim_number, date_of_loss);

            match workflow.submit(&mut store, now_ms()).await {
                UploadEvent::RedirectToAccess => {
                    anyhow::bail!("Session expired. Run `wageproc login` first.");
                }
                UploadEvent::Failed(err) => anyhow::bail!(err.user_message()),
                UploadEvent::Success(result) => {
                    print_json(&serde_json::json!({
                        "pdf_url": result.pdf_url,
                        "pdf_inline_url": result.pdf_url.as_deref().map(inline_url),
                        "excel_url": result.excel_url,
                        "excel_inline_url": result.excel_url.as_deref().map(inline_url),
                    }))?;
                }
            }
        }
        Commands::Status => {
            let now = now_ms();
            let authenticated = store.check_and_maybe_expire(now);
            print_json(&serde_json::json!({
                "authenticated": authenticated,
                "email": store.email(now),
            }))?;
        }
        Commands::Logout => {
            store.clear();
            println!("Signed out.");
        }
    }

    Ok(())
}
