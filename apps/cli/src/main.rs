use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{config::load_settings, ClientContext, Severity, SubmitOutcome};
use shared::domain::{ShortCode, SHORT_CODE_MAX_LEN};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "tinylink", about = "Create, list and delete TinyLink short links")]
struct Args {
    /// Overrides tinylink.toml, TINYLINK_API_BASE_URL and APP__API_BASE_URL.
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every short link with click counts.
    List,
    /// Shorten a URL. Leave --code out to let the server generate one.
    Create {
        url: String,
        /// Custom code, 6-8 chars of A-Z, a-z, 0-9.
        #[arg(long, value_parser = parse_code)]
        code: Option<String>,
    },
    /// Delete a short link by its code.
    Delete { code: String },
}

/// Rejects codes the server could never accept by length; everything else
/// is left for the server to judge.
fn parse_code(raw: &str) -> Result<String, String> {
    match ShortCode::from_input(raw) {
        Some(code) if !code.within_input_limit() => Err(format!(
            "custom code must be at most {SHORT_CODE_MAX_LEN} characters"
        )),
        _ => Ok(raw.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_base_url) = args.api_base_url {
        settings.api_base_url = api_base_url;
    }
    let api_base = settings
        .api_base()
        .with_context(|| format!("cannot use api base url '{}'", settings.api_base_url))?;
    let ctx = ClientContext::new(api_base);

    let succeeded = match &args.command {
        Command::List => ctx.refresh().await,
        Command::Create { url, code } => matches!(
            ctx.submit_with(url, code.as_deref().unwrap_or_default())
                .await,
            SubmitOutcome::Created { .. }
        ),
        Command::Delete { code } => ctx.remove(code).await,
    };

    if let Some(notification) = ctx.notification() {
        match notification.severity {
            Severity::Error => eprintln!("error: {}", notification.text),
            Severity::Success | Severity::Info => println!("{}", notification.text),
        }
    }
    if succeeded {
        print!("{}", render::render_table(&ctx.directory_table()));
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
