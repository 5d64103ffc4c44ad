mod config;
mod repl;
mod terminal;

use std::{
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{HttpScanner, ScanController, SubmitOutcome};
use shared::domain::{InputMode, QrUpload};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::{repl::ReplCommand, terminal::TerminalView};

type Controller = ScanController<HttpScanner, TerminalView<std::io::Stdout>>;

const EXIT_DANGEROUS: u8 = 2;
const EXIT_FALLBACK: u8 = 3;

/// Scan text, URLs or QR code images for phishing.
#[derive(Parser, Debug)]
#[command(
    name = "phishscan",
    version,
    after_help = "Exit status in one-shot mode: 0 safe, 2 dangerous, 3 scanner unreachable, 1 usage error."
)]
struct Args {
    /// Scanner origin, e.g. http://localhost:8000
    #[arg(long)]
    origin: Option<String>,
    /// Config file (defaults to ./phishscan.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Input mode: text, url or qr. Defaults to qr with --file, text otherwise.
    #[arg(long)]
    mode: Option<InputMode>,
    /// QR code image to upload
    #[arg(long)]
    file: Option<PathBuf>,
    /// Per-request timeout; no timeout when omitted
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[arg(long)]
    no_color: bool,
    /// Check that the scanner service is online and exit
    #[arg(long)]
    check: bool,
    /// Text or URL to scan; starts an interactive session when empty
    input: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(origin) = &args.origin {
        settings.origin = config::normalize_origin(origin);
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = Some(timeout_secs);
    }
    if args.no_color {
        settings.color = false;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?settings, "settings loaded");

    let scanner = match settings.request_timeout() {
        Some(timeout) => HttpScanner::with_timeout(&settings.origin, timeout)?,
        None => HttpScanner::new(&settings.origin)?,
    };

    if args.check {
        return check_health(&scanner).await;
    }

    let controller = ScanController::new(
        scanner,
        TerminalView::new(std::io::stdout(), settings.color),
    )
    .with_min_result_latency(settings.min_result_latency());

    let mode = args.mode.unwrap_or(if args.file.is_some() {
        InputMode::Qr
    } else {
        InputMode::Text
    });
    let text = args.input.join(" ");

    if text.trim().is_empty() && args.file.is_none() {
        run_interactive(&controller, mode).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let file = match &args.file {
        Some(path) => Some(load_qr_file(path).await?),
        None => None,
    };
    run_once(&controller, mode, text, file).await
}

async fn check_health(scanner: &HttpScanner) -> Result<ExitCode> {
    match scanner.health().await {
        Ok(health) if health.is_online() => {
            println!(
                "{} is online ({})",
                scanner.origin(),
                health.version.as_deref().unwrap_or("unknown version")
            );
            Ok(ExitCode::SUCCESS)
        }
        Ok(health) => {
            println!("{} reports status '{}'", scanner.origin(), health.status);
            Ok(ExitCode::from(EXIT_FALLBACK))
        }
        Err(failure) => {
            println!("{} is unreachable: {failure}", scanner.origin());
            Ok(ExitCode::from(EXIT_FALLBACK))
        }
    }
}

async fn run_once(
    controller: &Controller,
    mode: InputMode,
    text: String,
    file: Option<QrUpload>,
) -> Result<ExitCode> {
    controller.select_mode(mode);
    controller.update_view(|view| {
        view.page_mut().set_input_text(text);
        view.page_mut().select_file(file);
    });

    match controller.submit().await {
        SubmitOutcome::Completed(result) if result.safe => Ok(ExitCode::SUCCESS),
        SubmitOutcome::Completed(_) => Ok(ExitCode::from(EXIT_DANGEROUS)),
        SubmitOutcome::Fallback { .. } => Ok(ExitCode::from(EXIT_FALLBACK)),
        SubmitOutcome::EmptyInput => bail!("nothing to scan: the {mode} input is empty"),
        SubmitOutcome::MissingQrFile => bail!("qr mode needs --file <image>"),
        SubmitOutcome::Busy => bail!("a scan is already in progress"),
    }
}

async fn run_interactive(controller: &Controller, mode: InputMode) -> Result<()> {
    controller.select_mode(mode);
    println!("{}", repl::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(controller.active_mode())?;
        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Mode(mode) => {
                if controller.select_mode(mode) {
                    println!("mode: {mode}");
                }
            }
            ReplCommand::File(path) => match load_qr_file(&path).await {
                Ok(file) => {
                    println!("selected {} ({})", file.file_name, file.mime_type);
                    controller.update_view(|view| view.page_mut().select_file(Some(file)));
                }
                Err(err) => eprintln!("{err:#}"),
            },
            ReplCommand::Scan => {
                if controller.submit().await == SubmitOutcome::EmptyInput {
                    eprintln!("nothing to scan yet; type the text or URL first");
                }
            }
            ReplCommand::Clear => controller.update_view(|view| view.page_mut().set_input_text("")),
            ReplCommand::Help => println!("{}", repl::HELP),
            ReplCommand::Quit => break,
            ReplCommand::Input(text) => {
                controller.update_view(|view| view.page_mut().append_input_line(&text))
            }
            ReplCommand::Unknown(command) => {
                eprintln!("unknown command '{command}'; :help lists commands")
            }
        }
    }

    Ok(())
}

fn prompt(mode: InputMode) -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "[{mode}]> ")?;
    stdout.flush()?;
    Ok(())
}

async fn load_qr_file(path: &Path) -> Result<QrUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read QR image '{}'", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(QrUpload::new(file_name, mime_type, bytes))
}
