use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

use rs_webmail::config::{load_config, resolve_log_path};
use rs_webmail::domain::email::Email;
use rs_webmail::mail::http_client::HttpClient;
use rs_webmail::store::AppState;
use rs_webmail::terminal::run_tui;

#[derive(Parser)]
#[command(name = "rs_webmail")]
#[command(about = "Terminal webmail client", long_about = None)]
struct Cli {
    /// URL returning the JSON email list (overrides config.toml)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the TUI (default)
    Tui,

    /// Fetch once and print the (filtered) list to stdout
    List {
        #[arg(long, default_value = "")]
        filter: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
    let endpoint = cfg.endpoint(cli.endpoint.as_deref())?;
    let client = HttpClient::new(endpoint, cfg.timeout())?;

    match cli.cmd.unwrap_or(Command::Tui) {
        Command::Tui => {
            init_file_logging(&resolve_log_path(&cfg)?)?;
            log::info!("starting TUI against {}", client.endpoint());
            run_tui(client).map_err(|e| anyhow!("{e:?}"))
        }

        Command::List { filter } => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();

            let mut state = AppState::new();
            state.load_emails(client.fetch_emails()?);
            state.set_filter(filter);
            for (_, email) in state.filtered_emails() {
                println!("{}", format_row(email));
            }
            Ok(())
        }
    }
}

/// The TUI owns the screen, so its logs go to a file.
fn init_file_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn format_row(email: &Email) -> String {
    let mark = if email.read { "○" } else { "●" };
    format!(
        "{mark} {:<20} {:<28} {}",
        email.from, email.email_address, email.header
    )
}
