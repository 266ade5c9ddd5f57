use clap::{Parser, Subcommand};
use querylog_application::use_cases::LogViewState;
use querylog_domain::{CliOverrides, LogFilter, ToggleAction};
use tracing::info;

mod bootstrap;
mod di;
mod output;

#[derive(Parser)]
#[command(name = "querylog")]
#[command(version)]
#[command(about = "Browse a DNS server's query log and toggle per-domain blocking rules")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Control API base URL
    #[arg(short = 'u', long)]
    url: Option<String>,

    /// Entries per page
    #[arg(long)]
    page_size: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one page of the query log, newest first
    Logs {
        /// Zero-based page; older pages are fetched on the way
        #[arg(short, long, default_value_t = 0)]
        page: u32,

        /// Only rows whose domain contains this text
        #[arg(long)]
        domain: Option<String>,

        /// Only rows whose client address or name contains this text
        #[arg(long)]
        client: Option<String>,

        /// Only rows with this query type (A, AAAA, ...)
        #[arg(long = "type", value_name = "TYPE")]
        query_type: Option<String>,

        /// Only rows with a response containing this text
        #[arg(long)]
        response: Option<String>,

        /// Only blocked rows
        #[arg(long)]
        filtered_only: bool,
    },
    /// Block a domain with a custom rule
    Block { domain: String },
    /// Unblock a domain with a custom rule
    Unblock { domain: String },
    /// Show the filtering status
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        server_url: cli.url.clone(),
        page_size: cli.page_size,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!(server = %config.server.url, "querylog v{}", env!("CARGO_PKG_VERSION"));

    let adapters = di::Adapters::new(&config)?;
    let use_cases = di::UseCases::new(&adapters, &config)?;

    match cli.command {
        Command::Logs {
            page,
            domain,
            client,
            query_type,
            response,
            filtered_only,
        } => {
            let session = &use_cases.log_view;
            session.set_filter(LogFilter {
                domain,
                client,
                query_type,
                response,
                filtered_only,
            });
            if session.open().await? == LogViewState::Disabled {
                println!("Query log is disabled on the server");
                return Ok(());
            }

            let rows = session.walk_to_page(page).await?;

            output::print_page(page, &session.cursor(), &session.filter(), &rows);
            session.close();
        }
        Command::Block { domain } => {
            let outcome = use_cases
                .toggle_blocking
                .execute(&domain, ToggleAction::Block)
                .await?;
            output::print_toggle(&domain, ToggleAction::Block, &outcome);
        }
        Command::Unblock { domain } => {
            let outcome = use_cases
                .toggle_blocking
                .execute(&domain, ToggleAction::Unblock)
                .await?;
            output::print_toggle(&domain, ToggleAction::Unblock, &outcome);
        }
        Command::Status => {
            let status = use_cases.get_filtering_status.execute().await?;
            output::print_status(&status);
        }
    }

    Ok(())
}
