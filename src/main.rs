// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;
use zoneport::api::{router, AppState};
use zoneport::config::Config;
use zoneport::controlplane::ControlPlaneClient;
use zoneport::import::{run_import, ImportAction, ImportOptions, MergeStrategy};
use zoneport::zonefile::parse_zone_file;

/// Bulk DNS zone import for the cloud DNS control plane.
#[derive(Parser)]
#[command(name = "zoneport", version, about)]
struct Cli {
    /// Path to a YAML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the DNS control plane (overrides config and environment).
    #[arg(long, global = true)]
    control_plane_url: Option<Url>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the import API server.
    Serve {
        /// Listen address (overrides config and environment).
        #[arg(long)]
        listen: Option<std::net::SocketAddr>,
    },
    /// Parse a zone file and import it into a zone.
    Import {
        /// Path to the zone file.
        file: PathBuf,

        /// Project owning the zone.
        #[arg(long)]
        project: String,

        /// Zone resource to import into.
        #[arg(long)]
        zone: String,

        /// Zone origin for apex detection; defaults to the file's $ORIGIN.
        #[arg(long)]
        origin: Option<String>,

        /// Merge strategy for existing RecordSets.
        #[arg(long, value_enum, default_value_t = StrategyArg::Append)]
        strategy: StrategyArg,

        /// Append duplicates of existing records instead of skipping them.
        #[arg(long)]
        no_skip_duplicates: bool,

        /// Plan only: print what would be imported without touching the
        /// control plane.
        #[arg(long)]
        plan: bool,
    },
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Append,
    Replace,
}

impl From<StrategyArg> for MergeStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Append => Self::Append,
            StrategyArg::Replace => Self::Replace,
        }
    }
}

fn main() -> Result<()> {
    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .thread_name("zoneport")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "zoneport",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        command => command,
    };

    init_tracing();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        // A control-plane URL on the command line satisfies the only
        // required setting.
        Err(_) if cli.control_plane_url.is_some() => Config {
            listen_addr: zoneport::constants::DEFAULT_LISTEN_ADDR.parse().unwrap(),
            control_plane_url: cli.control_plane_url.clone().unwrap(),
            control_plane_token: None,
        },
        Err(e) => return Err(e.context("failed to load configuration")),
    };
    if let Some(url) = cli.control_plane_url {
        config.control_plane_url = url;
    }

    let client = ControlPlaneClient::new(
        config.control_plane_url.clone(),
        config.control_plane_token.clone(),
    )
    .context("failed to build control-plane client")?;

    match command {
        Command::Serve { listen } => {
            let listen_addr = listen.unwrap_or(config.listen_addr);
            serve(client, listen_addr).await
        }
        Command::Import {
            file,
            project,
            zone,
            origin,
            strategy,
            no_skip_duplicates,
            plan,
        } => {
            let options = ImportOptions {
                skip_duplicates: !no_skip_duplicates,
                merge_strategy: strategy.into(),
            };
            import_file(client, &file, &project, &zone, origin, options, plan).await
        }
        Command::Completions { .. } => unreachable!("handled above"),
    }
}

/// Initialize logging.
///
/// Respects RUST_LOG for the filter (default `info`) and RUST_LOG_FORMAT
/// for the output format (`text` or `json`).
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

/// Run the API server until interrupted.
async fn serve(client: ControlPlaneClient, listen_addr: std::net::SocketAddr) -> Result<()> {
    info!("Starting zoneport import API");
    let state = AppState::new(Arc::new(client));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(%listen_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("server error")?;
    Ok(())
}

/// Parse `file` and import it into `(project, zone)`.
async fn import_file(
    client: ControlPlaneClient,
    file: &std::path::Path,
    project: &str,
    zone: &str,
    origin: Option<String>,
    options: ImportOptions,
    plan_only: bool,
) -> Result<()> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let parsed = match parse_zone_file(&text) {
        Ok(parsed) => parsed,
        Err(errors) => {
            for error in &errors {
                eprintln!("{}: {error}", file.display());
            }
            return Err(zoneport::errors::ImportError::Malformed {
                errors: errors.iter().map(ToString::to_string).collect(),
            }
            .into());
        }
    };

    if !parsed.unsupported.is_empty() {
        eprintln!(
            "note: {} record(s) of unsupported type(s) {} will not be imported",
            parsed.unsupported.total_records,
            parsed.unsupported.types.join(", ")
        );
    }

    let origin = origin.or(parsed.origin.clone());
    debug!(records = parsed.records.len(), origin = ?origin, "Parsed zone file");

    if plan_only {
        let plan = zoneport::import::plan_import(parsed.records, origin.as_deref());
        println!(
            "would import {} record(s); {} intra-batch duplicate(s), {} apex CNAME(s) as ALIAS, {} apex SOA/NS skipped",
            plan.importable.len(),
            plan.duplicates.len(),
            plan.alias_rewrites,
            plan.skipped_apex.total_count
        );
        return Ok(());
    }

    let run = run_import(
        &client,
        project,
        zone,
        parsed.records,
        origin.as_deref(),
        options,
    )
    .await;

    for detail in &run.outcome.details {
        let action = match detail.action {
            ImportAction::Created => "created",
            ImportAction::Updated => "updated",
            ImportAction::Skipped => "skipped",
            ImportAction::Failed => "FAILED ",
        };
        match &detail.message {
            Some(message) => println!(
                "{action} {:>5} {} {} ({message})",
                detail.record_type.as_str(),
                detail.name,
                detail.value
            ),
            None => println!(
                "{action} {:>5} {} {}",
                detail.record_type.as_str(),
                detail.name,
                detail.value
            ),
        }
    }

    let summary = &run.outcome.summary;
    println!(
        "{} record set(s): {} created, {} updated, {} skipped, {} failed",
        summary.total_record_sets,
        summary.created,
        summary.updated,
        summary.skipped,
        summary.failed
    );
    if run.skipped_apex.total_count > 0 {
        println!(
            "skipped {} platform-managed apex record(s) ({} SOA, {} NS)",
            run.skipped_apex.total_count,
            run.skipped_apex.soa.len(),
            run.skipped_apex.ns.len()
        );
    }

    if summary.failed > 0 {
        anyhow::bail!("{} record(s) failed to import", summary.failed);
    }
    Ok(())
}
