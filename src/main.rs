use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use futures::StreamExt;
use tokio_tungstenite::tungstenite::Message;

use phalanx_dashboard::config::DashboardConfig;
use phalanx_dashboard::model::Anomaly;
use phalanx_dashboard::upstream::Clients;

#[derive(Parser)]
#[command(
    name = "phalanx-dashboard",
    about = "Security operations dashboard gateway for the Phalanx platform",
    version,
    long_about = None
)]
struct Cli {
    /// Path to a TOML config file (overrides the standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard server (panels + JSON API + live feed relay)
    Serve {
        /// Bind address (overrides the configured one)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Probe each backend service once and print a status table
    Status {
        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },

    /// Subscribe to the live anomaly feed and print each anomaly
    Watch {
        /// Stop after this many anomalies (0 = unbounded)
        #[arg(long, default_value = "0")]
        limit: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::load_or_default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            tracing::info!(bind = %config.server.bind, "Starting Phalanx dashboard");
            phalanx_dashboard::serve(config).await?;
        }
        Commands::Status { json } => {
            let clients = Clients::new(&config)?;
            let statuses = collect_statuses(&clients).await;

            if json {
                let report: Vec<_> = statuses
                    .iter()
                    .map(|(service, ok, details)| {
                        serde_json::json!({
                            "service": service,
                            "status": if *ok { "pass" } else { "fail" },
                            "details": details,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("\nPhalanx Backend Status");
                println!("{:<12} | {:<6} | Details", "Service", "Status");
                println!("{:-<12}-|-{:-<6}-|-{:-<40}", "", "", "");
                for (service, ok, details) in &statuses {
                    let status = if *ok { "PASS" } else { "FAIL" };
                    println!("{:<12} | {:<6} | {}", service, status, details);
                }
                println!();
            }
        }
        Commands::Watch { limit } => {
            tracing::info!("Subscribing to anomaly feed");
            let clients = Clients::new(&config)?;
            watch_feed(&clients, limit).await?;
        }
    }

    Ok(())
}

/// Probe each backend's list endpoint once. Diagnostic only: a failing
/// backend is reported, not fatal.
async fn collect_statuses(clients: &Clients) -> Vec<(&'static str, bool, String)> {
    let mut statuses = Vec::new();

    statuses.push(match clients.anomalies.list().await {
        Ok(anomalies) => ("anomalies", true, format!("{} anomalies", anomalies.len())),
        Err(e) => ("anomalies", false, e.to_string()),
    });
    statuses.push(match clients.reports.list().await {
        Ok(reports) => ("reports", true, format!("{} reports", reports.len())),
        Err(e) => ("reports", false, e.to_string()),
    });
    statuses.push(match clients.connectors.list().await {
        Ok(connectors) => ("connectors", true, format!("{} connectors", connectors.len())),
        Err(e) => ("connectors", false, e.to_string()),
    });
    statuses.push(match clients.policies.list().await {
        Ok(policies) => ("policies", true, format!("{} policies", policies.len())),
        Err(e) => ("policies", false, e.to_string()),
    });

    statuses
}

async fn watch_feed(clients: &Clients, limit: u64) -> Result<()> {
    let mut feed = clients.anomalies.subscribe().await?;
    let mut seen: u64 = 0;

    while let Some(frame) = feed.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                match serde_json::from_str::<Anomaly>(text.as_str()) {
                    Ok(anomaly) => {
                        let t = &anomaly.transaction;
                        println!(
                            "{} {} sent {} {} to {} ({}) -- {}",
                            t.timestamp.to_rfc3339(),
                            t.user_id,
                            t.amount,
                            t.currency,
                            t.recipient,
                            t.country,
                            anomaly.reason
                        );
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "unparseable feed frame");
                        println!("{}", text);
                    }
                }
                seen += 1;
                if limit > 0 && seen >= limit {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                tracing::info!("feed closed by detector");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "feed stream error");
                break;
            }
        }
    }

    Ok(())
}
