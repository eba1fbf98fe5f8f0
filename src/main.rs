mod config;
mod document;
mod error;
mod fetch;
mod model;
mod parser;
mod pipeline;
mod render;

use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::Settings;
use crate::fetch::{CmsClient, Fetcher};
use crate::pipeline::RunOutcome;

#[derive(Parser)]
#[command(name = "chapter_roster", about = "BNI chapter member roster builder")]
struct Cli {
    /// Settings file (default: ./roster.toml if present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every member's profile and write the roster page
    Run {
        /// Output HTML file (default: from settings)
        #[arg(short, long)]
        output: Option<String>,
        /// Max members to fetch
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show the members found in the chapter listing
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    let client = CmsClient::new(&settings).context("Failed to build HTTP client")?;

    let result = match cli.command {
        Commands::Run { output, limit } => {
            let site = settings.site()?;
            let output = output.unwrap_or_else(|| settings.output.clone());
            match pipeline::run(&client, &site, limit).await? {
                RunOutcome::NoMembers { listing } => {
                    std::fs::write(&settings.debug_listing, &listing).with_context(|| {
                        format!("Failed to write {}", settings.debug_listing)
                    })?;
                    warn!("Listing saved to {} for inspection", settings.debug_listing);
                    println!("No members found.");
                }
                RunOutcome::Completed(report) => {
                    let page = document::assemble(&settings.title, &report.cards);
                    std::fs::write(&output, page)
                        .with_context(|| format!("Failed to write {}", output))?;
                    for failure in &report.failures {
                        println!(
                            "  skipped {} ({}): {}",
                            truncate(&failure.candidate.raw_display_name, 30),
                            failure.candidate.external_id,
                            failure.error
                        );
                    }
                    println!("{}: written {}/{}", output, report.succeeded(), report.total);
                }
            }
            Ok(())
        }
        Commands::List => {
            let listing = client.fetch_listing().await?;
            let members = parser::index_members(&listing);
            if members.is_empty() {
                println!("No members found.");
                return Ok(());
            }

            println!("{:>3} | {:<32} | {:<8} | {:<24}", "#", "Member", "Id kind", "Id");
            println!("{}", "-".repeat(76));
            for (i, m) in members.iter().enumerate() {
                println!(
                    "{:>3} | {:<32} | {:<8} | {:<24}",
                    i + 1,
                    truncate(&m.raw_display_name, 32),
                    m.id_kind.param().trim_start_matches("encrypted"),
                    truncate(&m.external_id, 24)
                );
            }
            println!("\n{} members", members.len());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
