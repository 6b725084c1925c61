use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use rlmcontext::cli::{Cli, Command, OutputFormat};
use rlmcontext::config::Config;
use rlmcontext::{LoadOptions, RlmContext, SearchOptions};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > RUST_LOG / WARN
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", s);
                tracing::Level::WARN
            }
        },
        None => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("{}", e))?;

    debug!(?level, "Logging initialized");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    if let Command::Chunk {
        chunk_size: Some(size), ..
    } = cli.command
    {
        config.chunk_size = size;
    }

    let mut ctx = RlmContext::new(config.context_config()).context("Invalid context configuration")?;
    let options = LoadOptions {
        pattern: cli.pattern.clone().unwrap_or_else(|| config.pattern.clone()),
        recursive: !cli.no_recursive,
    };
    let report = ctx
        .load(&cli.root, &options)
        .context(format!("Failed to load {}", cli.root.display()))?;
    info!(root = %cli.root.display(), "{}", report);

    match cli.command {
        Command::Scan => match cli.format {
            OutputFormat::Text => println!("{} {}", "✓".green(), report),
            OutputFormat::Json => {
                let stats = ctx.stats();
                let summary = serde_json::json!({
                    "loaded": report.loaded_count(),
                    "skipped": report.skipped_count(),
                    "file_count": stats.file_count,
                    "total_chars": stats.total_chars,
                    "summary": report.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        },
        Command::Peek {
            query,
            window,
            max_results,
        } => {
            let hits = ctx.search_with(
                &query,
                SearchOptions {
                    window: window.unwrap_or(config.context_window),
                    max_results: max_results.unwrap_or(config.max_results),
                },
            )?;
            match cli.format {
                OutputFormat::Text => {
                    if hits.is_empty() {
                        println!("No matches found");
                    }
                    for hit in hits {
                        println!(
                            "{}:{} ...{}...",
                            hit.path.yellow(),
                            hit.offset.to_string().dimmed(),
                            hit.snippet
                        );
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&hits)?),
            }
        }
        Command::Chunk { filter, .. } => {
            let chunks = ctx.chunk(filter.as_deref());
            match cli.format {
                OutputFormat::Text => {
                    for chunk in chunks {
                        println!(
                            "{} {} ({} chars)",
                            chunk.source.cyan(),
                            format!("#{}", chunk.chunk_id).yellow(),
                            chunk.content.chars().count()
                        );
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string(&chunks)?),
            }
        }
        Command::Stats => {
            let stats = ctx.stats();
            match cli.format {
                OutputFormat::Text => {
                    println!("Root: {}", cli.root.display().to_string().cyan());
                    println!("  Files: {}", stats.file_count);
                    println!("  Total chars: {}", stats.total_chars);
                    println!("  Skipped: {}", report.skipped_count());
                }
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "file_count": stats.file_count,
                        "total_chars": stats.total_chars,
                        "skipped": report.skipped_count(),
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
            }
        }
    }

    Ok(())
}
