use std::{panic, sync::Arc};

use anyhow::Result;
use clap::Parser;
use tabled::{Table, Tabled};

use smc_scanner::{
    AnalysisPipeline, BatchIndex, BatchRunner, Cli, Command, JsonResultsRepository,
    WatchlistEntry,
    config::BATCH,
    data::{FinMindProvider, fetch_watchlist},
    utils::TimeUtils,
};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn print_summary(index: &BatchIndex) {
    let rows: Vec<SummaryRow> = index
        .stocks
        .iter()
        .map(|e| SummaryRow {
            code: e.code.clone(),
            name: e.name.clone(),
            status: e.status.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
    println!(
        "Total: {}  Success: {}  Failed: {}  (source: {})",
        index.total, index.success, index.failed, index.source
    );

    if index.failed > 0 {
        println!("\nFailed:");
        for entry in index.failures() {
            println!("  {} {}: {}", entry.code, entry.name, entry.status);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("smc_scanner"), my_code_level)
        .init();

    let args = Cli::parse();

    let client = FinMindProvider::build_client()?;
    let provider = args.build_provider(client.clone())?;
    let repo = Arc::new(JsonResultsRepository::new(&args.output_dir));
    let pipeline = AnalysisPipeline::new(args.analysis_config());
    let runner = BatchRunner::new(provider, repo, pipeline).with_concurrency(args.concurrency);

    match &args.command {
        Command::Analyze { symbol } => {
            let (result, path) = runner.analyze_symbol(symbol, TimeUtils::now_local()).await?;
            println!("{}", result.summary());
            println!("Saved: {}", path.display());
        }
        Command::Batch {
            watchlist_url,
            symbols,
        } => {
            let (entries, source) = if symbols.is_empty() {
                let url = watchlist_url.as_deref().unwrap_or(BATCH.watchlist_url);
                (fetch_watchlist(&client, url).await?, url.to_string())
            } else {
                let entries: Vec<WatchlistEntry> =
                    symbols.iter().map(WatchlistEntry::from_code).collect();
                (entries, "cli".to_string())
            };

            if entries.is_empty() {
                anyhow::bail!("No symbols to analyse from {}", source);
            }
            log::info!("Analysing {} symbols from {}", entries.len(), source);

            let index = runner.with_source(source).run(&entries).await?;
            print_summary(&index);
        }
    }

    Ok(())
}
