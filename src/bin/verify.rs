use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

use smc_scanner::{
    JsonResultsRepository,
    analysis::verify::{SpotCheck, check_all, check_fair_value_gap, check_swing_high, check_swing_low},
    config::PERSISTENCE,
    models::GapKind,
};

/// Re-derive swing points and gaps of a saved result straight from its candles.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Symbol whose saved result to check
    symbol: String,

    /// Directory holding `<symbol>.json`
    #[arg(long, default_value = PERSISTENCE.results.directory)]
    dir: PathBuf,

    /// Override the lookback recorded in the result
    #[arg(long)]
    lookback: Option<usize>,

    /// Candle indices claimed to be swing lows
    #[arg(long, value_delimiter = ',')]
    swing_low: Vec<usize>,

    /// Candle indices claimed to be swing highs
    #[arg(long, value_delimiter = ',')]
    swing_high: Vec<usize>,

    /// Third-candle indices of claimed bullish gaps
    #[arg(long, value_delimiter = ',')]
    bullish_fvg: Vec<usize>,

    /// Third-candle indices of claimed bearish gaps
    #[arg(long, value_delimiter = ',')]
    bearish_fvg: Vec<usize>,

    /// Re-check every swing point and gap in the file
    #[arg(long)]
    all: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let repo = JsonResultsRepository::new(&args.dir);
    let result = repo.load_result(&args.symbol).await?;
    let candles = &result.candles;
    let lookback = args.lookback.unwrap_or_else(|| result.swing_lookback());

    log::info!(
        "Loaded {} ({} candles, generated {}, lookback {})",
        result.symbol,
        candles.len(),
        result.generated_at,
        lookback
    );

    let mut checks: Vec<SpotCheck> = Vec::new();
    if args.all {
        checks.extend(check_all(&result, lookback));
    }
    checks.extend(args.swing_low.iter().map(|&i| check_swing_low(candles, i, lookback)));
    checks.extend(args.swing_high.iter().map(|&i| check_swing_high(candles, i, lookback)));
    checks.extend(
        args.bullish_fvg
            .iter()
            .map(|&i| check_fair_value_gap(candles, i, GapKind::Bullish)),
    );
    checks.extend(
        args.bearish_fvg
            .iter()
            .map(|&i| check_fair_value_gap(candles, i, GapKind::Bearish)),
    );

    if checks.is_empty() {
        bail!("Nothing to check: pass --all or at least one index option");
    }

    for check in &checks {
        print!("{}", check);
    }

    let failed = checks.iter().filter(|c| !c.passed).count();
    println!("\n{} checks, {} failed", checks.len(), failed);
    if failed > 0 {
        bail!("{} of {} checks failed", failed, checks.len());
    }

    Ok(())
}
