use std::path::PathBuf;

use clap::Parser;

use gbv::app::App;
use gbv::config::Config;
use gbv::error::AppResult;
use gbv::logging::init_logging;
use gbv::provider::BaniDbProvider;

/// Terminal viewer that steps through Gurbani one verse at a time.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Ang to open first (1-1430)
    #[arg(long, value_name = "N")]
    ang: Option<u32>,

    /// Start with auto-advance paused
    #[arg(long)]
    paused: bool,

    /// Seconds between automatic advances
    #[arg(long, value_name = "S")]
    interval_secs: Option<u64>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = resolve_config(&cli)?;

    // Must outlive the viewer so buffered log lines are flushed.
    let _log_guard = match init_logging(&config.log) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("logging disabled: {err}");
            None
        }
    };
    tracing::info!(
        start_ang = config.viewer.start_ang,
        paused = config.viewer.start_paused,
        interval_ms = config.viewer.auto_advance_ms,
        "starting viewer"
    );

    let provider = BaniDbProvider::new(&config.provider)?;
    let mut app = App::new(provider, config);
    app.run().await
}

fn resolve_config(cli: &Cli) -> AppResult<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    apply_overrides(&mut config, cli);
    Ok(config)
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ang) = cli.ang {
        config.viewer.start_ang = ang;
    }
    if cli.paused {
        config.viewer.start_paused = true;
    }
    if let Some(secs) = cli.interval_secs {
        config.viewer.auto_advance_ms = secs.saturating_mul(1_000);
    }
}
