//! 🚀 gcsrb-cli — the front door. Knock, pick a direction, get a number.
//!
//! 🎬 *[narrator voice]* "It all started with a simple question: is Oregon fast today?"
//! 📦 Thin wrapper: parse args, set up logging, load config, hand off to `gcsrb::run`,
//! print what comes back. Results go to stdout, logs go to stderr, so piping the JSON
//! into `jq` doesn't drag the play-by-play along with it. 🦆

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gcsrb::{BenchmarkPlan, BenchmarkResult, Direction, report};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 🌍 Time uploads to and downloads from storage buckets in every region.
#[derive(Debug, Parser)]
#[command(name = "gcsrb-cli", version, about)]
struct Cli {
    /// 🔧 TOML config file. Env vars (`GCSRB_*`) apply either way.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 📥 Time a public download.
    Download(TransferArgs),
    /// 📤 Time a signed upload.
    Upload(TransferArgs),
    /// 🗺️ List the regions we know about.
    Regions,
    /// 📏 List the file sizes we know about.
    Sizes,
}

#[derive(Debug, Args)]
struct TransferArgs {
    /// 📦 Which payload: 2mib.txt, 64mib.txt or 256mib.txt.
    #[arg(long, default_value = "2mib.txt")]
    file: String,

    /// 🌍 One region id. Leave it out to walk all of them.
    #[arg(long)]
    region: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,

    /// 📝 Also log every result row.
    #[arg(long)]
    log: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

impl TransferArgs {
    fn plan(&self, direction: Direction) -> BenchmarkPlan {
        BenchmarkPlan {
            direction,
            file_name: self.file.clone(),
            region: self.region.clone(),
        }
    }
}

/// 🔒 A named config file has to exist. No file named means env vars and defaults.
fn resolve_config_path(path: Option<&PathBuf>) -> Result<Option<&PathBuf>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let exists = path.try_exists().with_context(|| {
        format!(
            "💀 Couldn't even check whether the config file exists. Was checking here: '{}'",
            path.display()
        )
    })?;
    if !exists {
        anyhow::bail!(
            "💀 Configuration file not found: '{}'. Relative paths resolve against the current directory; \
             an absolute path removes the guesswork.",
            path.display()
        );
    }
    Ok(Some(path))
}

fn render(results: &[BenchmarkResult], output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Json => report::to_json_pretty(results),
        OutputFormat::Table => Ok(report::to_table(results)),
    }
}

async fn run_transfer(cli: &Cli, direction: Direction, args: &TransferArgs) -> Result<()> {
    let config_path = resolve_config_path(cli.config.as_ref())?;
    let mut app_config = gcsrb::app_config::load_config(config_path.map(PathBuf::as_path))
        .context("💀 In gcsrb-cli we couldn't load the config. Check the file and any GCSRB_* env vars.")?;
    // -- 📊 one region is over before a bar could draw itself
    if args.region.is_some() {
        app_config.runtime.show_progress = false;
    }

    let results = gcsrb::run(app_config, args.plan(direction)).await?;

    if args.log {
        for result in &results {
            info!("📝 {}", row_json(result));
        }
    }
    println!("{}", render(&results, args.output)?);
    Ok(())
}

fn row_json(result: &BenchmarkResult) -> String {
    report::to_json(std::slice::from_ref(result)).unwrap_or_else(|err| format!("<unprintable row: {err}>"))
}

async fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Download(args) => run_transfer(cli, Direction::Download, args).await,
        Command::Upload(args) => run_transfer(cli, Direction::Upload, args).await,
        Command::Regions => {
            println!("{}", report::regions_table());
            Ok(())
        }
        Command::Sizes => {
            println!("{}", report::sizes_table());
            Ok(())
        }
    }
}

/// 🔍 Does anything in the chain smell like the network never answered?
fn looks_like_connection_trouble(err: &anyhow::Error) -> bool {
    err.chain().skip(1).any(|cause| {
        let cause_str = cause.to_string();
        cause_str.contains("error sending request")
            || cause_str.contains("connection refused")
            || cause_str.contains("Connection refused")
            || cause_str.contains("tcp connect error")
            || cause_str.contains("dns error")
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // 📡 logs to stderr; stdout is reserved for the results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = dispatch(&cli).await {
        error!("💀 error: {}", err);
        // -- 🧅 peel the onion, one layer at a time
        for cause in err.chain().skip(1) {
            error!("⚠️  cause: {}", cause);
        }
        if looks_like_connection_trouble(&err) {
            error!(
                "🔧 hint: looks like a service isn't reachable. For uploads, check that the \
                 signing service is running at the configured `signer.url` \
                 (GCSRB_SIGNER__URL). Even servers need a nudge sometimes. ☕"
            );
        }
        std::process::exit(1);
    }

    Ok(())
}
