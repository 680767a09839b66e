//! potion - Render Notion pages and tables

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use potion::render::{AssetProxy, DEFAULT_ASSET_BASE, DEFAULT_EMOJI_BASE};
use potion::{RecordDump, Renderer};

#[derive(Parser)]
#[command(name = "potion")]
#[command(version, about = "Render Notion pages and tables", long_about = None)]
#[command(after_help = "EXAMPLES:
    potion html dump.json <ID>              Render a page as HTML
    potion table dump.json <ID> -o rows.json
                                            Write a table's rows as JSON
    potion description dump.json <ID>       Render a table's description")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the asset proxy
    #[arg(long, global = true, env = "POTION_ASSET_BASE", default_value = DEFAULT_ASSET_BASE)]
    asset_base: String,

    /// Base URL of the emoji image service
    #[arg(long, global = true, default_value = DEFAULT_EMOJI_BASE)]
    emoji_base: String,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log debug diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Render a page as HTML
    Html(Target),
    /// Print a full-page table's rows as JSON
    Table(Target),
    /// Render a table's description as HTML
    Description(Target),
}

#[derive(Args)]
struct Target {
    /// Record map dump (JSON)
    #[arg(value_name = "DUMP")]
    dump: PathBuf,

    /// Node ID, with or without dashes
    #[arg(value_name = "ID")]
    id: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> potion::Result<()> {
    let renderer = Renderer::new()
        .with_assets(AssetProxy::new(&cli.asset_base).with_emoji_base(&cli.emoji_base));

    let output = match &cli.command {
        Command::Html(target) => {
            let dump = RecordDump::from_path(&target.dump)?;
            potion::api::page_html(&dump, &target.id, &renderer)?
        }
        Command::Table(target) => {
            let dump = RecordDump::from_path(&target.dump)?;
            let rows = potion::api::table_rows(&dump, &target.id, &renderer)?;
            serde_json::to_string_pretty(&rows)?
        }
        Command::Description(target) => {
            let dump = RecordDump::from_path(&target.dump)?;
            potion::api::table_description(&dump, &target.id, &renderer)?
        }
    };

    write_output(cli.output.as_deref(), &output)
}

fn write_output(path: Option<&Path>, output: &str) -> potion::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)?;
            log::debug!("wrote {} bytes to {}", output.len(), path.display());
        }
        None => println!("{output}"),
    }
    Ok(())
}
