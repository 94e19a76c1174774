use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "motionbind", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a script and write the property-write log as JSON.
    Replay(ReplayArgs),
    /// Validate a script and every binding config in it.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Settings JSON (defaults when omitted).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Replay(args) => cmd_replay(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn read_script(path: &Path) -> anyhow::Result<motionbind::Script> {
    motionbind::Script::from_path(path)
        .with_context(|| format!("load script '{}'", path.display()))
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let script = read_script(&args.script)?;
    let settings = match &args.settings {
        Some(path) => motionbind::Settings::from_path(path)
            .with_context(|| format!("load settings '{}'", path.display()))?,
        None => motionbind::Settings::default(),
    };

    let report = motionbind::replay(&script, settings).context("replay script")?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(out).with_context(|| format!("create '{}'", out.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, &report).context("serialize report")?;
            w.flush().with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {} ({} writes)", out.display(), report.writes.len());
        }
        None => {
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let script = read_script(&args.script)?;
    script
        .validate()
        .with_context(|| format!("check '{}'", args.script.display()))?;
    eprintln!(
        "ok: {} bindings, {} events",
        script.bindings.len(),
        script.events.len()
    );
    Ok(())
}
