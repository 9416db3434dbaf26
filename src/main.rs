use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use gristmill_flow::{OpenFlow, TsRuntime};
use gristmill_settings::{StaticSettings, SyncFlags, SyncOutcome};
use gristmill_sync::{assemble_flow, write_flow};

/// Gristmill - mirrors workspace flows and sync settings into plain files
#[derive(Parser)]
#[command(name = "gristmill")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Directory holding the local configuration (default: current directory)
  #[arg(long, global = true)]
  root: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Reconcile the local sync configuration against workspace settings
  Sync {
    #[command(subcommand)]
    direction: SyncDirection,
  },

  /// Mirror a flow document to and from independently editable files
  Flow {
    #[command(subcommand)]
    direction: FlowDirection,
  },
}

#[derive(Subcommand)]
enum SyncDirection {
  /// Bring workspace settings into the local configuration
  Pull(SyncArgs),

  /// Send the local configuration back to the workspace
  Push(SyncArgs),
}

#[derive(Args)]
struct SyncArgs {
  /// Workspace git-sync state as a JSON document
  #[arg(long = "from-json")]
  from_json: String,

  /// Compare local and remote without applying changes
  #[arg(long)]
  diff: bool,

  /// Compute the result without touching disk
  #[arg(long)]
  dry_run: bool,
}

#[derive(Subcommand)]
enum FlowDirection {
  /// Decompose a flow document into one file per embedded script
  Pull {
    /// Path to the flow document (JSON or YAML)
    #[arg(long)]
    file: PathBuf,

    /// Target directory for the mirrored flow
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// TypeScript runtime governing extracted extensions (bun or deno)
    #[arg(long, default_value = "bun")]
    default_ts: String,
  },

  /// Reassemble a flow document from its mirrored files
  Push {
    /// Directory holding the mirrored flow
    #[arg(long, default_value = ".")]
    dir: PathBuf,
  },
}

fn main() -> Result<()> {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .try_init();

  let cli = Cli::parse();
  let root = cli.root.unwrap_or_else(|| PathBuf::from("."));

  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async {
    match cli.command {
      Commands::Sync { direction } => match direction {
        SyncDirection::Pull(args) => sync_settings(root, args, Direction::Pull).await,
        SyncDirection::Push(args) => sync_settings(root, args, Direction::Push).await,
      },
      Commands::Flow { direction } => match direction {
        FlowDirection::Pull {
          file,
          dir,
          default_ts,
        } => flow_pull(file, dir, &default_ts).await,
        FlowDirection::Push { dir } => flow_push(dir).await,
      },
    }
  })
}

enum Direction {
  Pull,
  Push,
}

async fn sync_settings(root: PathBuf, args: SyncArgs, direction: Direction) -> Result<()> {
  let flags = SyncFlags {
    diff: args.diff,
    dry_run: args.dry_run,
  };

  let outcome = match StaticSettings::from_json(&args.from_json) {
    Ok(backend) => match direction {
      Direction::Pull => gristmill_settings::pull(&backend, &root, flags).await,
      Direction::Push => gristmill_settings::push(&backend, &root, flags).await,
    },
    Err(err) => SyncOutcome::failed(err),
  };

  report(outcome)
}

fn report(outcome: SyncOutcome) -> Result<()> {
  if let Some(diff) = &outcome.diff {
    println!("{diff}");
  }
  if let Some(yaml) = &outcome.yaml {
    print!("{yaml}");
  }
  if let Some(message) = &outcome.message {
    eprintln!("{message}");
  }
  if !outcome.success {
    bail!(outcome.error.unwrap_or_else(|| "sync failed".to_string()));
  }
  Ok(())
}

async fn flow_pull(file: PathBuf, dir: PathBuf, default_ts: &str) -> Result<()> {
  let default_ts = match default_ts {
    "bun" => TsRuntime::Bun,
    "deno" => TsRuntime::Deno,
    other => bail!("unknown TypeScript runtime '{other}', expected bun or deno"),
  };

  let content = tokio::fs::read_to_string(&file)
    .await
    .with_context(|| format!("failed to read flow document: {}", file.display()))?;

  let flow: OpenFlow = if file.extension().is_some_and(|e| e == "json") {
    serde_json::from_str(&content)
      .with_context(|| format!("failed to parse flow document: {}", file.display()))?
  } else {
    serde_yaml::from_str(&content)
      .with_context(|| format!("failed to parse flow document: {}", file.display()))?
  };

  let result = write_flow(&dir, flow, default_ts)
    .await
    .context("failed to mirror flow")?;

  eprintln!(
    "Mirrored flow into {} ({} written, {} unchanged)",
    dir.display(),
    result.written.len(),
    result.skipped.len()
  );
  Ok(())
}

async fn flow_push(dir: PathBuf) -> Result<()> {
  let flow = assemble_flow(&dir)
    .await
    .with_context(|| format!("failed to reassemble flow from {}", dir.display()))?;

  println!("{}", serde_json::to_string_pretty(&flow)?);
  Ok(())
}
