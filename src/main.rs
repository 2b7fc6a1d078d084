//! `bendscape` command-line front end.
//!
//! ```text
//! bendscape generate --params square.json --svg out.svg --json out.json
//! bendscape generate --preset star --svg star.svg --annotate
//! bendscape preset save star --params star.json
//! bendscape preset list
//! bendscape preset delete star
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bendscape::export::{self, SvgOptions};
use bendscape::preset::{FileStore, PresetStore};
use bendscape::{BendEngine, DrawingParameters, StopReason};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bendscape")]
#[command(about = "Generate procedural bend line art")]
struct Cli {
    /// Directory holding the preset store
    #[arg(long, global = true, default_value = ".bendscape")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one generation and write the result
    Generate {
        /// JSON parameter record
        #[arg(long, conflicts_with = "preset")]
        params: Option<PathBuf>,

        /// Name of a saved preset
        #[arg(long)]
        preset: Option<String>,

        /// Write an SVG document here
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Write a JSON export here
        #[arg(long)]
        json: Option<PathBuf>,

        /// Label segments with length and heading in the SVG
        #[arg(long)]
        annotate: bool,
    },
    /// Manage saved presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// Save a parameter record under a name (replaces an existing one)
    Save {
        name: String,
        #[arg(long)]
        params: PathBuf,
    },
    /// List saved presets
    List,
    /// Delete a preset
    Delete { name: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bendscape=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut presets = PresetStore::new(FileStore::new(&cli.store));

    match cli.command {
        Command::Generate {
            params,
            preset,
            svg,
            json,
            annotate,
        } => {
            let params = match (params, preset) {
                (Some(path), _) => read_params(&path)?,
                (None, Some(name)) => presets.require(&name)?.parameters,
                (None, None) => DrawingParameters::default(),
            };
            params.validate()?;
            generate(&params, svg.as_deref(), json.as_deref(), annotate)
        }
        Command::Preset { action } => match action {
            PresetAction::Save { name, params } => {
                let params = read_params(&params)?;
                presets.save(&name, &params)?;
                info!(preset = %name, "saved");
                Ok(())
            }
            PresetAction::List => {
                for preset in presets.load_all()? {
                    println!(
                        "{}\t{:?}\t{}",
                        preset.name, preset.parameters.stopping_condition, preset.timestamp
                    );
                }
                Ok(())
            }
            PresetAction::Delete { name } => {
                if presets.delete(&name)? {
                    info!(preset = %name, "deleted");
                } else {
                    info!(preset = %name, "no such preset");
                }
                Ok(())
            }
        },
    }
}

fn read_params(path: &Path) -> Result<DrawingParameters> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading parameters from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn generate(
    params: &DrawingParameters,
    svg: Option<&Path>,
    json: Option<&Path>,
    annotate: bool,
) -> Result<()> {
    let engine = BendEngine::new(params);
    let state = engine.run(params);

    let reason = match state.stop_reason {
        Some(StopReason::PolicyStopped) => "stopping condition met",
        Some(StopReason::SafetyLimitReached) => "segment ceiling reached",
        None => "incomplete",
    };
    println!(
        "{} segments, total length {:.1} ({reason})",
        state.segments.len(),
        state.total_length()
    );

    if let Some(path) = svg {
        let doc = export::to_svg(&state, params, SvgOptions { annotations: annotate });
        fs::write(path, doc).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "svg written");
    }
    if let Some(path) = json {
        let doc = export::to_json(&state, params)?;
        fs::write(path, doc).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "json written");
    }
    Ok(())
}
