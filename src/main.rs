// SPDX-License-Identifier: MIT
//
// n-palette — color harmony generator with an undo/redo palette history.
//
// This is the binary that wires the crates together:
//
//   n-color   → Color / Hsl / Palette values, contrast math
//   n-harmony → harmony generation and JSON / CSS export
//   n-history → bounded palette history persisted to a blob store
//
// Every invocation is one short session:
//
//   flags + env → Config → tracing init
//   hydrate history from <data-dir>/paletteHistory.json (only if needed)
//   run one subcommand → stdout (palettes, exports) / stderr (logs, warnings)
//
// Layout of the data directory:
//
//   <data-dir>/
//   ├── paletteHistory.json          [["#rrggbb", ...], ...]
//   └── paletteHistory.cursor.json   active index

mod config;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use n_color::contrast::{WCAG_AA_LARGE, accessible_text_color, contrast_ratio, meets_aa};
use n_color::{Color, HslChannel, Palette};
use n_harmony::export::{self, Export, ExportFormat};
use n_harmony::{HarmonyKind, random_palette};
use n_history::{Committed, FileBlobStore, PaletteHistoryStore};

use crate::config::{Config, DATA_DIR_ENV, DEFAULT_LOG_FILTER, EXPORT_DIR_ENV};

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "n-palette", version, about = "Color harmony generator with palette history")]
struct Cli {
    /// Directory holding the persisted palette history
    #[arg(long, global = true, env = DATA_DIR_ENV, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory that exports are written into
    #[arg(long, global = true, env = EXPORT_DIR_ENV, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a harmony from a seed color and record it in the history
    Generate {
        /// Seed color, #RGB or #RRGGBB
        seed: Color,
        #[arg(short = 'k', long, default_value = "analogous")]
        harmony: HarmonyKind,
        /// Print the palette without recording it
        #[arg(long)]
        no_record: bool,
    },
    /// Random seed, random harmony ("surprise me")
    Random {
        #[arg(long)]
        no_record: bool,
    },
    /// List the history, marking the active palette
    History,
    /// Step back to the previous palette
    Undo,
    /// Step forward to the next palette
    Redo,
    /// Make a history entry active
    Select { index: usize },
    /// Remove a history entry
    Delete { index: usize },
    /// Remove every history entry
    Clear,
    /// Export the active palette
    Export {
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
        /// Write to stdout instead of the output directory
        #[arg(long)]
        stdout: bool,
    },
    /// Show a color as hex, rgb() and hsl()
    Convert {
        #[arg(required_unless_present = "hsl")]
        color: Option<Color>,
        /// Convert from HSL instead (degrees, percent, percent)
        #[arg(
            long,
            num_args = 3,
            value_names = ["H", "S", "L"],
            conflicts_with = "color",
            allow_negative_numbers = true
        )]
        hsl: Option<Vec<f64>>,
    },
    /// Set one channel of an active-palette color and record the result
    #[command(allow_negative_numbers = true)]
    Adjust {
        index: usize,
        #[arg(value_enum)]
        channel: ChannelArg,
        value: f64,
    },
    /// WCAG contrast ratio between two colors
    Contrast { foreground: Color, background: Color },
    /// List the available harmonies
    Harmonies,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChannelArg {
    #[value(alias = "h")]
    Hue,
    #[value(alias = "s")]
    Saturation,
    #[value(alias = "l")]
    Lightness,
}

impl From<ChannelArg> for HslChannel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Hue => Self::Hue,
            ChannelArg::Saturation => Self::Saturation,
            ChannelArg::Lightness => Self::Lightness,
        }
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env(cli.data_dir, cli.out_dir);
    init_tracing(&config.log_filter);
    debug!(?config, "configuration resolved");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &config, &mut out)
}

/// Logs go to stderr so stdout carries only palettes and exports.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn open_history(config: &Config) -> PaletteHistoryStore {
    PaletteHistoryStore::hydrate(Arc::new(FileBlobStore::new(&config.data_dir)))
}

/// Unwrap a committed mutation, reporting a failed save without failing.
fn settle<T>(committed: Committed<T>) -> T {
    if let Some(e) = &committed.warning {
        eprintln!("n-palette: warning: history not saved: {e}");
    }
    committed.value
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

fn run(command: Command, config: &Config, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Generate {
            seed,
            harmony,
            no_record,
        } => {
            let palette = harmony.generate(seed);
            record(config, &palette, no_record);
            writeln!(out, "{palette}")?;
        }

        Command::Random { no_record } => {
            let (kind, palette) = random_palette(&mut rand::rng());
            record(config, &palette, no_record);
            writeln!(out, "{kind}: {palette}")?;
        }

        Command::History => {
            let history = open_history(config).snapshot();
            if history.is_empty() {
                writeln!(out, "history is empty")?;
            }
            for (i, palette) in history.entries().iter().enumerate() {
                let marker = if history.current_index() == Some(i) { '>' } else { ' ' };
                writeln!(out, "{marker} {i:>2}  {palette}")?;
            }
        }

        Command::Undo => match settle(open_history(config).undo()) {
            Some(palette) => writeln!(out, "{palette}")?,
            None => writeln!(out, "already at the oldest palette")?,
        },

        Command::Redo => match settle(open_history(config).redo()) {
            Some(palette) => writeln!(out, "{palette}")?,
            None => writeln!(out, "already at the newest palette")?,
        },

        Command::Select { index } => {
            let palette = settle(open_history(config).select_at(index)?);
            writeln!(out, "{palette}")?;
        }

        Command::Delete { index } => match settle(open_history(config).delete_at(index)?) {
            Some(palette) => writeln!(out, "{palette}")?,
            None => writeln!(out, "history is empty")?,
        },

        Command::Clear => {
            settle(open_history(config).clear());
            writeln!(out, "history cleared")?;
        }

        Command::Export { format, stdout } => {
            let palette = open_history(config).current().unwrap_or_default();
            let unix_ms = Utc::now().timestamp_millis();
            let Some(export) = export::export(&palette, format, unix_ms)? else {
                bail!("no palette to export; generate one first");
            };
            if stdout {
                out.write_all(&export.bytes)?;
            } else {
                let path = deliver(&export, config)?;
                writeln!(out, "{}", path.display())?;
            }
        }

        Command::Convert { color, hsl } => {
            let color = match (color, hsl.as_deref()) {
                (_, Some(&[h, s, l])) => Color::from_hsl(h, s, l),
                (Some(color), _) => color,
                _ => bail!("give a color or --hsl H S L"),
            };
            writeln!(out, "hex  {color}")?;
            writeln!(out, "rgb  {}", color.to_rgb_string())?;
            writeln!(out, "hsl  {}", color.to_hsl())?;
        }

        Command::Adjust { index, channel, value } => {
            let history = open_history(config);
            let current = history.current().context("no active palette to adjust")?;
            let adjusted = current.adjusted(index, channel.into(), value)?;
            settle(history.append(adjusted.clone()));
            writeln!(out, "{adjusted}")?;
        }

        Command::Contrast { foreground, background } => {
            let ratio = contrast_ratio(foreground, background);
            writeln!(out, "{ratio:.2}:1")?;
            writeln!(out, "AA normal text  {}", verdict(meets_aa(ratio)))?;
            writeln!(out, "AA large text   {}", verdict(ratio >= WCAG_AA_LARGE))?;
            writeln!(out, "readable text   {}", accessible_text_color(background))?;
        }

        Command::Harmonies => {
            for kind in HarmonyKind::all() {
                let jitter = if kind.is_randomized() { " (randomized)" } else { "" };
                writeln!(
                    out,
                    "{:<20} {}  {}{jitter}",
                    kind.name(),
                    kind.color_count(),
                    kind.description()
                )?;
            }
        }
    }
    Ok(())
}

fn record(config: &Config, palette: &Palette, skip: bool) {
    if !skip {
        settle(open_history(config).append(palette.clone()));
    }
}

/// Write an export into the output directory, returning the file path.
fn deliver(export: &Export, config: &Config) -> Result<PathBuf> {
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("creating export directory {}", config.out_dir.display()))?;
    let path = config.out_dir.join(&export.filename);
    fs::write(&path, &export.bytes).with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), mime = export.format.mime_type(), "palette exported");
    Ok(path)
}

const fn verdict(pass: bool) -> &'static str {
    if pass { "pass" } else { "fail" }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
