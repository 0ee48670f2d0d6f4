//! Command-line front end.
//!
//! Every subcommand loads a portable scene into a [`Canvas`] built from the
//! active settings, then reports on it or rasterizes it.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inkfield_core::Point;
use inkfield_designer::{load_pending, render_canvas, Canvas, DefaultImageLoader};
use inkfield_settings::Config;

/// Inspect, cull and render Inkfield portable scenes
#[derive(Parser, Debug)]
#[command(name = "inkfield")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file (TOML or JSON); defaults to the platform config dir
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a scene and summarize its elements
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// List the ids visible through a viewport
    Visible {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Rasterize the visible part of a scene to PNG
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output image path
        #[arg(long, value_name = "PNG")]
        out: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Print the active style and canvas defaults
    Defaults,
}

/// Viewport overrides; anything omitted comes from the settings.
#[derive(Args, Debug, Default, Clone)]
pub struct ViewArgs {
    /// Screen width in pixels
    #[arg(long)]
    pub width: Option<f64>,
    /// Screen height in pixels
    #[arg(long)]
    pub height: Option<f64>,
    /// Pan offset x in screen pixels
    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<f64>,
    /// Pan offset y in screen pixels
    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<f64>,
    /// Zoom level, applied about the screen center before the pan offset
    #[arg(long)]
    pub zoom: Option<f64>,
}

impl ViewArgs {
    fn apply(&self, canvas: &mut Canvas) {
        let viewport = canvas.viewport();
        let (width, height) = (
            self.width.unwrap_or(viewport.width()),
            self.height.unwrap_or(viewport.height()),
        );
        canvas.set_dimensions(width, height);
        if let Some(zoom) = self.zoom {
            if !canvas.set_zoom_level(zoom) {
                tracing::warn!("Zoom {} rejected, keeping {}", zoom, canvas.viewport().zoom_level());
            }
        }
        if self.x.is_some() || self.y.is_some() {
            let position = canvas.viewport().position();
            canvas.set_position(Point::new(
                self.x.unwrap_or(position.x),
                self.y.unwrap_or(position.y),
            ));
        }
    }
}

/// Settings from `path`, or from the platform default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Config::load_or_default().context("Failed to load settings")?,
    };
    Ok(config)
}

/// Builds a canvas from `config` holding the scene stored at `file`.
pub fn load_scene(config: &Config, file: &Path) -> Result<Canvas> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read scene file {}", file.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not JSON", file.display()))?;

    let mut canvas = Canvas::from_config(config);
    let report = canvas
        .load_portable(&payload)
        .with_context(|| format!("Failed to import {}", file.display()))?;
    tracing::debug!(
        "{} elements, {} images pending",
        report.imported,
        report.image_loads.len()
    );
    Ok(canvas)
}

/// One line per element: id, variant, bounds.
pub fn inspect(canvas: &Canvas) -> String {
    let mut out = String::new();
    for object in canvas.objects() {
        let rect = object.bounding_rect();
        let tl = rect.top_left();
        let _ = writeln!(
            out,
            "{}\t{}\t({:.2}, {:.2}) {:.2}x{:.2}",
            object.id(),
            object.kind(),
            tl.x,
            tl.y,
            rect.width(),
            rect.height()
        );
    }
    let _ = writeln!(out, "{} elements", canvas.len());
    out
}

/// Ids of the visible elements, one per line, bottom to top.
pub fn visible(canvas: &Canvas) -> String {
    canvas
        .visible_ids()
        .iter()
        .map(|id| format!("{id}\n"))
        .collect()
}

/// Loads images relative to the scene file and writes a PNG of the view.
pub fn render(canvas: &mut Canvas, scene_file: &Path, out: &Path) -> Result<()> {
    let loader = match scene_file.parent() {
        Some(dir) => DefaultImageLoader::with_base_dir(dir),
        None => DefaultImageLoader::new(),
    };
    let ready = load_pending(canvas, &loader);
    tracing::debug!("{} images ready", ready);

    canvas.prepare_render();
    let image = render_canvas(canvas);
    image
        .save(out)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!("Rendered {}x{} to {}", image.width(), image.height(), out.display());
    Ok(())
}

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Inspect { file } => {
            let canvas = load_scene(&config, &file)?;
            print!("{}", inspect(&canvas));
        }
        Command::Visible { file, view } => {
            let mut canvas = load_scene(&config, &file)?;
            view.apply(&mut canvas);
            print!("{}", visible(&canvas));
        }
        Command::Render { file, out, view } => {
            let mut canvas = load_scene(&config, &file)?;
            view.apply(&mut canvas);
            render(&mut canvas, &file, &out)?;
        }
        Command::Defaults => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
