//! OSlider CLI - run the playback demo headlessly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oslider::demo::{DemoScreen, PlaybackSimulator};
use oslider::{RecordingCanvas, SliderOverrides, SliderStyle};

#[derive(Parser)]
#[command(name = "oslider")]
#[command(author, version, about = "Run the OSlider playback demo headlessly")]
struct Cli {
    /// Number of simulator ticks to run
    #[arg(short, long, default_value_t = 100)]
    ticks: u32,

    /// Window width the sliders are laid out in
    #[arg(short, long, default_value_t = 375.0)]
    width: f32,

    /// Milliseconds of animation time per tick
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Style file (.yaml, .yml or .toml); colors and thumb visibility apply
    #[arg(short, long)]
    style: Option<PathBuf>,

    /// Run the loading pulse
    #[arg(short, long)]
    animate: bool,

    /// Show the thumb (the demo starts with it hidden)
    #[arg(long)]
    show_thumb: bool,

    /// Print the final slider state as JSON
    #[arg(long)]
    json: bool,
}

fn load_style(path: &Path) -> Result<SliderStyle> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read style file {}", path.display()))?;
    let style = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => SliderStyle::from_yaml_str(&source),
        Some("toml") => SliderStyle::from_toml_str(&source),
        _ => bail!(
            "unsupported style file {} (expected .yaml, .yml or .toml)",
            path.display()
        ),
    };
    style.with_context(|| format!("invalid style file {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    if !(cli.width.is_finite() && cli.width > 0.0) {
        bail!("--width must be a positive number, got {}", cli.width);
    }

    let simulator = PlaybackSimulator::new();
    let mut screen = match &cli.style {
        Some(path) => {
            let style = load_style(path)?;
            info!(path = %path.display(), "style loaded");
            simulator.hide_thumb().set(style.hide_thumb);
            DemoScreen::with_overrides(simulator, cli.width, SliderOverrides::from(&style))
        }
        None => DemoScreen::new(simulator, cli.width),
    };

    if cli.show_thumb {
        screen.simulator().hide_thumb().set(false);
    }
    if cli.animate {
        screen.simulator().animating().set(true);
    }

    let dt = Duration::from_millis(cli.frame_ms);
    screen.frame(Duration::ZERO);
    for tick in 1..=cli.ticks {
        screen.tick();
        screen.frame(dt);
        let sim = screen.simulator();
        info!(
            tick,
            value = %format!("{:.2}", sim.value().get()),
            buffer = %format!("{:.2}", sim.buffer().get()),
            "tick"
        );
    }

    let mut canvas = RecordingCanvas::new();
    screen.paint(&mut canvas);
    info!(
        sliders = screen.widgets().len(),
        draw_commands = canvas.command_count(),
        "done"
    );

    if cli.json {
        let json = serde_json::to_string_pretty(&screen.snapshot())
            .context("failed to serialize slider state")?;
        println!("{json}");
    }

    Ok(())
}
