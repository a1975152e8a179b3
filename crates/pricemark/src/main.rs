//! Pricemark - render one frame of price markers as a JSON display list.
//!
//! Usage: pricemark [--config PATH] [--snapshot PATH] [--height N] [--width N]
//!                  [--y-axis N] [--min P] [--max P] [--dark]
//!
//! The snapshot is a JSON object such as
//! `{"liquidation": 61200.0, "stop_loss": 63000.0, "take_profit": null}`,
//! read from stdin when `--snapshot` is omitted.

mod format;

use std::env;
use std::fs;
use std::io::{self, Read};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use pricemark_config::Config;
use pricemark_core::{DrawParams, PriceRange};
use pricemark_indicators::{IndicatorBuilder, IndicatorPosition, PriceSnapshot};
use pricemark_render::{monospace_builder, DrawCommand, RecordingCanvas};
use serde::Serialize;

/// Fixed advance of the headless text backend.
const CHAR_ADVANCE: f32 = 7.0;
const LINE_HEIGHT: f32 = 13.0;

/// Share of the marker span added above and below an auto range.
const AUTO_RANGE_PADDING: f32 = 0.05;

#[derive(Debug, Clone, PartialEq)]
struct Args {
    config: Option<String>,
    snapshot: Option<String>,
    height: f32,
    width: f32,
    y_axis_width: f32,
    min_price: Option<f32>,
    max_price: Option<f32>,
    dark: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: None,
            snapshot: None,
            height: 400.0,
            width: 360.0,
            y_axis_width: 60.0,
            min_price: None,
            max_price: None,
            dark: false,
        }
    }
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let number = |flag: &str, value: &str| -> Result<f32> {
        let n = value
            .parse::<f32>()
            .with_context(|| format!("{flag} expects a number, got {value:?}"))?;
        if !n.is_finite() {
            bail!("{flag} expects a finite number, got {value:?}");
        }
        Ok(n)
    };
    let size = |flag: &str, value: &str| -> Result<f32> {
        let n = number(flag, value)?;
        if n <= 0.0 {
            bail!("{flag} must be positive, got {n}");
        }
        Ok(n)
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                parsed.config = Some(args[i + 1].clone());
                i += 2;
            }
            "--snapshot" if i + 1 < args.len() => {
                parsed.snapshot = Some(args[i + 1].clone());
                i += 2;
            }
            "--height" if i + 1 < args.len() => {
                parsed.height = size("--height", &args[i + 1])?;
                i += 2;
            }
            "--width" if i + 1 < args.len() => {
                parsed.width = size("--width", &args[i + 1])?;
                i += 2;
            }
            "--y-axis" if i + 1 < args.len() => {
                parsed.y_axis_width = number("--y-axis", &args[i + 1])?;
                i += 2;
            }
            "--min" if i + 1 < args.len() => {
                parsed.min_price = Some(number("--min", &args[i + 1])?);
                i += 2;
            }
            "--max" if i + 1 < args.len() => {
                parsed.max_price = Some(number("--max", &args[i + 1])?);
                i += 2;
            }
            "--dark" => {
                parsed.dark = true;
                i += 1;
            }
            other => bail!("unknown argument {other:?}"),
        }
    }

    if let (Some(min), Some(max)) = (parsed.min_price, parsed.max_price) {
        if max < min {
            bail!("--max ({max}) must not be below --min ({min})");
        }
    }
    Ok(parsed)
}

fn load_snapshot(path: Option<&str>) -> Result<PriceSnapshot> {
    let json = match path {
        Some("-") | None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read snapshot from stdin")?;
            buf
        }
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read snapshot {path}"))?
        }
    };
    serde_json::from_str(&json).context("Failed to parse price snapshot")
}

/// Visible range: explicit bounds win, markers fill the rest.
fn resolve_range(args: &Args, markers: Option<PriceRange>) -> PriceRange {
    let auto = markers.map(|range| {
        let span = range.max - range.min;
        let pad = if span > 0.0 {
            span * AUTO_RANGE_PADDING
        } else {
            range.max.abs().max(1.0) * AUTO_RANGE_PADDING
        };
        PriceRange::new(range.min - pad, range.max + pad)
    });

    let min = args.min_price.or(auto.map(|r| r.min)).unwrap_or(0.0);
    let max = args.max_price.or(auto.map(|r| r.max)).unwrap_or(1.0);
    PriceRange::new(min, max.max(min))
}

#[derive(Debug, Serialize)]
struct Frame {
    params: DrawParams,
    positions: Vec<IndicatorPosition>,
    commands: Vec<DrawCommand>,
}

fn render_frame(config: &Config, args: &Args, snapshot: &PriceSnapshot) -> Result<Frame> {
    let mut builder = IndicatorBuilder::from_config(
        config,
        args.width,
        monospace_builder(CHAR_ADVANCE, LINE_HEIGHT),
        Rc::new(format::format_price),
    )?;
    if args.dark {
        builder.set_color_mode(true, config.background_color());
    }
    builder.update_data(Some(snapshot));
    debug!("{} live indicators", builder.active_count());

    let range = resolve_range(args, builder.get_min_max_for_range());
    let params = DrawParams::new(args.height, range.min, range.max, args.width, args.y_axis_width);

    let mut canvas = RecordingCanvas::new();
    let positions = if builder.is_empty() {
        Vec::new()
    } else {
        builder.draw_all(&mut canvas, &params)
    };
    builder.dispose();

    info!(
        "Drew {} indicators with {} draw commands",
        positions.len(),
        canvas.len()
    );
    Ok(Frame {
        params,
        positions,
        commands: canvas.into_commands(),
    })
}

fn run() -> Result<()> {
    env_logger::init();

    let argv: Vec<String> = env::args().collect();
    let args = parse_args(&argv)?;

    let config = match &args.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("Failed to load config {path}"))?
        }
        None => Config::load_default(),
    };
    let snapshot = load_snapshot(args.snapshot.as_deref())?;
    let frame = render_frame(&config, &args, &snapshot)?;

    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
