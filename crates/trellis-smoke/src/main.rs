//! Trellis Smoke Harness
//!
//! Lays out a grid described by a JSON fixture (or the built-in demo) and prints
//! the resolved track geometry and child rectangles as a single JSON report.
//!
//! ```bash
//! trellis-smoke --layout-file fixtures/demo.json --width 1024 --height inf --pretty
//! RUST_LOG=trellis_layout=trace trellis-smoke
//! ```

mod fixture;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::{error, info};
use trellis_layout::{Axis, Rect, Size, TrackGeometry};

use crate::fixture::{FixtureChild, GridFixture};

/// Parse command line arguments
struct Args {
    layout_file: Option<String>,
    width: f32,
    height: f32,
    pretty: bool,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let mut layout_file = None;
        let mut width = 1024.0;
        let mut height = 768.0;
        let mut pretty = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--layout-file" => {
                    layout_file = args.next();
                }
                "--width" => {
                    if let Some(val) = args.next() {
                        width = parse_extent(&val).unwrap_or(1024.0);
                    }
                }
                "--height" => {
                    if let Some(val) = args.next() {
                        height = parse_extent(&val).unwrap_or(768.0);
                    }
                }
                "--pretty" => pretty = true,
                _ => {}
            }
        }

        Self {
            layout_file,
            width,
            height,
            pretty,
        }
    }

    /// Load the fixture from file or fall back to the built-in demo.
    fn load_fixture(&self) -> Result<GridFixture> {
        match self.layout_file {
            Some(ref path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read layout file {path}"))?;
                GridFixture::from_json(&source)
                    .with_context(|| format!("Invalid layout file {path}"))
            }
            None => GridFixture::demo(),
        }
    }
}

/// `"inf"` or a non-negative number.
fn parse_extent(value: &str) -> Option<f32> {
    if value.eq_ignore_ascii_case("inf") {
        return Some(f32::INFINITY);
    }
    value.parse().ok().filter(|v: &f32| v.is_finite() && *v >= 0.0)
}

/// JSON has no infinity; report it as a string.
fn extent_json(value: f32) -> Value {
    if value.is_finite() {
        json!(value)
    } else {
        json!("inf")
    }
}

fn size_json(size: Size) -> Value {
    json!({
        "width": extent_json(size.width),
        "height": extent_json(size.height),
    })
}

fn rect_json(rect: Rect) -> Value {
    json!({
        "x": rect.x,
        "y": rect.y,
        "width": rect.width,
        "height": rect.height,
    })
}

fn tracks_json(tracks: &[TrackGeometry]) -> Value {
    tracks
        .iter()
        .map(|track| json!({ "offset": track.offset, "size": track.size }))
        .collect()
}

/// Children with their final rectangle, flagging any that stick out of `bounds`.
fn children_json(children: &[FixtureChild], bounds: Size) -> Value {
    children
        .iter()
        .map(|child| {
            let overflows = child
                .rect
                .is_some_and(|rect| rect.right() > bounds.width || rect.bottom() > bounds.height);
            json!({
                "name": child.name,
                "rect": child.rect.map(rect_json),
                "overflows": overflows,
            })
        })
        .collect()
}

fn run(args: &Args) -> Result<Value> {
    let fixture = args.load_fixture()?;
    let mut grid = fixture.build_grid()?;
    let mut children = fixture.build_children();

    let available = Size::new(args.width, args.height);
    let desired = grid.measure(&mut children, available);

    // Unbounded axes are arranged at their desired extent.
    let settle = |axis: Axis| {
        let extent = axis.extent(available);
        if extent.is_finite() {
            extent
        } else {
            axis.extent(desired)
        }
    };
    let final_size = Size::new(settle(Axis::Column), settle(Axis::Row));
    grid.arrange(&mut children, final_size);

    let stats = grid.cache_stats();
    info!(
        lookups = stats.lookups,
        hits = stats.hits,
        "Layout complete"
    );

    Ok(json!({
        "status": "pass",
        "available": size_json(available),
        "desired": size_json(desired),
        "final": size_json(final_size),
        "rows": tracks_json(&grid.track_geometry(Axis::Row)),
        "columns": tracks_json(&grid.track_geometry(Axis::Column)),
        "children": children_json(&children, final_size),
        "measure_cache": {
            "lookups": stats.lookups,
            "hits": stats.hits,
            "stores": stats.stores,
        },
    }))
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!(
        width = args.width,
        height = args.height,
        layout_file = ?args.layout_file,
        "Starting Trellis smoke harness"
    );

    let (report, code) = match run(&args) {
        Ok(report) => (report, 0),
        Err(e) => {
            error!(error = %format!("{e:#}"), "Layout failed");
            (json!({ "status": "fail", "reason": format!("{e:#}") }), 1)
        }
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => error!(?e, "Failed to serialize report"),
    }
    std::process::exit(code);
}
