//! CLI tool for gridcore - replays scroll offsets and key presses against a
//! grid description and prints the resulting row windows and focus as JSON
//!
//! Usage:
//!   grid_window_cli <grid.json> --scroll 0,100,400          # Window per offset
//!   grid_window_cli <grid.json> --focus 3:price --keys ArrowDown,PageDown
//!   grid_window_cli <grid.json> -v ...                     # Debug log to stderr

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::rc::Rc;

use gridcore::{Direction, Grid, GridSpec, RenderedWindow, RowKey, ScrollAdjustment};
use serde::Serialize;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Step {
    action: String,
    scroll_top: f32,
    scroll_left: f32,
    refreshed: bool,
    visible_rows: Option<(usize, usize)>,
    window: Option<RenderedWindow>,
    row_key: Option<RowKey>,
    column_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    adjustment: Option<ScrollAdjustment>,
}

fn usage() -> ! {
    eprintln!(
        "Usage: grid_window_cli <grid.json> [--scroll N,N,...] [--focus ROW:COLUMN] [--keys KEY,KEY,...] [-v]"
    );
    std::process::exit(1);
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let input_path = &args[1];
    let mut scrolls: Vec<f32> = Vec::new();
    let mut focus: Option<(RowKey, String)> = None;
    let mut keys: Vec<String> = Vec::new();
    let mut verbose = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-v" | "--verbose" => verbose = true,
            "--scroll" if i + 1 < args.len() => {
                i += 1;
                scrolls = args[i]
                    .split(',')
                    .map(|s| {
                        s.trim()
                            .parse()
                            .unwrap_or_else(|_| fail(&format!("bad scroll offset: {s}")))
                    })
                    .collect();
            }
            "--focus" if i + 1 < args.len() => {
                i += 1;
                let (row, column) = args[i]
                    .split_once(':')
                    .unwrap_or_else(|| fail("--focus expects ROW:COLUMN"));
                let row = row
                    .parse()
                    .unwrap_or_else(|_| fail(&format!("bad row key: {row}")));
                focus = Some((row, column.to_string()));
            }
            "--keys" if i + 1 < args.len() => {
                i += 1;
                keys = args[i].split(',').map(|k| k.trim().to_string()).collect();
            }
            _ => usage(),
        }
        i += 1;
    }

    if verbose {
        WriteLogger::init(LevelFilter::Debug, Config::default(), io::stderr())
            .expect("Failed to initialize logger");
    }

    // Read and build the grid
    let json = match fs::read_to_string(input_path) {
        Ok(j) => j,
        Err(e) => fail(&format!("reading {input_path}: {e}")),
    };
    let spec = GridSpec::from_json(&json).unwrap_or_else(|e| fail(&e.to_string()));
    let layout = spec.build_layout().unwrap_or_else(|e| fail(&e.to_string()));
    let mut grid = Grid::new(Rc::new(layout), spec.config).unwrap_or_else(|e| fail(&e.to_string()));

    let mut steps = vec![snapshot(&grid, "init".to_string(), true, None)];

    for offset in scrolls {
        let refreshed = grid.set_scroll_top(offset);
        steps.push(snapshot(&grid, format!("scroll {offset}"), refreshed, None));
    }

    if let Some((row, column)) = focus {
        let before = grid.window();
        let adjustment = grid.focus(Some(row), Some(&column), true);
        let refreshed = grid.window() != before;
        steps.push(snapshot(
            &grid,
            format!("focus {row}:{column}"),
            refreshed,
            Some(adjustment),
        ));
    }

    for key in keys {
        let Some(direction) = parse_key(&key) else {
            fail(&format!("unknown key: {key}"));
        };
        let before = grid.window();
        let moved = grid.move_focus(direction);
        let refreshed = grid.window() != before;
        let action = if moved {
            format!("key {key}")
        } else {
            format!("key {key} (ignored)")
        };
        steps.push(snapshot(&grid, action, refreshed, None));
    }

    let output = serde_json::to_string_pretty(&steps).unwrap_or_else(|e| fail(&e.to_string()));
    io::stdout().write_all(output.as_bytes()).unwrap();
    println!();
}

/// Accepts DOM key names, with a `Ctrl+` prefix for Home/End.
fn parse_key(key: &str) -> Option<Direction> {
    match key.strip_prefix("Ctrl+") {
        Some(rest) => Direction::from_key(rest, true),
        None => Direction::from_key(key, false),
    }
}

fn snapshot<S>(
    grid: &Grid<S>,
    action: String,
    refreshed: bool,
    adjustment: Option<ScrollAdjustment>,
) -> Step
where
    S: gridcore::RowRegistry<Key = RowKey>
        + gridcore::ColumnRegistry
        + gridcore::CoordinateProvider<RowKey>,
{
    let viewport = grid.viewport();
    let focused = grid.which();
    Step {
        action,
        scroll_top: viewport.scroll_top,
        scroll_left: viewport.scroll_left,
        refreshed,
        visible_rows: grid.renderer().visible_rows(),
        window: grid.window(),
        row_key: focused.row_key,
        column_name: focused.column_name,
        adjustment,
    }
}
