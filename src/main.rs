// SPDX-License-Identifier: MIT
//
// caret — a minimal single-buffer terminal text editor.
//
// Wires the two crates together:
//
//   caret-core → text buffer, cursor, editing commands, frame layout
//   caret-term → terminal control, key parsing, diff rendering, event loop
//
// Each keypress flows through:
//
//   stdin → parser → Session::on_event → keymap → Editor::apply
//   paint → render_frame → GridSurface → framebuffer → diff renderer → terminal

mod cli;
mod config;
mod keymap;
mod screen;
mod session;

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use caret_core::Editor;
use caret_term::event_loop::{EventLoop, LoopConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::session::Session;

/// Shown when no file is given.
const SAMPLE_TEXT: &str = "\
pub struct Cursor {
    offset: usize,
}

impl Cursor {
    pub fn move_to(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub fn next(&mut self) {
        self.offset += 1;
    }
}
";

/// Log to a file when one is named; the terminal belongs to the editor.
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let Some(path) = path.or_else(|| std::env::var_os("CARET_LOG").map(PathBuf::from)) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone())?;

    let options = config::load_options(cli.config.as_deref(), &cli.set)?;
    let text = match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => SAMPLE_TEXT.to_string(),
    };

    info!(file = ?cli.file, "starting caret");
    let mut event_loop = EventLoop::new(LoopConfig {
        tick_interval: options.tick_interval(),
    });
    let mut session = Session::new(Editor::new(&text, options));
    event_loop.run(&mut session).context("terminal session failed")?;
    info!("caret exited");
    Ok(())
}
