// SPDX-License-Identifier: MIT
//
// Startup configuration: defaults, then the rc file, then `--set` flags.
// Each layer is a list of `:set`-style directives; later ones win.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use caret_core::EditorOptions;
use caret_core::options::{self, Directive};
use tracing::{debug, info};

const RC_DIR: &str = "caret";
const RC_FILE: &str = "caretrc";

/// `$XDG_CONFIG_HOME/caret/caretrc`, else `$HOME/.config/caret/caretrc`.
pub fn rc_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let base = xdg_config_home
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.filter(|v| !v.is_empty()).map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join(RC_DIR).join(RC_FILE))
}

pub fn default_rc_path() -> Option<PathBuf> {
    rc_path_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// Build the session options.
///
/// An explicit `config` path must exist. The default rc file is read only
/// when present.
pub fn load_options(config: Option<&Path>, sets: &[String]) -> Result<EditorOptions> {
    let rc = match config {
        Some(path) => Some(read_rc(path)?),
        None => match default_rc_path().filter(|p| p.is_file()) {
            Some(path) => Some(read_rc(&path)?),
            None => None,
        },
    };
    layer_options(rc.as_deref(), sets)
}

fn read_rc(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "reading rc file");
    fs::read_to_string(path).with_context(|| format!("failed to read config {}", path.display()))
}

/// Apply `rc` then `sets` over the defaults.
pub fn layer_options(rc: Option<&str>, sets: &[String]) -> Result<EditorOptions> {
    let mut opts = EditorOptions::default();

    if let Some(src) = rc {
        let directives = options::parse_directives(src);
        apply_layer(&mut opts, &directives).context("in config file")?;
    }

    let flags: Vec<Directive> = sets.iter().map(|s| options::parse_directive(s)).collect();
    apply_layer(&mut opts, &flags).context("in --set")?;

    Ok(opts)
}

fn apply_layer(opts: &mut EditorOptions, directives: &[Directive]) -> Result<()> {
    for directive in directives {
        opts.apply(directive)?;
        if let Directive::Query(name) = directive {
            info!("{}", opts.describe(name)?);
        }
    }
    Ok(())
}
