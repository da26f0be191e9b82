// SPDX-License-Identifier: MIT
//
// Command-line interface.

use std::path::PathBuf;

use clap::Parser;

/// A minimal single-buffer terminal text editor.
#[derive(Parser, Debug)]
#[command(name = "caret", version, about, long_about = None)]
pub struct Cli {
    /// File whose contents become the initial text (never written back)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Set an option, e.g. `--set blink=500` (repeatable, applied after the rc file)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Read option directives from this file instead of the default caretrc
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file (also `CARET_LOG`); filtered by `RUST_LOG`
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments() {
        let cli = Cli::try_parse_from(["caret"]).unwrap();
        assert!(cli.file.is_none());
        assert!(cli.set.is_empty());
        assert!(cli.config.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn repeated_set_keeps_order() {
        let cli = Cli::try_parse_from([
            "caret", "--set", "blink=0", "--set", "le=cr", "notes.txt",
        ])
        .unwrap();
        assert_eq!(cli.set, vec!["blink=0".to_string(), "le=cr".to_string()]);
        assert_eq!(cli.file, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn config_and_log_paths() {
        let cli = Cli::try_parse_from([
            "caret", "--config", "/tmp/rc", "--log-file", "/tmp/caret.log",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rc")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/caret.log")));
    }
}
