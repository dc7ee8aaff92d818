use std::path::{Path, PathBuf};

use clap::Parser;

/// Run a script of list commands against a string linked list.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "llstr", version)]
pub struct Config {
    /// Stop at the first index error instead of reporting it and going on
    #[arg(long)]
    pub strict: bool,

    /// Comma separated values the list starts with
    #[arg(long, value_delimiter = ',')]
    pub init: Vec<String>,

    /// Script file to run; read from stdin when missing or `-`
    pub script: Option<PathBuf>,
}

impl Config {
    /// The script file to open, or `None` when the script comes from stdin.
    pub fn script_path(&self) -> Option<&Path> {
        self.script
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }
}
