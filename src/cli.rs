//! Command-line flags.  Any flag given overrides the config file.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "wingobar", about = "Workspace line for Wingo, formatted for gobar")]
pub struct Args {
    /// Write the line to this file instead of standard output.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Foreground color of the current workspace.
    #[arg(long = "cur-fg")]
    pub cur_fg: Option<String>,

    /// Foreground color of the other workspaces.
    #[arg(long = "other-fg")]
    pub other_fg: Option<String>,

    /// Show the remaining battery time.
    #[arg(long)]
    pub battery: bool,

    /// Read settings from this JSON file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Layer the flags on top of `config`.
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(file) = self.file {
            config.output = Some(file);
        }
        if let Some(fg) = self.cur_fg {
            config.highlight = Some(fg);
        }
        if let Some(fg) = self.other_fg {
            config.lowlight = Some(fg);
        }
        if self.battery {
            config.battery = true;
        }
        config
    }
}
