//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: lint resource files (parse errors, missing default text, ...)
//! - `pack`: compress a resource file into its packed binary form
//! - `unpack`: expand a packed resource file back into text
//! - `resolve`: resolve a prompt path against a resource file
//! - `init`: initialize a phrasebook configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Take the command if one was provided, otherwise print help.
    pub fn into_command_or_help(self) -> Option<Command> {
        match self.command {
            Some(command) => Some(command),
            None => {
                Self::command().print_help().ok();
                None
            }
        }
    }
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Resource files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PackCommand {
    /// Resource file to compress
    pub input: PathBuf,

    /// Output file (defaults to the input with a .res.bin suffix)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct UnpackCommand {
    /// Packed resource file to expand
    pub input: PathBuf,

    /// Output file (defaults to the input with a .res.xml suffix)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Resource file, text or packed
    pub file: PathBuf,

    /// Dot-path of the prompt to resolve
    pub path: String,

    /// Culture tag to resolve for (defaults to the tree's default culture)
    #[arg(long)]
    pub culture: Option<String>,

    /// Positional value substituted for $ markers; repeatable
    #[arg(long = "value")]
    pub values: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check resource files for structural and consistency issues
    Check(CheckCommand),
    /// Compress a resource file into its packed binary form
    Pack(PackCommand),
    /// Expand a packed resource file back into text
    Unpack(UnpackCommand),
    /// Resolve a prompt path against a resource file
    Resolve(ResolveCommand),
    /// Initialize a new .phrasebookrc.json configuration file
    Init,
}
