//! Dispatches a parsed command to its handler.

use anyhow::Result;

use super::args::Command;
use super::commands::{CommandResult, check::check, init::init, pack::pack, resolve::resolve,
    unpack::unpack};

pub fn run(command: Command) -> Result<CommandResult> {
    match command {
        Command::Check(cmd) => check(cmd),
        Command::Pack(cmd) => pack(cmd),
        Command::Unpack(cmd) => unpack(cmd),
        Command::Resolve(cmd) => resolve(cmd),
        Command::Init => init(),
    }
}
