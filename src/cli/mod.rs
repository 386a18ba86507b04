use anyhow::Result;

pub mod args;
pub mod commands;
mod exit_code;
mod report;
mod run;

pub use args::{Arguments, Command};

pub fn run_cli(args: Arguments) -> Result<i32> {
    let Some(command) = args.into_command_or_help() else {
        return Ok(0);
    };

    let result = run::run(command)?;
    report::print(&result);

    Ok(exit_code::exit_code_from_result(&result))
}
