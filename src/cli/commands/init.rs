use std::{fs, path::Path};

use anyhow::Result;

use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<CommandResult> {
    let path = Path::new(CONFIG_FILE_NAME);
    let created = if path.exists() {
        false
    } else {
        fs::write(path, default_config_json()?)?;
        true
    };

    Ok(CommandResult::new(
        CommandSummary::Init(InitSummary { created }),
        Vec::new(),
        0,
        false,
    ))
}
