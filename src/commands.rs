use std::sync::LazyLock;

use regex::Regex;

use crate::error::CommandError;
use crate::services::alerts_service::parse_target_price;

static RE_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*!(?P<name>[A-Za-z]+)(?:\s+(?P<args>.*?))?\s*$").unwrap());

/// A parsed prefix command. Mirrors the slash commands one-to-one.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetAlert { symbol: String, target: f64 },
    ShowAlerts,
    RemoveAlert { symbol: String },
}

/// Parses `!setalert NABIL 1200`, `!showalerts` and `!removealert NABIL`.
pub fn parse(content: &str) -> Result<Command, CommandError> {
    let caps = RE_COMMAND
        .captures(content)
        .ok_or_else(|| CommandError::UnknownCommand(content.to_string()))?;

    let name = caps["name"].to_lowercase();
    let args: Vec<&str> = caps
        .name("args")
        .map(|m| m.as_str().split_whitespace().collect())
        .unwrap_or_default();

    match name.as_str() {
        "setalert" => {
            let symbol = args.first().ok_or(CommandError::MissingSymbol)?;
            let raw_price = args
                .get(1)
                .ok_or_else(|| CommandError::InvalidPrice(String::new()))?;
            Ok(Command::SetAlert {
                symbol: symbol.to_string(),
                target: parse_target_price(raw_price)?,
            })
        }
        "showalerts" => Ok(Command::ShowAlerts),
        "removealert" => {
            let symbol = args.first().ok_or(CommandError::MissingSymbol)?;
            Ok(Command::RemoveAlert {
                symbol: symbol.to_string(),
            })
        }
        _ => Err(CommandError::UnknownCommand(content.to_string())),
    }
}
