//! Lua settings commands
//!
//! The engine exposes its settings store to Lua as `settings.getValue(name)`
//! and `settings.setValue(name, value)`. Commands are sent as source text:
//!
//! ```text
//! settings.getValue("camPosX")
//! settings.setValue("camPosX",3)
//! ```

use std::fmt;

use camsync_core::FieldKey;

const GET_PREFIX: &str = "settings.getValue(";
const SET_PREFIX: &str = "settings.setValue(";

/// A settings call on the engine's Lua side
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsCommand {
    /// Read one setting
    GetValue { key: String },
    /// Write one setting
    SetValue { key: String, value: f64 },
}

impl SettingsCommand {
    pub fn get(key: FieldKey) -> Self {
        SettingsCommand::GetValue { key: key.name().to_string() }
    }

    pub fn set(key: FieldKey, value: f64) -> Self {
        SettingsCommand::SetValue { key: key.name().to_string(), value }
    }

    /// Name of the setting this command addresses
    pub fn key(&self) -> &str {
        match self {
            SettingsCommand::GetValue { key } | SettingsCommand::SetValue { key, .. } => key,
        }
    }

    /// Lua source for this command
    pub fn to_lua(&self) -> String {
        self.to_string()
    }

    /// Parse a chunk produced by [`to_lua`](Self::to_lua)
    pub fn parse(chunk: &str) -> Result<Self, CommandError> {
        let chunk = chunk.trim();
        let (is_set, args) = if let Some(rest) = chunk.strip_prefix(GET_PREFIX) {
            (false, rest)
        } else if let Some(rest) = chunk.strip_prefix(SET_PREFIX) {
            (true, rest)
        } else {
            return Err(CommandError::UnknownCall(chunk.to_string()));
        };

        let args = args
            .strip_suffix(')')
            .ok_or_else(|| CommandError::Malformed(chunk.to_string()))?;
        let (key, rest) = parse_string_literal(args)
            .ok_or_else(|| CommandError::Malformed(chunk.to_string()))?;

        if is_set {
            let value = rest
                .trim_start()
                .strip_prefix(',')
                .map(str::trim)
                .and_then(parse_number)
                .ok_or_else(|| CommandError::Malformed(chunk.to_string()))?;
            Ok(SettingsCommand::SetValue { key, value })
        } else if rest.trim().is_empty() {
            Ok(SettingsCommand::GetValue { key })
        } else {
            Err(CommandError::Malformed(chunk.to_string()))
        }
    }
}

impl fmt::Display for SettingsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsCommand::GetValue { key } => write!(f, "{}{:?})", GET_PREFIX, key),
            SettingsCommand::SetValue { key, value } => {
                write!(f, "{}{:?},{})", SET_PREFIX, key, LuaNumber(*value))
            }
        }
    }
}

/// Formats an `f64` as a Lua number expression
struct LuaNumber(f64);

impl fmt::Display for LuaNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            f.write_str("0/0")
        } else if v.is_infinite() {
            f.write_str(if v > 0.0 { "1/0" } else { "-1/0" })
        } else {
            write!(f, "{}", v)
        }
    }
}

/// Split a leading double-quoted literal off `input`
fn parse_string_literal(input: &str) -> Option<(String, &str)> {
    let rest = input.trim_start().strip_prefix('"')?;
    let end = rest.find('"')?;
    Some((rest[..end].to_string(), &rest[end + 1..]))
}

fn parse_number(text: &str) -> Option<f64> {
    match text {
        "0/0" => Some(f64::NAN),
        "1/0" => Some(f64::INFINITY),
        "-1/0" => Some(f64::NEG_INFINITY),
        _ => text.parse().ok(),
    }
}

/// Error parsing a settings command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The chunk is not a settings call
    UnknownCall(String),
    /// The call has the wrong arguments
    Malformed(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownCall(chunk) => write!(f, "Not a settings call: {}", chunk),
            CommandError::Malformed(chunk) => write!(f, "Malformed settings call: {}", chunk),
        }
    }
}

impl std::error::Error for CommandError {}
