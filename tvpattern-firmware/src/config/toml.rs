//! Simple TOML parser for the board configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `board.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - [pattern.name] headers (skipped; patterns are compiled in by build.rs)
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings
//! - Arrays and inline tables
//! - Dotted keys outside section headers

use defmt::Format;
use tvpattern_core::config::{ButtonConfig, PinConfig, ReleasePolicy};
use tvpattern_hal_rp2040::parse_pin_string;

use super::FirmwareConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Key not known in its section
    UnknownKey,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Indicator given for a button that is not configured
    OrphanIndicator,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Buttons,
    Indicator,
    Sampler,
    Video,
    Pattern,
}

/// Parse TOML configuration into a firmware configuration
pub fn parse_config(input: &str) -> Result<FirmwareConfig, ParseError> {
    let mut config = FirmwareConfig::default();
    let mut section = Section::Root;

    // Indicators may appear before the mode button is declared
    let mut indicators: [Option<u8>; 3] = [None; 3];

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        // Parse key = value
        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config, &mut indicators)?;
        }
    }

    let [next, prev, mode] = indicators;
    config.board.next.indicator = next.or(config.board.next.indicator);
    config.board.prev.indicator = prev.or(config.board.prev.indicator);
    match (&mut config.board.mode, mode) {
        (Some(button), line) => button.indicator = line.or(button.indicator),
        (None, Some(_)) => return Err(ParseError::OrphanIndicator),
        (None, None) => {}
    }

    Ok(config)
}

/// Parse section header like "buttons" or "pattern.bars"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();

    if let Some((kind, name)) = header.split_once('.') {
        return match kind {
            "pattern" if !name.is_empty() && !name.contains('.') => Ok(Section::Pattern),
            _ => Err(ParseError::InvalidSection),
        };
    }

    match header {
        "buttons" => Ok(Section::Buttons),
        "indicator" => Ok(Section::Indicator),
        "sampler" => Ok(Section::Sampler),
        "video" => Ok(Section::Video),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin string like "gpio17", "!gpio26", "^!gpio27"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    parse_pin_string(parse_string(value)).ok_or(ParseError::InvalidPin)
}

/// Parse a release policy ("ignore" or "mirror")
fn parse_release(value: &str) -> Result<ReleasePolicy, ParseError> {
    match parse_string(value) {
        "ignore" => Ok(ReleasePolicy::Ignore),
        "mirror" => Ok(ReleasePolicy::MirrorIndicator),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut FirmwareConfig,
    indicators: &mut [Option<u8>; 3],
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::UnknownKey),
        Section::Buttons => {
            let button = ButtonConfig::new(parse_pin(value)?);
            match key {
                "next" => config.board.next = button,
                "prev" => config.board.prev = button,
                "mode" => config.board.mode = Some(button),
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Indicator => match key {
            "release" => config.board.release_policy = parse_release(value)?,
            "next" | "prev" | "mode" => {
                let pin = parse_pin(value)?;
                let slot = match key {
                    "next" => 0,
                    "prev" => 1,
                    _ => 2,
                };
                indicators[slot] = Some(pin.pin);
            }
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Sampler => match key {
            "interval_us" => config.board.sample_interval_us = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Video => match key {
            "default_mode" => config.board.default_mode = parse_int(value)?,
            "first_pin" => config.video.first = parse_int(value)?,
            "pin_count" => config.video.count = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        // Checked and compiled in by build.rs
        Section::Pattern => {}
    }
    Ok(())
}
