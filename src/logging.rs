//! A wee logger fer the operators' ain diagnostics.
//!
//! Escape warnings land here when the host doesnae override
//! [`Host::warn`](crate::host::Host::warn), an the segment splitter
//! mutters aboot its work at debug level. Levels follow the hoose
//! convention: wheesht means naething at aw, roar is fer errors, holler
//! fer warnings, blether fer info, mutter fer debug.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use chrono::Local;
use serde_json::{json, Map, Value as JsonValue};

/// Global log level (default: Holler - warnings an worse).
static GLOBAL_LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Holler as u8);

/// Global output format (0 = text, 1 = json).
static GLOBAL_LOG_FORMAT: AtomicU8 = AtomicU8::new(0);

/// Whether text records carry a timestamp.
static TIMESTAMPS: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    /// Silence.
    Wheesht = 0,
    /// Errors.
    Roar = 1,
    /// Warnings.
    Holler = 2,
    /// Information.
    Blether = 3,
    /// Debug chatter.
    Mutter = 4,
}

impl LogLevel {
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Wheesht => "WHEESHT",
            LogLevel::Roar => "ROAR",
            LogLevel::Holler => "HOLLER",
            LogLevel::Blether => "BLETHER",
            LogLevel::Mutter => "MUTTER",
        }
    }

    /// Parse a level name - the hoose names or the plain ones.
    pub fn parse_level(s: &str) -> Option<LogLevel> {
        match s.to_ascii_lowercase().as_str() {
            "wheesht" | "off" | "silent" => Some(LogLevel::Wheesht),
            "roar" | "error" => Some(LogLevel::Roar),
            "holler" | "warn" | "warning" => Some(LogLevel::Holler),
            "blether" | "info" => Some(LogLevel::Blether),
            "mutter" | "debug" => Some(LogLevel::Mutter),
            _ => None,
        }
    }

    fn from_u8(raw: u8) -> LogLevel {
        match raw {
            0 => LogLevel::Wheesht,
            1 => LogLevel::Roar,
            2 => LogLevel::Holler,
            3 => LogLevel::Blether,
            _ => LogLevel::Mutter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub fn set_global_log_level(level: LogLevel) {
    GLOBAL_LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn get_global_log_level() -> LogLevel {
    LogLevel::from_u8(GLOBAL_LOG_LEVEL.load(Ordering::Relaxed))
}

pub fn set_format(format: LogFormat) {
    let raw = match format {
        LogFormat::Text => 0,
        LogFormat::Json => 1,
    };
    GLOBAL_LOG_FORMAT.store(raw, Ordering::Relaxed);
}

pub fn set_timestamps(enabled: bool) {
    TIMESTAMPS.store(enabled, Ordering::Relaxed);
}

pub fn log_enabled(level: LogLevel) -> bool {
    level != LogLevel::Wheesht && level <= get_global_log_level()
}

/// Format one record withoot emitting it.
fn format_record(level: LogLevel, message: &str, timestamp: Option<String>) -> String {
    let json = GLOBAL_LOG_FORMAT.load(Ordering::Relaxed) == 1;
    if json {
        let mut obj = Map::new();
        if let Some(ts) = timestamp {
            obj.insert("ts".to_string(), JsonValue::String(ts));
        }
        obj.insert("level".to_string(), json!(level.name()));
        obj.insert("msg".to_string(), json!(message));
        JsonValue::Object(obj).to_string()
    } else {
        match timestamp {
            Some(ts) => format!("[{}] [{}] {}", ts, level.name(), message),
            None => format!("[{}] {}", level.name(), message),
        }
    }
}

pub fn log(level: LogLevel, message: &str) {
    if !log_enabled(level) {
        return;
    }
    let timestamp = if TIMESTAMPS.load(Ordering::Relaxed) {
        Some(format!("{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f")))
    } else {
        None
    };
    eprintln!("{}", format_record(level, message, timestamp));
}

pub fn roar(message: &str) {
    log(LogLevel::Roar, message);
}

pub fn holler(message: &str) {
    log(LogLevel::Holler, message);
}

pub fn blether(message: &str) {
    log(LogLevel::Blether, message);
}

pub fn mutter(message: &str) {
    log(LogLevel::Mutter, message);
}
