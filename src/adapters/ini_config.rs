//! INI configuration adapter.
//!
//! Implements [`ConfigPort`] for `/etc/COSmon.conf`:
//!
//! ```ini
//! [gpio]
//! gpio_COS = 29
//! gpio_network = 3
//! gpio_shutdown = 7
//!
//! [functions]
//! enable_network_status_LED = yes
//! enable_shutdown_switch = no
//!
//! [COS settings]
//! COS_poll_loop_interval_ms = 100
//! COS_timeout_ms = 150000
//! COS_timeout_enable = true
//! network_check_divisor = 20
//! shutdown_switch_activate_count = 30
//! ```
//!
//! Optional `[commands]` (`key_command`, `unkey_command`, `shutdown_script`,
//! `poweroff_command`) and `[service]` (`control_socket`) sections override
//! the AllStar defaults.
//!
//! Every key is resolved on its own: a missing or malformed value takes its
//! default with a warning.  Keys and section names match case-insensitively,
//! and a trailing ` ; comment` or ` # comment` after a value is ignored.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use log::{info, warn};
use serde::Deserialize;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::{CONFIG_PATH, CosmonConfig};

type Section = HashMap<String, String>;

/// The file as the INI reader sees it: section → key → raw text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    #[serde(alias = "GPIO")]
    gpio: Section,
    #[serde(alias = "FUNCTIONS")]
    functions: Section,
    #[serde(rename = "COS settings", alias = "cos settings")]
    cos_settings: Section,
    commands: Section,
    service: Section,
}

pub struct IniConfigAdapter {
    path: PathBuf,
}

impl Default for IniConfigAdapter {
    fn default() -> Self {
        Self::new(CONFIG_PATH)
    }
}

impl IniConfigAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> Result<RawConfig, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::NotFound);
        }
        Config::builder()
            .add_source(File::from(self.path.as_path()).format(FileFormat::Ini))
            .build()
            .and_then(|cfg| cfg.try_deserialize::<RawConfig>())
            .map_err(|e| ConfigError::Unreadable(e.to_string()))
    }
}

impl ConfigPort for IniConfigAdapter {
    fn load(&self) -> Result<CosmonConfig, ConfigError> {
        let raw = self.read_raw()?;
        info!("Config: loaded {}", self.path.display());
        Ok(resolve(&raw).sanitised())
    }
}

// ── Resolution ────────────────────────────────────────────────

fn resolve(raw: &RawConfig) -> CosmonConfig {
    let d = CosmonConfig::default();
    let gpio = Lookup::new("gpio", &raw.gpio);
    let functions = Lookup::new("functions", &raw.functions);
    let cos = Lookup::new("COS settings", &raw.cos_settings);
    let commands = Lookup::new("commands", &raw.commands);
    let service = Lookup::new("service", &raw.service);

    CosmonConfig {
        cos_pin: gpio.int("gpio_COS", d.cos_pin),
        network_pin: gpio.int("gpio_network", d.network_pin),
        shutdown_pin: gpio.int("gpio_shutdown", d.shutdown_pin),
        gpio_chip: gpio.text("gpio_chip", d.gpio_chip),

        network_indicator_enabled: functions
            .bool("enable_network_status_LED", d.network_indicator_enabled),
        shutdown_enabled: functions.bool("enable_shutdown_switch", d.shutdown_enabled),

        loop_delay_ms: cos.int("COS_poll_loop_interval_ms", d.loop_delay_ms),
        cos_timeout_ms: cos.int("COS_timeout_ms", d.cos_timeout_ms),
        cos_timeout_enabled: cos.bool("COS_timeout_enable", d.cos_timeout_enabled),
        network_check_divisor: cos.int("network_check_divisor", d.network_check_divisor),
        shutdown_activate_count: cos
            .int("shutdown_switch_activate_count", d.shutdown_activate_count),

        commands: crate::config::CommandSet {
            key: commands.text("key_command", d.commands.key),
            unkey: commands.text("unkey_command", d.commands.unkey),
            shutdown_script: commands.text("shutdown_script", d.commands.shutdown_script),
            poweroff: commands.text("poweroff_command", d.commands.poweroff),
        },
        control_socket: service.text("control_socket", d.control_socket),
    }
}

/// Case-insensitive view over one section with per-key fallback.
struct Lookup<'a> {
    name: &'static str,
    section: &'a Section,
}

impl<'a> Lookup<'a> {
    fn new(name: &'static str, section: &'a Section) -> Self {
        Self { name, section }
    }

    fn raw(&self, key: &str) -> Option<&'a str> {
        self.section
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| strip_comment(v.trim()))
            .filter(|v| !v.is_empty())
    }

    fn int<T>(&self, key: &str, default: T) -> T
    where
        T: TryFrom<i64> + core::fmt::Display,
    {
        let Some(text) = self.raw(key) else {
            return default;
        };
        match parse_int(text).and_then(|v| T::try_from(v).ok()) {
            Some(v) => v,
            None => {
                warn!(
                    "Config: [{}] {} = '{}' is not a valid number, using {}",
                    self.name, key, text, default
                );
                default
            }
        }
    }

    fn bool(&self, key: &str, default: bool) -> bool {
        let Some(text) = self.raw(key) else {
            return default;
        };
        parse_bool(text).unwrap_or_else(|| {
            warn!(
                "Config: [{}] {} = '{}' is not a boolean, using {}",
                self.name, key, text, default
            );
            default
        })
    }

    fn text(&self, key: &str, default: String) -> String {
        self.raw(key).map_or(default, str::to_owned)
    }
}

/// Cut an inline `;` or `#` comment that follows whitespace.  A leading
/// quoted string is kept whole.
fn strip_comment(text: &str) -> &str {
    let start = match text.strip_prefix('"') {
        Some(rest) => rest.find('"').map_or(text.len(), |i| i + 2),
        None => 0,
    };
    let bytes = text.as_bytes();
    let cut = (start..bytes.len()).find(|&i| {
        matches!(bytes[i], b';' | b'#') && (i == 0 || bytes[i - 1].is_ascii_whitespace())
    });
    match cut {
        Some(i) => text[..i].trim_end(),
        None => text,
    }
}

/// Decimal or `0x` hexadecimal integer, optionally signed.
fn parse_int(text: &str) -> Option<i64> {
    let text = unquote(text);
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let value = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i64>().ok()?,
    };
    Some(if negative { -value } else { value })
}

/// Leading `y/Y/t/T/1` is true, `n/N/f/F/0` is false; anything else is invalid.
fn parse_bool(text: &str) -> Option<bool> {
    match unquote(text).chars().next()? {
        'y' | 'Y' | 't' | 'T' | '1' => Some(true),
        'n' | 'N' | 'f' | 'F' | '0' => Some(false),
        _ => None,
    }
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}
