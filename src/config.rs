use serde::{Deserialize, Serialize};
use clap::{ArgAction, Parser, ValueHint};
use dirs_next::{data_dir, home_dir};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::traits::{DisplayCapabilities, DisplayShape};

/// Default panel: the rectangular 144x168 watch.
pub const DEFAULT_WIDTH: u32 = 144;
pub const DEFAULT_HEIGHT: u32 = 168;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level shell configuration. Every field is optional so layers can be
/// merged; accessors fill in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub display: Option<DisplayConfig>,
    pub storage: Option<StorageConfig>,
    /// stand-ins for what a real watch would report
    pub host: Option<HostConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub shape: Option<DisplayShape>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageConfig {
    /// settings blob location
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HostConfig {
    pub battery_percent: Option<u8>,
    pub connected: Option<bool>,
    pub clock_24h: Option<bool>,
    /// write each drawn frame here as PPM
    pub frame_dump: Option<PathBuf>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "shards", about = "Shards analog watch face", disable_help_flag = false)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// shorthand for --log-level debug
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    /// rect | round
    #[arg(long, value_parser = parse_shape)]
    pub display_shape: Option<DisplayShape>,
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub storage_path: Option<PathBuf>,
    #[arg(long)]
    pub battery: Option<u8>,
    #[arg(long, action = ArgAction::Set)]
    pub connected: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub clock_24h: Option<bool>,
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub frame_dump: Option<PathBuf>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

fn parse_shape(s: &str) -> Result<DisplayShape, String> {
    match s.to_ascii_lowercase().as_str() {
        "rect" => Ok(DisplayShape::Rect),
        "round" => Ok(DisplayShape::Round),
        other => Err(format!("unknown display shape '{other}' (rect|round)")),
    }
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Round panels use the width as the diameter.
    pub fn capabilities(&self) -> DisplayCapabilities {
        let d = self.display.clone().unwrap_or_default();
        let width = d.width.unwrap_or(DEFAULT_WIDTH);
        match d.shape.unwrap_or_default() {
            DisplayShape::Round => DisplayCapabilities::round(width),
            DisplayShape::Rect => DisplayCapabilities::rect(width, d.height.unwrap_or(DEFAULT_HEIGHT)),
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        if let Some(p) = self.storage.as_ref().and_then(|s| s.path.clone()) {
            return p;
        }
        match data_dir() {
            Some(dir) => dir.join("shards/settings.bin"),
            None => PathBuf::from("shards-settings.bin"),
        }
    }

    pub fn battery_percent(&self) -> u8 {
        self.host.as_ref().and_then(|h| h.battery_percent).unwrap_or(100)
    }

    pub fn connected(&self) -> bool {
        self.host.as_ref().and_then(|h| h.connected).unwrap_or(true)
    }

    pub fn clock_24h(&self) -> bool {
        self.host.as_ref().and_then(|h| h.clock_24h).unwrap_or(true)
    }

    pub fn frame_dump(&self) -> Option<&Path> {
        self.host.as_ref().and_then(|h| h.frame_dump.as_deref())
    }
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    let cfg = load_with(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Layer defaults, YAML and `cli`, then validate.
pub fn load_with(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/shards/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/shards/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/shards.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["shards.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
pub fn merge(dst: &mut Config, src: Config) {
    // top-level
    if src.log_level.is_some()      { dst.log_level = src.log_level; }
    // display
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
    // storage
    match (&mut dst.storage, src.storage) {
        (None, Some(c)) => dst.storage = Some(c),
        (Some(d), Some(s)) => { if s.path.is_some() { d.path = s.path; } }
        _ => {}
    }
    // host
    match (&mut dst.host, src.host) {
        (None, Some(c)) => dst.host = Some(c),
        (Some(d), Some(s)) => merge_host(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()       { dst.width = src.width; }
    if src.height.is_some()      { dst.height = src.height; }
    if src.shape.is_some()       { dst.shape = src.shape; }
}

fn merge_host(dst: &mut HostConfig, src: HostConfig) {
    if src.battery_percent.is_some() { dst.battery_percent = src.battery_percent; }
    if src.connected.is_some()       { dst.connected = src.connected; }
    if src.clock_24h.is_some()       { dst.clock_24h = src.clock_24h; }
    if src.frame_dump.is_some()      { dst.frame_dump = src.frame_dump; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()       { cfg.log_level = cli.log_level.clone(); }
    if cli.debug                     { cfg.log_level = Some("debug".into()); }

    let any_display = cli.display_width.is_some()
        || cli.display_height.is_some()
        || cli.display_shape.is_some();
    if any_display {
        merge(cfg, Config {
            display: Some(DisplayConfig {
                width: cli.display_width,
                height: cli.display_height,
                shape: cli.display_shape,
            }),
            ..Default::default()
        });
    }

    if cli.storage_path.is_some() {
        merge(cfg, Config {
            storage: Some(StorageConfig { path: cli.storage_path.clone() }),
            ..Default::default()
        });
    }

    merge(cfg, Config {
        host: Some(HostConfig {
            battery_percent: cli.battery,
            connected: cli.connected,
            clock_24h: cli.clock_24h,
            frame_dump: cli.frame_dump.clone(),
        }),
        ..Default::default()
    });
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(display) = cfg.display.as_ref() {
        if display.width == Some(0) || display.height == Some(0) {
            return Err(ConfigError::Validation("display width/height must be > 0".into()));
        }
        if display.shape == Some(DisplayShape::Round) {
            if let (Some(w), Some(h)) = (display.width, display.height) {
                if w != h {
                    return Err(ConfigError::Validation("round display must be square".into()));
                }
            }
        }
    }
    if let Some(b) = cfg.host.as_ref().and_then(|h| h.battery_percent) {
        if b > 100 {
            return Err(ConfigError::Validation("host battery_percent must be 0..=100".into()));
        }
    }
    if let Some(level) = cfg.log_level.as_deref() {
        match level.to_ascii_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" | "off" => {}
            _ => return Err(ConfigError::Validation(format!("unknown log_level '{level}'"))),
        }
    }
    Ok(())
}
