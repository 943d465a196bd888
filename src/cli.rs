//! CLI argument parsing for eventpolicy

use crate::level::EventLevel;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for resolved events
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text, one line per event (default)
    Text,
    /// JSON array for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "eventpolicy")]
#[command(version)]
#[command(about = "Resolve trace event metadata for the methods in a catalog", long_about = None)]
pub struct Cli {
    /// Method catalog (TOML) describing types, methods and their overrides
    #[arg(short = 'C', long = "catalog", value_name = "FILE")]
    pub catalog: PathBuf,

    /// Resolver configuration (TOML); built-in defaults when omitted
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Level for call and completion events without an override
    /// (log-always, critical, error, warning, informational, verbose, or 0-5)
    #[arg(long = "default-level", value_name = "LEVEL")]
    pub default_level: Option<EventLevel>,

    /// Level for fault events without an override
    /// (log-always, critical, error, warning, informational, verbose, or 0-5)
    #[arg(long = "exception-level", value_name = "LEVEL")]
    pub exception_level: Option<EventLevel>,

    /// Resolve a single method (Type::method) instead of the whole catalog
    #[arg(short = 'm', long = "method", value_name = "TYPE::METHOD")]
    pub method: Option<String>,

    /// First event id handed to generated events
    #[arg(long = "first-id", value_name = "ID")]
    pub first_id: Option<u32>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
