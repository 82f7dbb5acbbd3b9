//! CLI module - Command-line interface for Watcharr
//!
//! Flags given here override values read from the config file.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};

use crate::config::Config;

/// Watcharr - Radarr v3 API adapter for Watcher3
#[derive(Debug, Parser)]
#[command(name = "watcharr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// External configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Turn on debug messaging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Address to listen on
    #[arg(short = 'i', long, value_name = "ADDRESS")]
    pub ip: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Watcher3 host
    #[arg(short = 'w', long, value_name = "ADDRESS")]
    pub watcher3_host: Option<String>,

    /// Watcher3 port
    #[arg(short = 'P', long, value_name = "PORT")]
    pub watcher3_port: Option<u16>,

    /// Watcher3 scheme
    #[arg(short = 's', long, value_name = "SCHEME", value_parser = ["http", "https"])]
    pub watcher3_scheme: Option<String>,

    /// Watcher3 API key
    #[arg(short = 'k', long, value_name = "KEY")]
    pub watcher3_apikey: Option<String>,

    /// Watcher3 TLS CA certificate bundle
    #[arg(short = 'C', long, value_name = "CERTIFICATE")]
    pub watcher3_ssl_cert: Option<PathBuf>,

    /// Watcher3 TLS verification
    #[arg(short = 'S', long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub watcher3_ssl_verify: Option<bool>,

    /// Signal readiness by writing a newline to this file descriptor
    #[arg(long, value_name = "INT")]
    pub ready_fd: Option<i32>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the Radarr-compatible API (default)
    Serve,

    /// Create default config file
    Init,
}

impl Cli {
    /// Loads the config file named on the command line, or searches the
    /// default locations, then applies command-line overrides.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config_file {
            Some(path) => Config::load_from_path(path)?,
            None => Config::load()?,
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if self.debug {
            config.general.log_level = "debug".to_string();
        }
        if let Some(ip) = &self.ip {
            config.server.ip.clone_from(ip);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(fd) = self.ready_fd {
            config.server.ready_fd = Some(fd);
        }
        if let Some(host) = &self.watcher3_host {
            config.watcher3.host.clone_from(host);
        }
        if let Some(port) = self.watcher3_port {
            config.watcher3.port = port;
        }
        if let Some(scheme) = &self.watcher3_scheme {
            config.watcher3.scheme.clone_from(scheme);
        }
        if let Some(key) = &self.watcher3_apikey {
            config.watcher3.apikey.clone_from(key);
        }
        if let Some(cert) = &self.watcher3_ssl_cert {
            config.watcher3.ssl_cert = Some(cert.clone());
        }
        if let Some(verify) = self.watcher3_ssl_verify {
            config.watcher3.ssl_verify = verify;
        }
    }
}
