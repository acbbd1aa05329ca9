use anyhow::Context;
use clap::{Parser, ValueEnum};
use scout_core::config::{AppConfig, NamedConnection, default_config_path};
use scout_core::model::{ConnectionConfig, ProviderKind};
use scout_core::secret::SecretBuffer;
use scout_providers::rules;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod app;
mod args;
mod profile_cmd;
mod validate_cmd;

use args::*;

use profile_cmd::handle_profile;
use validate_cmd::{handle_check_url, handle_guide, handle_validate};

pub fn run() -> anyhow::Result<()> {
    app::run()
}

/// `--config` when given, otherwise the per-user default location.
fn resolve_config_path(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}
