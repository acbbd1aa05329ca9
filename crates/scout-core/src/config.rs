use crate::model::ConnectionConfig;
use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A saved connection. Secrets are never persisted; callers supply them at
/// use time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedConnection {
    pub name: String,
    #[serde(flatten)]
    pub connection: ConnectionConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub connections: Vec<NamedConnection>,
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).context("read config")?;
        let config = serde_json::from_str(&data).context("parse config")?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("create config directory")?;
        }
        let data = serde_json::to_string_pretty(self).context("serialize config")?;
        fs::write(path, data).context("write config")?;
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&NamedConnection> {
        self.connections.iter().find(|entry| entry.name == name)
    }

    /// Inserts `entry`, replacing a saved connection with the same name.
    /// Returns true when an existing entry was replaced.
    pub fn upsert(&mut self, entry: NamedConnection) -> bool {
        if let Some(existing) = self
            .connections
            .iter_mut()
            .find(|existing| existing.name == entry.name)
        {
            *existing = entry;
            return true;
        }
        self.connections.push(entry);
        false
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.connections.len();
        self.connections.retain(|entry| entry.name != name);
        self.connections.len() != before
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let project =
        ProjectDirs::from("com", "repo-scout", "repo-scout").context("resolve project dirs")?;
    Ok(project.config_dir().join("connections.json"))
}
