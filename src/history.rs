//! Persisted deployment history: a newest-first record list backed by a
//! single JSON file. The file is the system of record; the in-memory list
//! is kept in sync on every mutation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use chrono::{DateTime, Local};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub id: String,
    pub project_name: String,
    pub project_description: String,
    pub theme_name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_url: Option<String>,
    pub deployed_at: String,
    pub site_id: String,
    pub deploy_id: String,
}

impl DeploymentRecord {
    /// `deployed_at` formatted for display, local time. Unparseable
    /// timestamps degrade to a placeholder rather than erroring.
    pub fn deployed_at_local(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.deployed_at) {
            Ok(ts) => ts
                .with_timezone(&Local)
                .format("%Y-%m-%d at %H:%M")
                .to_string(),
            Err(_) => "unknown date".to_string(),
        }
    }
}

/// A finished deployment before an id has been assigned.
#[derive(Debug, Clone)]
pub struct NewDeployment {
    pub project_name: String,
    pub project_description: String,
    pub theme_name: String,
    pub url: String,
    pub admin_url: Option<String>,
    pub deployed_at: String,
    pub site_id: String,
    pub deploy_id: String,
}

pub struct HistoryStore {
    path: PathBuf,
    deployments: Vec<DeploymentRecord>,
}

impl HistoryStore {
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pagecraft")
            .join("history.json")
    }

    /// Load the persisted list. A missing file, unreadable content, or a
    /// payload that isn't a record array all degrade to an empty history.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let deployments = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<DeploymentRecord>>(&raw) {
                Ok(list) => list,
                Err(err) => {
                    tracing::warn!(
                        "ignoring malformed history file {}: {err}",
                        path.display()
                    );
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { path, deployments }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Newest first.
    pub fn list(&self) -> &[DeploymentRecord] {
        &self.deployments
    }

    pub fn len(&self) -> usize {
        self.deployments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty()
    }

    /// Assign a fresh id, prepend, persist.
    pub fn add(&mut self, new: NewDeployment) -> &DeploymentRecord {
        let record = DeploymentRecord {
            id: generate_id(),
            project_name: new.project_name,
            project_description: new.project_description,
            theme_name: new.theme_name,
            url: new.url,
            admin_url: new.admin_url,
            deployed_at: new.deployed_at,
            site_id: new.site_id,
            deploy_id: new.deploy_id,
        };
        self.deployments.insert(0, record);
        self.persist();
        &self.deployments[0]
    }

    /// Remove the record with the given id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) {
        let before = self.deployments.len();
        self.deployments.retain(|d| d.id != id);
        if self.deployments.len() != before {
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.deployments.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.try_persist() {
            tracing::warn!(
                "failed to save deployment history to {}: {err}",
                self.path.display()
            );
        }
    }

    fn try_persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.deployments)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Epoch millis plus a random lowercase-alphanumeric suffix. Generated at
/// insertion time, never reused.
fn generate_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("{millis}{}", suffix.to_lowercase())
}
