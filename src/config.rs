// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layered configuration.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. `orgchart.toml` in the working directory, or the file passed with `--config`
//! 3. Environment variables: `ORGCHART_*`, with `__` separating sections
//!
//! ```toml
//! [layout]
//! node_width = 240
//! rank_gap = 100
//!
//! [persistence]
//! state_dir = ".orgchart"
//! debounce_ms = 250
//!
//! [editing]
//! default_edge_kind = "functional"
//! ```
//!
//! `ORGCHART_LAYOUT__RANK_GAP=120` overrides `layout.rank_gap`.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::layout::LayoutConfig;
use crate::model::RelationKind;

pub const DEFAULT_CONFIG_FILE: &str = "orgchart.toml";
pub const ENV_PREFIX: &str = "ORGCHART_";

/// Boxed wrapper for `figment::Error` to keep `Result` small.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub layout: LayoutConfig,
    pub persistence: PersistenceConfig,
    pub editing: EditingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Directory for overrides and annotations. `None` keeps them in memory.
    pub state_dir: Option<PathBuf>,
    pub debounce_ms: u64,
    /// fsync each write and its directory.
    pub durable_writes: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self { state_dir: None, debounce_ms: 400, durable_writes: false }
    }
}

impl PersistenceConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingConfig {
    /// Kind used by `Connect` when no kind is given.
    pub default_edge_kind: RelationKind,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self { default_edge_kind: RelationKind::Parent }
    }
}

impl ChartConfig {
    /// Provider stack without the environment layer.
    pub fn file_figment(path: Option<&Path>) -> Figment {
        let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        Figment::from(Serialized::defaults(ChartConfig::default())).merge(Toml::file(file))
    }

    pub fn figment(path: Option<&Path>) -> Figment {
        Self::file_figment(path).merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// Loads defaults, then the config file, then `ORGCHART_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::from_figment(Self::figment(path))?;
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }
}
