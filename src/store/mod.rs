// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Side-channel persistence for charts.
//!
//! Position overrides and annotations outlive a diagram session. Both are kept behind the
//! `KvStore` port, addressed by a namespace derived from the diagram key plus a node id key.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{DiagramKey, NodeId};

pub mod annotations;
pub mod json_dir;
pub mod kv;
pub mod overrides;

pub use annotations::AnnotationStore;
pub use json_dir::{JsonDirKv, WriteDurability};
pub use kv::MemoryKv;
pub use overrides::OverrideStore;

/// A durable key-value backend addressable by `(namespace, key)`.
///
/// Implementations must return every key of a namespace from `read_all` and replace a single
/// key on `write`. A namespace that was never written reads as empty.
pub trait KvStore: Send + Sync {
    fn read_all(&self, namespace: &str) -> Result<BTreeMap<String, serde_json::Value>, StoreError>;

    fn write(&self, namespace: &str, key: &str, value: serde_json::Value) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },

    #[error("invalid namespace {namespace:?}")]
    InvalidNamespace { namespace: String },

    #[error("could not encode value for {namespace}/{key}: {source}")]
    Encode {
        namespace: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored value for {namespace}/{key} is malformed: {source}")]
    Decode {
        namespace: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("annotation {index} does not exist for node {node_id} in {diagram_key} (has {len})")]
    AnnotationOutOfRange { diagram_key: DiagramKey, node_id: NodeId, index: usize, len: usize },

    #[error("storage backend unavailable: {message}")]
    Unavailable { message: String },
}

pub(crate) fn overrides_namespace(diagram_key: &DiagramKey) -> String {
    format!("overrides/{diagram_key}")
}

pub(crate) fn annotations_namespace(diagram_key: &DiagramKey) -> String {
    format!("annotations/{diagram_key}")
}
