// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{Division, EntitySource, FunctionalRelation, Position, SourceError, Staff};

const DIVISIONS_FILENAME: &str = "divisions.json";
const POSITIONS_FILENAME: &str = "positions.json";
const STAFF_FILENAME: &str = "staff.json";
const RELATIONS_FILENAME: &str = "relations.json";

/// Read-only entity source backed by a directory of JSON array files.
///
/// Each collection lives in its own file, so a missing or malformed file fails that
/// collection alone.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_collection<T: DeserializeOwned>(
        &self,
        filename: &str,
    ) -> Result<Vec<T>, SourceError> {
        let path = self.root.join(filename);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| SourceError::Io { path: path.clone(), source })?;
        serde_json::from_slice(&bytes).map_err(|source| SourceError::Json { path, source })
    }
}

#[async_trait]
impl EntitySource for JsonDirSource {
    async fn fetch_divisions(&self) -> Result<Vec<Division>, SourceError> {
        self.read_collection(DIVISIONS_FILENAME).await
    }

    async fn fetch_positions(&self) -> Result<Vec<Position>, SourceError> {
        self.read_collection(POSITIONS_FILENAME).await
    }

    async fn fetch_staff(&self) -> Result<Vec<Staff>, SourceError> {
        self.read_collection(STAFF_FILENAME).await
    }

    async fn fetch_functional_relations(&self) -> Result<Vec<FunctionalRelation>, SourceError> {
        self.read_collection(RELATIONS_FILENAME).await
    }
}

#[cfg(test)]
mod tests {
    use super::JsonDirSource;
    use crate::source::{EntitySource, SourceError};

    #[tokio::test]
    async fn reads_each_collection_from_its_own_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("divisions.json"),
            r#"[{"id":"d1","name":"Head Office"},{"id":"d2","name":"Sales","parent_id":"d1","structure":"legal"}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("staff.json"), "not json").unwrap();

        let source = JsonDirSource::new(dir.path());

        let divisions = source.fetch_divisions().await.unwrap();
        assert_eq!(divisions.len(), 2);
        assert_eq!(divisions[1].parent_id.as_deref(), Some("d1"));

        assert!(matches!(source.fetch_positions().await, Err(SourceError::Io { .. })));
        assert!(matches!(source.fetch_staff().await, Err(SourceError::Json { .. })));
    }
}
