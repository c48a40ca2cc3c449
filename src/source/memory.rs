// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{
    Division, EntitySource, EntityWriter, FunctionalRelation, Position, RawEntities, SourceError,
    SourceKind, Staff,
};
use crate::model::{EdgeId, EntityNode, NodeId, RelationEdge};

/// One upstream write accepted by a `MemorySource`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamWrite {
    CreateEntity(NodeId),
    UpdateEntity(NodeId),
    DeleteEntity(NodeId),
    CreateRelation(EdgeId),
    DeleteRelation(EdgeId),
}

#[derive(Debug, Default)]
struct MemoryState {
    entities: RawEntities,
    failing: BTreeSet<SourceKind>,
    reject_writes: bool,
    writes: Vec<UpstreamWrite>,
}

/// In-process entity backend.
///
/// Collections can be made to fail individually, writes can be rejected, and every fetch can
/// be delayed, which is what the loader and controller tests drive.
#[derive(Debug, Default)]
pub struct MemorySource {
    state: Mutex<MemoryState>,
    latency: Option<Duration>,
}

impl MemorySource {
    pub fn new(entities: RawEntities) -> Self {
        Self {
            state: Mutex::new(MemoryState { entities, ..MemoryState::default() }),
            latency: None,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn fail(&self, kind: SourceKind) {
        self.lock().failing.insert(kind);
    }

    pub fn recover(&self, kind: SourceKind) {
        self.lock().failing.remove(&kind);
    }

    pub fn set_reject_writes(&self, reject: bool) {
        self.lock().reject_writes = reject;
    }

    pub fn replace_entities(&self, entities: RawEntities) {
        self.lock().entities = entities;
    }

    pub fn writes(&self) -> Vec<UpstreamWrite> {
        self.lock().writes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory source lock poisoned")
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn read<T: Clone>(
        &self,
        kind: SourceKind,
        select: impl FnOnce(&RawEntities) -> Option<&Vec<T>>,
    ) -> Result<Vec<T>, SourceError> {
        let state = self.lock();
        if state.failing.contains(&kind) {
            return Err(SourceError::Unavailable {
                source_kind: kind,
                message: "simulated outage".to_owned(),
            });
        }
        Ok(select(&state.entities).cloned().unwrap_or_default())
    }

    fn record(&self, write: UpstreamWrite) -> Result<(), SourceError> {
        let mut state = self.lock();
        if state.reject_writes {
            return Err(SourceError::Rejected { message: "simulated write failure".to_owned() });
        }
        state.writes.push(write);
        Ok(())
    }
}

#[async_trait]
impl EntitySource for MemorySource {
    async fn fetch_divisions(&self) -> Result<Vec<Division>, SourceError> {
        self.simulate_latency().await;
        self.read(SourceKind::Divisions, |e| e.divisions.as_ref())
    }

    async fn fetch_positions(&self) -> Result<Vec<Position>, SourceError> {
        self.simulate_latency().await;
        self.read(SourceKind::Positions, |e| e.positions.as_ref())
    }

    async fn fetch_staff(&self) -> Result<Vec<Staff>, SourceError> {
        self.simulate_latency().await;
        self.read(SourceKind::Staff, |e| e.staff.as_ref())
    }

    async fn fetch_functional_relations(&self) -> Result<Vec<FunctionalRelation>, SourceError> {
        self.simulate_latency().await;
        self.read(SourceKind::Relations, |e| e.relations.as_ref())
    }
}

#[async_trait]
impl EntityWriter for MemorySource {
    async fn create_entity(&self, node: &EntityNode) -> Result<(), SourceError> {
        self.record(UpstreamWrite::CreateEntity(node.id().clone()))
    }

    async fn update_entity(&self, node: &EntityNode) -> Result<(), SourceError> {
        self.record(UpstreamWrite::UpdateEntity(node.id().clone()))
    }

    async fn delete_entity(&self, node_id: &NodeId) -> Result<(), SourceError> {
        self.record(UpstreamWrite::DeleteEntity(node_id.clone()))
    }

    async fn create_relation(&self, edge: &RelationEdge) -> Result<(), SourceError> {
        self.record(UpstreamWrite::CreateRelation(edge.id().clone()))
    }

    async fn delete_relation(&self, edge_id: &EdgeId) -> Result<(), SourceError> {
        self.record(UpstreamWrite::DeleteRelation(edge_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySource, UpstreamWrite};
    use crate::model::NodeId;
    use crate::source::fixtures::sample_entities;
    use crate::source::{EntitySource, EntityWriter, SourceError, SourceKind};

    #[tokio::test]
    async fn failing_collection_does_not_affect_others() {
        let source = MemorySource::new(sample_entities());
        source.fail(SourceKind::Relations);

        let err = source.fetch_functional_relations().await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { source_kind: SourceKind::Relations, .. }));
        assert_eq!(source.fetch_divisions().await.unwrap().len(), 2);

        source.recover(SourceKind::Relations);
        assert!(source.fetch_functional_relations().await.is_ok());
    }

    #[tokio::test]
    async fn rejected_writes_are_not_recorded() {
        let source = MemorySource::default();
        let node_id = NodeId::new("division:d1").unwrap();

        source.delete_entity(&node_id).await.unwrap();
        source.set_reject_writes(true);
        assert!(source.delete_entity(&node_id).await.is_err());

        assert_eq!(source.writes(), vec![UpstreamWrite::DeleteEntity(node_id)]);
    }
}
