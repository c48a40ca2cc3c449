// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Loading one diagram session.
//!
//! The loader fans out the four entity fetches concurrently, resolves the diagram scope,
//! normalizes, builds and lays out the graph, then reads the side-channel stores. Every load
//! takes a new generation; a load whose generation is no longer current is abandoned and its
//! results are never returned.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

use crate::adapter::normalize;
use crate::builder::{build, BuildReport, DanglingReference};
use crate::config::EditingConfig;
use crate::edit::EditController;
use crate::layout::{layout, LayoutConfig, LayoutOutcome};
use crate::model::{Annotation, DiagramKey, IdError, NodeId, OrgGraph, Point, RelationKind};
use crate::query::{resolve_scope, DiagramScope};
use crate::render::{render_model, RenderModel};
use crate::source::{EntitySource, RawEntities, SourceError, SourceKind};
use crate::store::{AnnotationStore, OverrideStore};

/// Recovered conditions worth showing to the user as non-blocking notices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum ChartWarning {
    PartialFetch { failed: Vec<SourceKind>, incomplete: BTreeSet<RelationKind> },
    DanglingReference(DanglingReference),
    LayoutFailure { reason: String },
    StoreUnavailable { store: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("load generation {generation} was superseded")]
    Superseded { generation: u64 },

    #[error("invalid diagram scope: {0}")]
    InvalidScope(#[from] IdError),
}

#[derive(Debug, Clone)]
pub struct LoadedChart {
    pub generation: u64,
    pub scope: DiagramScope,
    pub diagram_key: DiagramKey,
    pub graph: OrgGraph,
    pub layout: LayoutOutcome,
    pub overrides: BTreeMap<NodeId, Point>,
    pub annotations: BTreeMap<NodeId, Vec<Annotation>>,
    pub report: BuildReport,
    pub warnings: Vec<ChartWarning>,
}

impl LoadedChart {
    pub fn render(&self) -> RenderModel {
        render_model(&self.graph, &self.layout, &self.overrides, &self.annotations)
    }
}

pub struct ChartLoader {
    source: Arc<dyn EntitySource>,
    overrides: Arc<OverrideStore>,
    annotations: Arc<AnnotationStore>,
    layout: LayoutConfig,
    editing: EditingConfig,
    generation: watch::Sender<u64>,
}

impl std::fmt::Debug for ChartLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartLoader")
            .field("generation", &self.generation())
            .field("layout", &self.layout)
            .field("editing", &self.editing)
            .finish_non_exhaustive()
    }
}

impl ChartLoader {
    pub fn new(
        source: Arc<dyn EntitySource>,
        overrides: Arc<OverrideStore>,
        annotations: Arc<AnnotationStore>,
        layout: LayoutConfig,
    ) -> Self {
        let (generation, _) = watch::channel(0);
        Self { source, overrides, annotations, layout, editing: EditingConfig::default(), generation }
    }

    pub fn with_editing(mut self, editing: EditingConfig) -> Self {
        self.editing = editing;
        self
    }

    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Abandons any in-flight load (view switched or unmounted).
    pub fn cancel(&self) {
        self.next_generation();
    }

    pub fn overrides(&self) -> &Arc<OverrideStore> {
        &self.overrides
    }

    pub fn annotations(&self) -> &Arc<AnnotationStore> {
        &self.annotations
    }

    /// Editing controller over a loaded chart's graph, storing new node positions in this
    /// loader's override store.
    pub fn editor(&self, chart: &LoadedChart) -> EditController {
        EditController::new(chart.graph.clone(), chart.diagram_key.clone())
            .with_default_edge_kind(self.editing.default_edge_kind)
            .with_overrides(self.overrides.clone())
    }

    pub async fn load(&self, scope: &DiagramScope) -> Result<LoadedChart, LoadError> {
        let diagram_key = scope.diagram_key()?;
        let generation = self.next_generation();
        let mut current = self.generation.subscribe();

        let raw = tokio::select! {
            biased;
            _ = superseded(&mut current, generation) => {
                tracing::debug!(generation, diagram_key = %diagram_key, "discarding stale load");
                return Err(LoadError::Superseded { generation });
            }
            raw = fetch_all(self.source.as_ref()) => raw,
        };
        self.ensure_current(generation)?;

        let mut warnings = Vec::new();
        let scoped = resolve_scope(&raw, scope);
        let normalized = normalize(&scoped, scope.mode);
        if !normalized.failed_sources.is_empty() {
            warnings.push(ChartWarning::PartialFetch {
                failed: normalized.failed_sources.clone(),
                incomplete: normalized.incomplete.clone(),
            });
        }

        let built = build(normalized.nodes, normalized.edges);
        warnings.extend(built.report.dangling.iter().cloned().map(ChartWarning::DanglingReference));

        let computed = layout(&built.graph, &self.layout);
        if let Some(failure) = computed.failure() {
            warnings.push(ChartWarning::LayoutFailure { reason: failure.to_string() });
        }

        let overrides = self.overrides.load(&diagram_key).unwrap_or_else(|err| {
            tracing::warn!(diagram_key = %diagram_key, error = %err, "could not read position overrides");
            warnings.push(ChartWarning::StoreUnavailable { store: "overrides", reason: err.to_string() });
            BTreeMap::new()
        });
        let annotations = self.annotations.list_for_diagram(&diagram_key).unwrap_or_else(|err| {
            tracing::warn!(diagram_key = %diagram_key, error = %err, "could not read annotations");
            warnings.push(ChartWarning::StoreUnavailable { store: "annotations", reason: err.to_string() });
            BTreeMap::new()
        });

        self.ensure_current(generation)?;
        tracing::debug!(
            generation,
            diagram_key = %diagram_key,
            nodes = built.graph.nodes().len(),
            edges = built.graph.edges().len(),
            warnings = warnings.len(),
            "loaded chart"
        );

        Ok(LoadedChart {
            generation,
            scope: scope.clone(),
            diagram_key,
            graph: built.graph,
            layout: computed,
            overrides,
            annotations,
            report: built.report,
            warnings,
        })
    }

    fn next_generation(&self) -> u64 {
        let mut next = 0;
        self.generation.send_modify(|generation| {
            *generation += 1;
            next = *generation;
        });
        next
    }

    fn ensure_current(&self, generation: u64) -> Result<(), LoadError> {
        if self.generation() == generation {
            Ok(())
        } else {
            tracing::debug!(generation, current = self.generation(), "discarding stale load");
            Err(LoadError::Superseded { generation })
        }
    }
}

/// Resolves once the watched generation differs from `generation`.
async fn superseded(current: &mut watch::Receiver<u64>, generation: u64) {
    loop {
        if *current.borrow_and_update() != generation {
            return;
        }
        if current.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

fn keep<T>(kind: SourceKind, fetched: Result<Vec<T>, SourceError>) -> Option<Vec<T>> {
    match fetched {
        Ok(records) => Some(records),
        Err(err) => {
            tracing::warn!(source_kind = %kind, error = %err, "entity fetch failed, continuing without it");
            None
        }
    }
}

/// Fetches the four collections concurrently. A failed collection becomes `None`.
pub async fn fetch_all(source: &dyn EntitySource) -> RawEntities {
    let (divisions, positions, staff, relations) = tokio::join!(
        source.fetch_divisions(),
        source.fetch_positions(),
        source.fetch_staff(),
        source.fetch_functional_relations(),
    );
    RawEntities {
        divisions: keep(SourceKind::Divisions, divisions),
        positions: keep(SourceKind::Positions, positions),
        staff: keep(SourceKind::Staff, staff),
        relations: keep(SourceKind::Relations, relations),
    }
}
