// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::Path;
use std::sync::Arc;

use orgchart::config::EditingConfig;
use orgchart::edit::{ChangeEvent, EditCommand, EditError};
use orgchart::layout::LayoutConfig;
use orgchart::model::{NodeId, Point, RelationKind};
use orgchart::query::{DiagramScope, ViewMode};
use orgchart::render::PositionSource;
use orgchart::session::{ChartLoader, ChartWarning};
use orgchart::source::{JsonDirSource, MemorySource, UpstreamWrite};
use orgchart::store::{AnnotationStore, JsonDirKv, OverrideStore};

fn node(id: &str) -> NodeId {
    NodeId::new(id).expect("node id")
}

fn write_data(dir: &Path) {
    let files = [
        (
            "divisions.json",
            r#"[
                {"id":"d1","name":"Head Office","structure":"business","organization_id":"acme"},
                {"id":"d2","name":"Engineering","parent_id":"d1","structure":"business","organization_id":"acme"}
            ]"#,
        ),
        (
            "positions.json",
            r#"[
                {"id":"p1","title":"CEO","division_id":"d1","organization_id":"acme"},
                {"id":"p2","title":"CTO","division_id":"d2","parent_id":"p1","organization_id":"acme"}
            ]"#,
        ),
        (
            "staff.json",
            r#"[{"id":"s1","first_name":"Ada","last_name":"Lovelace","position_id":"p1"}]"#,
        ),
        (
            "relations.json",
            r#"[{"id":"r1","source":{"kind":"division","id":"d2"},"target":{"kind":"position","id":"p1"},"relation_type":"administrative"}]"#,
        ),
    ];
    for (name, contents) in files {
        std::fs::write(dir.join(name), contents).expect("write fixture");
    }
}

fn loader(data: &Path, state: &Path) -> ChartLoader {
    let kv = Arc::new(JsonDirKv::new(state));
    ChartLoader::new(
        Arc::new(JsonDirSource::new(data)),
        Arc::new(OverrideStore::new(kv.clone())),
        Arc::new(AnnotationStore::new(kv)),
        LayoutConfig::default(),
    )
    .with_editing(EditingConfig { default_edge_kind: RelationKind::Functional })
}

#[tokio::test]
async fn loads_ranks_and_persists_user_state_across_sessions() {
    let data = tempfile::tempdir().unwrap();
    let state = tempfile::tempdir().unwrap();
    write_data(data.path());
    let scope = DiagramScope::new(ViewMode::Business).with_organization("acme");

    let first = loader(data.path(), state.path());
    let chart = first.load(&scope).await.unwrap();

    assert!(chart.warnings.is_empty(), "unexpected warnings: {:?}", chart.warnings);
    assert_eq!(chart.graph.nodes().len(), 4);
    let rank = |id: &str| chart.layout.get(&node(id)).unwrap().rank;
    assert_eq!((rank("division:d1"), rank("position:p1")), (0, 0));
    assert_eq!((rank("division:d2"), rank("position:p2")), (1, 1));
    let model = chart.render();
    assert_eq!(model.node(&node("position:p1")).unwrap().subtitle.as_deref(), Some("Ada Lovelace"));

    let key = chart.diagram_key.clone();
    first.overrides().save(&key, &node("position:p2"), Point::new(500.0, 20.0));
    assert_eq!(first.overrides().flush_all().unwrap(), 1);
    let annotations = first.annotations();
    annotations.append(&key, &node("position:p1"), "plan succession").unwrap();
    annotations.append(&key, &node("position:p1"), "review budget").unwrap();
    annotations.toggle_complete(&key, &node("position:p1"), 0).unwrap();

    let second = loader(data.path(), state.path());
    let reloaded = second.load(&scope).await.unwrap().render();

    let p2 = reloaded.node(&node("position:p2")).unwrap();
    assert_eq!(p2.position, Point::new(500.0, 20.0));
    assert_eq!(p2.position_source, PositionSource::Override);
    assert_eq!(reloaded.node(&node("position:p1")).unwrap().badge_count, 1);
    assert_eq!(reloaded.count_by_source(PositionSource::Layout), 3);
}

#[tokio::test]
async fn missing_collection_file_yields_a_partial_chart() {
    let data = tempfile::tempdir().unwrap();
    let state = tempfile::tempdir().unwrap();
    write_data(data.path());
    std::fs::remove_file(data.path().join("relations.json")).unwrap();

    let chart =
        loader(data.path(), state.path()).load(&DiagramScope::new(ViewMode::Business)).await.unwrap();

    assert_eq!(chart.graph.nodes().len(), 4);
    assert!(chart
        .warnings
        .iter()
        .any(|warning| matches!(warning, ChartWarning::PartialFetch { incomplete, .. }
            if incomplete.contains(&RelationKind::Functional))));
}

#[tokio::test]
async fn edits_are_pushed_upstream_and_rolled_back_on_failure() {
    let data = tempfile::tempdir().unwrap();
    let state = tempfile::tempdir().unwrap();
    write_data(data.path());
    let loader = loader(data.path(), state.path());
    let chart = loader.load(&DiagramScope::new(ViewMode::Business)).await.unwrap();
    let mut editor = loader.editor(&chart);
    let upstream = MemorySource::default();

    let created = editor
        .dispatch(
            EditCommand::Connect {
                source: node("division:d1"),
                target: node("position:p2"),
                kind: None,
            },
            &upstream,
        )
        .await
        .unwrap();
    let Some(ChangeEvent::RelationCreated { edge }) = created else {
        panic!("expected a created relation");
    };
    assert_eq!(edge.kind(), RelationKind::Functional);
    let after_connect = editor.graph().clone();

    upstream.set_reject_writes(true);
    editor.dispatch(EditCommand::SelectNode(node("position:p1")), &upstream).await.unwrap();
    let err = editor.dispatch(EditCommand::DeleteSelected, &upstream).await.unwrap_err();

    assert!(matches!(err, EditError::WriteFailed { .. }));
    assert!(err.is_retryable());
    assert_eq!(editor.graph(), &after_connect);
    assert_eq!(upstream.writes(), vec![UpstreamWrite::CreateRelation(edge.id().clone())]);
}
