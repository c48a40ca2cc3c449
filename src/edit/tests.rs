// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use super::{ChangeEvent, EditCommand, EditController, EditError, EditState, NodePatch};
use crate::model::fixtures::{eid, nid, small_dag};
use crate::model::{DiagramKey, EntityKind, Point, RelationKind};
use crate::source::{MemorySource, SourceError, UpstreamWrite};
use crate::store::{MemoryKv, OverrideStore};

fn controller() -> EditController {
    EditController::new(small_dag(), DiagramKey::new("business").expect("diagram key"))
}

fn edge_ids(controller: &EditController) -> Vec<String> {
    controller.graph().edges().iter().map(|e| e.id().to_string()).collect()
}

#[test]
fn selection_moves_between_idle_and_selected() {
    let mut controller = controller();
    assert_eq!(controller.state(), &EditState::Idle);

    assert!(controller.apply(EditCommand::SelectNode(nid("b"))).unwrap().is_none());
    assert_eq!(controller.selection(), Some(&nid("b")));

    controller.apply(EditCommand::SelectNode(nid("c"))).unwrap();
    assert_eq!(controller.selection(), Some(&nid("c")));

    controller.apply(EditCommand::ClearSelection).unwrap();
    assert_eq!(controller.state(), &EditState::Idle);

    let err = controller.apply(EditCommand::SelectNode(nid("zz"))).unwrap_err();
    assert!(matches!(err, EditError::UnknownNode { .. }));
    assert_eq!(controller.state(), &EditState::Idle);
}

#[test]
fn delete_and_edit_require_a_selection() {
    let mut controller = controller();

    let err = controller.apply(EditCommand::DeleteSelected).unwrap_err();
    assert!(matches!(
        err,
        EditError::InvalidTransition { state: "idle", command: "delete_selected" }
    ));
    let err = controller.apply(EditCommand::EditSelected(NodePatch::default())).unwrap_err();
    assert!(matches!(err, EditError::InvalidTransition { command: "edit_selected", .. }));
    assert_eq!(controller.graph(), &small_dag());
}

#[test]
fn deleting_a_node_cascades_exactly_its_edges() {
    let mut controller = controller();
    controller.apply(EditCommand::SelectNode(nid("b"))).unwrap();

    let change = controller.apply(EditCommand::DeleteSelected).unwrap().unwrap();

    assert_eq!(controller.state(), &EditState::Idle);
    assert!(!controller.graph().contains_node(&nid("b")));
    assert_eq!(edge_ids(&controller), vec!["e:ac", "e:cd"]);
    let ChangeEvent::EntityDeleted { node, cascaded_edges } = change.event() else {
        panic!("expected entity deleted event");
    };
    assert_eq!(node.id(), &nid("b"));
    assert_eq!(cascaded_edges, &vec![eid("e:ab"), eid("e:bd")]);
}

#[test]
fn deleting_an_edge_does_not_cascade() {
    let mut controller = controller();

    controller.apply(EditCommand::DeleteEdge(eid("e:bd"))).unwrap();

    assert_eq!(controller.graph().nodes().len(), 4);
    assert_eq!(edge_ids(&controller), vec!["e:ab", "e:ac", "e:cd"]);
    let err = controller.apply(EditCommand::DeleteEdge(eid("e:bd"))).unwrap_err();
    assert!(matches!(err, EditError::UnknownEdge { .. }));
}

#[test]
fn editing_fields_merges_the_patch() {
    let mut controller = controller();
    controller.apply(EditCommand::SelectNode(nid("a"))).unwrap();

    let mut patch = NodePatch { label: Some("Head Office".to_owned()), ..NodePatch::default() };
    patch.subtitle = Some(Some("HQ".to_owned()));
    patch.metadata.insert("code".to_owned(), Some("HO".to_owned()));
    let change = controller.apply(EditCommand::EditSelected(patch)).unwrap().unwrap();

    let node = controller.graph().node(&nid("a")).unwrap();
    assert_eq!(node.label(), "Head Office");
    assert_eq!(node.subtitle(), Some("HQ"));
    assert_eq!(node.metadata().get("code").map(String::as_str), Some("HO"));
    assert_eq!(change.event().name(), "entity_updated");
    assert_eq!(controller.state(), &EditState::Idle);
}

#[test]
fn blank_labels_are_rejected() {
    let mut controller = controller();
    controller.apply(EditCommand::SelectNode(nid("a"))).unwrap();
    let patch = NodePatch { label: Some("  ".to_owned()), ..NodePatch::default() };

    assert!(matches!(
        controller.apply(EditCommand::EditSelected(patch)),
        Err(EditError::BlankLabel)
    ));
    assert_eq!(controller.graph().node(&nid("a")).unwrap().label(), "a");
}

#[test]
fn add_node_stores_its_position_immediately() {
    let kv = Arc::new(MemoryKv::new());
    let overrides = Arc::new(OverrideStore::new(kv.clone()));
    let mut controller = controller().with_overrides(overrides.clone());
    controller.apply(EditCommand::SelectNode(nid("a"))).unwrap();

    let change = controller
        .apply(EditCommand::AddNode {
            kind: EntityKind::Position,
            label: "New role".to_owned(),
            at: Point::new(320.0, 40.0),
        })
        .unwrap()
        .unwrap();

    let ChangeEvent::EntityCreated { node } = change.event() else {
        panic!("expected entity created event");
    };
    assert!(node.id().as_str().starts_with("position:"));
    assert_eq!(node.kind(), EntityKind::Position);
    assert_eq!(controller.state(), &EditState::Idle);
    assert_eq!(controller.graph().nodes().len(), 5);

    assert_eq!(kv.write_count(), 1);
    assert_eq!(overrides.pending_len(), 0);
    let loaded = overrides.load(controller.diagram_key()).unwrap();
    assert_eq!(loaded[node.id()], Point::new(320.0, 40.0));
}

#[test]
fn connecting_a_node_to_itself_is_a_silent_no_op() {
    let mut controller = controller();

    let result = controller.apply(EditCommand::Connect {
        source: nid("a"),
        target: nid("a"),
        kind: None,
    });

    assert!(matches!(result, Ok(None)));
    assert_eq!(controller.graph(), &small_dag());
}

#[test]
fn connect_uses_the_default_kind_and_rejects_duplicates() {
    let mut controller = controller().with_default_edge_kind(RelationKind::Functional);

    let change = controller
        .apply(EditCommand::Connect { source: nid("d"), target: nid("a"), kind: None })
        .unwrap()
        .unwrap();
    let ChangeEvent::RelationCreated { edge } = change.event() else {
        panic!("expected relation created event");
    };
    assert_eq!(edge.kind(), RelationKind::Functional);
    assert!(edge.id().as_str().starts_with("edge:"));

    let err = controller
        .apply(EditCommand::Connect { source: nid("d"), target: nid("a"), kind: None })
        .unwrap_err();
    assert!(matches!(err, EditError::DuplicateRelation { kind: RelationKind::Functional, .. }));

    // Same pair, different kind is allowed.
    controller
        .apply(EditCommand::Connect {
            source: nid("d"),
            target: nid("a"),
            kind: Some(RelationKind::Parent),
        })
        .unwrap();
    assert_eq!(controller.graph().edges().len(), 6);
}

#[tokio::test]
async fn self_connect_never_reaches_upstream() {
    let source = MemorySource::default();
    let mut controller = controller();

    let event = controller
        .dispatch(EditCommand::Connect { source: nid("b"), target: nid("b"), kind: None }, &source)
        .await
        .unwrap();

    assert!(event.is_none());
    assert!(source.writes().is_empty());
}

#[tokio::test]
async fn failed_upstream_delete_restores_node_and_edges() {
    let source = MemorySource::default();
    source.set_reject_writes(true);
    let mut controller = controller();
    controller.apply(EditCommand::SelectNode(nid("c"))).unwrap();

    let err = controller.dispatch(EditCommand::DeleteSelected, &source).await.unwrap_err();

    assert!(err.is_retryable());
    assert!(matches!(
        err,
        EditError::WriteFailed { event: "entity_deleted", source: SourceError::Rejected { .. } }
    ));
    assert_eq!(controller.graph(), &small_dag());
}

#[tokio::test]
async fn successful_dispatch_is_recorded_upstream() {
    let source = MemorySource::default();
    let mut controller = controller();

    let event = controller.dispatch(EditCommand::DeleteEdge(eid("e:ab")), &source).await.unwrap();

    assert_eq!(event.map(|e| e.name()), Some("relation_deleted"));
    assert_eq!(source.writes(), vec![UpstreamWrite::DeleteRelation(eid("e:ab"))]);
}

#[test]
fn rollback_only_reverts_the_failed_change() {
    let mut controller = controller();

    let connect = controller
        .apply(EditCommand::Connect { source: nid("d"), target: nid("a"), kind: None })
        .unwrap()
        .unwrap();
    controller.apply(EditCommand::SelectNode(nid("b"))).unwrap();
    let rename = NodePatch { label: Some("Sales".to_owned()), ..NodePatch::default() };
    let edit = controller.apply(EditCommand::EditSelected(rename)).unwrap().unwrap();

    let failure = SourceError::Rejected { message: "conflict".to_owned() };
    assert!(controller.settle(connect, Err(failure)).is_err());
    controller.settle(edit, Ok(())).unwrap();

    assert_eq!(controller.graph().edges().len(), 4);
    assert_eq!(controller.graph().node(&nid("b")).unwrap().label(), "Sales");
}

#[test]
fn failed_edit_settling_late_keeps_a_later_edit_of_the_same_node() {
    let mut controller = controller();
    controller.apply(EditCommand::SelectNode(nid("b"))).unwrap();
    let rename = NodePatch { label: Some("Sales".to_owned()), ..NodePatch::default() };
    let first = controller.apply(EditCommand::EditSelected(rename)).unwrap().unwrap();

    controller.apply(EditCommand::SelectNode(nid("b"))).unwrap();
    let mut tag = NodePatch { subtitle: Some(Some("EMEA".to_owned())), ..NodePatch::default() };
    tag.metadata.insert("region".to_owned(), Some("emea".to_owned()));
    let second = controller.apply(EditCommand::EditSelected(tag)).unwrap().unwrap();

    controller.settle(second, Ok(())).unwrap();
    let failure = SourceError::Rejected { message: "conflict".to_owned() };
    assert!(controller.settle(first, Err(failure)).is_err());

    let node = controller.graph().node(&nid("b")).unwrap();
    assert_eq!(node.label(), "b");
    assert_eq!(node.subtitle(), Some("EMEA"));
    assert_eq!(node.metadata().get("region").map(String::as_str), Some("emea"));
}

#[test]
fn rolling_back_a_field_edit_restores_cleared_and_added_values() {
    let mut controller = controller();
    controller.apply(EditCommand::SelectNode(nid("a"))).unwrap();
    let mut seed = NodePatch { subtitle: Some(Some("HQ".to_owned())), ..NodePatch::default() };
    seed.metadata.insert("code".to_owned(), Some("HO".to_owned()));
    controller.apply(EditCommand::EditSelected(seed)).unwrap();
    let before = controller.graph().node(&nid("a")).unwrap().clone();

    controller.apply(EditCommand::SelectNode(nid("a"))).unwrap();
    let mut patch = NodePatch { subtitle: Some(None), ..NodePatch::default() };
    patch.metadata.insert("code".to_owned(), None);
    patch.metadata.insert("cost_center".to_owned(), Some("42".to_owned()));
    let change = controller.apply(EditCommand::EditSelected(patch)).unwrap().unwrap();
    assert_eq!(controller.graph().node(&nid("a")).unwrap().subtitle(), None);

    controller.rollback(&change);

    assert_eq!(controller.graph().node(&nid("a")).unwrap(), &before);
}

#[test]
fn rolling_back_an_added_node_removes_it_again() {
    let mut controller = controller();
    let change = controller
        .apply(EditCommand::AddNode {
            kind: EntityKind::Division,
            label: "Temp".to_owned(),
            at: Point::new(0.0, 0.0),
        })
        .unwrap()
        .unwrap();
    let ChangeEvent::EntityCreated { node } = change.event().clone() else {
        panic!("expected entity created event");
    };
    controller.apply(EditCommand::SelectNode(node.id().clone())).unwrap();

    controller.rollback(&change);

    assert!(!controller.graph().contains_node(node.id()));
    assert_eq!(controller.state(), &EditState::Idle);
}
