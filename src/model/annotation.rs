// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgchart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{DiagramKey, NodeId};

/// A timestamped, completable comment attached to a node within one diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub node_id: NodeId,
    pub diagram_key: DiagramKey,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Annotation {
    pub fn new(
        diagram_key: DiagramKey,
        node_id: NodeId,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self { node_id, diagram_key, text: text.into(), completed: false, created_at }
    }
}

/// Number of annotations not yet completed (the node badge count).
pub fn active_count(annotations: &[Annotation]) -> usize {
    annotations.iter().filter(|annotation| !annotation.completed).count()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{active_count, Annotation};
    use crate::model::{DiagramKey, NodeId};

    #[test]
    fn active_count_ignores_completed_annotations() {
        let key = DiagramKey::new("business").unwrap();
        let node = NodeId::new("division:d1").unwrap();
        let mut annotations = vec![
            Annotation::new(key.clone(), node.clone(), "hire lead", Utc::now()),
            Annotation::new(key.clone(), node.clone(), "merge teams", Utc::now()),
            Annotation::new(key, node, "review budget", Utc::now()),
        ];
        annotations[1].completed = true;

        assert_eq!(active_count(&annotations), 2);
        assert_eq!(active_count(&[]), 0);
    }
}
