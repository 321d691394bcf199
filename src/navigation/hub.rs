//! Navigation aggregate: phases, artifacts by category, features, tags.

use std::collections::BTreeMap;

use super::tags::TagTree;
use crate::classifier::PathParts;
use crate::constants::hub;
use crate::types::{Complexity, Document, FileType, Gates, Phase, next_phase, phase_number};

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseInfo {
    pub id: String,
    pub number: i64,
    pub title: String,
    pub status: String,
    pub next: String,
    pub previous: String,
    pub gates: Option<Gates>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactInfo {
    pub title: String,
    pub category: String,
    pub phase: String,
    pub file_type: FileType,
    pub complexity: Complexity,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureInfo {
    pub id: String,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub owner: String,
    pub phase: String,
}

/// In-memory aggregate rebuilt per invocation
#[derive(Debug, Clone, Default)]
pub struct NavigationHub {
    /// Sorted by phase number
    pub phases: Vec<PhaseInfo>,
    /// Category → artifacts sorted by title; categories iterate alphabetically
    pub artifacts: BTreeMap<String, Vec<ArtifactInfo>>,
    /// Sorted by feature identifier
    pub features: Vec<FeatureInfo>,
    pub tags: TagTree,
}

impl NavigationHub {
    pub fn from_documents(documents: &[Document]) -> Self {
        let mut hub = Self::default();

        for doc in documents {
            for tag in doc.tags() {
                hub.tags.add(&tag, &doc.path);
            }

            match doc.file_type {
                FileType::Phase => hub.phases.push(phase_info(doc)),
                FileType::Template | FileType::Prompt | FileType::Example => {
                    let info = artifact_info(doc);
                    hub.artifacts
                        .entry(info.category.clone())
                        .or_default()
                        .push(info);
                }
                FileType::Feature => hub.features.push(feature_info(doc)),
                _ => {}
            }
        }

        hub.phases.sort_by_key(|p| p.number);
        hub.features.sort_by(|a, b| a.id.cmp(&b.id));
        for artifacts in hub.artifacts.values_mut() {
            artifacts.sort_by(|a, b| a.title.cmp(&b.title));
        }
        hub
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.values().map(Vec::len).sum()
    }
}

fn phase_info(doc: &Document) -> PhaseInfo {
    let meta = doc.metadata.clone().unwrap_or_default();
    let id = if meta.phase_id.is_empty() {
        doc.phase()
    } else {
        meta.phase_id.to_lowercase()
    };
    PhaseInfo {
        number: meta
            .phase_number
            .unwrap_or_else(|| i64::from(phase_number(&id))),
        next: non_empty_or(meta.next_phase, || next_phase(&id).to_string()),
        previous: non_empty_or(meta.previous_phase, || {
            Phase::from_id(&id)
                .and_then(|p| p.previous())
                .map(|p| p.id().to_string())
                .unwrap_or_default()
        }),
        title: doc.title(),
        status: meta.status,
        gates: meta.gates,
        id,
    }
}

fn artifact_info(doc: &Document) -> ArtifactInfo {
    let category = doc.artifact_category();
    ArtifactInfo {
        title: doc.title(),
        category: if category.is_empty() {
            hub::DEFAULT_CATEGORY.to_string()
        } else {
            category
        },
        phase: doc.phase(),
        file_type: doc.file_type,
        complexity: doc.complexity(),
        path: doc.path.clone(),
    }
}

fn feature_info(doc: &Document) -> FeatureInfo {
    let meta = doc.metadata.clone().unwrap_or_default();
    let id = non_empty_or(meta.feature_id, || {
        PathParts::new(&doc.path)
            .feature_id()
            .unwrap_or_default()
            .to_string()
    });
    FeatureInfo {
        id,
        title: doc.title(),
        status: meta.status,
        priority: meta.priority,
        owner: meta.owner,
        phase: non_empty_or(meta.workflow_phase, || doc.phase()),
    }
}

fn non_empty_or(value: String, fallback: impl FnOnce() -> String) -> String {
    if value.is_empty() { fallback() } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;

    fn corpus() -> Vec<Document> {
        let mut feat2 = Metadata::titled("Payments");
        feat2.feature_id = "FEAT-002".to_string();
        feat2.priority = "P1".to_string();
        vec![
            Document::new("helix/phases/02-design/README.md", ""),
            Document::new("helix/phases/01-frame/README.md", ""),
            Document::new("helix/phases/01-frame/artifacts/user-stories/template.md", ""),
            Document::new("helix/phases/01-frame/artifacts/user-stories/example.md", ""),
            Document::new("helix/phases/02-design/artifacts/adr/prompt.md", ""),
            Document::new("docs/01-frame/FEAT-003-search.md", ""),
            Document::new("docs/01-frame/FEAT-002-payments.md", "").with_metadata(feat2),
            Document::new("helix/coordinator.md", ""),
        ]
    }

    #[test]
    fn test_phases_sorted_by_number() {
        let hub = NavigationHub::from_documents(&corpus());
        let ids: Vec<_> = hub.phases.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["frame", "design"]);
        assert_eq!(hub.phases[0].title, "Frame Phase");
        assert_eq!(hub.phases[0].next, "design");
        assert_eq!(hub.phases[1].previous, "frame");
    }

    #[test]
    fn test_artifacts_grouped_and_sorted() {
        let hub = NavigationHub::from_documents(&corpus());
        let categories: Vec<_> = hub.artifacts.keys().map(String::as_str).collect();
        assert_eq!(categories, vec!["adr", "user-stories"]);
        let titles: Vec<_> = hub.artifacts["user-stories"]
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["User Stories Example", "User Stories Template"]);
        assert_eq!(hub.artifact_count(), 3);
    }

    #[test]
    fn test_features_sorted_by_id() {
        let hub = NavigationHub::from_documents(&corpus());
        let ids: Vec<_> = hub.features.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["FEAT-002", "FEAT-003"]);
        assert_eq!(hub.features[0].priority, "P1");
        assert_eq!(hub.features[1].title, "Search");
        assert_eq!(hub.features[1].phase, "frame");
    }

    #[test]
    fn test_tag_taxonomy_collected() {
        let hub = NavigationHub::from_documents(&corpus());
        assert_eq!(hub.tags.count("helix"), 8);
        assert_eq!(hub.tags.count("helix/phase"), 2);
        assert_eq!(hub.tags.count("helix/coordinator"), 1);
    }
}
