//! Navigation Hub Generation
//!
//! Aggregates classified documents into a single navigation document and
//! per-phase indexes.
//!
//! ## Design Principles
//!
//! - Pure templating over a precomputed [`NavigationHub`]; no conversion logic
//! - Section order is fixed: header, overview, phases, artifacts, features,
//!   tags, quick actions, query snippets
//! - The render date is injectable for reproducible output

mod hub;
mod render;
mod tags;

pub use hub::{ArtifactInfo, FeatureInfo, NavigationHub, PhaseInfo};
pub use tags::{TagNode, TagTree};

use tracing::debug;

use crate::classifier::phase_from_path;
use crate::constants::hub as hub_consts;
use crate::types::{Document, FileType, utils};

/// Display order of file types in a phase index
const PHASE_INDEX_ORDER: &[FileType] = &[
    FileType::Phase,
    FileType::Enforcer,
    FileType::Template,
    FileType::Prompt,
    FileType::Example,
    FileType::Feature,
];

pub struct NavigationGenerator {
    title: String,
    include_queries: bool,
    date: String,
}

impl Default for NavigationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationGenerator {
    pub fn new() -> Self {
        Self {
            title: hub_consts::TITLE.to_string(),
            include_queries: true,
            date: utils::today(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_queries(mut self, include: bool) -> Self {
        self.include_queries = include;
        self
    }

    /// Fix the `created`/`updated` date (`YYYY-MM-DD`)
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn build_hub(&self, documents: &[Document]) -> String {
        let nav = NavigationHub::from_documents(documents);
        debug!(
            phases = nav.phases.len(),
            artifacts = nav.artifact_count(),
            features = nav.features.len(),
            "Aggregated navigation hub"
        );
        self.render_hub(&nav)
    }

    pub fn render_hub(&self, nav: &NavigationHub) -> String {
        let sections = [
            render::frontmatter(&self.title, &self.date),
            render::overview(&self.title),
            render::phases(nav),
            render::artifacts(nav),
            render::features(nav),
            render::tag_browser(nav),
            render::quick_actions(),
        ];

        let mut content = sections.join("\n");
        content.push('\n');
        if self.include_queries {
            content.push_str(&render::search_helpers());
        }
        content.push_str(&render::footer());
        content
    }

    /// Index of one phase's documents grouped by file type.
    ///
    /// A document belongs to the phase when its metadata or its path names it.
    pub fn build_phase_index(&self, phase: &str, documents: &[Document]) -> String {
        let phase = phase.trim().to_lowercase();
        let mut content = format!("# {} Phase Index\n\n", utils::capitalize(&phase));

        let members: Vec<&Document> = documents
            .iter()
            .filter(|doc| doc.phase() == phase || phase_from_path(&doc.path) == phase)
            .collect();

        if members.is_empty() {
            content.push_str("*No artifacts found for this phase.*\n");
            return content;
        }

        for file_type in PHASE_INDEX_ORDER {
            let titles: Vec<String> = members
                .iter()
                .filter(|doc| doc.file_type == *file_type)
                .map(|doc| doc.title())
                .collect();
            if titles.is_empty() {
                continue;
            }
            content.push_str(&format!("## {}\n\n", file_type.display_name()));
            for title in titles {
                content.push_str(&format!("- [[{}]]\n", title));
            }
            content.push('\n');
        }
        content
    }
}
