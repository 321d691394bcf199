//! Markdown section renderers for the navigation hub.

use super::hub::NavigationHub;
use crate::constants::{hub, tags};
use crate::types::{Complexity, Phase, utils::titleize};

const SPIRAL: &str = r#"    subgraph "The HELIX Spiral"
        F[📋 FRAME] --> D[🏗️ DESIGN]
        D --> T[🧪 TEST]
        T --> B[⚙️ BUILD]
        B --> DP[🚀 DEPLOY]
        DP --> I[🔄 ITERATE]
        I -.->|Next Cycle| F
    end

    style F fill:#e1f5fe
    style D fill:#f3e5f5
    style T fill:#ffebee
    style B fill:#e8f5e9
    style DP fill:#fff3e0
    style I fill:#fce4ec"#;

const GENERIC_PHASE_DESCRIPTION: &str = "HELIX workflow phase";

pub(super) fn frontmatter(title: &str, date: &str) -> String {
    let mut out = String::from("---\n");
    out.push_str(&format!("title: \"{}\"\n", title));
    out.push_str(&format!("type: {}\n", hub::TYPE_MARKER));
    out.push_str("tags:\n");
    for tag in hub::TAGS {
        out.push_str(&format!("  - {}\n", tag));
    }
    out.push_str(&format!("created: {}\n", date));
    out.push_str(&format!("updated: {}\n", date));
    out.push_str("aliases:\n");
    for alias in hub::ALIASES {
        out.push_str(&format!("  - \"{}\"\n", alias));
    }
    out.push_str("---\n");
    out
}

pub(super) fn overview(title: &str) -> String {
    let mut out = format!("# {}\n\n", title);
    out.push_str(
        "Welcome to the HELIX (Human-Enhanced Learning and Implementation eXperience) workflow navigator. ",
    );
    out.push_str(
        "This dashboard provides quick access to all phases, artifacts, and resources in the workflow.\n\n",
    );
    out.push_str("## 🔄 The HELIX Spiral\n\n");
    out.push_str("```mermaid\ngraph TB\n");
    out.push_str(SPIRAL);
    out.push_str("\n```\n\n");
    out
}

pub(super) fn phases(nav: &NavigationHub) -> String {
    let mut out = String::from("## 📋 Workflow Phases\n\n");
    out.push_str("| Phase | Status | Description | Next Phase |\n");
    out.push_str("|-------|--------|-------------|------------|\n");

    if nav.phases.is_empty() {
        // Canonical cycle when no phase documents exist
        for phase in Phase::ALL {
            let next = phase
                .next()
                .map(|p| format!("[[{}]]", p.title()))
                .unwrap_or_else(|| hub::PLACEHOLDER.to_string());
            out.push_str(&format!(
                "| [[{}]] | {} | {} {} | {} |\n",
                phase.title(),
                phase_status_label(""),
                phase.emoji(),
                phase.description(),
                next
            ));
        }
    } else {
        for info in &nav.phases {
            let phase = Phase::from_id(&info.id);
            let description = phase
                .map(|p| format!("{} {}", p.emoji(), p.description()))
                .unwrap_or_else(|| GENERIC_PHASE_DESCRIPTION.to_string());
            let next = match Phase::from_id(&info.next) {
                Some(next) => format!("[[{}]]", next.title()),
                None if info.next.is_empty() => hub::PLACEHOLDER.to_string(),
                None => info.next.clone(),
            };
            out.push_str(&format!(
                "| [[{}]] | {} | {} | {} |\n",
                info.title,
                phase_status_label(&info.status),
                description,
                next
            ));
        }
    }

    out.push('\n');
    out
}

pub(super) fn artifacts(nav: &NavigationHub) -> String {
    let mut out = String::from("## 📚 Artifacts by Category\n\n");

    if nav.artifact_count() == 0 {
        out.push_str(
            "*No artifacts found. Run `helixlink convert` over the workflow documents to index them.*\n\n",
        );
        return out;
    }

    for (category, artifacts) in nav.artifacts.iter().filter(|(_, a)| !a.is_empty()) {
        out.push_str(&format!("### {}\n\n", titleize(category)));
        for artifact in artifacts {
            let phase = if artifact.phase.is_empty() {
                String::new()
            } else {
                format!(" *(Phase: {})*", titleize(&artifact.phase))
            };
            out.push_str(&format!(
                "- [[{}]] {}{}\n",
                artifact.title,
                artifact.complexity.indicator(),
                phase
            ));
        }
        out.push('\n');
    }
    out
}

pub(super) fn features(nav: &NavigationHub) -> String {
    let mut out = String::from("## 🎯 Active Features\n\n");

    if nav.features.is_empty() {
        out.push_str("*No features found. Create feature specifications to see them here.*\n\n");
        return out;
    }

    out.push_str("| Feature ID | Title | Status | Priority | Owner | Phase |\n");
    out.push_str("|------------|-------|--------|----------|-------|-------|\n");
    for feature in &nav.features {
        out.push_str(&format!(
            "| {} | [[{}]] | {} | {} | {} | {} |\n",
            or_placeholder(&feature.id),
            feature.title,
            feature_status_label(&feature.status),
            if feature.priority.is_empty() {
                hub::DEFAULT_PRIORITY
            } else {
                feature.priority.as_str()
            },
            or_placeholder(&feature.owner),
            or_placeholder(&feature.phase),
        ));
    }
    out.push('\n');
    out
}

pub(super) fn tag_browser(nav: &NavigationHub) -> String {
    let mut out = String::from("## 🏷️ Browse by Tags\n\n");

    out.push_str("### Phase Tags\n");
    for phase in Phase::ALL {
        out.push_str(&format!("- #{}/{}\n", tags::PHASE_PREFIX, phase.id()));
    }

    out.push_str("\n### Artifact Tags\n");
    for kind in tags::ARTIFACT_KINDS {
        out.push_str(&format!("- #{}/{}\n", tags::ARTIFACT_PREFIX, kind));
    }

    out.push_str("\n### Complexity Tags\n");
    for complexity in [Complexity::Simple, Complexity::Moderate, Complexity::Complex] {
        out.push_str(&format!(
            "- #{}/{}\n",
            tags::COMPLEXITY_PREFIX,
            complexity.as_str()
        ));
    }

    if !nav.tags.is_empty() {
        out.push_str("\n### Tags in Use\n");
        for (tag, count) in nav.tags.counts() {
            out.push_str(&format!("- #{} ({})\n", tag, count));
        }
    }

    out.push('\n');
    out
}

pub(super) fn quick_actions() -> String {
    let mut out = String::from("## ⚡ Quick Actions\n\n");
    for (title, description) in hub::QUICK_ACTIONS {
        out.push_str(&format!("- [[{}]] - {}\n", title, description));
    }
    out.push('\n');
    out
}

pub(super) fn search_helpers() -> String {
    let mut out = String::from("## 🔍 Search and Filter\n\n");
    out.push_str("### Dataview Queries\n\n");

    let queries: [(&str, &str); 4] = [
        (
            "All HELIX Documents",
            "TABLE file.name as \"Document\", type as \"Type\", phase as \"Phase\", status as \"Status\"\nFROM #helix\nSORT phase, type, file.name",
        ),
        (
            "Current Phase Artifacts",
            "LIST\nFROM #helix/phase/frame\nWHERE type != \"phase\"\nSORT file.name",
        ),
        (
            "Templates by Complexity",
            "TABLE complexity as \"Complexity\", time_estimate as \"Time\", phase as \"Phase\"\nFROM #helix/artifact/template\nSORT complexity, phase",
        ),
        (
            "Features by Status",
            "TABLE priority as \"Priority\", owner as \"Owner\", status as \"Status\"\nFROM #helix/artifact/specification\nWHERE feature_id\nSORT priority, status",
        ),
    ];
    for (heading, query) in queries {
        out.push_str(&format!("#### {}\n```dataview\n{}\n```\n\n", heading, query));
    }

    out.push_str("### Graph Navigation\n\n");
    out.push_str("Use the graph view to visualize:\n");
    out.push_str("- **Workflow progression**: See how phases connect\n");
    out.push_str("- **Artifact relationships**: Understand dependencies\n");
    out.push_str("- **Feature flow**: Track features through phases\n");
    out.push_str("- **Knowledge clusters**: Identify related concepts\n\n");

    out.push_str("### Tag Filters\n\n");
    out.push_str("Click on any tag to filter the graph:\n");
    out.push_str("- `#helix/phase/frame` - Frame phase artifacts\n");
    out.push_str("- `#helix/artifact/template` - Template files\n");
    out.push_str("- `#helix/complexity/simple` - Simple artifacts\n");
    out.push_str("- `#helix/status/draft` - Draft documents\n\n");
    out
}

pub(super) fn footer() -> String {
    "---\n\n*This navigator is automatically generated. Run `helixlink hub` to update.*\n"
        .to_string()
}

fn phase_status_label(status: &str) -> &'static str {
    match status {
        "in_progress" => "🔄 In Progress",
        "completed" => "✅ Completed",
        _ => "⏸️ Not Started",
    }
}

fn feature_status_label(status: &str) -> &'static str {
    match status {
        "specified" => "📋 Specified",
        "approved" => "✅ Approved",
        "in_progress" => "🔄 In Progress",
        "completed" => "✅ Completed",
        "deprecated" => "❌ Deprecated",
        _ => "📝 Draft",
    }
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() {
        hub::PLACEHOLDER
    } else {
        value
    }
}
