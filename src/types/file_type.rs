//! Document classification types: file types, workflow phases, complexity tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::HelixError;
use crate::constants::tags;

// =============================================================================
// FileType
// =============================================================================

/// Semantic type of a HELIX markdown document, derived from its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileType {
    Phase,
    Enforcer,
    Template,
    Prompt,
    Example,
    Coordinator,
    Principle,
    #[serde(rename = "feature-specification")]
    Feature,
    Unknown,
}

impl FileType {
    pub const ALL: [FileType; 9] = [
        FileType::Phase,
        FileType::Enforcer,
        FileType::Template,
        FileType::Prompt,
        FileType::Example,
        FileType::Coordinator,
        FileType::Principle,
        FileType::Feature,
        FileType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Phase => "phase",
            FileType::Enforcer => "enforcer",
            FileType::Template => "template",
            FileType::Prompt => "prompt",
            FileType::Example => "example",
            FileType::Coordinator => "coordinator",
            FileType::Principle => "principle",
            FileType::Feature => "feature-specification",
            FileType::Unknown => "unknown",
        }
    }

    /// Heading used when documents are grouped by type
    pub fn display_name(&self) -> &'static str {
        match self {
            FileType::Phase => "Phase",
            FileType::Enforcer => "Enforcer",
            FileType::Template => "Template",
            FileType::Prompt => "Prompt",
            FileType::Example => "Example",
            FileType::Coordinator => "Coordinator",
            FileType::Principle => "Principle",
            FileType::Feature => "Feature Specification",
            FileType::Unknown => "Other",
        }
    }

    pub fn is_phase_like(&self) -> bool {
        matches!(self, FileType::Phase | FileType::Enforcer)
    }

    pub fn is_artifact_like(&self) -> bool {
        matches!(
            self,
            FileType::Template | FileType::Prompt | FileType::Example | FileType::Feature
        )
    }

    pub fn is_core_like(&self) -> bool {
        matches!(self, FileType::Coordinator | FileType::Principle)
    }

    /// Fixed tag path for this type, rooted at the common top-level tag.
    pub fn hierarchical_tags(&self) -> &'static [&'static str] {
        match self {
            FileType::Phase => &[tags::ROOT, "helix/phase"],
            FileType::Enforcer => &[tags::ROOT, "helix/enforcer"],
            FileType::Template => &[tags::ROOT, "helix/artifact", "helix/artifact/template"],
            FileType::Prompt => &[tags::ROOT, "helix/artifact", "helix/artifact/prompt"],
            FileType::Example => &[tags::ROOT, "helix/artifact", "helix/artifact/example"],
            FileType::Coordinator => &[tags::ROOT, "helix/core", "helix/coordinator"],
            FileType::Principle => &[tags::ROOT, "helix/core", "helix/principle"],
            FileType::Feature => &[
                tags::ROOT,
                "helix/artifact",
                "helix/artifact/specification",
            ],
            FileType::Unknown => &[tags::ROOT],
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Phase
// =============================================================================

/// One of the six workflow stages, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Frame,
    Design,
    Test,
    Build,
    Deploy,
    Iterate,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Frame,
        Phase::Design,
        Phase::Test,
        Phase::Build,
        Phase::Deploy,
        Phase::Iterate,
    ];

    /// Lowercase identifier, e.g. `frame`
    pub fn id(&self) -> &'static str {
        match self {
            Phase::Frame => "frame",
            Phase::Design => "design",
            Phase::Test => "test",
            Phase::Build => "build",
            Phase::Deploy => "deploy",
            Phase::Iterate => "iterate",
        }
    }

    /// Title-cased name, e.g. `Frame`
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Frame => "Frame",
            Phase::Design => "Design",
            Phase::Test => "Test",
            Phase::Build => "Build",
            Phase::Deploy => "Deploy",
            Phase::Iterate => "Iterate",
        }
    }

    /// Canonical document title, e.g. `Frame Phase`
    pub fn title(&self) -> String {
        format!("{} Phase", self.name())
    }

    /// 1-based position in the cycle
    pub fn number(&self) -> u8 {
        match self {
            Phase::Frame => 1,
            Phase::Design => 2,
            Phase::Test => 3,
            Phase::Build => 4,
            Phase::Deploy => 5,
            Phase::Iterate => 6,
        }
    }

    pub fn from_number(number: u8) -> Option<Phase> {
        Phase::ALL.iter().copied().find(|p| p.number() == number)
    }

    /// Exact lookup by lowercase identifier
    pub fn from_id(id: &str) -> Option<Phase> {
        Phase::ALL.iter().copied().find(|p| p.id() == id)
    }

    pub fn next(&self) -> Option<Phase> {
        Phase::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Phase> {
        self.number().checked_sub(1).and_then(Phase::from_number)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Phase::Frame => "Define the problem and establish context",
            Phase::Design => "Architect the solution approach",
            Phase::Test => "Write failing tests (Red phase)",
            Phase::Build => "Implement code to pass tests (Green phase)",
            Phase::Deploy => "Release to production with monitoring",
            Phase::Iterate => "Learn and improve for next cycle",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Phase::Frame => "📋",
            Phase::Design => "🏗️",
            Phase::Test => "🧪",
            Phase::Build => "⚙️",
            Phase::Deploy => "🚀",
            Phase::Iterate => "🔄",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Phase {
    type Err = HelixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::from_id(&s.trim().to_lowercase())
            .ok_or_else(|| HelixError::InvalidPhase(s.to_string()))
    }
}

/// Phase number for a lowercase phase name; 0 when unknown.
pub fn phase_number(name: &str) -> u8 {
    Phase::from_id(name).map(|p| p.number()).unwrap_or(0)
}

/// Name of the phase after `name`; empty at the end of the cycle or for unknown names.
pub fn next_phase(name: &str) -> &'static str {
    Phase::from_id(name)
        .and_then(|p| p.next())
        .map(|p| p.id())
        .unwrap_or("")
}

/// Name of the phase before `name`; empty at the start of the cycle or for unknown names.
pub fn previous_phase(name: &str) -> &'static str {
    Phase::from_id(name)
        .and_then(|p| p.previous())
        .map(|p| p.id())
        .unwrap_or("")
}

// =============================================================================
// Complexity
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Moderate,
    Complex,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            Complexity::Simple => "🟢",
            Complexity::Moderate => "🟡",
            Complexity::Complex => "🔴",
        }
    }

    /// Lenient parse used for metadata values; unknown strings yield `None`
    pub fn parse(value: &str) -> Option<Complexity> {
        match value.trim().to_lowercase().as_str() {
            "simple" => Some(Complexity::Simple),
            "moderate" => Some(Complexity::Moderate),
            "complex" => Some(Complexity::Complex),
            _ => None,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
