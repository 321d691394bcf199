//! Global Constants
//!
//! Centralized fixed tables for classification, conversion and navigation.
//! All recognised phrases and fixed titles should be defined here.

/// Tag taxonomy
pub mod tags {
    /// Root of every hierarchical tag
    pub const ROOT: &str = "helix";

    /// Prefix for per-phase tags (`helix/phase/<phase>`)
    pub const PHASE_PREFIX: &str = "helix/phase";

    /// Prefix for artifact tags (`helix/artifact/<kind>`)
    pub const ARTIFACT_PREFIX: &str = "helix/artifact";

    /// Prefix for complexity tags
    pub const COMPLEXITY_PREFIX: &str = "helix/complexity";

    /// Artifact kinds listed in the tag browser
    pub const ARTIFACT_KINDS: &[&str] = &[
        "specification",
        "design",
        "test",
        "implementation",
        "template",
        "prompt",
        "example",
    ];
}

/// Fixed document titles
pub mod titles {
    pub const COORDINATOR: &str = "HELIX Workflow Coordinator";
    pub const PRINCIPLES: &str = "HELIX Principles";
    pub const WORKFLOW: &str = "HELIX Workflow";
    pub const FEATURE_FALLBACK: &str = "Feature Specification";

    /// Category assigned to `FEAT-` files outside an artifacts tree
    pub const FEATURE_CATEGORY: &str = "feature-specification";
}

/// Plain-text reference dictionaries used by the conversion passes
pub mod references {
    /// Case-insensitive artifact phrase → canonical title.
    ///
    /// Ordered longest phrase first so that "feature specification" is linked
    /// before its prefix "feature spec" can claim the same text.
    pub const ARTIFACTS: &[(&str, &str)] = &[
        ("product requirements document", "Product Requirements Document"),
        ("compliance requirements", "Compliance Requirements"),
        ("feature specification", "Feature Specification"),
        ("implementation guide", "Implementation Guide"),
        ("product requirements", "Product Requirements"),
        ("test specification", "Test Specification"),
        ("feasibility study", "Feasibility Study"),
        ("technical design", "Technical Design"),
        ("risk register", "Risk Register"),
        ("research plan", "Research Plan"),
        ("user stories", "User Stories"),
        ("feature spec", "Feature Specification"),
        ("PRD", "Product Requirements Document"),
    ];

    /// Case-sensitive workflow term → canonical title
    pub const WORKFLOW_TERMS: &[(&str, &str)] = &[
        ("Test-Driven Development", "Test-Driven Development"),
        ("test-driven development", "Test-Driven Development"),
        ("TDD", "Test-Driven Development"),
    ];

    /// Case-insensitive workflow name phrase
    pub const WORKFLOW_NAME: &str = "HELIX workflow";
}

/// Navigation hub content
pub mod hub {
    pub const TITLE: &str = "HELIX Workflow Navigator";
    pub const FILE_NAME: &str = "NAVIGATOR.md";
    pub const TYPE_MARKER: &str = "navigation-hub";

    pub const TAGS: &[&str] = &["helix/core", "helix/navigation", "dashboard"];

    pub const ALIASES: &[&str] = &["HELIX Navigator", "Workflow Dashboard", "HELIX Dashboard"];

    /// Category used for artifacts with no category of their own
    pub const DEFAULT_CATEGORY: &str = "general";

    /// Priority shown for features without one
    pub const DEFAULT_PRIORITY: &str = "P2";

    /// Table placeholder for missing values
    pub const PLACEHOLDER: &str = "—";

    /// Quick-action entries (target title, description)
    pub const QUICK_ACTIONS: &[(&str, &str)] = &[
        ("Create Feature Specification", "Start defining a new feature"),
        ("Write User Stories", "Document user requirements and acceptance criteria"),
        ("Design Technical Architecture", "Plan the technical implementation"),
        ("Write Test Suite", "Create failing tests that define behavior"),
        ("Implement Solution", "Write code to make tests pass"),
        ("Deploy to Production", "Release and monitor the solution"),
        ("Review Phase Gates", "Check criteria for phase progression"),
        ("Update Documentation", "Keep artifacts current and accurate"),
    ];
}

/// Document lint constants
pub mod lint {
    /// Valid priorities for feature specifications
    pub const PRIORITIES: &[&str] = &["P0", "P1", "P2", "P3"];

    /// Valid feature statuses
    pub const FEATURE_STATUSES: &[&str] = &[
        "draft",
        "specified",
        "approved",
        "in_progress",
        "completed",
        "deprecated",
    ];

    /// Phase numbers span 1..=MAX_PHASE_NUMBER
    pub const MAX_PHASE_NUMBER: u8 = 6;

    /// Tags accepted outside the `helix` hierarchy
    pub const STANDALONE_TAGS: &[&str] = &["dashboard"];
}

/// Configuration locations
pub mod config {
    /// Application directory name under the user config dir
    pub const APP_NAME: &str = "helixlink";

    /// Project-local configuration directory
    pub const PROJECT_DIR: &str = ".helixlink";

    pub const CONFIG_FILE: &str = "config.toml";

    /// Environment variable prefix
    pub const ENV_PREFIX: &str = "HELIXLINK_";
}
