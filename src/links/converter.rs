//! Link Conversion
//!
//! Rewrites markdown links and recognised plain-text references into wikilinks.
//!
//! ## Passes (in order)
//!
//! 1. Explicit links: `[display](path)` resolved through the index, then the
//!    fallback path rules, then degraded to `[[display]]`
//! 2. Phase references: `Frame Phase`, `frame phase`, `the Frame`, `to Frame`
//! 3. Artifact references: fixed phrase dictionary, case-insensitive
//! 4. Workflow terms: the workflow name and TDD variants
//!
//! ## Design Principles
//!
//! - Total: any input string converts, nothing is raised
//! - Every candidate match is checked against the current, partially
//!   converted text before it is replaced, so a span that an earlier
//!   replacement wrapped in `[[...]]` is never wrapped again
//! - External links, anchors, mailto links, bare URLs and images are left
//!   byte-identical

use regex::{Captures, Regex, escape};
use std::sync::LazyLock;
use tracing::debug;

use super::parser::is_inside_wikilink_at;
use crate::classifier::PathParts;
use crate::classifier::rules::{RESOLUTION_RULES, first_match};
use crate::constants::{references, titles};
use crate::index::LinkIndex;
use crate::types::utils::compile_regex;
use crate::types::{ParsedLink, Phase};

static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"(!?)\[([^\[\]]+)\]\(([^)]+)\)"));

/// Spans later passes must not touch: remaining markdown links and images,
/// bare URLs and mailto addresses
static PROTECTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(r"!?\[[^\[\]]*\]\([^)]*\)|https?://[^\s<>()\[\]]+|mailto:[^\s<>()\[\]]+")
});

struct PhasePatterns {
    phase: Phase,
    phrase: Regex,
    contextual: Regex,
}

static PHASE_PATTERNS: LazyLock<Vec<PhasePatterns>> = LazyLock::new(|| {
    Phase::ALL
        .iter()
        .map(|&phase| PhasePatterns {
            phase,
            phrase: compile_regex(&format!(r"(?i)\b{} phase\b", phase.id())),
            contextual: compile_regex(&format!(r"\b(the|to) ({})\b", phase.name())),
        })
        .collect()
});

static ARTIFACT_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    references::ARTIFACTS
        .iter()
        .map(|(phrase, title)| (compile_regex(&format!(r"(?i)\b{}\b", escape(phrase))), *title))
        .collect()
});

static WORKFLOW_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    let mut patterns = vec![(
        compile_regex(&format!(r"(?i)\b{}\b", escape(references::WORKFLOW_NAME))),
        titles::WORKFLOW,
    )];
    patterns.extend(
        references::WORKFLOW_TERMS
            .iter()
            .map(|(term, title)| (compile_regex(&format!(r"\b{}\b", escape(term))), *title)),
    );
    patterns
});

// =============================================================================
// Options and Stats
// =============================================================================

/// Which plain-text passes run; the explicit-link pass always runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    pub phase_references: bool,
    pub artifact_references: bool,
    pub workflow_references: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            phase_references: true,
            artifact_references: true,
            workflow_references: true,
        }
    }
}

/// Replacement counts per pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Markdown links resolved to a known title
    pub resolved: usize,
    /// Markdown links degraded to `[[display]]`
    pub unresolved: usize,
    pub phase: usize,
    pub artifact: usize,
    pub workflow: usize,
}

impl ConversionStats {
    pub fn total(&self) -> usize {
        self.resolved + self.unresolved + self.phase + self.artifact + self.workflow
    }

    pub fn merge(&mut self, other: &ConversionStats) {
        self.resolved += other.resolved;
        self.unresolved += other.unresolved;
        self.phase += other.phase;
        self.artifact += other.artifact;
        self.workflow += other.workflow;
    }
}

// =============================================================================
// Converter
// =============================================================================

pub struct LinkConverter<'a> {
    index: &'a LinkIndex,
    options: ConversionOptions,
}

impl<'a> LinkConverter<'a> {
    pub fn new(index: &'a LinkIndex) -> Self {
        Self {
            index,
            options: ConversionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    /// Convert all links and references in `text`
    pub fn convert_content(&self, text: &str) -> String {
        self.convert_with_stats(text).0
    }

    pub fn convert_with_stats(&self, text: &str) -> (String, ConversionStats) {
        let mut stats = ConversionStats::default();

        let mut text = self.convert_explicit_links(text.to_string(), &mut stats);
        if self.options.phase_references {
            text = convert_phase_references(text, &mut stats);
        }
        if self.options.artifact_references {
            text = convert_dictionary(text, &ARTIFACT_PATTERNS, &mut stats.artifact);
        }
        if self.options.workflow_references {
            text = convert_dictionary(text, &WORKFLOW_PATTERNS, &mut stats.workflow);
        }

        debug!(
            resolved = stats.resolved,
            unresolved = stats.unresolved,
            phase = stats.phase,
            artifact = stats.artifact,
            workflow = stats.workflow,
            "Converted content"
        );
        (text, stats)
    }

    // -------------------------------------------------------------------------
    // Pass 1: explicit links
    // -------------------------------------------------------------------------

    fn convert_explicit_links(&self, text: String, stats: &mut ConversionStats) -> String {
        let mut resolved = 0;
        let mut unresolved = 0;
        let (text, _) = replace_each(text, &MARKDOWN_LINK_RE, false, |_, caps| {
            let is_image = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let label = caps.get(2)?.as_str();
            let target = link_destination(caps.get(3)?.as_str());
            if is_image || is_external(target) {
                return None;
            }

            match self.resolve_link(label, target) {
                Some(link) => {
                    resolved += 1;
                    Some(link.to_string())
                }
                None => {
                    debug!(label, target, "Unresolved link, degrading to bare wikilink");
                    unresolved += 1;
                    Some(ParsedLink::new(label).to_string())
                }
            }
        });
        stats.resolved += resolved;
        stats.unresolved += unresolved;
        text
    }

    /// Resolve a markdown link through the index, then the fallback path rules
    pub fn resolve_link(&self, label: &str, target: &str) -> Option<ParsedLink> {
        let (path, fragment) = match target.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (target, None),
        };

        let title = match self.index.resolve_path(path) {
            Some(title) => title.to_string(),
            None => first_match(RESOLUTION_RULES, &PathParts::new(path))?,
        };

        let link = ParsedLink::titled(title, label);
        Some(match fragment.filter(|f| !f.is_empty()) {
            Some(heading) => link.with_heading(heading),
            None => link,
        })
    }
}

/// Destination without an optional quoted title: `path "Title"` → `path`
fn link_destination(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.find(" \"").or_else(|| raw.find(" '")) {
        Some(pos) => raw[..pos].trim_end(),
        None => raw,
    }
}

fn is_external(target: &str) -> bool {
    target.starts_with("http://")
        || target.starts_with("https://")
        || target.starts_with('#')
        || target.starts_with("mailto:")
}

// =============================================================================
// Passes 2-4: plain-text references
// =============================================================================

fn convert_phase_references(mut text: String, stats: &mut ConversionStats) -> String {
    for patterns in PHASE_PATTERNS.iter() {
        let title = patterns.phase.title();

        let (next, count) = replace_each(text, &patterns.phrase, true, |_, caps| {
            let matched = caps.get(0)?.as_str();
            let starts_lowercase = matched.chars().next().is_some_and(char::is_lowercase);
            let link = if starts_lowercase {
                ParsedLink::new(title.clone()).with_alias(matched)
            } else {
                ParsedLink::new(title.clone())
            };
            Some(link.to_string())
        });
        stats.phase += count;

        let (next, count) = replace_each(next, &patterns.contextual, true, |current, caps| {
            let whole = caps.get(0)?;
            let lead = caps.get(1)?.as_str();
            let name = caps.get(2)?.as_str();
            if is_compound_continuation(&current[whole.end()..]) {
                return None;
            }
            Some(format!(
                "{} {}",
                lead,
                ParsedLink::new(title.clone()).with_alias(name)
            ))
        });
        stats.phase += count;
        text = next;
    }
    text
}

/// Whether the text after a bare phase name continues a longer name:
/// a hyphen, or a space followed by a capital letter or a link.
fn is_compound_continuation(rest: &str) -> bool {
    if rest.starts_with('-') {
        return true;
    }
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(' '), Some(next)) => next.is_uppercase() || next == '[',
        _ => false,
    }
}

/// Link every dictionary phrase to its canonical title, aliased when the
/// matched text differs from the title.
fn convert_dictionary(
    mut text: String,
    patterns: &[(Regex, &'static str)],
    counter: &mut usize,
) -> String {
    for (re, title) in patterns {
        let (next, count) = replace_each(text, re, true, |_, caps| {
            let matched = caps.get(0)?.as_str();
            Some(ParsedLink::titled(*title, matched).to_string())
        });
        *counter += count;
        text = next;
    }
    text
}

// =============================================================================
// Replacement Engine
// =============================================================================

/// Replace regex matches one at a time against the mutating text.
///
/// Before each replacement the match is re-checked against the *current*
/// text: matches inside `[[...]]` (and, with `protect_links`, inside
/// markdown links or bare URLs) are skipped. `replace` receives the current
/// text and the match; returning `None` keeps the match unchanged.
/// Scanning resumes after the inserted replacement.
fn replace_each<F>(mut text: String, re: &Regex, protect_links: bool, mut replace: F) -> (String, usize)
where
    F: FnMut(&str, &Captures<'_>) -> Option<String>,
{
    let mut cursor = 0;
    let mut count = 0;

    while cursor <= text.len() {
        let (start, end, replacement) = {
            let Some(caps) = re.captures_at(&text, cursor) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            let (start, end) = (whole.start(), whole.end());
            let skip = is_inside_wikilink_at(&text, start, end - start)
                || (protect_links && is_protected(&text, start, end));
            let replacement = if skip { None } else { replace(&text, &caps) };
            (start, end, replacement)
        };

        match replacement {
            Some(rep) => {
                text.replace_range(start..end, &rep);
                cursor = start + rep.len();
                count += 1;
            }
            None => {
                cursor = if end > start {
                    end
                } else {
                    next_char_boundary(&text, end)
                };
            }
        }
    }

    (text, count)
}

fn is_protected(text: &str, start: usize, end: usize) -> bool {
    PROTECTED_RE
        .find_iter(text)
        .take_while(|m| m.start() < end)
        .any(|m| start < m.end())
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Document, Metadata};
    use proptest::prelude::*;

    fn doc(path: &str, title: &str) -> Document {
        Document::new(path, "").with_metadata(Metadata::titled(title))
    }

    fn index() -> LinkIndex {
        LinkIndex::build(&[
            doc("workflows/helix/phases/02-design/README.md", "Design Phase"),
            doc(
                "workflows/helix/phases/01-frame/artifacts/feature-specification/template.md",
                "Feature Specification Template",
            ),
            doc(
                "workflows/helix/phases/01-frame/artifacts/user-stories/template.md",
                "User Stories Template",
            ),
            doc("a/b/c.md", "Widget"),
            doc("design/technical-design.md", "Technical Design"),
        ])
    }

    fn convert(text: &str) -> String {
        let index = index();
        LinkConverter::new(&index).convert_content(text)
    }

    fn convert_without_index(text: &str) -> String {
        let index = LinkIndex::new();
        LinkConverter::new(&index).convert_content(text)
    }

    // -------------------------------------------------------------------------
    // Explicit links
    // -------------------------------------------------------------------------

    #[test]
    fn test_resolved_link_same_title() {
        assert_eq!(
            convert("See the [Design Phase](../02-design/README.md) for details"),
            "See the [[Design Phase]] for details"
        );
    }

    #[test]
    fn test_resolved_link_with_alias() {
        assert_eq!(
            convert("Use the [feature spec template](./artifacts/feature-specification/template.md)."),
            "Use the [[Feature Specification Template|feature spec template]]."
        );
    }

    #[test]
    fn test_suffix_resolution() {
        assert_eq!(convert("[Widget](../c.md)"), "[[Widget]]");
        assert_eq!(convert("[Widget](../../a/b/c.md)"), "[[Widget]]");
        assert_eq!(convert("[the widget](c.md)"), "[[Widget|the widget]]");
    }

    #[test]
    fn test_external_links_preserved() {
        let cases = [
            "[Docs](https://example.com/docs)",
            "[Site](http://example.com)",
            "[Jump](#section-two)",
            "[Mail](mailto:team@example.com)",
        ];
        for case in cases {
            assert_eq!(convert(case), case);
        }
    }

    #[test]
    fn test_external_link_text_not_rewritten() {
        let text = "Read the [feature spec guide](https://example.com/TDD) and https://example.com/prd";
        assert_eq!(convert(text), text);
    }

    #[test]
    fn test_image_links_untouched() {
        let text = "![Workflow](./images/workflow.png)";
        assert_eq!(convert(text), text);
    }

    #[test]
    fn test_fallback_patterns() {
        let cases = [
            ("[README](../phases/01-frame/README.md)", "[[Frame Phase|README]]"),
            (
                "[template](./artifacts/feature-specification/template.md)",
                "[[Feature Specification Template|template]]",
            ),
            (
                "[prompt](./artifacts/user-stories/prompt.md)",
                "[[User Stories Prompt|prompt]]",
            ),
            (
                "[example](./artifacts/feature-specification/example.md)",
                "[[Feature Specification Example|example]]",
            ),
            (
                "[enforcer](./phases/02-design/enforcer.md)",
                "[[Design Phase Enforcer|enforcer]]",
            ),
            (
                "[coordinator](../coordinator.md)",
                "[[HELIX Workflow Coordinator|coordinator]]",
            ),
            ("[principles](../principles.md)", "[[HELIX Principles|principles]]"),
            ("[FEAT-001](../features/FEAT-001-auth.md)", "[[FEAT-001]]"),
        ];
        for (input, expected) in cases {
            assert_eq!(convert_without_index(input), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_unresolved_degrades_to_display() {
        assert_eq!(
            convert_without_index("See [setup notes](../misc/setup.md) first"),
            "See [[setup notes]] first"
        );
    }

    #[test]
    fn test_missing_readme_uses_path_rules_not_other_readme() {
        let index = LinkIndex::build(&[doc("helix/phases/02-design/README.md", "Design Phase")]);
        let converter = LinkConverter::new(&index);
        assert_eq!(
            converter.convert_content("[Frame](../phases/01-frame/README.md)"),
            "[[Frame Phase|Frame]]"
        );
    }

    #[test]
    fn test_missing_template_uses_path_rules() {
        let index = LinkIndex::build(&[doc(
            "helix/phases/01-frame/artifacts/prd/template.md",
            "Prd Template",
        )]);
        let converter = LinkConverter::new(&index);
        assert_eq!(
            converter.convert_content("[t](./artifacts/user-stories/template.md)"),
            "[[User Stories Template|t]]"
        );
    }

    #[test]
    fn test_fragment_preserved_as_heading() {
        assert_eq!(
            convert("[API section](../design/technical-design.md#API Contracts)"),
            "[[Technical Design#API Contracts|API section]]"
        );
    }

    #[test]
    fn test_link_title_attribute_ignored() {
        assert_eq!(convert(r#"[Widget](../c.md "tooltip")"#), "[[Widget]]");
    }

    // -------------------------------------------------------------------------
    // Phase references
    // -------------------------------------------------------------------------

    #[test]
    fn test_phase_phrases() {
        assert_eq!(
            convert_without_index("The Frame phase comes first."),
            "The [[Frame Phase]] comes first."
        );
        assert_eq!(
            convert_without_index("Enter the Design Phase now"),
            "Enter the [[Design Phase]] now"
        );
        assert_eq!(
            convert_without_index("during the build phase"),
            "during the [[Build Phase|build phase]]"
        );
    }

    #[test]
    fn test_contextual_phase_mentions() {
        assert_eq!(
            convert_without_index("Move to Deploy when ready, then the Iterate loop."),
            "Move to [[Deploy Phase|Deploy]] when ready, then the [[Iterate Phase|Iterate]] loop."
        );
    }

    #[test]
    fn test_contextual_skips_compound_names() {
        let text = "Follow the Test-first rule and the Test Specification.";
        assert_eq!(
            convert_without_index(text),
            "Follow the Test-first rule and the [[Test Specification]]."
        );
    }

    // -------------------------------------------------------------------------
    // Artifact and workflow references
    // -------------------------------------------------------------------------

    #[test]
    fn test_artifact_references() {
        let cases = [
            (
                "Write the feature specification",
                "Write the [[Feature Specification|feature specification]]",
            ),
            (
                "Draft a feature spec",
                "Draft a [[Feature Specification|feature spec]]",
            ),
            (
                "Review the Feature Specification",
                "Review the [[Feature Specification]]",
            ),
            (
                "See technical design",
                "See [[Technical Design|technical design]]",
            ),
            ("List user stories", "List [[User Stories|user stories]]"),
            (
                "Update the PRD",
                "Update the [[Product Requirements Document|PRD]]",
            ),
            (
                "the product requirements document",
                "the [[Product Requirements Document|product requirements document]]",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(convert_without_index(input), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_workflow_references() {
        assert_eq!(
            convert_without_index("Use TDD for development."),
            "Use [[Test-Driven Development|TDD]] for development."
        );
        assert_eq!(
            convert_without_index("Practice Test-Driven Development daily"),
            "Practice [[Test-Driven Development]] daily"
        );
        assert_eq!(
            convert_without_index("practice test-driven development"),
            "practice [[Test-Driven Development|test-driven development]]"
        );
        assert_eq!(
            convert_without_index("Follow the HELIX workflow"),
            "Follow the [[HELIX Workflow|HELIX workflow]]"
        );
        assert_eq!(
            convert_without_index("Follow the HELIX Workflow"),
            "Follow the [[HELIX Workflow]]"
        );
    }

    #[test]
    fn test_existing_wikilinks_preserved() {
        let cases = [
            "![[Workflow Diagram]] shows the process",
            "See [[Technical Design#API Contracts]]",
            "See [[Feature Specification^summary]]",
            "See [[Feature Specification|the feature spec]]",
            "The [[Frame Phase]] comes first",
        ];
        for case in cases {
            assert_eq!(convert(case), case);
        }
    }

    #[test]
    fn test_options_disable_passes() {
        let index = LinkIndex::new();
        let converter = LinkConverter::new(&index).with_options(ConversionOptions {
            phase_references: false,
            artifact_references: false,
            workflow_references: false,
        });
        let text = "The Frame phase uses TDD and a feature spec. [x](y.md)";
        assert_eq!(
            converter.convert_content(text),
            "The Frame phase uses TDD and a feature spec. [[x]]"
        );
    }

    #[test]
    fn test_stats_counts() {
        let index = index();
        let (_, stats) = LinkConverter::new(&index).convert_with_stats(
            "[Widget](../c.md) [gone](nowhere.md) Frame phase feature spec TDD",
        );
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.unresolved, 1);
        assert_eq!(stats.phase, 1);
        assert_eq!(stats.artifact, 1);
        assert_eq!(stats.workflow, 1);
        assert_eq!(stats.total(), 5);
    }

    #[test]
    fn test_conflict_checked_at_match_offset() {
        // the first occurrence is inside a wikilink, the second is not
        let text = "[[Notes|feature spec]] and feature spec";
        assert_eq!(
            convert_without_index(text),
            "[[Notes|feature spec]] and [[Feature Specification|feature spec]]"
        );
    }

    #[test]
    fn test_link_text_does_not_cross_brackets() {
        assert_eq!(convert("[[ [Widget](../c.md)"), "[[ [[Widget]]");
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            convert_without_index("Ünïcode → the Frame phase ✓"),
            "Ünïcode → the [[Frame Phase]] ✓"
        );
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    const VOCABULARY: &[&str] = &[
        "the",
        "to",
        "and",
        "Frame",
        "Design",
        "Test",
        "Build",
        "Deploy",
        "Iterate",
        "phase",
        "Phase",
        "feature",
        "spec",
        "specification",
        "user",
        "stories",
        "PRD",
        "TDD",
        "HELIX",
        "workflow",
        "Test-Driven",
        "Development",
        "[Design Phase](../02-design/README.md)",
        "[Widget](../c.md)",
        "[notes](../misc/notes.md)",
        "[template](./artifacts/feature-specification/template.md)",
        "[docs](https://example.com/prd)",
        "[top](#top)",
        "![diagram](img.png)",
        "[[Frame Phase]]",
        "[[Widget|the feature spec]]",
        "![[Workflow Diagram]]",
        "[[Design Phase#Gates]]",
        "[[",
        "]]",
        "\n",
    ];

    fn sentence() -> impl Strategy<Value = String> {
        proptest::collection::vec(proptest::sample::select(VOCABULARY), 0..24)
            .prop_map(|words| words.join(" "))
    }

    proptest! {
        #[test]
        fn test_conversion_is_idempotent(text in sentence()) {
            let once = convert(&text);
            let twice = convert(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_external_links_survive(prefix in sentence(), suffix in sentence()) {
            let link = "[reference](https://example.com/feature-spec)";
            let text = format!("{} {} {}", prefix, link, suffix);
            let converted = convert(&text);
            prop_assert!(converted.contains(link));
        }
    }
}
