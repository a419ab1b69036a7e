//! Record assemblers: raw model text in, UI-ready record out.
//!
//! All three kinds share the same machinery. A [`Vocabulary`] names the sections a
//! kind expects together with their fallbacks, and a [`BlockSchema`] names the
//! labeled fields of repeated items. Malformed text never fails here; anything
//! missing is replaced by its fallback.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AnalysisError;
use crate::fields::{
    enum_field, field_span, labeled_value, list_field, split_blocks, starts_with_label, text_field,
    Blocks, Enumerated,
};
use crate::sections::{or_placeholder, SectionMap, SectionSpec, Vocabulary};
use crate::segments::{clean_lines, is_bulleted, is_numbered, normalize_line};
use crate::types::*;

static STEP_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:step|improvement)\s*\d+\s*[:.)\-]").unwrap());
static PHASE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:phase\s*)?(?:1|2|3|one|two|three|i{1,3})\b\s*[:\-–]?\s*").unwrap());

/// Labeled fields of a repeated item such as an A/B test.
#[derive(Debug, Clone, Copy)]
pub struct BlockSchema {
    /// Labels whose line opens a new item.
    pub starts: &'static [&'static str],
    /// Every label that may appear inside an item; each one ends the previous field.
    pub labels: &'static [&'static str],
}

impl BlockSchema {
    /// Preamble lines usable as bare item titles: labeled field lines stray from a
    /// block the model failed to open and are not items of their own.
    fn bare_lines(&self, preamble: &[String]) -> Vec<String> {
        let loose: Vec<&str> = preamble
            .iter()
            .map(String::as_str)
            .filter(|line| !starts_with_label(line, self.labels))
            .collect();
        clean_lines(&loose)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignSection {
    Accessibility,
    ColorContrast,
    DesignPrinciples,
    Recommendations,
}

pub const DESIGN_VOCABULARY: Vocabulary<DesignSection> = Vocabulary::new(&[
    SectionSpec {
        key: DesignSection::Accessibility,
        headers: &["Accessibility"],
        placeholder: "Unable to analyze accessibility features in the provided design",
    },
    SectionSpec {
        key: DesignSection::ColorContrast,
        headers: &["Color Contrast", "Colour Contrast"],
        placeholder: "Unable to analyze color contrast in the provided design",
    },
    SectionSpec {
        key: DesignSection::DesignPrinciples,
        headers: &["Design Principles"],
        placeholder: "Unable to analyze design principles in the provided design",
    },
    SectionSpec {
        key: DesignSection::Recommendations,
        headers: &["Recommendations"],
        placeholder: "Unable to generate specific recommendations for the provided design",
    },
]);

pub fn parse_design(raw: &str) -> DesignAnalysis {
    let map = SectionMap::parse(raw, DESIGN_VOCABULARY);
    DesignAnalysis {
        accessibility: map.list(DesignSection::Accessibility),
        color_contrast: map.list(DesignSection::ColorContrast),
        design_principles: map.list(DesignSection::DesignPrinciples),
        recommendations: map.list(DesignSection::Recommendations),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSection {
    DesignComparison,
    YourStrengths,
    YourWeaknesses,
    CompetitorStrengths,
    CompetitorWeaknesses,
    DesignerTests,
    ProductManagerTests,
    Recommendations,
}

const NO_STRENGTHS: &str = "No strengths identified";
const NO_WEAKNESSES: &str = "No weaknesses identified";

pub const COMPARISON_VOCABULARY: Vocabulary<ComparisonSection> = Vocabulary::new(&[
    SectionSpec {
        key: ComparisonSection::DesignComparison,
        headers: &["Design Comparison"],
        placeholder: "Design comparison not available",
    },
    SectionSpec {
        key: ComparisonSection::YourStrengths,
        headers: &["Your Design Strengths"],
        placeholder: NO_STRENGTHS,
    },
    SectionSpec {
        key: ComparisonSection::YourWeaknesses,
        headers: &["Your Design Weaknesses"],
        placeholder: NO_WEAKNESSES,
    },
    SectionSpec {
        key: ComparisonSection::CompetitorStrengths,
        headers: &["Competitor Design Strengths", "Competitor Strengths"],
        placeholder: NO_STRENGTHS,
    },
    SectionSpec {
        key: ComparisonSection::CompetitorWeaknesses,
        headers: &["Competitor Design Weaknesses", "Competitor Weaknesses"],
        placeholder: NO_WEAKNESSES,
    },
    SectionSpec {
        key: ComparisonSection::DesignerTests,
        headers: &["Designer A/B Test Suggestions", "Designer A/B Tests", "Designer A/B Test"],
        placeholder: "",
    },
    SectionSpec {
        key: ComparisonSection::ProductManagerTests,
        headers: &[
            "Product Manager A/B Test Suggestions",
            "Product Manager A/B Tests",
            "Product Manager A/B Test",
        ],
        placeholder: "",
    },
    SectionSpec {
        key: ComparisonSection::Recommendations,
        headers: &["Recommendations"],
        placeholder: "",
    },
]);

pub const AB_TEST_FIELDS: BlockSchema = BlockSchema {
    starts: &["Test Name", "Test"],
    labels: &["Test Name", "Test", "Hypothesis", "Metrics", "Impact", "Complexity", "Priority"],
};

const NO_HYPOTHESIS: &str = "Hypothesis not provided";
const NO_METRICS: &str = "No metrics specified";

pub fn parse_comparison(raw: &str) -> ComparisonAnalysis {
    use ComparisonSection as S;

    let map = SectionMap::parse(raw, COMPARISON_VOCABULARY);
    ComparisonAnalysis {
        design_comparison: map.list(S::DesignComparison),
        strengths_weaknesses: StrengthsWeaknesses {
            your_design: DesignAssessment {
                strengths: map.list(S::YourStrengths),
                weaknesses: map.list(S::YourWeaknesses),
            },
            competitor_design: DesignAssessment {
                strengths: map.list(S::CompetitorStrengths),
                weaknesses: map.list(S::CompetitorWeaknesses),
            },
        },
        ab_test_suggestions: AbTestSuggestions {
            designer: parse_ab_tests(&map.body(S::DesignerTests)),
            product_manager: parse_ab_tests(&map.body(S::ProductManagerTests)),
        },
        recommendations: parse_recommendations(&map.body(S::Recommendations)),
    }
}

/// A/B tests of one section. Without any `Test Name:` block, each plain line is
/// taken as the name of a test with default fields.
pub fn parse_ab_tests<S: AsRef<str>>(body: &[S]) -> Vec<AbTest> {
    let Blocks { preamble, items } = split_blocks(body, AB_TEST_FIELDS.starts);
    if items.is_empty() {
        return AB_TEST_FIELDS
            .bare_lines(&preamble)
            .into_iter()
            .map(|name| AbTest {
                name,
                hypothesis: NO_HYPOTHESIS.to_string(),
                metrics: vec![NO_METRICS.to_string()],
                impact: Rating::default(),
                complexity: Rating::default(),
                priority: Rating::default(),
            })
            .collect();
    }
    items.iter().map(|block| ab_test(block)).collect()
}

fn ab_test(block: &[String]) -> AbTest {
    let labels = AB_TEST_FIELDS.labels;
    AbTest {
        name: text_field(block, "Test Name", labels)
            .or_else(|| text_field(block, "Test", labels))
            .unwrap_or_else(|| "Untitled test".to_string()),
        hypothesis: text_field(block, "Hypothesis", labels).unwrap_or_else(|| NO_HYPOTHESIS.to_string()),
        metrics: or_placeholder(list_field(block, "Metrics", labels), NO_METRICS),
        impact: enum_field(block, "Impact", labels),
        complexity: enum_field(block, "Complexity", labels),
        priority: enum_field(block, "Priority", labels),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationGroup {
    Design,
    Strategy,
    Implementation,
}

pub const RECOMMENDATION_VOCABULARY: Vocabulary<RecommendationGroup> = Vocabulary::new(&[
    SectionSpec {
        key: RecommendationGroup::Design,
        headers: &["Design Recommendations", "Design Improvements"],
        placeholder: "",
    },
    SectionSpec {
        key: RecommendationGroup::Strategy,
        headers: &["Strategy Recommendations", "Strategic Recommendations", "Product Strategy"],
        placeholder: "",
    },
    SectionSpec {
        key: RecommendationGroup::Implementation,
        headers: &["Implementation Plan", "Implementation Roadmap", "Implementation Steps"],
        placeholder: "",
    },
]);

pub const DESIGN_RECOMMENDATION_FIELDS: BlockSchema = BlockSchema {
    starts: &["Recommendation"],
    labels: &["Recommendation", "Description", "Priority", "Effort", "Impact"],
};

pub const STRATEGY_RECOMMENDATION_FIELDS: BlockSchema = BlockSchema {
    starts: &["Recommendation"],
    labels: &["Recommendation", "Description", "Timeline", "Impact"],
};

pub const IMPLEMENTATION_FIELDS: BlockSchema = BlockSchema {
    starts: &["Phase"],
    labels: &["Phase", "Focus", "Steps", "Resources", "Timeline"],
};

const NO_DESCRIPTION: &str = "No description provided";
const NO_STEPS: &str = "No steps specified";
const NO_RESOURCES: &str = "No resources specified";

/// The recommendations section, grouped by its design / strategy / implementation
/// sub-headers. Text outside any group is read as design recommendations.
pub fn parse_recommendations<S: AsRef<str>>(body: &[S]) -> RecommendationBundle {
    use RecommendationGroup as G;

    let text = body.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join("\n");
    let groups = SectionMap::parse(&text, RECOMMENDATION_VOCABULARY);

    let mut design_lines = groups.body(G::Design);
    if !groups.contains(G::Design) {
        design_lines = groups
            .sections()
            .iter()
            .filter(|s| s.key.is_none())
            .flat_map(|s| s.body.iter().map(String::as_str))
            .collect();
    }

    RecommendationBundle {
        design: design_recommendations(&design_lines),
        strategy: strategy_recommendations(&groups.body(G::Strategy)),
        implementation: implementation_phases(&groups.body(G::Implementation)),
    }
}

/// `Recommendation:` line with its title inline; continuation lines before the next
/// label form the description unless a `Description:` field is present.
fn titled_item(block: &[String], schema: BlockSchema) -> (String, String) {
    let span = schema
        .starts
        .iter()
        .find_map(|start| field_span(block, start, schema.labels))
        .unwrap_or_default();
    let title = if span.inline.is_empty() { "Untitled recommendation".to_string() } else { span.inline };
    let description = text_field(block, "Description", schema.labels)
        .or_else(|| Some(clean_lines(&span.rest).join(" ")).filter(|d| !d.is_empty()))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());
    (title, description)
}

fn design_recommendations(lines: &[&str]) -> Vec<DesignRecommendation> {
    let schema = DESIGN_RECOMMENDATION_FIELDS;
    let Blocks { preamble, items } = split_blocks(lines, schema.starts);
    if items.is_empty() {
        return schema
            .bare_lines(&preamble)
            .into_iter()
            .map(|title| DesignRecommendation {
                title,
                description: NO_DESCRIPTION.to_string(),
                priority: Rating::default(),
                effort: Rating::default(),
                impact: Rating::default(),
            })
            .collect();
    }
    items
        .iter()
        .map(|block| {
            let (title, description) = titled_item(block, schema);
            DesignRecommendation {
                title,
                description,
                priority: enum_field(block, "Priority", schema.labels),
                effort: enum_field(block, "Effort", schema.labels),
                impact: enum_field(block, "Impact", schema.labels),
            }
        })
        .collect()
}

fn strategy_recommendations(lines: &[&str]) -> Vec<StrategyRecommendation> {
    let schema = STRATEGY_RECOMMENDATION_FIELDS;
    let Blocks { preamble, items } = split_blocks(lines, schema.starts);
    if items.is_empty() {
        return schema
            .bare_lines(&preamble)
            .into_iter()
            .map(|title| StrategyRecommendation {
                title,
                description: NO_DESCRIPTION.to_string(),
                timeline: Timeline::default(),
                impact: Rating::default(),
            })
            .collect();
    }
    items
        .iter()
        .map(|block| {
            let (title, description) = titled_item(block, schema);
            StrategyRecommendation {
                title,
                description,
                timeline: enum_field(block, "Timeline", schema.labels),
                impact: enum_field(block, "Impact", schema.labels),
            }
        })
        .collect()
}

fn implementation_phases(lines: &[&str]) -> Vec<ImplementationPhase> {
    let schema = IMPLEMENTATION_FIELDS;
    let Blocks { preamble, items } = split_blocks(lines, schema.starts);
    if items.is_empty() {
        let steps = schema.bare_lines(&preamble);
        if steps.is_empty() {
            return Vec::new();
        }
        return vec![ImplementationPhase {
            phase: Phase::default(),
            focus: String::new(),
            steps,
            resources: vec![NO_RESOURCES.to_string()],
            timeline: Timeline::default(),
        }];
    }
    items
        .iter()
        .map(|block| {
            let phase_text = text_field(block, "Phase", schema.labels).unwrap_or_default();
            // `Phase 1: Quick wins` carries the ordinal in the label; otherwise it leads the value.
            let (phase, title) = match block.first().and_then(|line| Phase::match_label(line)) {
                Some(phase) => (phase, phase_text),
                None => (
                    Phase::parse_or_default(&phase_text),
                    PHASE_PREFIX.replace(&phase_text, "").trim().to_string(),
                ),
            };
            let focus = text_field(block, "Focus", schema.labels).unwrap_or(title);
            ImplementationPhase {
                phase,
                focus,
                steps: or_placeholder(list_field(block, "Steps", schema.labels), NO_STEPS),
                resources: or_placeholder(list_field(block, "Resources", schema.labels), NO_RESOURCES),
                timeline: enum_field(block, "Timeline", schema.labels),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowSection {
    CurrentFlow,
    ImprovedFlow,
    GeneralSuggestions,
    PotentialIssues,
    BestPractices,
    CompetitorInsights,
}

pub const FLOW_VOCABULARY: Vocabulary<FlowSection> = Vocabulary::new(&[
    SectionSpec {
        key: FlowSection::CurrentFlow,
        headers: &["Current Flow Analysis", "Current Flow"],
        placeholder: "Flow analysis not available",
    },
    SectionSpec {
        key: FlowSection::ImprovedFlow,
        headers: &["Improved Flow Suggestions", "Improved Flow"],
        placeholder: "Improvement suggestions not available",
    },
    SectionSpec {
        key: FlowSection::GeneralSuggestions,
        headers: &["General Suggestions"],
        placeholder: "No general suggestions available",
    },
    SectionSpec {
        key: FlowSection::PotentialIssues,
        headers: &["Potential Issues"],
        placeholder: "No specific issues identified",
    },
    SectionSpec {
        key: FlowSection::BestPractices,
        headers: &["Best Practices"],
        placeholder: "Best practices analysis not available",
    },
    SectionSpec {
        key: FlowSection::CompetitorInsights,
        headers: &["Competitor Insights"],
        placeholder: "No competitor insights available",
    },
]);

/// Competitor insights are read only for screenshot input; text input always
/// leaves them absent.
pub fn parse_flow(raw: &str, source: FlowSource) -> FlowAnalysis {
    use FlowSection as S;

    let map = SectionMap::parse(raw, FLOW_VOCABULARY);
    let steps = |key| {
        let steps = parse_steps(&map.body(key));
        if steps.is_empty() {
            vec![FlowStep::new(map.placeholder(key))]
        } else {
            steps
        }
    };
    FlowAnalysis {
        current_flow: steps(S::CurrentFlow),
        improved_flow: steps(S::ImprovedFlow),
        general_suggestions: map.list(S::GeneralSuggestions),
        potential_issues: map.list(S::PotentialIssues),
        best_practices: map.list(S::BestPractices),
        competitor_insights: match source {
            FlowSource::Image => Some(map.list(S::CompetitorInsights)),
            FlowSource::Text => None,
        },
    }
}

fn is_step_start(line: &str) -> bool {
    is_numbered(line) || STEP_LABEL.is_match(&normalize_line(line))
}

/// Ordered steps. Numbered lines open steps; bulleted follow-on lines become the
/// step's improvements and plain follow-on lines its rationale. A section with no
/// numbered line is read as one step per line.
pub fn parse_steps<S: AsRef<str>>(lines: &[S]) -> Vec<FlowStep> {
    if !lines.iter().any(|l| is_step_start(l.as_ref())) {
        return clean_lines(lines).into_iter().map(FlowStep::new).collect();
    }

    let mut steps: Vec<FlowStep> = Vec::new();
    for raw in lines.iter().map(AsRef::as_ref) {
        let text = normalize_line(raw);
        if text.is_empty() {
            continue;
        }
        if is_step_start(raw) {
            steps.push(FlowStep::new(text));
            continue;
        }
        let Some(step) = steps.last_mut() else {
            tracing::trace!(line = %text, "dropping text before the first step");
            continue;
        };
        if let Some(value) = labeled_value(raw, "Improvements") {
            if !value.is_empty() {
                step.improvements.get_or_insert_with(Vec::new).push(value);
            }
        } else if is_bulleted(raw) && labeled_value(raw, "Rationale").is_none() {
            step.improvements.get_or_insert_with(Vec::new).push(text);
        } else {
            let text = labeled_value(raw, "Rationale").unwrap_or(text);
            if text.is_empty() {
                continue;
            }
            step.rationale = Some(match step.rationale.take() {
                Some(prev) => format!("{prev} {text}"),
                None => text,
            });
        }
    }
    steps
}

/// Accepts the model's message content, rejecting only a response without any.
pub fn require_content(content: Option<&str>) -> Result<&str, AnalysisError> {
    content.ok_or(AnalysisError::NoContent)
}

/// Parses `content` as the record for `kind`.
pub fn assemble(kind: AnalysisKind, content: Option<&str>) -> Result<StructuredRecord, AnalysisError> {
    let raw = require_content(content)?;
    Ok(match kind {
        AnalysisKind::Design => StructuredRecord::Design(parse_design(raw)),
        AnalysisKind::Comparison => StructuredRecord::Comparison(parse_comparison(raw)),
        AnalysisKind::Flow(source) => StructuredRecord::Flow(parse_flow(raw, source)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_review_numbered_sections() {
        let raw = "1. Accessibility\n- Good labels\n2. Color Contrast\n- Poor contrast\n3. Design Principles\n- OK\n4. Recommendations\n- Fix contrast";
        let rec = parse_design(raw);
        assert_eq!(rec.accessibility, vec!["Good labels"]);
        assert_eq!(rec.color_contrast, vec!["Poor contrast"]);
        assert_eq!(rec.design_principles, vec!["OK"]);
        assert_eq!(rec.recommendations, vec!["Fix contrast"]);
    }

    #[test]
    fn design_review_matches_by_header_not_position() {
        let raw = "**Recommendations:**\n- Increase font size\n\n### Accessibility\n* Labels missing\n* Focus ring hidden\nAccessibility:\n";
        let rec = parse_design(raw);
        assert_eq!(rec.recommendations, vec!["Increase font size"]);
        assert_eq!(rec.accessibility, vec!["Labels missing", "Focus ring hidden"]);
        assert_eq!(rec.color_contrast, vec![DESIGN_VOCABULARY.placeholder(DesignSection::ColorContrast)]);
    }

    #[test]
    fn design_review_headers_with_qualifiers() {
        let raw = "1. Accessibility Review\n- Good labels\n2. Color Contrast Analysis\n- Poor contrast\n3. Design Principles Assessment\n- OK\n4. Recommendations for Improvement\n- Fix contrast";
        let rec = parse_design(raw);
        assert_eq!(rec.accessibility, vec!["Good labels"]);
        assert_eq!(rec.color_contrast, vec!["Poor contrast"]);
        assert_eq!(rec.design_principles, vec!["OK"]);
        assert_eq!(rec.recommendations, vec!["Fix contrast"]);
    }

    #[test]
    fn sentence_lines_naming_a_section_stay_in_body() {
        let raw = "Accessibility\n- Good labels\nColor contrast is weak on the footer links.\n1. Improve Color Contrast";
        let rec = parse_design(raw);
        assert_eq!(
            rec.accessibility,
            vec!["Good labels", "Color contrast is weak on the footer links.", "Improve Color Contrast"]
        );
    }

    #[test]
    fn design_review_without_headers_is_all_placeholders() {
        for raw in ["", "The design looks fine overall."] {
            let rec = parse_design(raw);
            for (list, key) in [
                (&rec.accessibility, DesignSection::Accessibility),
                (&rec.color_contrast, DesignSection::ColorContrast),
                (&rec.design_principles, DesignSection::DesignPrinciples),
                (&rec.recommendations, DesignSection::Recommendations),
            ] {
                assert_eq!(list, &vec![DESIGN_VOCABULARY.placeholder(key).to_string()]);
            }
        }
    }

    #[test]
    fn ab_test_block_parses_without_fallbacks() {
        let raw = "DESIGNER A/B TEST SUGGESTIONS\nTest Name: CTA Color\nHypothesis: Red converts better\nMetrics:\n- CTR\nImpact: High\nComplexity: Low\nPriority: High";
        let rec = parse_comparison(raw);
        assert_eq!(
            rec.ab_test_suggestions.designer,
            vec![AbTest {
                name: "CTA Color".into(),
                hypothesis: "Red converts better".into(),
                metrics: vec!["CTR".into()],
                impact: Rating::High,
                complexity: Rating::Low,
                priority: Rating::High,
            }]
        );
        assert!(rec.ab_test_suggestions.product_manager.is_empty());
    }

    #[test]
    fn plain_ab_suggestions_become_default_tests() {
        let tests = parse_ab_tests(&["- Try a shorter hero", "- Move pricing up"]);
        assert_eq!(tests.len(), 2);
        assert_eq!(tests[0].name, "Try a shorter hero");
        assert_eq!(tests[0].hypothesis, NO_HYPOTHESIS);
        assert_eq!(tests[0].metrics, vec![NO_METRICS]);
        assert_eq!(tests[1].priority, Rating::Medium);
    }

    #[test]
    fn ab_test_unknown_ratings_fall_back_to_medium() {
        let tests = parse_ab_tests(&["Test Name: X", "Impact: Huge", "Priority: urgent"]);
        assert_eq!(tests[0].impact, Rating::Medium);
        assert_eq!(tests[0].priority, Rating::Medium);
        assert_eq!(tests[0].complexity, Rating::Medium);
        assert_eq!(tests[0].hypothesis, NO_HYPOTHESIS);
    }

    #[test]
    fn comparison_sections_fill_strengths_and_weaknesses() {
        let raw = "DESIGN COMPARISON\n- Both use cards\nYOUR DESIGN STRENGTHS\n- Clear CTA\nYOUR DESIGN WEAKNESSES\n- Dense copy\nCOMPETITOR DESIGN STRENGTHS\n- Fast checkout\n";
        let rec = parse_comparison(raw);
        assert_eq!(rec.design_comparison, vec!["Both use cards"]);
        assert_eq!(rec.strengths_weaknesses.your_design.strengths, vec!["Clear CTA"]);
        assert_eq!(rec.strengths_weaknesses.your_design.weaknesses, vec!["Dense copy"]);
        assert_eq!(rec.strengths_weaknesses.competitor_design.strengths, vec!["Fast checkout"]);
        assert_eq!(rec.strengths_weaknesses.competitor_design.weaknesses, vec![NO_WEAKNESSES]);
        assert_eq!(rec.recommendations, RecommendationBundle::default());
    }

    #[test]
    fn all_caps_heading_with_qualifier_opens_recommendations() {
        let rec = parse_comparison("DESIGN COMPARISON\n- Both use cards\nKEY RECOMMENDATIONS\n- Reduce clutter");
        assert_eq!(rec.design_comparison, vec!["Both use cards"]);
        assert_eq!(rec.recommendations.design.len(), 1);
        assert_eq!(rec.recommendations.design[0].title, "Reduce clutter");
    }

    #[test]
    fn bold_subheaders_survive_inside_recommendations() {
        let raw = "## Recommendations\n**Design Recommendations:**\nRecommendation: Bigger CTA\n**Strategy Recommendations:**\nRecommendation: Referral program\nTimeline: Short-term";
        let rec = parse_comparison(raw);
        assert_eq!(rec.recommendations.design[0].title, "Bigger CTA");
        assert_eq!(rec.recommendations.strategy.len(), 1);
        assert_eq!(rec.recommendations.strategy[0].timeline, Timeline::ShortTerm);
    }

    #[test]
    fn recommendations_grouped_into_blocks() {
        let body = [
            "Design Recommendations:",
            "Recommendation: Simplify navigation",
            "Cut top-level items to five",
            "Priority: High",
            "Effort: Low",
            "Impact: High",
            "Strategy Recommendations:",
            "Recommendation: Launch referral program",
            "Description: Reward invites",
            "Timeline: Long-term",
            "Impact: Medium",
            "Implementation Plan:",
            "Phase: Phase 1: Quick wins",
            "Steps:",
            "- Audit nav",
            "- Ship new menu",
            "Resources: Designer, Frontend engineer",
            "Timeline: Short-term",
            "Phase: Phase 3",
            "Focus: Growth",
        ];
        let bundle = parse_recommendations(&body);

        assert_eq!(bundle.design.len(), 1);
        let d = &bundle.design[0];
        assert_eq!(d.title, "Simplify navigation");
        assert_eq!(d.description, "Cut top-level items to five");
        assert_eq!((d.priority, d.effort, d.impact), (Rating::High, Rating::Low, Rating::High));

        assert_eq!(bundle.strategy.len(), 1);
        let s = &bundle.strategy[0];
        assert_eq!(s.description, "Reward invites");
        assert_eq!(s.timeline, Timeline::LongTerm);

        assert_eq!(bundle.implementation.len(), 2);
        let p1 = &bundle.implementation[0];
        assert_eq!(p1.phase, Phase::One);
        assert_eq!(p1.focus, "Quick wins");
        assert_eq!(p1.steps, vec!["Audit nav", "Ship new menu"]);
        assert_eq!(p1.resources, vec!["Designer", "Frontend engineer"]);
        assert_eq!(p1.timeline, Timeline::ShortTerm);
        let p3 = &bundle.implementation[1];
        assert_eq!(p3.phase, Phase::Three);
        assert_eq!(p3.focus, "Growth");
        assert_eq!(p3.steps, vec![NO_STEPS]);
        assert_eq!(p3.timeline, Timeline::MediumTerm);
    }

    #[test]
    fn numbered_item_labels_open_blocks() {
        let tests = parse_ab_tests(&[
            "Test 1: CTA Color",
            "Hypothesis: Red converts better",
            "Metrics: CTR",
            "Impact: High",
            "Complexity: Low",
            "Priority: High",
        ]);
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].name, "CTA Color");
        assert_eq!(tests[0].hypothesis, "Red converts better");
        assert_eq!((tests[0].impact, tests[0].complexity), (Rating::High, Rating::Low));

        let bundle = parse_recommendations(&[
            "Design Recommendations:",
            "Recommendation 1: Simplify navigation",
            "Description: Cut items",
            "Priority: High",
            "Effort: Low",
        ]);
        assert_eq!(bundle.design.len(), 1);
        let d = &bundle.design[0];
        assert_eq!((d.title.as_str(), d.description.as_str()), ("Simplify navigation", "Cut items"));
        assert_eq!((d.priority, d.effort, d.impact), (Rating::High, Rating::Low, Rating::Medium));
    }

    #[test]
    fn stray_field_lines_are_not_fallback_items() {
        let tests = parse_ab_tests(&["- Try a shorter hero", "Impact: High", "Priority: Low"]);
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].name, "Try a shorter hero");

        let bundle = parse_recommendations(&["- Reduce clutter", "Effort: Low"]);
        assert_eq!(bundle.design.len(), 1);
        assert_eq!(bundle.design[0].title, "Reduce clutter");
    }

    #[test]
    fn phase_ordinal_in_label_wins_over_value() {
        let bundle = parse_recommendations(&[
            "Implementation Plan:",
            "Phase 2: One-click checkout",
            "Steps: Prototype",
            "Phase III: Scale",
        ]);
        let phases = &bundle.implementation;
        assert_eq!(phases.len(), 2);
        assert_eq!((phases[0].phase, phases[0].focus.as_str()), (Phase::Two, "One-click checkout"));
        assert_eq!(phases[0].steps, vec!["Prototype"]);
        assert_eq!((phases[1].phase, phases[1].focus.as_str()), (Phase::Three, "Scale"));
    }

    #[test]
    fn flat_recommendations_become_design_items() {
        let bundle = parse_recommendations(&["- Provide specific improvements", "- Reduce clutter"]);
        assert_eq!(bundle.design.len(), 2);
        assert_eq!(bundle.design[1].title, "Reduce clutter");
        assert_eq!(bundle.design[1].priority, Rating::Medium);
        assert!(bundle.strategy.is_empty());
        assert!(bundle.implementation.is_empty());
    }

    #[test]
    fn flow_steps_collect_improvements_and_rationale() {
        let raw = "CURRENT FLOW ANALYSIS:\n\
                   1. Open the app\n\
                   - Add a skip button\n\
                   Users land on a splash screen\n\
                   for three seconds\n\
                   2. Sign up\n\
                   Rationale: email only\n\
                   IMPROVED FLOW SUGGESTIONS:\n\
                   - Step 1: Offer social login\n\
                   - Step 2: Defer profile setup\n\
                   GENERAL SUGGESTIONS:\n\
                   - Shorten forms\n";
        let rec = parse_flow(raw, FlowSource::Text);
        assert_eq!(rec.current_flow.len(), 2);
        assert_eq!(rec.current_flow[0].step, "Open the app");
        assert_eq!(rec.current_flow[0].improvements, Some(vec!["Add a skip button".to_string()]));
        assert_eq!(
            rec.current_flow[0].rationale.as_deref(),
            Some("Users land on a splash screen for three seconds")
        );
        assert_eq!(rec.current_flow[1].rationale.as_deref(), Some("email only"));
        assert_eq!(
            rec.improved_flow.iter().map(|s| s.step.as_str()).collect::<Vec<_>>(),
            vec!["Step 1: Offer social login", "Step 2: Defer profile setup"]
        );
        assert_eq!(rec.general_suggestions, vec!["Shorten forms"]);
        assert_eq!(rec.potential_issues, vec!["No specific issues identified"]);
        assert_eq!(rec.competitor_insights, None);
    }

    #[test]
    fn bulleted_rationale_is_not_an_improvement() {
        let steps = parse_steps(&["1. Checkout", "- Rationale: guests abandon at login", "- Offer guest checkout"]);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].rationale.as_deref(), Some("guests abandon at login"));
        assert_eq!(steps[0].improvements, Some(vec!["Offer guest checkout".to_string()]));
    }

    #[test]
    fn unnumbered_flow_section_is_one_step_per_line() {
        let steps = parse_steps(&["- Landing page", "- Pricing page"]);
        assert_eq!(steps, vec![FlowStep::new("Landing page"), FlowStep::new("Pricing page")]);
    }

    #[test]
    fn competitor_insights_only_for_image_input() {
        let raw = "BEST PRACTICES:\n- Keep it short\nCOMPETITOR INSIGHTS:\n- Rival uses magic links";
        let image = parse_flow(raw, FlowSource::Image);
        assert_eq!(image.competitor_insights, Some(vec!["Rival uses magic links".to_string()]));
        assert_eq!(image.best_practices, vec!["Keep it short"]);

        let text = parse_flow(raw, FlowSource::Text);
        assert_eq!(text.competitor_insights, None);

        let empty = parse_flow("", FlowSource::Image);
        assert_eq!(empty.competitor_insights, Some(vec!["No competitor insights available".to_string()]));
        assert_eq!(empty.current_flow, vec![FlowStep::new("Flow analysis not available")]);
        assert_eq!(empty.improved_flow, vec![FlowStep::new("Improvement suggestions not available")]);
    }

    #[test]
    fn vocabularies_have_no_cross_key_ambiguity() {
        assert!(DESIGN_VOCABULARY.ambiguities().is_empty());
        assert!(COMPARISON_VOCABULARY.ambiguities().is_empty());
        assert!(RECOMMENDATION_VOCABULARY.ambiguities().is_empty());
        assert!(FLOW_VOCABULARY.ambiguities().is_empty());
    }

    #[test]
    fn assemble_distinguishes_missing_from_empty_content() {
        assert!(matches!(assemble(AnalysisKind::Design, None), Err(AnalysisError::NoContent)));
        let rec = assemble(AnalysisKind::Flow(FlowSource::Text), Some("")).unwrap();
        assert!(matches!(rec, StructuredRecord::Flow(f) if f.competitor_insights.is_none()));
    }
}
