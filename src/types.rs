use serde::{Deserialize, Serialize};

/// Three-level scale used for impact, complexity, priority and effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Rating {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeline {
    #[serde(rename = "Short-term")]
    ShortTerm,
    #[default]
    #[serde(rename = "Medium-term")]
    MediumTerm,
    #[serde(rename = "Long-term")]
    LongTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Phase {
    #[serde(rename = "Phase 1")]
    One,
    #[default]
    #[serde(rename = "Phase 2")]
    Two,
    #[serde(rename = "Phase 3")]
    Three,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignAnalysis {
    pub accessibility: Vec<String>,
    pub color_contrast: Vec<String>,
    pub design_principles: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignAssessment {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthsWeaknesses {
    pub your_design: DesignAssessment,
    pub competitor_design: DesignAssessment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbTest {
    pub name: String,
    pub hypothesis: String,
    pub metrics: Vec<String>,
    pub impact: Rating,
    pub complexity: Rating,
    pub priority: Rating,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AbTestSuggestions {
    pub designer: Vec<AbTest>,
    pub product_manager: Vec<AbTest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRecommendation {
    pub title: String,
    pub description: String,
    pub priority: Rating,
    pub effort: Rating,
    pub impact: Rating,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyRecommendation {
    pub title: String,
    pub description: String,
    pub timeline: Timeline,
    pub impact: Rating,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationPhase {
    pub phase: Phase,
    pub focus: String,
    pub steps: Vec<String>,
    pub resources: Vec<String>,
    pub timeline: Timeline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RecommendationBundle {
    pub design: Vec<DesignRecommendation>,
    pub strategy: Vec<StrategyRecommendation>,
    pub implementation: Vec<ImplementationPhase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonAnalysis {
    pub design_comparison: Vec<String>,
    pub strengths_weaknesses: StrengthsWeaknesses,
    pub ab_test_suggestions: AbTestSuggestions,
    pub recommendations: RecommendationBundle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStep {
    pub step: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl FlowStep {
    pub fn new(step: impl Into<String>) -> Self {
        Self { step: step.into(), improvements: None, rationale: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowAnalysis {
    pub current_flow: Vec<FlowStep>,
    pub improved_flow: Vec<FlowStep>,
    pub general_suggestions: Vec<String>,
    pub potential_issues: Vec<String>,
    pub best_practices: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_insights: Option<Vec<String>>,
}

/// Where a flow analysis came from; only screenshots carry competitor insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowSource {
    Text,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Design,
    Comparison,
    Flow(FlowSource),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructuredRecord {
    Design(DesignAnalysis),
    Comparison(ComparisonAnalysis),
    Flow(FlowAnalysis),
}
