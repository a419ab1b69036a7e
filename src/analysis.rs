//! Entry points: build the prompt, call the model, parse what comes back.

use crate::error::AnalysisError;
use crate::extraction::{parse_comparison, parse_design, parse_flow, require_content};
use crate::llm::Llm;
use crate::prompts::{self, ReviewDetail};
use crate::types::{ComparisonAnalysis, DesignAnalysis, FlowAnalysis, FlowSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowInput {
    /// Free-text description of the flow.
    Text(String),
    /// Screenshot as a data URL or remote URL.
    Image(String),
}

impl FlowInput {
    pub fn source(&self) -> FlowSource {
        match self {
            FlowInput::Text(_) => FlowSource::Text,
            FlowInput::Image(_) => FlowSource::Image,
        }
    }
}

fn require_input(name: &str, value: &str) -> Result<(), AnalysisError> {
    if value.trim().is_empty() {
        return Err(AnalysisError::InvalidRequest(format!("{name} is required")));
    }
    Ok(())
}

pub async fn analyze_design(
    llm: &dyn Llm,
    image_url: &str,
    detail: ReviewDetail,
) -> Result<DesignAnalysis, AnalysisError> {
    require_input("image", image_url)?;
    tracing::info!(?detail, "analyzing design");
    let content = llm.chat(prompts::design_review(image_url, detail)?).await?;
    let raw = require_content(content.as_deref())?;
    tracing::debug!(chars = raw.len(), "parsing design review");
    Ok(parse_design(raw))
}

pub async fn compare_designs(
    llm: &dyn Llm,
    your_design: &str,
    competitor_design: &str,
) -> Result<ComparisonAnalysis, AnalysisError> {
    require_input("your design", your_design)?;
    require_input("competitor design", competitor_design)?;
    tracing::info!("comparing designs");
    let content = llm.chat(prompts::design_comparison(your_design, competitor_design)?).await?;
    let raw = require_content(content.as_deref())?;
    tracing::debug!(chars = raw.len(), "parsing design comparison");
    Ok(parse_comparison(raw))
}

pub async fn analyze_flow(llm: &dyn Llm, input: &FlowInput) -> Result<FlowAnalysis, AnalysisError> {
    let request = match input {
        FlowInput::Text(description) => {
            require_input("flow description", description)?;
            prompts::flow_from_text(description)?
        }
        FlowInput::Image(image_url) => {
            require_input("image", image_url)?;
            prompts::flow_from_image(image_url)?
        }
    };
    let source = input.source();
    tracing::info!(?source, "analyzing user flow");
    let content = llm.chat(request).await?;
    let raw = require_content(content.as_deref())?;
    tracing::debug!(chars = raw.len(), "parsing flow analysis");
    Ok(parse_flow(raw, source))
}
