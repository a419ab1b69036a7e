use anyhow::Result;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContentPart, ImageUrlArgs,
};

use crate::llm::ChatRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewDetail {
    #[default]
    Detailed,
    Concise,
}

const DETAILED_REVIEW: &str = "As an expert UI/UX designer, thoroughly analyze this design image and provide detailed, contextual feedback. Focus on specific elements in the image and provide actionable insights in exactly this format:

1. Accessibility
- Evaluate specific text elements, their sizes, and readability in the context shown
- Analyze the interactive elements and their accessibility considerations
- Assess the information hierarchy and how it affects different user groups
- Comment on spacing and layout from an accessibility perspective

2. Color Contrast
- Analyze specific color combinations present in the design
- Evaluate contrast ratios between text and background elements
- Identify any potential color accessibility issues
- Comment on the color hierarchy and its impact on usability

3. Design Principles
- Evaluate the layout structure and how it guides user attention
- Analyze the visual hierarchy of specific elements
- Assess the consistency of design elements and patterns
- Comment on the use of whitespace, balance and alignment

4. Recommendations
- Provide specific, actionable improvements for the identified issues
- Recommend specific color adjustments where needed
- Propose layout modifications that could enhance usability
- Suggest specific accessibility improvements based on the analysis";

const CONCISE_REVIEW: &str = "As an expert UI/UX designer, provide brief but specific feedback about this design image in exactly this format:

1. Accessibility
- One critical observation about the accessibility of specific elements shown

2. Color Contrast
- The most important color contrast consideration in this specific design

3. Design Principles
- The most significant design principle impact in this layout

4. Recommendations
- One specific, contextual improvement based on the most critical issue";

const COMPARISON: &str = "As an expert UI/UX designer and product strategy consultant, analyze these two designs (the first is the client's, the second is a competitor's) and provide a detailed comparison following exactly this structure:

DESIGN COMPARISON
- Compare layouts, visual hierarchy, user flows, content organization and visual elements

YOUR DESIGN STRENGTHS
- Effective elements and competitive advantages

YOUR DESIGN WEAKNESSES
- Usability concerns, missing features and friction points

COMPETITOR DESIGN STRENGTHS
- Effective patterns and innovative features

COMPETITOR DESIGN WEAKNESSES
- Usability issues, inconsistencies and missed opportunities

DESIGNER A/B TEST SUGGESTIONS
Test Name: [short name]
Hypothesis: [what the change should prove]
Metrics:
- [metric]
Impact: High | Medium | Low
Complexity: High | Medium | Low
Priority: High | Medium | Low
(repeat the block for each UI or layout test)

PRODUCT MANAGER A/B TEST SUGGESTIONS
(same block format, focused on features, flows, conversion and business impact)

RECOMMENDATIONS
Design Recommendations:
Recommendation: [title]
Description: [details]
Priority: High | Medium | Low
Effort: High | Medium | Low
Impact: High | Medium | Low

Strategy Recommendations:
Recommendation: [title]
Description: [details]
Timeline: Short-term | Medium-term | Long-term
Impact: High | Medium | Low

Implementation Plan:
Phase: Phase 1 | Phase 2 | Phase 3
Focus: [theme of the phase]
Steps:
- [step]
Resources:
- [people or tools]
Timeline: Short-term | Medium-term | Long-term

Please keep these exact section headers and labels and base every point on the actual designs shown.";

const FLOW_SECTIONS: &str = "CURRENT FLOW ANALYSIS:
1. [step]
- [possible improvement for this step]
[why the step matters]

IMPROVED FLOW SUGGESTIONS:
1. [improved step]
- [what changes]
[rationale]

GENERAL SUGGESTIONS:
- [suggestion]

POTENTIAL ISSUES:
- [issue]

BEST PRACTICES:
- [practice]";

const FLOW_COMPETITORS: &str = "

COMPETITOR INSIGHTS:
- [insight]";

const FLOW_CLOSING: &str =
    "Please keep this exact structure and these headers. Be specific and detailed in your analysis.";

const DETAILED_MAX_TOKENS: u32 = 1500;
const CONCISE_MAX_TOKENS: u32 = 500;
const COMPARISON_MAX_TOKENS: u32 = 2500;
const FLOW_IMAGE_MAX_TOKENS: u32 = 3000;
const FLOW_TEXT_MAX_TOKENS: u32 = 2000;

fn user_message(text: &str, images: &[&str]) -> Result<ChatCompletionRequestMessage> {
    if images.is_empty() {
        return Ok(ChatCompletionRequestUserMessageArgs::default().content(text).build()?.into());
    }
    let mut parts: Vec<ChatCompletionRequestUserMessageContentPart> = Vec::with_capacity(images.len() + 1);
    parts.push(ChatCompletionRequestMessageContentPartTextArgs::default().text(text).build()?.into());
    for url in images {
        let image_url = ImageUrlArgs::default().url(*url).build()?;
        parts.push(
            ChatCompletionRequestMessageContentPartImageArgs::default()
                .image_url(image_url)
                .build()?
                .into(),
        );
    }
    Ok(ChatCompletionRequestUserMessageArgs::default().content(parts).build()?.into())
}

pub fn design_review(image_url: &str, detail: ReviewDetail) -> Result<ChatRequest> {
    let (text, max_tokens) = match detail {
        ReviewDetail::Detailed => (DETAILED_REVIEW, DETAILED_MAX_TOKENS),
        ReviewDetail::Concise => (CONCISE_REVIEW, CONCISE_MAX_TOKENS),
    };
    Ok(ChatRequest { messages: vec![user_message(text, &[image_url])?], max_tokens, vision: true })
}

pub fn design_comparison(your_design: &str, competitor_design: &str) -> Result<ChatRequest> {
    Ok(ChatRequest {
        messages: vec![user_message(COMPARISON, &[your_design, competitor_design])?],
        max_tokens: COMPARISON_MAX_TOKENS,
        vision: true,
    })
}

pub fn flow_from_image(image_url: &str) -> Result<ChatRequest> {
    let text = format!(
        "Analyze this user flow screenshot and provide a structured analysis using exactly these headers and format:\n\n{FLOW_SECTIONS}{FLOW_COMPETITORS}\n\n{FLOW_CLOSING}"
    );
    Ok(ChatRequest {
        messages: vec![user_message(&text, &[image_url])?],
        max_tokens: FLOW_IMAGE_MAX_TOKENS,
        vision: true,
    })
}

pub fn flow_from_text(description: &str) -> Result<ChatRequest> {
    let text = format!(
        "Analyze this user flow and provide a structured analysis using exactly these headers and format:\n\n{FLOW_SECTIONS}\n\nUser flow to analyze:\n{description}\n\n{FLOW_CLOSING}"
    );
    Ok(ChatRequest {
        messages: vec![user_message(&text, &[])?],
        max_tokens: FLOW_TEXT_MAX_TOKENS,
        vision: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{COMPARISON_VOCABULARY, FLOW_VOCABULARY};

    fn body(req: &ChatRequest) -> String {
        serde_json::to_string(&req.messages).unwrap()
    }

    #[test]
    fn review_detail_sets_token_budget() {
        let detailed = design_review("data:image/png;base64,AAAA", ReviewDetail::Detailed).unwrap();
        let concise = design_review("data:image/png;base64,AAAA", ReviewDetail::Concise).unwrap();
        assert_eq!(detailed.max_tokens, 1500);
        assert_eq!(concise.max_tokens, 500);
        assert!(detailed.vision);
        assert!(body(&detailed).contains("image_url"));
    }

    #[test]
    fn comparison_carries_both_images_and_every_header() {
        let req = design_comparison("data:image/png;base64,AAA", "data:image/png;base64,BBB").unwrap();
        let json = body(&req);
        assert!(json.contains("AAA") && json.contains("BBB"));
        for spec in COMPARISON_VOCABULARY.specs() {
            assert!(COMPARISON.contains(&spec.headers[0].to_uppercase()), "{}", spec.headers[0]);
        }
    }

    #[test]
    fn text_flow_is_text_only_and_skips_competitors() {
        let req = flow_from_text("Landing -> Signup -> Dashboard").unwrap();
        assert!(!req.vision);
        let json = body(&req);
        assert!(json.contains("Landing -> Signup -> Dashboard"));
        assert!(!json.contains("COMPETITOR INSIGHTS"));
        assert!(!json.contains("image_url"));

        let image = flow_from_image("data:image/png;base64,AAA").unwrap();
        let json = body(&image);
        for spec in FLOW_VOCABULARY.specs() {
            assert!(json.contains(&spec.headers[0].to_uppercase()), "{}", spec.headers[0]);
        }
    }
}
