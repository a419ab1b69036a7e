//! Design review, design comparison and user-flow analysis backed by a chat model,
//! with a best-effort parser that turns the model's prose into typed records.

pub mod analysis;
pub mod config;
pub mod error;
pub mod extraction;
pub mod fields;
pub mod llm;
pub mod media;
pub mod prompts;
pub mod sections;
pub mod segments;
pub mod server;
pub mod types;

pub use analysis::{analyze_design, analyze_flow, compare_designs, FlowInput};
pub use error::AnalysisError;
pub use extraction::{assemble, parse_comparison, parse_design, parse_flow};
pub use prompts::ReviewDetail;
pub use types::*;
