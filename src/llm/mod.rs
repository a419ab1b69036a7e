use anyhow::Result;
use async_openai::types::ChatCompletionRequestMessage;

pub mod openai;

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatCompletionRequestMessage>,
    pub max_tokens: u32,
    /// Messages carry image parts and need a vision-capable model.
    pub vision: bool,
}

#[async_trait::async_trait]
pub trait Llm: Send + Sync {
    /// Content of the first choice; `None` when the model returned no content.
    async fn chat(&self, request: ChatRequest) -> Result<Option<String>>;
}
