use anyhow::Result;
use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};

use super::{ChatRequest, Llm};
use crate::config::LlmSettings;

#[derive(Clone)]
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    vision_model: String,
    text_model: String,
    temperature: f32,
}

impl LlmClient {
    /// The credential is passed in explicitly; nothing is read from the process
    /// environment here.
    pub fn new(settings: &LlmSettings, api_key: &str) -> Result<Self> {
        let mut cfg = OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = &settings.base_url {
            cfg = cfg.with_api_base(url);
        }
        let http = reqwest::Client::builder().timeout(settings.timeout).build()?;
        let client = Client::with_config(cfg).with_http_client(http);
        Ok(Self {
            client,
            vision_model: settings.vision_model.clone(),
            text_model: settings.text_model.clone(),
            temperature: settings.temperature,
        })
    }

    fn model_for(&self, request: &ChatRequest) -> &str {
        if request.vision {
            &self.vision_model
        } else {
            &self.text_model
        }
    }
}

#[async_trait::async_trait]
impl Llm for LlmClient {
    async fn chat(&self, request: ChatRequest) -> Result<Option<String>> {
        let model = self.model_for(&request).to_string();
        let max_tokens = request.max_tokens;
        let req = CreateChatCompletionRequestArgs::default()
            .model(model.as_str())
            .messages(request.messages)
            .max_tokens(max_tokens)
            .temperature(self.temperature)
            .build()?;

        tracing::debug!(%model, max_tokens, "sending chat completion");
        let resp = self.client.chat().create(req).await?;
        let content = resp.choices.into_iter().next().and_then(|c| c.message.content);
        tracing::debug!(%model, chars = content.as_ref().map_or(0, String::len), "received chat completion");
        Ok(content)
    }
}
