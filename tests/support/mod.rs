#![allow(dead_code)]

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use designlens_rs::llm::{ChatRequest, Llm};

pub struct FakeLlm {
    // maps each request to the content the model "returns"
    pub handler: Box<dyn Fn(&ChatRequest) -> Option<String> + Send + Sync>,
    pub seen: Mutex<Vec<ChatRequest>>,
}

impl FakeLlm {
    pub fn replying(text: &'static str) -> Self {
        Self { handler: Box::new(move |_| Some(text.to_string())), seen: Mutex::new(Vec::new()) }
    }

    pub fn without_content() -> Self {
        Self { handler: Box::new(|_| None), seen: Mutex::new(Vec::new()) }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Llm for FakeLlm {
    async fn chat(&self, request: ChatRequest) -> Result<Option<String>> {
        let out = (self.handler)(&request);
        self.seen.lock().unwrap().push(request);
        Ok(out)
    }
}

pub struct FailingLlm;

#[async_trait]
impl Llm for FailingLlm {
    async fn chat(&self, _request: ChatRequest) -> Result<Option<String>> {
        anyhow::bail!("connection reset by peer")
    }
}

pub const DESIGN_RESPONSE: &str = "1. Accessibility\n- Good labels\n2. Color Contrast\n- Poor contrast\n3. Design Principles\n- OK\n4. Recommendations\n- Fix contrast";

pub const FLOW_RESPONSE: &str = "CURRENT FLOW ANALYSIS:\n1. Landing\n2. Signup\n- Too many fields\nIMPROVED FLOW SUGGESTIONS:\n1. Landing with social proof\nPOTENTIAL ISSUES:\n- Drop-off at signup\nCOMPETITOR INSIGHTS:\n- Rival offers guest checkout";
