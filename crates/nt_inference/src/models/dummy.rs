use std::sync::Mutex;

use nt_core::StrategyError;

use super::{ContentBlock, LanguageModel, MessagesRequest, MessagesResponse};

/// Replays a canned answer and remembers the last request it saw.
#[derive(Debug)]
pub struct DummyModel {
    reply: Result<Vec<ContentBlock>, StrategyError>,
    last_request: Mutex<Option<MessagesRequest>>,
}

impl DummyModel {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_blocks(vec![ContentBlock::text(text)])
    }

    pub fn with_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            reply: Ok(blocks),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(error: StrategyError) -> Self {
        Self {
            reply: Err(error),
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<MessagesRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait::async_trait]
impl LanguageModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, request: &MessagesRequest) -> Result<MessagesResponse, StrategyError> {
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }
        self.reply.clone().map(|content| MessagesResponse { content })
    }
}
