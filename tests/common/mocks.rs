use async_trait::async_trait;
use foodie_finder::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatCompletionResponse, LlmClient},
    query::{QueryGenerator, StructuredQuery},
    search::{PlacesSearch, Restaurant},
};
use mockall::mock;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock LLM client for testing
#[derive(Debug)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<ChatCompletionResponse>>>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    pub error: Option<String>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_responses(self, responses: Vec<ChatCompletionResponse>) -> Self {
        *self.responses.lock().unwrap() = responses;
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn add_response(&self, response: ChatCompletionResponse) {
        self.responses.lock().unwrap().push(response);
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::llm("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

mock! {
    pub Generator {}

    #[async_trait]
    impl QueryGenerator for Generator {
        async fn generate(&self, message: &str) -> Result<StructuredQuery>;
    }
}

mock! {
    pub Search {}

    #[async_trait]
    impl PlacesSearch for Search {
        async fn search(&self, query: &StructuredQuery) -> Result<Vec<Restaurant>>;
    }
}

/// Generator that never answers within any reasonable deadline.
pub struct StalledGenerator {
    pub delay: Duration,
}

#[async_trait]
impl QueryGenerator for StalledGenerator {
    async fn generate(&self, _message: &str) -> Result<StructuredQuery> {
        tokio::time::sleep(self.delay).await;
        Ok(super::sushi_query())
    }
}

// Helper functions for creating test data

pub fn create_mock_chat_response(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        choices: vec![content.to_string()],
    }
}

pub fn create_empty_chat_response() -> ChatCompletionResponse {
    ChatCompletionResponse::default()
}
