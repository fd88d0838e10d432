use super::types::StructuredQuery;
use crate::{
    Error, Result,
    config::LlmConfig,
    llm::{ChatCompletionRequest, JsonSchemaFormat, LlmClient},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

const INSTRUCTIONS: &str = "\
You are a foodie helpful assistant that can help users to find the best restaurants based on their preferences in well structured format.

Reply with a single JSON object of the form {\"action\": \"search\", \"parameters\": {...}} and nothing else.

For 'query', a string to be matched against all content for this place, including but not limited to venue name, category, telephone number, taste, and tips.

For 'near', a string naming a locality in the world (e.g., \"Chicago, IL\"). If the value is not geocodable, returns an error. Global search results will be omitted.

For 'min_price', restricts results to only those places within the specified price range. Valid values are the strings \"1\" (most affordable) to \"4\" (most expensive), inclusive.

For 'max_price', restricts results to only those places within the specified price range. Valid values are the strings \"1\" (most affordable) to \"4\" (most expensive), inclusive.

For 'rating', this is a float value between 0 - 10, where 0 is the worst and 10 is the best. The user may use a star rating (e.g 4-star), The standard is 0 - 5 stars, so you need to do some calculation to convert the star rating to a float value. For example, 5-star will have a floating value of 8.0-10. The user may exaggerate the rating (e.g. 999 stars) to get a higher rating, but you should still limit the rating to 10.

For 'open_now', a boolean value that restricts results to only those places that are open now.

The user preference:
";

/// Turns a free-text preference into a [`StructuredQuery`].
#[async_trait]
pub trait QueryGenerator: Send + Sync {
    async fn generate(&self, message: &str) -> Result<StructuredQuery>;
}

pub struct LlmQueryGenerator {
    llm_client: Arc<dyn LlmClient>,
    model: String,
    temperature: f32,
}

impl LlmQueryGenerator {
    pub fn new(llm_client: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self {
            llm_client,
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    pub fn build_prompt(message: &str) -> String {
        format!("{}{}", INSTRUCTIONS, message)
    }

    fn build_request(&self, message: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            prompt: Self::build_prompt(message),
            temperature: self.temperature,
            response_format: Some(JsonSchemaFormat {
                name: "structured_query".to_string(),
                description: Some("Restaurant search parameters".to_string()),
                schema: StructuredQuery::json_schema(),
                strict: true,
            }),
        }
    }
}

#[async_trait]
impl QueryGenerator for LlmQueryGenerator {
    async fn generate(&self, message: &str) -> Result<StructuredQuery> {
        let request = self.build_request(message);

        let response = self
            .llm_client
            .create_chat_completion(request)
            .await
            .map_err(|e| {
                error!("LLM completion failed: {}", e);
                match e {
                    Error::Generation(_) => e,
                    other => Error::generation(other.to_string()),
                }
            })?;

        let content = response
            .first_content()
            .ok_or_else(|| Error::generation("LLM returned no choices"))?;

        debug!("LLM returned structured output: {}", content);

        StructuredQuery::from_model_output(content)
    }
}
