use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ResponseFormat, ResponseFormatJsonSchema,
};
use serde::{Deserialize, Serialize};

/// A single-turn completion: one user prompt, one structured reply.
#[derive(Debug, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub response_format: Option<JsonSchemaFormat>,
}

/// Asks the provider to constrain its reply to `schema`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub description: Option<String>,
    pub schema: serde_json::Value,
    pub strict: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatCompletionResponse {
    /// Message content of each returned choice, in provider order.
    pub choices: Vec<String>,
}

impl ChatCompletionRequest {
    pub fn to_openai_message(&self) -> Result<ChatCompletionRequestMessage, crate::Error> {
        let msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Text(
                self.prompt.clone(),
            ))
            .build()
            .map_err(|e| crate::Error::llm(format!("Failed to build user message: {}", e)))?;
        Ok(msg.into())
    }
}

impl JsonSchemaFormat {
    pub fn to_openai_response_format(&self) -> ResponseFormat {
        ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: self.description.clone(),
                name: self.name.clone(),
                schema: Some(self.schema.clone()),
                strict: Some(self.strict),
            },
        }
    }
}

impl ChatCompletionResponse {
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(String::as_str)
    }
}
