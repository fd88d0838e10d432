use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

pub const MIN_RATING: f32 = 0.0;
pub const MAX_RATING: f32 = 10.0;

/// Provider price tier, exchanged as the strings `"1"` to `"4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceTier {
    #[serde(rename = "1")]
    Inexpensive,
    #[serde(rename = "2")]
    Moderate,
    #[serde(rename = "3")]
    Expensive,
    #[serde(rename = "4")]
    VeryExpensive,
}

impl PriceTier {
    pub const ALL: [PriceTier; 4] = [
        PriceTier::Inexpensive,
        PriceTier::Moderate,
        PriceTier::Expensive,
        PriceTier::VeryExpensive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Inexpensive => "1",
            PriceTier::Moderate => "2",
            PriceTier::Expensive => "3",
            PriceTier::VeryExpensive => "4",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuredQuery {
    pub action: String,
    pub parameters: QueryParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryParameters {
    pub query: String,
    pub near: String,
    pub min_price: PriceTier,
    pub max_price: PriceTier,
    pub rating: f32,
    pub open_now: bool,
}

impl StructuredQuery {
    /// Parses a model reply. The reply must match the schema exactly; the only
    /// tolerance is a single surrounding Markdown code fence.
    pub fn from_model_output(output: &str) -> Result<Self> {
        let body = strip_code_fence(output);
        let query: StructuredQuery = serde_json::from_str(body).map_err(|e| {
            Error::generation(format!("Model output does not match schema: {}", e))
        })?;
        query.validate()?;
        Ok(query)
    }

    pub fn validate(&self) -> Result<()> {
        let rating = self.parameters.rating;
        if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(Error::generation(format!(
                "rating {} is outside {}..={}",
                rating, MIN_RATING, MAX_RATING
            )));
        }
        Ok(())
    }

    /// JSON schema handed to the model as the structured-output contract.
    pub fn json_schema() -> serde_json::Value {
        let tiers: Vec<&str> = PriceTier::ALL.iter().map(PriceTier::as_str).collect();
        json!({
            "type": "object",
            "properties": {
                "action": { "type": "string" },
                "parameters": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string" },
                        "near": { "type": "string" },
                        "min_price": { "type": "string", "enum": tiers },
                        "max_price": { "type": "string", "enum": tiers },
                        "rating": { "type": "number", "minimum": MIN_RATING, "maximum": MAX_RATING },
                        "open_now": { "type": "boolean" }
                    },
                    "required": ["query", "near", "min_price", "max_price", "rating", "open_now"],
                    "additionalProperties": false
                }
            },
            "required": ["action", "parameters"],
            "additionalProperties": false
        })
    }
}

fn strip_code_fence(output: &str) -> &str {
    let trimmed = output.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop an info string such as `json` on the opening fence line.
    match rest.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => rest.trim(),
    }
}
