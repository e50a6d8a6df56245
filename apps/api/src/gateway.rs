//! Completion Gateway: one schema-constrained completion per call.
//!
//! Flow: resolve schema → external call → strip fences → parse JSON →
//!       validate against schema → normalize → (optionally) deserialize.
//!
//! Every failure comes back as a `CompletionError`; nothing here panics on
//! model output. Raw responses and failures are logged, never altered.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::llm_client::{strip_json_fences, CompletionService, ResponseSchema};
use crate::models::InvalidOutput;
use crate::normalize::normalize;
use crate::schemas::{SchemaError, SchemaRegistry};

/// A fully built prompt, ready to send. Constructed per call, never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub user_prompt: String,
    pub system_instruction: String,
    /// Registered schema name, or empty for free-form JSON.
    pub schema_name: String,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request names a schema that is not registered. Raised before any
    /// external call is made.
    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    #[error("Completion service error: {0}")]
    Service(String),

    #[error("Response is not valid JSON: {0}")]
    Parse(String),

    #[error("Response does not match schema: {0}")]
    Schema(String),

    /// A built-in schema could not be used. Not caused by the model or the caller.
    #[error("Schema registry error: {0}")]
    Registry(String),

    #[error("Response has an unexpected shape: {0}")]
    Shape(String),

    #[error("Response failed validation: {0}")]
    Invalid(#[from] InvalidOutput),
}

#[derive(Clone)]
pub struct CompletionGateway {
    service: Arc<dyn CompletionService>,
    registry: Arc<SchemaRegistry>,
}

impl CompletionGateway {
    pub fn new(service: Arc<dyn CompletionService>, registry: Arc<SchemaRegistry>) -> Self {
        Self { service, registry }
    }

    /// Runs one completion and returns the normalized JSON value.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<Value, CompletionError> {
        let request_id = Uuid::new_v4();

        let schema = if request.schema_name.is_empty() {
            None
        } else {
            let (name, schema) = self.registry.get(&request.schema_name).map_err(|e| {
                error!(%request_id, "Refusing completion: {e}");
                CompletionError::UnknownSchema(request.schema_name.clone())
            })?;
            Some((name, schema))
        };

        info!(
            %request_id,
            schema = %request.schema_name,
            prompt_chars = request.user_prompt.len(),
            "Requesting completion"
        );

        let raw = self
            .service
            .complete(
                &request.user_prompt,
                &request.system_instruction,
                schema.map(|(name, schema)| ResponseSchema {
                    name: name.as_str(),
                    schema,
                }),
            )
            .await
            .map_err(|e| {
                error!(%request_id, "Completion call failed: {e:?}");
                CompletionError::Service(e.to_string())
            })?;

        debug!(%request_id, raw_response = %raw, "Completion response received");

        let value: Value = serde_json::from_str(strip_json_fences(&raw)).map_err(|e| {
            error!(%request_id, "Completion response is not JSON: {e}");
            CompletionError::Parse(e.to_string())
        })?;

        if let Some((name, _)) = schema {
            self.registry.validate(name, &value).map_err(|e| {
                error!(%request_id, "Completion response failed schema check: {e}");
                schema_failure(e)
            })?;
        }

        Ok(normalize(value))
    }

    /// Like `complete`, then deserializes the normalized value into `T`.
    pub async fn complete_as<T: DeserializeOwned>(
        &self,
        request: &CompletionRequest,
    ) -> Result<T, CompletionError> {
        let value = self.complete(request).await?;
        serde_json::from_value(value).map_err(|e| CompletionError::Shape(e.to_string()))
    }
}

/// Only a mismatch between the response and its schema is the model's fault.
fn schema_failure(err: SchemaError) -> CompletionError {
    match err {
        SchemaError::ValidationFailed { .. } => CompletionError::Schema(err.to_string()),
        SchemaError::NotFound(_) | SchemaError::Invalid { .. } => {
            CompletionError::Registry(err.to_string())
        }
    }
}
