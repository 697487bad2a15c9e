use serde::Deserialize;

use crate::types::{GenerationConfig, InputModel, ModelError, Parameter, ParameterSet};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    Model(#[from] ModelError),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModel {
    parameters: Vec<Parameter>,
    #[serde(default)]
    generation: GenerationConfig,
}

/// Parse a JSON model and validate its parameters.
pub fn parse_model(json: &str) -> Result<InputModel, ParseError> {
    let raw: RawModel = serde_json::from_str(json)?;
    let parameters = ParameterSet::new(raw.parameters)?;
    Ok(InputModel {
        parameters,
        generation: raw.generation,
    })
}
