//! Extraction options
//!
//! Options are plain data and can be written as YAML or JSON:
//!
//! ```yaml
//! nesting: extracted_inner
//! allow_partial_runs: false
//! ```

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which condition ends up on the outer statement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NestingOrder {
    /// The extracted operands guard the outer statement; the remaining
    /// condition guards the nested conditional
    #[default]
    ExtractedOuter,

    /// The remaining condition stays on the outer statement; the extracted
    /// operands guard the nested conditional
    ExtractedInner,
}

/// Options for [`ExtractCondition`](crate::refactor::ExtractCondition)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ExtractOptions {
    /// Nesting order of the two conditions
    #[serde(default)]
    pub nesting: NestingOrder,

    /// Accept contiguous runs that do not end at the rightmost operand
    #[serde(default = "default_true")]
    pub allow_partial_runs: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            nesting: NestingOrder::default(),
            allow_partial_runs: true,
        }
    }
}

impl ExtractOptions {
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_norway::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// JSON Schema describing the options document
    pub fn json_schema() -> Result<serde_json::Value> {
        serde_json::to_value(schemars::schema_for!(ExtractOptions))
            .map_err(|e| Error::Config(format!("Failed to render options schema: {}", e)))
    }

    pub fn with_nesting(mut self, nesting: NestingOrder) -> Self {
        self.nesting = nesting;
        self
    }

    pub fn with_partial_runs(mut self, allow: bool) -> Self {
        self.allow_partial_runs = allow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExtractOptions::default();
        assert_eq!(options.nesting, NestingOrder::ExtractedOuter);
        assert!(options.allow_partial_runs);
        assert_eq!(ExtractOptions::from_yaml("").unwrap(), options);
    }

    #[test]
    fn test_from_yaml() {
        let options =
            ExtractOptions::from_yaml("nesting: extracted_inner\nallow_partial_runs: false\n")
                .unwrap();
        assert_eq!(options.nesting, NestingOrder::ExtractedInner);
        assert!(!options.allow_partial_runs);
    }

    #[test]
    fn test_from_json_partial() {
        let options = ExtractOptions::from_json(r#"{"allow_partial_runs": false}"#).unwrap();
        assert_eq!(options.nesting, NestingOrder::ExtractedOuter);
        assert!(!options.allow_partial_runs);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ExtractOptions::from_yaml("nesting: extracted_outer\ncolor: blue\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));

        let err = ExtractOptions::from_json(r#"{"nesting": "sideways"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_json_schema_lists_fields() {
        let schema = ExtractOptions::json_schema().unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("nesting").is_some());
        assert!(properties.get("allow_partial_runs").is_some());
    }
}
