use serde::{Deserialize, Serialize};

use crate::core::{ParamValue, ValueKind};

/// Metadata and current value of a single layout parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Dotted location of the parameter in the rendered layout (e.g. `layout.title.font`).
    #[serde(default)]
    pub layout_path: String,
    #[serde(default)]
    pub description: String,
    pub kind: ValueKind,
    #[serde(default)]
    pub allowed: Vec<ParamValue>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub default: ParamValue,
    #[serde(default)]
    pub value: ParamValue,
}

impl ParameterDefinition {
    /// Creates an unrestricted definition whose current value is the default.
    #[must_use]
    pub fn new(kind: ValueKind, default: impl Into<ParamValue>) -> Self {
        let default = default.into();
        Self {
            layout_path: String::new(),
            description: String::new(),
            kind,
            allowed: Vec::new(),
            min: None,
            max: None,
            patterns: Vec::new(),
            value: default.clone(),
            default,
        }
    }

    #[must_use]
    pub fn with_layout_path(mut self, path: impl Into<String>) -> Self {
        self.layout_path = path.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_allowed<V: Into<ParamValue>>(mut self, allowed: impl IntoIterator<Item = V>) -> Self {
        self.allowed = allowed.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_patterns<S: Into<String>>(mut self, patterns: impl IntoIterator<Item = S>) -> Self {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the current value without touching the default.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<ParamValue>) -> Self {
        self.value = value.into();
        self
    }

    pub fn reset(&mut self) {
        self.value = self.default.clone();
    }
}
