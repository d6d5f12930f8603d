use indexmap::IndexMap;
use tracing::trace;

use crate::core::{ParamValue, Target, ValueKind};
use crate::error::{RulesError, RulesResult};

use super::ParameterDefinition;

/// Named group of layout parameters.
///
/// Parameters keep their definition order so reports and flattened parameter
/// maps are stable.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasComponent {
    name: String,
    parameters: IndexMap<String, ParameterDefinition>,
}

impl CanvasComponent {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds or replaces a parameter definition.
    pub fn define(&mut self, name: impl Into<String>, definition: ParameterDefinition) -> &mut Self {
        self.parameters.insert(name.into(), definition);
        self
    }

    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters.get(name)
    }

    pub fn definitions(&self) -> impl Iterator<Item = (&str, &ParameterDefinition)> {
        self.parameters
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }

    /// Updates the current value of an existing parameter.
    ///
    /// No checks are applied here; use a `ParameterValidator` to validate the
    /// resulting state.
    pub fn set_parameter(&mut self, name: &str, value: impl Into<ParamValue>) -> RulesResult<()> {
        let Some(definition) = self.parameters.get_mut(name) else {
            return Err(RulesError::UnknownAttribute {
                target: self.name.clone(),
                name: name.to_owned(),
            });
        };
        definition.value = value.into();
        trace!(component = %self.name, parameter = name, value = %definition.value, "set parameter");
        Ok(())
    }

    /// Restores every parameter to its default value.
    pub fn reset(&mut self) {
        for definition in self.parameters.values_mut() {
            definition.reset();
        }
    }

    /// Current values keyed by parameter name, in definition order.
    #[must_use]
    pub fn parameters(&self) -> IndexMap<String, ParamValue> {
        self.parameters
            .iter()
            .map(|(name, definition)| (name.clone(), definition.value.clone()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl Target for CanvasComponent {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn parameter_names(&self) -> Vec<&str> {
        self.parameters.keys().map(String::as_str).collect()
    }

    fn get_parameter(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(name).map(|definition| &definition.value)
    }

    fn get_type(&self, name: &str) -> Option<ValueKind> {
        self.parameters.get(name).map(|definition| definition.kind)
    }

    fn get_allowed_values(&self, name: &str) -> &[ParamValue] {
        self.parameters
            .get(name)
            .map(|definition| definition.allowed.as_slice())
            .unwrap_or_default()
    }

    fn get_min_value(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).and_then(|definition| definition.min)
    }

    fn get_max_value(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).and_then(|definition| definition.max)
    }

    fn get_default_value(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(name).map(|definition| &definition.default)
    }

    fn get_patterns(&self, name: &str) -> &[String] {
        self.parameters
            .get(name)
            .map(|definition| definition.patterns.as_slice())
            .unwrap_or_default()
    }
}
