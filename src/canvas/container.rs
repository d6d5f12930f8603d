use indexmap::IndexMap;
use tracing::debug;

use crate::core::ParamValue;
use crate::error::{RulesError, RulesResult};

use super::CanvasComponent;

/// Container of canvas components, keyed by component name.
///
/// Each canvas owns its components; callers that need to share one canvas
/// pass it explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canvas {
    components: IndexMap<String, CanvasComponent>,
}

impl Canvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component, replacing any component with the same name.
    pub fn add_component(&mut self, component: CanvasComponent) -> &mut Self {
        debug!(component = component.name(), "add canvas component");
        self.components.insert(component.name().to_owned(), component);
        self
    }

    pub fn remove_component(&mut self, name: &str) -> RulesResult<CanvasComponent> {
        self.components
            .shift_remove(name)
            .ok_or_else(|| RulesError::NotFound {
                owner: "Canvas".to_owned(),
                name: name.to_owned(),
            })
    }

    #[must_use]
    pub fn component(&self, name: &str) -> Option<&CanvasComponent> {
        self.components.get(name)
    }

    pub fn component_mut(&mut self, name: &str) -> Option<&mut CanvasComponent> {
        self.components.get_mut(name)
    }

    pub fn components(&self) -> impl Iterator<Item = &CanvasComponent> {
        self.components.values()
    }

    /// All parameter values across components, flattened in insertion order.
    #[must_use]
    pub fn parameters(&self) -> IndexMap<String, ParamValue> {
        self.components
            .values()
            .flat_map(CanvasComponent::parameters)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Canvas;
    use crate::canvas::{CANVAS_TITLE, CanvasComponent, ParameterDefinition, title_component};
    use crate::core::ValueKind;

    #[test]
    fn canvas_flattens_component_parameters() {
        let mut size = CanvasComponent::new("CanvasSize");
        size.define("height", ParameterDefinition::new(ValueKind::Int, 450));

        let mut canvas = Canvas::new();
        canvas.add_component(title_component()).add_component(size);

        let parameters = canvas.parameters();
        assert_eq!(parameters.len(), 14);
        assert_eq!(parameters.keys().last().map(String::as_str), Some("height"));
    }

    #[test]
    fn removing_missing_component_fails() {
        let mut canvas = Canvas::new();
        canvas.add_component(title_component());
        canvas.remove_component(CANVAS_TITLE).expect("title present");
        let err = canvas
            .remove_component(CANVAS_TITLE)
            .expect_err("second removal must fail");
        assert!(format!("{err}").contains(CANVAS_TITLE));
    }
}
