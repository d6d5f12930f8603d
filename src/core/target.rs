use super::value::{ParamValue, ValueKind};

/// Read-only view of a parameter store that rules are evaluated against.
///
/// Implementors own their parameters; rule nodes never hold on to a target
/// and only read through this contract while validating.
pub trait Target {
    /// Type name used when generating rule names (e.g. `CanvasTitle`).
    fn type_name(&self) -> &str;

    /// Names of every exposed parameter, in the store's order.
    fn parameter_names(&self) -> Vec<&str>;

    /// Current value of the named parameter, `None` when it is not exposed.
    fn get_parameter(&self, name: &str) -> Option<&ParamValue>;

    fn get_type(&self, name: &str) -> Option<ValueKind>;

    /// Allowed values for the parameter; empty when unrestricted.
    fn get_allowed_values(&self, name: &str) -> &[ParamValue];

    fn get_min_value(&self, name: &str) -> Option<f64>;

    fn get_max_value(&self, name: &str) -> Option<f64>;

    fn get_default_value(&self, name: &str) -> Option<&ParamValue>;

    /// Regex patterns the value must match (at least one); empty when unrestricted.
    fn get_patterns(&self, _name: &str) -> &[String] {
        &[]
    }

    fn has_parameter(&self, name: &str) -> bool {
        self.get_parameter(name).is_some()
    }
}
