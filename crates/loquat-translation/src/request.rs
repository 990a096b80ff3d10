//! Translation request container
//!
//! A request groups named operations handed to a provider in one go, plus a
//! string property bag that tunes provider behavior.

use crate::operation::TranslationOperation;
use std::collections::HashMap;

/// Property forcing execution of operations whose result is already known
pub const PROPERTY_FORCE: &str = "request.translation.force";

/// A named batch of translation operations
#[derive(Debug, Clone, Default)]
pub struct TranslationRequest {
    name: String,
    operations: Vec<TranslationOperation>,
    properties: HashMap<String, String>,
}

impl TranslationRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
            properties: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_operation(&mut self, operation: TranslationOperation) {
        self.operations.push(operation);
    }

    /// Builder-style variant of [`add_operation`](Self::add_operation)
    pub fn with_operation(mut self, operation: TranslationOperation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn operations(&self) -> &[TranslationOperation] {
        &self.operations
    }

    pub fn operations_mut(&mut self) -> &mut [TranslationOperation] {
        &mut self.operations
    }

    /// Move the single operation out of a one-shot request
    pub fn into_single_operation(mut self) -> Option<TranslationOperation> {
        if self.operations.len() == 1 {
            self.operations.pop()
        } else {
            None
        }
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Whether the force property is set to a truthy value
    pub fn is_forced(&self) -> bool {
        self.property(PROPERTY_FORCE)
            .map(|value| value.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Apply request properties to the contained operations. A forced
    /// request resurrects invalidated operations so they hit the network.
    pub fn evaluate_properties(&mut self) {
        if self.is_forced() {
            for operation in &mut self.operations {
                operation.revalidate();
            }
        }
    }
}
