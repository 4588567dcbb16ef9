use crate::core::domain::model::server_descriptor::Attributes;

/// The exposed value of one metric plus its attributes.
///
/// `state` is `None` until the first successful refresh (or fallback).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricValue {
    state: Option<String>,
    attributes: Attributes,
}

impl MetricValue {
    pub fn new(attributes: Attributes) -> Self {
        Self {
            state: None,
            attributes,
        }
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub(crate) fn set_state(&mut self, state: Option<String>) {
        self.state = state;
    }

    /// Inserts or overwrites attributes; existing keys not in `extra` are kept.
    pub(crate) fn merge_attributes(&mut self, extra: Attributes) {
        self.attributes.extend(extra);
    }
}
