use crate::core::domain::model::{metric_value::MetricValue, server_descriptor::Attributes};
use std::fmt;

/// The three metrics exposed per server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Status,
    /// Memory in gigabytes.
    Memory,
    /// CPU usage as reported upstream (percent).
    Cpu,
}

impl MetricKind {
    /// Suffix used in unique ids.
    pub fn key(&self) -> &'static str {
        match self {
            MetricKind::Status => "status",
            MetricKind::Memory => "memory",
            MetricKind::Cpu => "cpu",
        }
    }

    /// Suffix used in display names.
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Status => "Status",
            MetricKind::Memory => "Memory",
            MetricKind::Cpu => "CPU",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One metric as the host platform sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    kind: MetricKind,
    unique_id: String,
    name: String,
    value: MetricValue,
}

impl Metric {
    /// Builds a metric with an unset state.
    ///
    /// The unique id is `{prefix}_{server_id}_{kind}` and the name
    /// `"{Prefix} {server_name} {Kind}"`.
    pub fn new(
        kind: MetricKind,
        prefix: &str,
        server_id: &str,
        server_name: &str,
        attributes: Attributes,
    ) -> Self {
        Self {
            kind,
            unique_id: format!("{}_{}_{}", prefix, server_id, kind.key()),
            name: format!("{} {} {}", capitalize(prefix), server_name, kind.label()),
            value: MetricValue::new(attributes),
        }
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current state, `None` until first set.
    pub fn state(&self) -> Option<&str> {
        self.value.state()
    }

    pub fn attributes(&self) -> &Attributes {
        self.value.attributes()
    }

    pub fn value(&self) -> &MetricValue {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut MetricValue {
        &mut self.value
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
