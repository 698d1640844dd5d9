//! Metadata component types and Tooling API helpers for reading them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata types the gateway can retrieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataType {
    CustomObject,
    Flow,
    FlowDefinition,
    CustomField,
    ValidationRule,
    ApexClass,
    ApexTrigger,
    WorkflowRule,
    Layout,
}

impl MetadataType {
    /// Every supported type, in the order advertised to clients.
    pub const ALL: [MetadataType; 9] = [
        Self::CustomObject,
        Self::Flow,
        Self::FlowDefinition,
        Self::CustomField,
        Self::ValidationRule,
        Self::ApexClass,
        Self::ApexTrigger,
        Self::WorkflowRule,
        Self::Layout,
    ];

    /// The Salesforce API name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CustomObject => "CustomObject",
            Self::Flow => "Flow",
            Self::FlowDefinition => "FlowDefinition",
            Self::CustomField => "CustomField",
            Self::ValidationRule => "ValidationRule",
            Self::ApexClass => "ApexClass",
            Self::ApexTrigger => "ApexTrigger",
            Self::WorkflowRule => "WorkflowRule",
            Self::Layout => "Layout",
        }
    }
}

impl fmt::Display for MetadataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an sObject API name denotes a user-defined (custom) object.
pub fn is_custom_object(object_name: &str) -> bool {
    object_name.ends_with("__c")
}

/// Builds the single-row Tooling query that reads one component.
pub(crate) fn component_query(kind: MetadataType, full_name: &str) -> String {
    format!(
        "SELECT Id, FullName, Metadata FROM {kind} WHERE FullName = '{}'",
        escape_soql_literal(full_name)
    )
}

/// Turns a Tooling query result into a component object.
///
/// The component is the record's `Metadata` body with `fullName` added.
/// Returns `Value::Null` when no record matched.
pub(crate) fn component_from_result(result: &Value) -> Value {
    let Some(record) = result
        .get("records")
        .and_then(Value::as_array)
        .and_then(|records| records.first())
    else {
        return Value::Null;
    };

    let mut component = match record.get("Metadata") {
        Some(Value::Object(body)) => body.clone(),
        _ => serde_json::Map::new(),
    };
    if let Some(full_name) = record.get("FullName") {
        component.insert("fullName".to_string(), full_name.clone());
    }
    Value::Object(component)
}

fn escape_soql_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '\'') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
