//! The fixed set of Salesforce operations exposed through `tools/*`.

use serde::Deserialize;
use serde_json::{json, Value};

use sfgate_protocol::mcp::tools::McpToolDefinition;
use sfgate_protocol::schema::{validate_arguments, SchemaError};
use sfgate_salesforce::metadata::is_custom_object;
use sfgate_salesforce::{MetadataType, SalesforceError, SalesforceSession};

/// A registered operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Query,
    ToolingQuery,
    DescribeObject,
    MetadataRetrieve,
}

impl Tool {
    /// Every operation, in the order advertised by `tools/list`.
    pub const ALL: [Tool; 4] = [
        Self::Query,
        Self::ToolingQuery,
        Self::DescribeObject,
        Self::MetadataRetrieve,
    ];

    /// Looks up an operation by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::ToolingQuery => "tooling-query",
            Self::DescribeObject => "describe-object",
            Self::MetadataRetrieve => "metadata-retrieve",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Query => "Execute a SOQL query against Salesforce data",
            Self::ToolingQuery => "Execute a query against the Salesforce Tooling API",
            Self::DescribeObject => {
                "Get metadata for a Salesforce object, optionally including its \
                 CustomObject definition"
            }
            Self::MetadataRetrieve => "Retrieve metadata components from Salesforce",
        }
    }

    /// JSON Schema for the operation's `arguments`.
    pub fn input_schema(self) -> Value {
        match self {
            Self::Query => json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "SOQL query to execute"}
                },
                "required": ["query"]
            }),
            Self::ToolingQuery => json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Tooling API query to execute"}
                },
                "required": ["query"]
            }),
            Self::DescribeObject => json!({
                "type": "object",
                "properties": {
                    "objectName": {
                        "type": "string",
                        "description": "API name of the object"
                    },
                    "detailed": {
                        "type": "boolean",
                        "description": "Include CustomObject metadata for custom objects",
                        "default": false
                    }
                },
                "required": ["objectName"]
            }),
            Self::MetadataRetrieve => {
                let types: Vec<&str> = MetadataType::ALL.iter().map(|t| t.as_str()).collect();
                json!({
                    "type": "object",
                    "properties": {
                        "type": {
                            "type": "string",
                            "enum": types,
                            "description": "Metadata type to retrieve"
                        },
                        "fullNames": {
                            "type": "array",
                            "items": {"type": "string"},
                            "description": "Full names of the components to retrieve"
                        }
                    },
                    "required": ["type", "fullNames"]
                })
            }
        }
    }

    /// The `tools/list` entry for this operation.
    pub fn definition(self) -> McpToolDefinition {
        McpToolDefinition {
            name: self.name().to_string(),
            description: Some(self.description().to_string()),
            input_schema: self.input_schema(),
        }
    }

    /// Validates `arguments` and converts them into a typed call.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ValidationFailed`] if the arguments do not match
    /// [`Tool::input_schema`].
    pub fn parse_call(self, arguments: &Value) -> Result<ToolCall, SchemaError> {
        validate_arguments(&self.input_schema(), arguments)?;

        let call = match self {
            Self::Query => ToolCall::Query {
                query: typed::<QueryArgs>(arguments)?.query,
            },
            Self::ToolingQuery => ToolCall::ToolingQuery {
                query: typed::<QueryArgs>(arguments)?.query,
            },
            Self::DescribeObject => {
                let args = typed::<DescribeArgs>(arguments)?;
                ToolCall::DescribeObject {
                    object_name: args.object_name,
                    detailed: args.detailed,
                }
            }
            Self::MetadataRetrieve => {
                let args = typed::<RetrieveArgs>(arguments)?;
                ToolCall::MetadataRetrieve {
                    kind: args.kind,
                    full_names: args.full_names,
                }
            }
        };
        Ok(call)
    }
}

/// Definitions of every operation, for `tools/list` and `GET /tools`.
pub fn definitions() -> Vec<McpToolDefinition> {
    Tool::ALL.into_iter().map(Tool::definition).collect()
}

/// A validated invocation with typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    Query {
        query: String,
    },
    ToolingQuery {
        query: String,
    },
    DescribeObject {
        object_name: String,
        detailed: bool,
    },
    MetadataRetrieve {
        kind: MetadataType,
        full_names: Vec<String>,
    },
}

impl ToolCall {
    /// Runs the call against a logged-in session and returns the raw result.
    pub async fn invoke(&self, session: &dyn SalesforceSession) -> Result<Value, SalesforceError> {
        match self {
            Self::Query { query } => session.query(query).await,
            Self::ToolingQuery { query } => session.tooling_query(query).await,
            Self::DescribeObject {
                object_name,
                detailed,
            } if *detailed && is_custom_object(object_name) => {
                let names = [object_name.clone()];
                let (describe, metadata) = tokio::join!(
                    session.describe_object(object_name),
                    session.read_metadata(MetadataType::CustomObject, &names),
                );
                Ok(merge_metadata(describe?, metadata?))
            }
            Self::DescribeObject { object_name, .. } => {
                session.describe_object(object_name).await
            }
            Self::MetadataRetrieve { kind, full_names } => {
                session.read_metadata(*kind, full_names).await
            }
        }
    }
}

/// Adds the metadata component to a describe result under `"metadata"`.
fn merge_metadata(describe: Value, metadata: Value) -> Value {
    match describe {
        Value::Object(mut map) => {
            map.insert("metadata".to_string(), metadata);
            Value::Object(map)
        }
        other => json!({"describe": other, "metadata": metadata}),
    }
}

#[derive(Deserialize)]
struct QueryArgs {
    query: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeArgs {
    object_name: String,
    #[serde(default)]
    detailed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RetrieveArgs {
    #[serde(rename = "type")]
    kind: MetadataType,
    full_names: Vec<String>,
}

fn typed<T: serde::de::DeserializeOwned>(arguments: &Value) -> Result<T, SchemaError> {
    T::deserialize(arguments).map_err(|e| SchemaError::ValidationFailed {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name("delete-everything"), None);
    }

    #[test]
    fn definitions_cover_all_tools() {
        let defs = definitions();
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            ["query", "tooling-query", "describe-object", "metadata-retrieve"]
        );
        assert!(defs.iter().all(|d| d.input_schema["type"] == "object"));
    }

    #[test]
    fn retrieve_schema_lists_every_metadata_type() {
        let schema = Tool::MetadataRetrieve.input_schema();
        let allowed = schema["properties"]["type"]["enum"]
            .as_array()
            .expect("enum");
        assert_eq!(allowed.len(), 9);
        assert!(allowed.contains(&json!("ValidationRule")));
    }

    #[test]
    fn parse_describe_defaults_detailed_to_false() {
        let call = Tool::DescribeObject
            .parse_call(&json!({"objectName": "Account"}))
            .expect("valid");
        assert_eq!(
            call,
            ToolCall::DescribeObject {
                object_name: "Account".into(),
                detailed: false
            }
        );
    }

    #[test]
    fn parse_retrieve_typed() {
        let call = Tool::MetadataRetrieve
            .parse_call(&json!({"type": "Flow", "fullNames": ["A", "B"]}))
            .expect("valid");
        assert_eq!(
            call,
            ToolCall::MetadataRetrieve {
                kind: MetadataType::Flow,
                full_names: vec!["A".into(), "B".into()]
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_metadata_type() {
        let err = Tool::MetadataRetrieve
            .parse_call(&json!({"type": "Dashboard", "fullNames": ["A"]}))
            .expect_err("invalid");
        assert!(err.to_string().contains("must be one of"));
    }

    #[test]
    fn parse_rejects_wrong_types() {
        assert!(Tool::Query.parse_call(&json!({"query": 42})).is_err());
        assert!(Tool::Query.parse_call(&json!({})).is_err());
        assert!(Tool::DescribeObject
            .parse_call(&json!({"objectName": "Account", "detailed": "yes"}))
            .is_err());
        assert!(Tool::MetadataRetrieve
            .parse_call(&json!({"type": "Flow", "fullNames": "A"}))
            .is_err());
    }

    #[test]
    fn merge_adds_metadata_key() {
        let merged = merge_metadata(json!({"name": "Thing__c"}), json!({"fullName": "Thing__c"}));
        assert_eq!(merged["name"], "Thing__c");
        assert_eq!(merged["metadata"]["fullName"], "Thing__c");
    }
}
