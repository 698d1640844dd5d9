//! Capability traits for Salesforce access.
//!
//! The dispatcher only depends on these traits, so tests can substitute a
//! recording fake for the network-backed [`RestConnector`](crate::RestConnector).

use async_trait::async_trait;
use serde_json::Value;

use crate::credentials::Credentials;
use crate::error::SalesforceError;
use crate::metadata::{self, MetadataType};

/// Establishes authenticated sessions.
#[async_trait]
pub trait SalesforceConnector: Send + Sync {
    /// Logs in with the given credentials and returns a fresh session.
    ///
    /// Every call performs a new login; sessions are never cached.
    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn SalesforceSession>, SalesforceError>;
}

/// An authenticated session, valid for the lifetime of one request.
#[async_trait]
pub trait SalesforceSession: Send + Sync {
    /// Runs a SOQL query against the data API and returns the raw result.
    async fn query(&self, soql: &str) -> Result<Value, SalesforceError>;

    /// Runs a query against the Tooling API and returns the raw result.
    async fn tooling_query(&self, soql: &str) -> Result<Value, SalesforceError>;

    /// Returns the describe result for an sObject.
    async fn describe_object(&self, object_name: &str) -> Result<Value, SalesforceError>;

    /// Reads the named metadata components of one type.
    ///
    /// One Tooling query is issued per name, sequentially. A single name
    /// yields a single component (or `null` when it does not exist); any
    /// other count yields an array.
    async fn read_metadata(
        &self,
        kind: MetadataType,
        full_names: &[String],
    ) -> Result<Value, SalesforceError> {
        let mut components = Vec::with_capacity(full_names.len());
        for full_name in full_names {
            let result = self
                .tooling_query(&metadata::component_query(kind, full_name))
                .await?;
            components.push(metadata::component_from_result(&result));
        }

        if components.len() == 1 {
            Ok(components.remove(0))
        } else {
            Ok(Value::Array(components))
        }
    }
}
