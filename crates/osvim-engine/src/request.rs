//! Create-stack request preparation
//!
//! Heat receives the raw template with the filtered parameters. The copy of
//! the request that goes to the logs carries the masked template instead.

use std::collections::BTreeMap;

use osvim_core::{Error, PropertyCollection, Result, UsedProperties};
use osvim_security::SecretMasker;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::filter::filter_used_properties;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateStackRequest {
    pub stack_name: String,
    pub template: String,
    pub parameters: UsedProperties,
    pub files: BTreeMap<String, String>,
}

impl CreateStackRequest {
    pub fn prepare(
        stack_name: &str,
        template: &str,
        properties: &PropertyCollection,
        files: Option<BTreeMap<String, String>>,
    ) -> Result<Self> {
        if stack_name.trim().is_empty() {
            return Err(Error::MissingField("stack_name"));
        }
        if template.trim().is_empty() {
            return Err(Error::MissingField("template"));
        }

        let parameters = filter_used_properties(template, properties)?;
        debug!(
            "Prepared create request for stack {} with {} parameter(s)",
            stack_name,
            parameters.len()
        );

        Ok(Self {
            stack_name: stack_name.to_string(),
            template: template.to_string(),
            parameters,
            files: files.unwrap_or_default(),
        })
    }

    /// Body sent to the orchestration service
    pub fn body(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Body written to the request log, with secrets masked out of the template
    pub fn logged_body(&self, masker: &SecretMasker) -> Result<Value> {
        let mut body = self.body()?;
        body["template"] = Value::String(masker.mask(&self.template)?);
        Ok(body)
    }
}
