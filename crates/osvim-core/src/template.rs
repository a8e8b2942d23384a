//! Heat orchestration template model
//!
//! Only the two sections the driver reasons about are kept: `parameters`
//! (the declared inputs) and `resources`. Everything else in the document is
//! left to the orchestration engine.

use serde_yaml::{Mapping, Value};

use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct Template {
    parameters: Option<Mapping>,
    resources: Option<Mapping>,
}

impl Template {
    /// Parse a template from its YAML serialization.
    ///
    /// Malformed YAML is an error. An empty document, a non-mapping root or
    /// a section of the wrong shape all read as a template without that
    /// section.
    pub fn parse(text: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(text)?;
        Ok(Self::from_value(document))
    }

    pub fn from_value(document: Value) -> Self {
        let Value::Mapping(mut root) = document else {
            return Self::default();
        };

        Self {
            parameters: take_section(&mut root, "parameters"),
            resources: take_section(&mut root, "resources"),
        }
    }

    pub fn has_parameters(&self) -> bool {
        self.parameters.is_some()
    }

    /// Declared parameter names, in document order
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .flat_map(|params| params.keys())
            .filter_map(Value::as_str)
    }

    /// Definition of a declared parameter (type, description, constraints...)
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.as_ref()?.get(name)
    }

    /// `resources.<resource>.properties.<property>`
    pub fn resource_property(&self, resource: &str, property: &str) -> Option<&Value> {
        self.resources
            .as_ref()?
            .get(resource)?
            .get("properties")?
            .get(property)
    }
}

fn take_section(root: &mut Mapping, name: &str) -> Option<Mapping> {
    match root.remove(name)? {
        Value::Mapping(section) => Some(section),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_parameters() {
        let template = Template::parse(
            r#"
heat_template_version: 2013-05-23
parameters:
  image:
    type: string
  flavor:
    type: string
    default: m1.small
"#,
        )
        .unwrap();

        assert!(template.has_parameters());
        let names: Vec<_> = template.parameter_names().collect();
        assert_eq!(names, vec!["image", "flavor"]);
        assert_eq!(
            template.parameter("flavor").and_then(|p| p.get("type")),
            Some(&Value::String("string".to_string()))
        );
    }

    #[test]
    fn test_indented_document() {
        let template = Template::parse(
            "\n        parameters: \n          propA: \n            type: string\n",
        )
        .unwrap();

        assert_eq!(template.parameter_names().collect::<Vec<_>>(), vec!["propA"]);
    }

    #[test]
    fn test_missing_sections() {
        let template = Template::parse("description: nothing declared\n").unwrap();
        assert!(!template.has_parameters());
        assert_eq!(template.parameter_names().count(), 0);
        assert!(template.resource_property("server", "user_data").is_none());
    }

    #[test]
    fn test_empty_document() {
        let template = Template::parse("").unwrap();
        assert!(!template.has_parameters());
    }

    #[test]
    fn test_non_mapping_sections_are_absent() {
        let template = Template::parse("parameters:\n  - a\n  - b\n").unwrap();
        assert!(!template.has_parameters());

        let template = Template::parse("- just\n- a list\n").unwrap();
        assert!(!template.has_parameters());
    }

    #[test]
    fn test_non_string_parameter_names_ignored() {
        let template = Template::parse("parameters:\n  1:\n    type: number\n  name:\n    type: string\n")
            .unwrap();
        assert_eq!(template.parameter_names().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_resource_property() {
        let template = Template::parse(
            r#"
resources:
  apache_server:
    type: OS::Nova::Server
    properties:
      user_data: |
        #cloud-config
"#,
        )
        .unwrap();

        assert_eq!(
            template
                .resource_property("apache_server", "user_data")
                .and_then(Value::as_str),
            Some("#cloud-config\n")
        );
        assert!(template.resource_property("other_server", "user_data").is_none());
        assert!(template.resource_property("apache_server", "name").is_none());
    }

    #[test]
    fn test_malformed_template() {
        let result = Template::parse("parameters: [unterminated\n");
        assert!(matches!(result, Err(crate::Error::TemplateParse(_))));
    }
}
