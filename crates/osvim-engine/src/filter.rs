//! Property filter
//!
//! Maps the parameters a template declares to values taken from the caller's
//! property collection. Properties the template does not declare are
//! dropped; declared parameters that cannot be resolved are left out and it
//! is up to Heat to reject the stack if one of them was required.

use std::collections::BTreeMap;

use osvim_core::{KeyProperty, PropertyCollection, Result, Template, TypedProperty, UsedProperties};
use serde_json::Value;
use tracing::debug;

pub const PUBLIC_KEY_SUFFIX: &str = "_public";
pub const PRIVATE_KEY_SUFFIX: &str = "_private";

/// How a declared parameter is looked up in a typed collection.
///
/// Rules are tried in [`ResolutionRule::PRIORITY`] order and the first rule
/// that applies decides the outcome, even when it resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule {
    /// The parameter name is itself a property
    Direct,
    /// `<key>_public` reads the public half of key `<key>`
    PublicKey,
    /// `<key>_private` reads the private half of key `<key>`
    PrivateKey,
}

impl ResolutionRule {
    pub const PRIORITY: [Self; 3] = [Self::Direct, Self::PublicKey, Self::PrivateKey];

    pub fn applies(self, param: &str, props: &BTreeMap<String, TypedProperty>) -> bool {
        match self {
            Self::Direct => props.contains_key(param),
            Self::PublicKey => param.ends_with(PUBLIC_KEY_SUFFIX),
            Self::PrivateKey => param.ends_with(PRIVATE_KEY_SUFFIX),
        }
    }

    pub fn resolve(self, param: &str, props: &BTreeMap<String, TypedProperty>) -> Option<Value> {
        match self {
            Self::Direct => match props.get(param)? {
                TypedProperty::Key(key) => key.key_name.clone(),
                TypedProperty::Value { value, .. } => value.clone(),
            },
            Self::PublicKey => key_half(param, PUBLIC_KEY_SUFFIX, props, |key| {
                key.public_key.as_ref()
            }),
            Self::PrivateKey => key_half(param, PRIVATE_KEY_SUFFIX, props, |key| {
                key.private_key.as_ref()
            }),
        }
    }
}

/// Resolve one parameter against a typed collection.
///
/// Returns the rule that claimed the parameter along with what it resolved
/// to, or `None` when no rule applies.
pub fn resolve_parameter(
    param: &str,
    props: &BTreeMap<String, TypedProperty>,
) -> Option<(ResolutionRule, Option<Value>)> {
    ResolutionRule::PRIORITY
        .into_iter()
        .find(|rule| rule.applies(param, props))
        .map(|rule| (rule, rule.resolve(param, props)))
}

/// Parse a template and keep only the properties it consumes
pub fn filter_used_properties(
    template_text: &str,
    properties: &PropertyCollection,
) -> Result<UsedProperties> {
    let template = Template::parse(template_text)?;
    Ok(filter_template_properties(&template, properties))
}

pub fn filter_template_properties(
    template: &Template,
    properties: &PropertyCollection,
) -> UsedProperties {
    if !template.has_parameters() {
        debug!("Template declares no parameters");
        return UsedProperties::new();
    }

    let used = match properties {
        PropertyCollection::Flat(props) => filter_flat(template, props),
        PropertyCollection::Typed(props) => filter_typed(template, props),
    };

    debug!(
        "Using {} of {} supplied properties",
        used.len(),
        properties.len()
    );
    used
}

fn filter_flat(template: &Template, props: &BTreeMap<String, Value>) -> UsedProperties {
    template
        .parameter_names()
        .filter_map(|param| props.get(param).map(|value| (param, value.clone())))
        .collect()
}

fn filter_typed(template: &Template, props: &BTreeMap<String, TypedProperty>) -> UsedProperties {
    let mut used = UsedProperties::new();

    for param in template.parameter_names() {
        match resolve_parameter(param, props) {
            Some((_, Some(value))) => used.insert(param, value),
            Some((rule, None)) => {
                debug!("Parameter {} claimed by {:?} but has no value, omitting", param, rule)
            }
            None => debug!("No property supplied for parameter {}", param),
        }
    }

    used
}

fn key_half(
    param: &str,
    suffix: &str,
    props: &BTreeMap<String, TypedProperty>,
    half: fn(&KeyProperty) -> Option<&Value>,
) -> Option<Value> {
    let base = param.strip_suffix(suffix)?;
    props.get(base)?.as_key().and_then(half).cloned()
}
