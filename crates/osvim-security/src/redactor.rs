//! Masking of `password:` values in a template's bootstrap text

use std::ops::Range;

use lazy_static::lazy_static;
use osvim_core::{Result, Template};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::{debug, warn};

use crate::scalar::{Unit, units};
use crate::span::value_span;

pub const DEFAULT_SECRET_RESOURCE: &str = "apache_server";
pub const DEFAULT_SECRET_FIELD: &str = "user_data";
pub const DEFAULT_MASK_CHAR: char = '*';

lazy_static! {
    /// `password:` up to the next newline, case-insensitive. Group 1 is the secret.
    static ref PASSWORD_PATTERN: Regex = Regex::new(r"(?is)password:(.*?)\n").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingInfo {
    pub resource: String,
    pub field: String,
    pub count: usize,
}

/// Masks `password:` values found in one resource's bootstrap text.
///
/// Only `resources.<resource>.properties.<field>` is inspected. Secrets are
/// masked in place inside that field's raw text, so every byte outside the
/// masked characters survives untouched.
#[derive(Debug, Clone)]
pub struct SecretMasker {
    resource: String,
    field: String,
    mask_char: char,
}

impl SecretMasker {
    pub fn new() -> Self {
        Self {
            resource: DEFAULT_SECRET_RESOURCE.to_string(),
            field: DEFAULT_SECRET_FIELD.to_string(),
            mask_char: DEFAULT_MASK_CHAR,
        }
    }

    pub fn for_resource(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::new()
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Mask secrets in a template, returning the redacted text
    pub fn mask(&self, template_text: &str) -> Result<String> {
        self.mask_with_info(template_text).map(|(masked, _)| masked)
    }

    /// Mask secrets in a template and report how many were masked
    pub fn mask_with_info(&self, template_text: &str) -> Result<(String, MaskingInfo)> {
        let template = Template::parse(template_text)?;

        let field = template
            .resource_property(&self.resource, &self.field)
            .and_then(Value::as_str)
            .unwrap_or_default();
        let secrets = self.secret_spans(field);

        let masked = if secrets.is_empty() {
            template_text.to_string()
        } else {
            let masks = self.raw_masks(template_text, field, &secrets);
            apply_masks(template_text, masks, self.mask_char)
        };

        debug!(
            "Masked {} secret(s) in {}.properties.{}",
            secrets.len(),
            self.resource,
            self.field
        );

        Ok((
            masked,
            MaskingInfo {
                resource: self.resource.clone(),
                field: self.field.clone(),
                count: secrets.len(),
            },
        ))
    }

    /// Byte ranges of the secrets in the parsed field that still need masking
    fn secret_spans(&self, field: &str) -> Vec<Range<usize>> {
        PASSWORD_PATTERN
            .captures_iter(field)
            .filter_map(|caps| caps.get(1))
            .filter(|m| !m.as_str().chars().all(|c| c == self.mask_char))
            .map(|m| m.range())
            .collect()
    }

    /// Raw template ranges encoding the secrets of the parsed field
    fn raw_masks(
        &self,
        template_text: &str,
        field: &str,
        secrets: &[Range<usize>],
    ) -> Vec<Range<usize>> {
        let path = ["resources", self.resource.as_str(), "properties", self.field.as_str()];

        let Some(span) = value_span(template_text, &path) else {
            warn!(
                "{}.properties.{} is not laid out as block mappings, masking secrets wherever they appear",
                self.resource, self.field
            );
            return word_masks(template_text, 0..template_text.len(), field, secrets);
        };

        match align(field, secrets, &units(&template_text[span.clone()])) {
            Some(masks) => masks
                .into_iter()
                .map(|mask| span.start + mask.start..span.start + mask.end)
                .collect(),
            None => {
                warn!(
                    "Could not trace {}.properties.{} back to the template text, masking secrets within the field",
                    self.resource, self.field
                );
                word_masks(template_text, span, field, secrets)
            }
        }
    }
}

impl Default for SecretMasker {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk the parsed field alongside the raw units that produce it, collecting
/// the raw ranges behind secret characters
fn align(field: &str, secrets: &[Range<usize>], units: &[Unit]) -> Option<Vec<Range<usize>>> {
    let mut remaining = units.iter();
    let mut masks = Vec::new();

    for (at, c) in field.char_indices() {
        let unit = remaining.find(|unit| unit.produces(c))?;
        if unit.is_maskable() && secrets.iter().any(|secret| secret.contains(&at)) {
            masks.push(unit.range.clone());
        }
    }

    Some(masks)
}

/// Every occurrence of each secret word within `scope`
fn word_masks(
    text: &str,
    scope: Range<usize>,
    field: &str,
    secrets: &[Range<usize>],
) -> Vec<Range<usize>> {
    let offset = scope.start;
    let haystack = &text[scope];

    secrets
        .iter()
        .flat_map(|secret| field[secret.clone()].split_whitespace())
        .flat_map(move |word| {
            haystack
                .match_indices(word)
                .map(move |(at, found)| offset + at..offset + at + found.len())
        })
        .collect()
}

/// Replace each range with one mask character per character it covers
fn apply_masks(text: &str, mut masks: Vec<Range<usize>>, mask_char: char) -> String {
    masks.sort_by_key(|mask| mask.start);

    let mut masked = String::with_capacity(text.len());
    let mut last = 0;

    for mask in masks {
        let start = mask.start.max(last);
        if start >= mask.end {
            continue;
        }
        masked.push_str(&text[last..start]);
        masked.extend(std::iter::repeat_n(mask_char, text[start..mask.end].chars().count()));
        last = mask.end;
    }

    masked.push_str(&text[last..]);
    masked
}

/// Mask secrets in `resources.apache_server.properties.user_data`
pub fn mask_secrets(template_text: &str) -> Result<String> {
    SecretMasker::new().mask(template_text)
}

/// Mask every `password:` value in a free-text blob
pub fn mask_text(text: &str, mask_char: char) -> (String, usize) {
    let mut count = 0;
    let masked = PASSWORD_PATTERN.replace_all(text, |caps: &regex::Captures<'_>| {
        count += 1;
        let secret = caps.get(1).map_or("", |m| m.as_str());
        let mask: String = std::iter::repeat_n(mask_char, secret.chars().count()).collect();
        format!("{}{}\n", &caps[0][..caps[0].len() - secret.len() - 1], mask)
    });
    (masked.into_owned(), count)
}
