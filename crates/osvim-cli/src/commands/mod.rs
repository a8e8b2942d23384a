pub mod filter;
pub mod mask;
pub mod request;

use anyhow::{Context, Result};
use osvim_config::Config;
use osvim_security::SecretMasker;
use std::io::Read;
use std::path::Path;

/// Read a file, or stdin when the path is "-"
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Build the secret masker described by the config
pub fn masker(config: &Config, resource: Option<String>) -> SecretMasker {
    let resource = resource.unwrap_or_else(|| config.redaction.resource.clone());
    SecretMasker::for_resource(resource)
        .with_field(config.redaction.field.clone())
        .with_mask_char(config.redaction.mask_char)
}
