use anyhow::{Context, Result};
use osvim_config::Config;
use osvim_core::PropertyCollection;
use osvim_engine::CreateStackRequest;
use std::collections::BTreeMap;
use std::path::Path;

use super::{masker, read_input};

pub fn handle(
    stack_name: &str,
    template: &Path,
    properties: Option<&Path>,
    files: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let template = read_input(template)?;

    let properties = match properties {
        Some(path) => PropertyCollection::from_json_str(&read_input(path)?)?,
        None => PropertyCollection::Flat(BTreeMap::new()),
    };

    let files: Option<BTreeMap<String, String>> = match files {
        Some(path) => Some(
            serde_json::from_str(&read_input(path)?)
                .with_context(|| format!("Invalid files document {}", path.display()))?,
        ),
        None => None,
    };

    let request = CreateStackRequest::prepare(stack_name, &template, &properties, files)?;
    let logged = request.logged_body(&masker(config, None))?;
    println!("{}", serde_json::to_string_pretty(&logged)?);

    Ok(())
}
