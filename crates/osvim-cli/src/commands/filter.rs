use anyhow::Result;
use osvim_core::PropertyCollection;
use osvim_engine::filter_used_properties;
use std::path::Path;

use super::read_input;

pub fn handle(template: &Path, properties: &Path) -> Result<()> {
    let template = read_input(template)?;
    let properties = PropertyCollection::from_json_str(&read_input(properties)?)?;

    let used = filter_used_properties(&template, &properties)?;
    println!("{}", serde_json::to_string_pretty(&used)?);

    Ok(())
}
