use anyhow::Result;
use osvim_config::Config;
use osvim_security::mask_text;
use std::io::Write;
use std::path::Path;
use tracing::info;

use super::{masker, read_input};

pub fn handle(template: &Path, resource: Option<String>, text: bool, config: &Config) -> Result<()> {
    let input = read_input(template)?;

    let (masked, count) = if text {
        mask_text(&input, config.redaction.mask_char)
    } else {
        let (masked, masking) = masker(config, resource).mask_with_info(&input)?;
        (masked, masking.count)
    };
    info!("Masked {} secret(s)", count);

    // Written as-is so the output matches the input byte for byte outside masked spans
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(masked.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
