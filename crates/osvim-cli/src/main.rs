mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use osvim_config::Config;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Initialize tracing (stderr, stdout is reserved for command output)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Filter {
            template,
            properties,
        } => commands::filter::handle(&template, &properties),
        cli::Commands::Mask {
            template,
            resource,
            text,
        } => commands::mask::handle(&template, resource, text, &config),
        cli::Commands::Request {
            stack_name,
            template,
            properties,
            files,
        } => commands::request::handle(
            &stack_name,
            &template,
            properties.as_deref(),
            files.as_deref(),
            &config,
        ),
    }
}
