use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "osvim")]
#[command(about = "Heat template parameter filtering and secret masking", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the template parameters a property set resolves to
    Filter {
        /// Heat template file ("-" for stdin)
        template: PathBuf,

        /// JSON property collection, flat or typed ("-" for stdin)
        properties: PathBuf,
    },

    /// Print a template with bootstrap secrets masked
    Mask {
        /// Heat template file ("-" for stdin)
        template: PathBuf,

        /// Resource holding the bootstrap text (default from config: apache_server)
        #[arg(long)]
        resource: Option<String>,

        /// Treat the input as bare bootstrap text instead of a template
        #[arg(long)]
        text: bool,
    },

    /// Print the logged body of a create-stack request
    Request {
        /// Name of the stack
        stack_name: String,

        /// Heat template file ("-" for stdin)
        template: PathBuf,

        /// JSON property collection
        #[arg(long)]
        properties: Option<PathBuf>,

        /// JSON object of additional template files
        #[arg(long)]
        files: Option<PathBuf>,
    },
}
