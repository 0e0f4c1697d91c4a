// Design capture CLI
//
// Opens a design page in an authenticated browser session and writes it out
// as a single HTML document with its fonts, styles and images embedded.

use anyhow::Result;
use clap::{CommandFactory, Parser, error::ErrorKind};
use kodegen_tools_design_capture::{Cli, ConvertError, convert_design};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let args = match cli.resolve() {
        Ok(args) => args,
        Err(e) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, e)
            .exit(),
    };

    let config = cli.to_config(args)?;

    match convert_design(&config).await {
        Ok(report) => {
            println!("{}", report.output_path.display());
            for src in &report.image_failures {
                eprintln!("warning: could not inline {src}");
            }
            Ok(())
        }
        Err(e @ ConvertError::CookieFileNotFound(_)) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
