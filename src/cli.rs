//! Command line interface
//!
//! Cookie file and design URL may be given as flags or positionally. The
//! flag wins when both are present, and positionals fill whichever inputs
//! their flags left unset, in order.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::DesignConfig;
use crate::error::ConvertResult;
use crate::utils::DEFAULT_OUTPUT_PATH;

/// Capture a design page as a single self-contained HTML document
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "kodegen-design-capture", version, about)]
pub struct Cli {
    /// JSON cookie export of a logged-in session
    #[arg(long = "cookies", value_name = "FILE")]
    pub cookies_flag: Option<PathBuf>,

    /// Design page to capture
    #[arg(long = "url", value_name = "URL")]
    pub url_flag: Option<String>,

    /// Cookie file, when --cookies is not given
    #[arg(value_name = "COOKIES")]
    pub cookies: Option<PathBuf>,

    /// Design URL, when --url is not given
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Where to write the assembled document
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,
}

/// Required input missing from both the flag and the positional slot
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("a cookie file is required (--cookies <FILE> or COOKIES)")]
    MissingCookies,

    #[error("a design URL is required (--url <URL> or URL)")]
    MissingUrl,
}

/// Cookie file and design URL after flag/positional resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgs {
    pub cookies: PathBuf,
    pub url: String,
}

impl Cli {
    /// Pick each required input from its flag, falling back to the positionals
    ///
    /// With only `--cookies` given, clap places the URL in the first
    /// positional slot, so the URL is taken from there.
    pub fn resolve(&self) -> Result<ResolvedArgs, CliError> {
        let cookies = self
            .cookies_flag
            .clone()
            .or_else(|| self.cookies.clone())
            .ok_or(CliError::MissingCookies)?;

        let url = match (&self.url_flag, &self.cookies_flag) {
            (Some(url), _) => Some(url.clone()),
            (None, Some(_)) => self.url.clone().or_else(|| {
                self.cookies
                    .as_ref()
                    .map(|slot| slot.to_string_lossy().into_owned())
            }),
            (None, None) => self.url.clone(),
        }
        .ok_or(CliError::MissingUrl)?;

        Ok(ResolvedArgs { cookies, url })
    }

    /// Build the run configuration from resolved arguments
    pub fn to_config(&self, args: ResolvedArgs) -> ConvertResult<DesignConfig> {
        DesignConfig::builder()
            .cookies_file(args.cookies)
            .design_url(args.url)
            .output_path(self.output.clone())
            .headless(self.headless)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.canva.com/design/DAF/view";

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("kodegen-design-capture").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_flags() {
        let cli = parse(&["--cookies", "c.json", "--url", URL]);
        let args = cli.resolve().unwrap();

        assert_eq!(args.cookies, PathBuf::from("c.json"));
        assert_eq!(args.url, URL);
        assert_eq!(cli.output, PathBuf::from("new_page.html"));
        assert!(!cli.headless);
    }

    #[test]
    fn test_positional_fallback() {
        let args = parse(&["c.json", URL]).resolve().unwrap();

        assert_eq!(args.cookies, PathBuf::from("c.json"));
        assert_eq!(args.url, URL);
    }

    #[test]
    fn test_flag_wins_over_positional() {
        let args = parse(&["--cookies", "flag.json", "pos.json", URL])
            .resolve()
            .unwrap();
        assert_eq!(args.cookies, PathBuf::from("flag.json"));
    }

    #[test]
    fn test_flag_plus_positional_cookies_flag() {
        let args = parse(&["--cookies", "c.json", URL]).resolve().unwrap();

        assert_eq!(args.cookies, PathBuf::from("c.json"));
        assert_eq!(args.url, URL);
    }

    #[test]
    fn test_flag_plus_positional_url_flag() {
        let args = parse(&["--url", URL, "c.json"]).resolve().unwrap();

        assert_eq!(args.cookies, PathBuf::from("c.json"));
        assert_eq!(args.url, URL);
    }

    #[test]
    fn test_missing_inputs() {
        assert_eq!(parse(&[]).resolve(), Err(CliError::MissingCookies));
        assert_eq!(parse(&["c.json"]).resolve(), Err(CliError::MissingUrl));
        assert_eq!(parse(&["--cookies", "c.json"]).resolve(), Err(CliError::MissingUrl));
        assert_eq!(parse(&["--url", URL]).resolve(), Err(CliError::MissingCookies));
    }

    #[test]
    fn test_to_config_carries_options() {
        let cli = parse(&["c.json", URL, "--output", "out/page.html", "--headless"]);
        let args = cli.resolve().unwrap();

        let config = cli.to_config(args).unwrap();

        assert_eq!(config.output_path(), std::path::Path::new("out/page.html"));
        assert!(config.headless());
        assert_eq!(config.design_url(), URL);
    }

    #[test]
    fn test_to_config_rejects_bad_url() {
        let cli = parse(&["c.json", "not a url"]);
        let args = cli.resolve().unwrap();

        assert!(cli.to_config(args).is_err());
    }
}
