use std::path::PathBuf;

use clap::Parser;
use wpdl_extractors::extractor_config::MAX_PER_PAGE;

use crate::config::Settings;

pub mod extra;

#[derive(Parser, Debug)]
#[clap(name = "WordPress Image Downloader", author, version, about, long_about = None)]
pub struct Cli {
    /// Address of the WordPress site (e.g. https://example.com).
    ///
    /// Asked interactively when omitted. `https://` is added if no scheme is given.
    #[clap(value_name = "SITE")]
    pub site: Option<String>,

    /// Where to save files (If the path doesn't exist, it will be created.)
    #[clap(short, long, value_name = "PATH", help_heading = "SAVE")]
    pub output: Option<PathBuf>,

    /// Read settings from this file instead of the default location
    #[clap(long, value_name = "FILE", help_heading = "GENERAL")]
    pub config: Option<PathBuf>,

    /// List the images that would be downloaded and exit
    #[clap(long, action, default_value_t = false, help_heading = "GENERAL")]
    pub dry_run: bool,

    /// User-Agent header sent with every request
    #[clap(long, value_name = "UA", help_heading = "FETCH")]
    pub user_agent: Option<String>,

    /// Number of posts requested per page
    ///
    /// [max: 100]
    #[clap(
        long,
        value_name = "NUMBER",
        value_parser(clap::value_parser!(u8).range(1..=(MAX_PER_PAGE as i64))),
        help_heading = "FETCH"
    )]
    pub per_page: Option<u8>,

    /// Pause between post list pages, in milliseconds
    #[clap(long, value_name = "MS", help_heading = "FETCH")]
    pub page_delay: Option<u64>,

    /// Pause between image downloads, in milliseconds
    #[clap(long, value_name = "MS", help_heading = "DOWNLOAD")]
    pub download_delay: Option<u64>,

    /// Timeout of a single image download, in seconds
    #[clap(
        long,
        value_name = "SECS",
        value_parser(clap::value_parser!(u64).range(1..)),
        help_heading = "DOWNLOAD"
    )]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Loads the settings file and lays the command line flags over it.
    pub fn settings(&self) -> Result<Settings, crate::error::CliError> {
        let mut settings = Settings::load(self.config.as_deref())?;
        self.apply(&mut settings);
        Ok(settings)
    }

    /// Overrides `settings` with every flag that was given.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if let Some(ua) = &self.user_agent {
            settings.fetch.user_agent = ua.clone();
        }
        if let Some(per_page) = self.per_page {
            settings.fetch.per_page = per_page;
        }
        if let Some(delay) = self.page_delay {
            settings.fetch.page_delay_ms = delay;
        }
        if let Some(delay) = self.download_delay {
            settings.download.download_delay_ms = delay;
        }
        if let Some(timeout) = self.timeout {
            settings.download.timeout_secs = timeout;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from([
            "wpdl",
            "example.com",
            "-o",
            "out",
            "--per-page",
            "50",
            "--download-delay",
            "0",
            "--timeout",
            "10",
        ]);
        let mut settings = Settings::default();
        cli.apply(&mut settings);

        assert_eq!(cli.site.as_deref(), Some("example.com"));
        assert_eq!(settings.output, PathBuf::from("out"));
        assert_eq!(settings.fetch.per_page, 50);
        assert_eq!(settings.fetch.page_delay_ms, 500);
        assert_eq!(settings.download.download_delay_ms, 0);
        assert_eq!(settings.download.timeout_secs, 10);
    }

    #[test]
    fn per_page_above_api_limit_is_rejected() {
        assert!(Cli::try_parse_from(["wpdl", "--per-page", "101"]).is_err());
    }

    #[test]
    fn site_is_optional() {
        let cli = Cli::parse_from(["wpdl", "--dry-run"]);
        assert!(cli.site.is_none());
        assert!(cli.dry_run);
    }
}
