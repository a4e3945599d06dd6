use dialoguer::{theme::ColorfulTheme, Input};
use log::debug;
use wpdl_common::SiteUrl;

use crate::error::CliError;

const SITE_PROMPT: &str = "Enter WordPress site URL (e.g., https://example.com)";

/// Turns the `SITE` argument into a site root, asking for it on the terminal when absent.
pub fn resolve_site(arg: Option<&str>) -> Result<SiteUrl, CliError> {
    let input = match arg {
        Some(site) => site.to_string(),
        None => prompt_site()?,
    };

    debug!("Site input: {input:?}");
    Ok(SiteUrl::from_input(&input)?)
}

fn prompt_site() -> Result<String, CliError> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(SITE_PROMPT)
        .allow_empty(true)
        .interact_text()?;
    Ok(input)
}

#[cfg(test)]
mod test {
    use super::*;
    use wpdl_common::error::SiteUrlError;

    #[test]
    fn argument_skips_prompt() {
        let site = resolve_site(Some("example.com")).unwrap();
        assert_eq!(site.as_str(), "https://example.com");
    }

    #[test]
    fn blank_argument_is_rejected() {
        let result = resolve_site(Some("  "));
        assert!(matches!(
            result,
            Err(CliError::InvalidSite {
                source: SiteUrlError::Empty
            })
        ));
    }
}
