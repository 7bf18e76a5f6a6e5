use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use url::Url;

/// One user action applied to the page, in command-line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A click on the theme toggle control.
    ToggleTheme,
    /// A new pick in the language selector.
    SetLanguage(String),
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "toggle-theme" {
            return Ok(Action::ToggleTheme);
        }
        match s.split_once('=') {
            Some(("set-language", value)) if !value.is_empty() => {
                Ok(Action::SetLanguage(value.to_string()))
            }
            _ => Err(format!(
                "unknown action `{s}` (expected `toggle-theme` or `set-language=<id>`)"
            )),
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Server-rendered HTML page to operate on. Fetched from `--base-url` when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Operate on a built-in sample page instead of fetching or reading one.
    ///
    /// When enabled, `--input` is ignored and nothing is fetched up front; the
    /// preference endpoints are still called.
    #[arg(long)]
    pub sample_page: bool,

    /// Base URL of the server that stores the preferences (e.g. `https://portal.example.com`).
    #[arg(long)]
    pub base_url: Url,

    /// Path of the theme update endpoint, resolved against `--base-url`.
    #[arg(long, default_value = "/update_theme")]
    pub theme_endpoint: String,

    /// Path of the language update endpoint, resolved against `--base-url`.
    #[arg(long, default_value = "/update_language")]
    pub language_endpoint: String,

    /// Action to apply: `toggle-theme` or `set-language=<id>`. Repeatable; applied in order.
    #[arg(long = "action")]
    pub actions: Vec<Action>,

    /// Where to write the resulting page. Prints to stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// HTTP User-Agent used for all requests.
    #[arg(long, default_value = "pref-sync/0.1")]
    pub user_agent: String,

    /// Per-request timeout in seconds. Requests wait indefinitely when omitted.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
