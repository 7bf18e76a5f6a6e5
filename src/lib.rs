mod ack;
mod check;
mod cli;
mod client;
mod controller;
mod page;
mod sample;
mod theme;

use std::time::Duration;

use anyhow::Context as _;
use cli::Args;
use client::PrefClient;
use controller::{PageSource, PreferenceToggler};
use page::Page;

pub use cli::{Action, Args as CliArgs};
pub use theme::Theme;

pub async fn run(args: Args) -> anyhow::Result<()> {
    let client = PrefClient::new(
        &args.base_url,
        &args.theme_endpoint,
        &args.language_endpoint,
        &args.user_agent,
        args.timeout_secs.map(Duration::from_secs),
    )?;

    let (html, source) = if args.sample_page {
        if args.input.is_some() {
            tracing::warn!("--sample-page is set; ignoring --input");
        }
        let html = sample::sample_page(Theme::Light, sample::LANGUAGES, sample::DEFAULT_LANGUAGE);
        (html, PageSource::Sample)
    } else if let Some(path) = &args.input {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        (html, PageSource::File(path.clone()))
    } else {
        (client.fetch_page().await?, PageSource::Remote)
    };

    let mut toggler = PreferenceToggler::new(Page::parse(&html), client, source);

    for action in &args.actions {
        match action {
            Action::ToggleTheme => {
                toggler.toggle_theme().await;
            }
            Action::SetLanguage(language) => {
                toggler.change_language(language).await?;
            }
        }
    }

    check::assert_page_consistent(toggler.page())?;
    let html = toggler.page().to_html()?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, html).with_context(|| format!("write {}", path.display()))?;
        }
        None => {
            use std::io::Write as _;
            std::io::stdout()
                .write_all(html.as_bytes())
                .context("write page to stdout")?;
        }
    }

    Ok(())
}
