use std::path::PathBuf;

use anyhow::Context as _;

use crate::client::PrefClient;
use crate::page::{Page, SelectHandle, ToggleHandle};
use crate::sample;
use crate::theme::Theme;

/// Where the page came from. A confirmed language change reloads the page
/// from here, the way a browser reload re-fetches the current location.
pub enum PageSource {
    /// Served page; reload re-fetches it from the server.
    Remote,
    /// Local file; reload re-reads it.
    File(PathBuf),
    /// Built-in sample; reload regenerates it with the stored preferences.
    Sample,
}

/// Synchronizes the page's theme and language preferences with the server.
///
/// The theme is applied to the DOM optimistically, before the server
/// confirms; a language change only takes visual effect through the full
/// reload that follows confirmation.
pub struct PreferenceToggler {
    page: Page,
    toggle: Option<ToggleHandle>,
    select: Option<SelectHandle>,
    client: PrefClient,
    source: PageSource,
}

impl PreferenceToggler {
    pub fn new(page: Page, client: PrefClient, source: PageSource) -> Self {
        let mut this = Self {
            page,
            toggle: None,
            select: None,
            client,
            source,
        };
        this.wire();
        this
    }

    /// Locate the optional controls. A page without one of them simply has
    /// that preference inactive.
    fn wire(&mut self) {
        tracing::debug!(theme = %self.page.theme(), "wiring preference controls");

        self.toggle = self.page.theme_toggle();
        if self.toggle.is_none() {
            tracing::debug!("no theme toggle control; theme switching inactive");
        }

        self.select = self.page.language_select();
        if self.select.is_none() {
            tracing::debug!("no language selector; language switching inactive");
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Flip the page theme and tell the server.
    ///
    /// The DOM attribute and icon change before the request goes out and stay
    /// changed whatever the server answers. Returns the theme now shown, or
    /// None when the page has no toggle control.
    pub async fn toggle_theme(&mut self) -> Option<Theme> {
        let Some(toggle) = &self.toggle else {
            tracing::warn!("page has no theme toggle; ignoring toggle action");
            return None;
        };

        // Re-read at invocation time; the attribute is the source of truth.
        let next = self.page.theme().flipped();
        self.page.set_theme(next);
        toggle.set_icon_class(next.icon_class());

        match self.client.post_theme(next).await {
            Ok(ack) if ack.success => {
                tracing::info!(
                    theme = ack.theme.as_deref().unwrap_or(next.as_str()),
                    "theme updated"
                );
            }
            Ok(_) => {
                // Flip already applied; nothing to undo.
                tracing::warn!(theme = %next, "theme update not confirmed by server");
            }
            Err(err) => {
                tracing::error!(error = format!("{err:#}"), "error updating theme");
            }
        }

        Some(next)
    }

    /// Pick a new language and tell the server. On confirmation the page is
    /// reloaded in full so the server-rendered content reflects the change;
    /// otherwise the selector keeps showing the unconfirmed value.
    ///
    /// Returns true when the server confirmed and the page was reloaded.
    pub async fn change_language(&mut self, language: &str) -> anyhow::Result<bool> {
        let Some(select) = &self.select else {
            tracing::warn!("page has no language selector; ignoring language action");
            return Ok(false);
        };

        // The selection moves before the request, as it would in a browser.
        if !select.select(language) {
            tracing::warn!(
                language,
                options = ?select.options(),
                "language not offered by the page selector"
            );
            return Ok(false);
        }

        match self.client.post_language(language).await {
            Ok(ack) if ack.success => {
                tracing::info!(
                    language = ack.language.as_deref().unwrap_or(language),
                    "language updated; reloading page"
                );
                self.reload().await.context("reload page")?;
                Ok(true)
            }
            Ok(_) => {
                tracing::warn!(language, "language update not confirmed; keeping current page");
                Ok(false)
            }
            Err(err) => {
                tracing::error!(error = format!("{err:#}"), "error updating language");
                Ok(false)
            }
        }
    }

    async fn reload(&mut self) -> anyhow::Result<()> {
        let html = match &self.source {
            PageSource::Remote => self.client.fetch_page().await?,
            PageSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("re-read {}", path.display()))?,
            PageSource::Sample => {
                // Stand in for the server: render with the stored preferences.
                let theme = self.page.theme();
                let language = self
                    .page
                    .language_select()
                    .and_then(|select| select.value())
                    .unwrap_or_else(|| sample::DEFAULT_LANGUAGE.to_string());
                sample::sample_page(theme, sample::LANGUAGES, &language)
            }
        };
        self.page = Page::parse(&html);
        self.wire();
        Ok(())
    }
}
