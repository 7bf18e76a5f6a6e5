use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::page::{LANGUAGE_SELECT_ID, THEME_TOGGLE_ID};
use crate::theme::Theme;

/// Languages the sample server would offer.
pub const LANGUAGES: &[&str] = &["tr", "en", "ar"];
pub const DEFAULT_LANGUAGE: &str = "tr";

const SAMPLE_CSS: &str = r#"
:root { color-scheme: light dark; }
html { background: #fdfdfd; color: #1c1c1c; }
html[data-theme="dark"] { background: #10141a; color: #d8dee9; }
body { margin: 0; font: 16px/1.5 system-ui, sans-serif; }
.topbar { display: flex; gap: 1rem; align-items: center; padding: 0.6rem 1rem; border-bottom: 1px solid rgba(128, 128, 128, 0.35); }
.topbar a { text-decoration: none; color: inherit; }
.content { padding: 1rem; }
"#;

/// Build a minimal stand-in for a server-rendered page: root `data-theme`,
/// a theme toggle with its icon, and a language selector.
pub fn sample_page(theme: Theme, languages: &[&str], selected: &str) -> String {
    let markup: Markup = html! {
        (DOCTYPE)
        html lang=(selected) data-theme=(theme.as_str()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";
                title { "Sample page" }
                style { (PreEscaped(SAMPLE_CSS)) }
            }
            body {
                header class="topbar" {
                    a id=(THEME_TOGGLE_ID) href="#" title="Toggle theme" {
                        i class=(theme.icon_class()) {}
                    }
                    select id=(LANGUAGE_SELECT_ID) {
                        @for lang in languages {
                            option value=(lang) selected[*lang == selected] { (lang) }
                        }
                    }
                }
                main class="content" {
                    p { "Sample content rendered in " (selected) "." }
                }
            }
        }
    };
    markup.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use crate::theme::ICON_SUN;

    #[test]
    fn sample_carries_both_controls() {
        let page = Page::parse(&sample_page(Theme::Light, LANGUAGES, DEFAULT_LANGUAGE));
        assert_eq!(page.theme(), Theme::Light);
        assert!(page.theme_toggle().is_some());

        let select = page.language_select().unwrap();
        assert_eq!(select.options(), LANGUAGES);
        assert_eq!(select.value().as_deref(), Some(DEFAULT_LANGUAGE));
    }

    #[test]
    fn sample_icon_matches_theme() {
        let page = Page::parse(&sample_page(Theme::Dark, LANGUAGES, "en"));
        assert_eq!(page.theme(), Theme::Dark);
        let toggle = page.theme_toggle().unwrap();
        assert_eq!(toggle.icon_class().as_deref(), Some(ICON_SUN));
        assert_eq!(page.language_select().unwrap().value().as_deref(), Some("en"));
    }
}
