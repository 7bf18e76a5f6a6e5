use crate::page::Page;
use crate::theme::{ICON_MOON, ICON_SUN};

/// Refuse to emit a page that contradicts itself: an unrecognized theme
/// attribute, a known toggle icon pointing the wrong way, or a selector with
/// more than one selected option.
pub fn assert_page_consistent(page: &Page) -> anyhow::Result<()> {
    if let Some(attr) = page.theme_attr() {
        if attr != "light" && attr != "dark" {
            anyhow::bail!("page consistency check failed: data-theme is {:?}", attr);
        }
    }

    // Pages arrive with arbitrary icon markup; only the two classes this tool
    // writes are held to the theme.
    if let Some(toggle) = page.theme_toggle() {
        if let Some(class) = toggle.icon_class() {
            if (class == ICON_MOON || class == ICON_SUN) && class != page.theme().icon_class() {
                anyhow::bail!(
                    "page consistency check failed: icon {:?} does not match theme {}",
                    class,
                    page.theme()
                );
            }
        }
    }

    if let Some(select) = page.language_select() {
        let selected = select.selected_count();
        if selected > 1 {
            anyhow::bail!(
                "page consistency check failed: {} options are selected at once",
                selected
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::theme::Theme;

    #[test]
    fn sample_page_is_consistent() {
        let page = Page::parse(&sample::sample_page(
            Theme::Dark,
            sample::LANGUAGES,
            sample::DEFAULT_LANGUAGE,
        ));
        assert_page_consistent(&page).unwrap();
    }

    #[test]
    fn rejects_unknown_theme_attr() {
        let page = Page::parse(r#"<html data-theme="sepia"><body></body></html>"#);
        assert!(assert_page_consistent(&page).is_err());
    }

    #[test]
    fn rejects_mismatched_icon() {
        let page = Page::parse(
            r#"<html data-theme="dark"><body>
              <a id="themeToggle"><i class="fas fa-moon"></i></a>
            </body></html>"#,
        );
        assert!(assert_page_consistent(&page).is_err());
    }

    #[test]
    fn tolerates_foreign_icon_classes() {
        let page = Page::parse(
            r#"<html data-theme="dark"><body>
              <a id="themeToggle"><i class="icon icon-gear"></i></a>
            </body></html>"#,
        );
        assert_page_consistent(&page).unwrap();
    }

    #[test]
    fn rejects_double_selection() {
        let page = Page::parse(
            r#"<html><body><select id="languageSelect">
              <option value="tr" selected>tr</option>
              <option value="en" selected>en</option>
            </select></body></html>"#,
        );
        assert!(assert_page_consistent(&page).is_err());
    }
}
