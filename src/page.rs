use anyhow::Context as _;
use kuchiki::traits::TendrilSink as _;
use kuchiki::{ElementData, NodeDataRef, NodeRef};

use crate::theme::Theme;

pub const THEME_TOGGLE_ID: &str = "themeToggle";
pub const LANGUAGE_SELECT_ID: &str = "languageSelect";

/// A parsed server-rendered page. All theme reads and writes go through the
/// accessors here; there is no other copy of the state.
pub struct Page {
    document: NodeRef,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            document: kuchiki::parse_html().one(html),
        }
    }

    fn root(&self) -> Option<NodeDataRef<ElementData>> {
        self.document.select_first("html").ok()
    }

    /// Raw `data-theme` attribute on the root element, if any.
    pub fn theme_attr(&self) -> Option<String> {
        let root = self.root()?;
        let attrs = root.attributes.borrow();
        attrs.get("data-theme").map(String::from)
    }

    pub fn theme(&self) -> Theme {
        Theme::from_attr(self.theme_attr().as_deref())
    }

    pub fn set_theme(&self, theme: Theme) {
        if let Some(root) = self.root() {
            root.attributes
                .borrow_mut()
                .insert("data-theme", theme.as_str().to_string());
        }
    }

    /// The theme toggle control, when the page carries one.
    pub fn theme_toggle(&self) -> Option<ToggleHandle> {
        self.document
            .select_first(&format!("#{THEME_TOGGLE_ID}"))
            .ok()
            .map(|node| ToggleHandle { node })
    }

    /// The language selector, when the page carries one.
    pub fn language_select(&self) -> Option<SelectHandle> {
        self.document
            .select_first(&format!("#{LANGUAGE_SELECT_ID}"))
            .ok()
            .map(|node| SelectHandle { node })
    }

    pub fn to_html(&self) -> anyhow::Result<String> {
        let mut out = Vec::new();
        self.document
            .serialize(&mut out)
            .context("serialize page")?;
        String::from_utf8(out).context("page not utf-8")
    }
}

/// Handle on the theme toggle control.
pub struct ToggleHandle {
    node: NodeDataRef<ElementData>,
}

impl ToggleHandle {
    /// Replace the class of the first `<i>` icon descendant. The whole class
    /// attribute is assigned, not edited. A toggle without an icon is left
    /// alone.
    pub fn set_icon_class(&self, class: &str) {
        if let Ok(icon) = self.node.as_node().select_first("i") {
            icon.attributes
                .borrow_mut()
                .insert("class", class.to_string());
        }
    }

    pub fn icon_class(&self) -> Option<String> {
        let icon = self.node.as_node().select_first("i").ok()?;
        let attrs = icon.attributes.borrow();
        attrs.get("class").map(String::from)
    }
}

/// Handle on the language selector.
pub struct SelectHandle {
    node: NodeDataRef<ElementData>,
}

impl SelectHandle {
    fn option_nodes(&self) -> Vec<NodeDataRef<ElementData>> {
        self.node
            .as_node()
            .select("option")
            .map(|nodes| nodes.collect())
            .unwrap_or_default()
    }

    /// Values offered by the selector, in document order.
    pub fn options(&self) -> Vec<String> {
        self.option_nodes().iter().map(option_value).collect()
    }

    /// The currently selected value: the last option carrying `selected`,
    /// falling back to the first option.
    pub fn value(&self) -> Option<String> {
        let nodes = self.option_nodes();
        let mut selected = None;
        for node in &nodes {
            if node.attributes.borrow().get("selected").is_some() {
                selected = Some(option_value(node));
            }
        }
        selected.or_else(|| nodes.first().map(option_value))
    }

    /// Number of options carrying the `selected` attribute.
    pub fn selected_count(&self) -> usize {
        self.option_nodes()
            .iter()
            .filter(|node| node.attributes.borrow().get("selected").is_some())
            .count()
    }

    /// Move the selection to the option offering `value`. Returns false and
    /// leaves the selection untouched when no option offers it.
    pub fn select(&self, value: &str) -> bool {
        let nodes = self.option_nodes();
        if !nodes.iter().any(|node| option_value(node) == value) {
            return false;
        }
        for node in &nodes {
            let is_match = option_value(node) == value;
            let mut attrs = node.attributes.borrow_mut();
            if is_match {
                attrs.insert("selected", String::new());
            } else {
                attrs.remove("selected");
            }
        }
        true
    }
}

/// An option's value attribute, falling back to its text per HTML semantics.
fn option_value(node: &NodeDataRef<ElementData>) -> String {
    let explicit = {
        let attrs = node.attributes.borrow();
        attrs.get("value").map(String::from)
    };
    explicit.unwrap_or_else(|| node.text_contents().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ICON_MOON, ICON_SUN};

    const PAGE: &str = r##"<!doctype html>
<html data-theme="light">
  <head><title>t</title></head>
  <body>
    <a id="themeToggle" href="#"><i class="fas fa-moon"></i></a>
    <select id="languageSelect">
      <option value="tr" selected>Türkçe</option>
      <option value="en">English</option>
      <option>ar</option>
    </select>
  </body>
</html>"##;

    #[test]
    fn theme_attr_round_trip() {
        let page = Page::parse(PAGE);
        assert_eq!(page.theme_attr().as_deref(), Some("light"));
        assert_eq!(page.theme(), Theme::Light);

        page.set_theme(Theme::Dark);
        assert_eq!(page.theme_attr().as_deref(), Some("dark"));
        assert_eq!(page.theme(), Theme::Dark);
    }

    #[test]
    fn missing_attr_reads_as_light() {
        let page = Page::parse("<html><body></body></html>");
        assert_eq!(page.theme_attr(), None);
        assert_eq!(page.theme(), Theme::Light);
    }

    #[test]
    fn icon_class_swap() {
        let page = Page::parse(PAGE);
        let toggle = page.theme_toggle().unwrap();
        assert_eq!(toggle.icon_class().as_deref(), Some(ICON_MOON));

        toggle.set_icon_class(ICON_SUN);
        assert_eq!(toggle.icon_class().as_deref(), Some(ICON_SUN));
        assert!(page.to_html().unwrap().contains(ICON_SUN));
    }

    #[test]
    fn toggle_without_icon_is_tolerated() {
        let page = Page::parse(r##"<html><body><a id="themeToggle" href="#">dark</a></body></html>"##);
        let toggle = page.theme_toggle().unwrap();
        assert_eq!(toggle.icon_class(), None);
        toggle.set_icon_class(ICON_SUN);
        assert_eq!(toggle.icon_class(), None);
    }

    #[test]
    fn absent_controls_yield_no_handles() {
        let page = Page::parse("<html><body><p>hi</p></body></html>");
        assert!(page.theme_toggle().is_none());
        assert!(page.language_select().is_none());
    }

    #[test]
    fn select_semantics() {
        let page = Page::parse(PAGE);
        let select = page.language_select().unwrap();
        assert_eq!(select.options(), vec!["tr", "en", "ar"]);
        assert_eq!(select.value().as_deref(), Some("tr"));

        assert!(select.select("en"));
        assert_eq!(select.value().as_deref(), Some("en"));

        // Text-valued option.
        assert!(select.select("ar"));
        assert_eq!(select.value().as_deref(), Some("ar"));

        assert!(!select.select("fr"));
        assert_eq!(select.value().as_deref(), Some("ar"));
    }

    #[test]
    fn selection_falls_back_to_first_option() {
        let page = Page::parse(
            r#"<html><body><select id="languageSelect">
              <option value="en">English</option>
              <option value="ar">العربية</option>
            </select></body></html>"#,
        );
        let select = page.language_select().unwrap();
        assert_eq!(select.value().as_deref(), Some("en"));
    }
}
