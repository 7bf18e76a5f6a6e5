use serde::Deserialize;

/// Reply to a theme update.
#[derive(Debug, Deserialize)]
pub struct ThemeAck {
    pub success: bool,
    #[serde(default)]
    pub theme: Option<String>,
}

/// Reply to a language update. Some servers echo the stored language back;
/// the field is informational only.
#[derive(Debug, Deserialize)]
pub struct LanguageAck {
    pub success: bool,
    #[serde(default)]
    pub language: Option<String>,
}
