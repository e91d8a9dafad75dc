//! Static site data: the rotating titles, social links and the ids of the
//! elements the controllers bind to. Compiled-in defaults can be overridden
//! from the page with a JSON `<script id="toolkit-config">` block.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::platform::{Console, Document};

pub const CONFIG_ELEMENT_ID: &str = "toolkit-config";
pub const DEFAULT_TITLE_PERIOD_MS: u32 = 8000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleStyle {
    #[serde(rename = "style-1")]
    Style1,
    #[serde(rename = "style-2")]
    Style2,
    #[serde(rename = "style-3")]
    Style3,
}

impl TitleStyle {
    pub const ALL: [TitleStyle; 3] = [TitleStyle::Style1, TitleStyle::Style2, TitleStyle::Style3];

    /// Class name the stylesheet keys the title look on.
    pub fn class(self) -> &'static str {
        match self {
            TitleStyle::Style1 => "style-1",
            TitleStyle::Style2 => "style-2",
            TitleStyle::Style3 => "style-3",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleEntry {
    pub text: String,
    pub style: TitleStyle,
}

impl TitleEntry {
    pub fn new(text: &str, style: TitleStyle) -> Self {
        Self {
            text: text.to_owned(),
            style,
        }
    }
}

pub fn default_titles() -> Vec<TitleEntry> {
    vec![
        TitleEntry::new("Wuthering Waves Config File Setup Toolkit", TitleStyle::Style1),
        TitleEntry::new("Resonator Settings Optimization Interface", TitleStyle::Style2),
        TitleEntry::new("Wuwa Performance Tweak Utility Portal", TitleStyle::Style3),
        TitleEntry::new("Kuro Game Engine Parameter Adjuster", TitleStyle::Style1),
    ]
}

pub fn default_social_links() -> BTreeMap<String, String> {
    [
        ("discord", "https://discord.gg/VV4w5AdJFh"),
        ("telegram", "https://t.me/Yt_Player42"),
        ("youtube", "https://www.youtube.com/@Player42_g"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementIds {
    pub main_title: String,
    pub dialog_scrim: String,
    pub dialog_container: String,
    pub zoom_modal: String,
    pub zoom_image: String,
    pub zoom_title: String,
    pub background_music: String,
    pub music_toggle: String,
    /// Selector, not an id: every match gets a staggered fade-in index.
    pub card_selector: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            main_title: "main-title".into(),
            dialog_scrim: "dialog-scrim".into(),
            dialog_container: "dialog-container".into(),
            zoom_modal: "zoom-modal".into(),
            zoom_image: "zoom-image".into(),
            zoom_title: "zoom-title".into(),
            background_music: "background-music".into(),
            music_toggle: "music-toggle".into(),
            card_selector: ".ui-card".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub titles: Vec<TitleEntry>,
    pub title_period_ms: u32,
    pub social_links: BTreeMap<String, String>,
    pub ids: ElementIds,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            titles: default_titles(),
            title_period_ms: DEFAULT_TITLE_PERIOD_MS,
            social_links: default_social_links(),
            ids: ElementIds::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Defaults, overlaid with the page's config block when one is present.
    /// A malformed block is reported and ignored.
    pub fn load(document: &dyn Document, console: &dyn Console) -> Self {
        let Some(raw) = document
            .element_by_id(CONFIG_ELEMENT_ID)
            .map(|el| el.text())
            .filter(|raw| !raw.trim().is_empty())
        else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(cfg) => cfg.sanitized(console),
            Err(e) => {
                console.warn(&format!("Ignoring #{CONFIG_ELEMENT_ID}: {e}"));
                Self::default()
            }
        }
    }

    fn sanitized(mut self, console: &dyn Console) -> Self {
        // Browser timers take an i32 delay; anything larger wraps negative.
        if self.title_period_ms == 0 || i32::try_from(self.title_period_ms).is_err() {
            console.warn("title_period_ms must be between 1 and 2147483647; using the default");
            self.title_period_ms = DEFAULT_TITLE_PERIOD_MS;
        }
        self
    }
}
