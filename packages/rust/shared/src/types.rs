//! Core domain types for TopicPress catalogs and documents.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one batch run (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PageStyle
// ---------------------------------------------------------------------------

/// Template family used for every page of a catalog.
///
/// A style fixes the prompt section list, the default persona, the default
/// output token budget, and the wording of the page template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStyle {
    /// Short research overview pages.
    #[default]
    Research,
    /// One page per simulation model or software system.
    Model,
    /// Long-form reference guides on cross-cutting topics.
    Guide,
}

impl PageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Model => "model",
            Self::Guide => "guide",
        }
    }

    /// Output token budget when the config does not override it.
    pub fn default_max_tokens(&self) -> u32 {
        match self {
            Self::Research => 2000,
            Self::Model => 2500,
            Self::Guide => 3000,
        }
    }
}

impl std::fmt::Display for PageStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TopicDescriptor
// ---------------------------------------------------------------------------

/// One topic to generate a page for. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDescriptor {
    /// Unique identifier; the page file is `<output_id>.<extension>`.
    pub output_id: String,
    /// Display title.
    pub title: String,
    /// Grouping used for category index pages.
    pub category: String,
    /// Free-text focus keywords.
    pub focus: String,
    /// One-line description used in front matter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Developing organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Model type (e.g. "Semi-empirical", "Physics-based").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
}

impl TopicDescriptor {
    /// Title up to the first `" - "` separator (`"FARSITE - Fire Area Simulator"` → `"FARSITE"`).
    pub fn short_title(&self) -> &str {
        self.title
            .split(" - ")
            .next()
            .unwrap_or(&self.title)
            .trim()
    }
}

// ---------------------------------------------------------------------------
// SiteInfo
// ---------------------------------------------------------------------------

/// Directory-wide boilerplate interpolated into every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Full directory name.
    pub name: String,
    /// Short name used in page footers.
    pub short_name: String,
    /// Public URL of the published directory.
    pub url: String,
    /// Subject noun used in prompts and prose (e.g. "wildfire").
    pub subject: String,
    /// Maintaining organization.
    pub maintainer: String,
    pub maintainer_url: String,
    pub contact_url: String,
    pub issues_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Author attribution written to front matter.
    #[serde(default = "default_author")]
    pub author: String,
    /// Output id of the main directory page that pages link back to.
    #[serde(default = "default_home_page")]
    pub home_page: String,
    /// File extension of generated pages, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Optional extra footer line naming a sponsoring initiative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative: Option<String>,
    /// Bullets of the "Professional Services" block.
    #[serde(default = "default_services")]
    pub services: Vec<String>,
}

fn default_author() -> String {
    "AI Research Assistant".into()
}
fn default_home_page() -> String {
    "index".into()
}
fn default_extension() -> String {
    "qmd".into()
}
fn default_services() -> Vec<String> {
    [
        "Implementation support",
        "Custom analysis and modeling",
        "Training and capacity building",
        "Risk assessment and planning",
        "Technology integration",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl SiteInfo {
    /// File name for a page with the given output id.
    pub fn file_name(&self, output_id: &str) -> String {
        format!("{output_id}.{}", self.extension)
    }
}

// ---------------------------------------------------------------------------
// Essentials (curated cross-category index)
// ---------------------------------------------------------------------------

/// Hand-curated cross-category index plus its navigation snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Essentials {
    #[serde(default = "default_essentials_id")]
    pub output_id: String,
    pub title: String,
    pub description: String,
    /// Paragraph under the page heading.
    pub intro: String,
    /// Thematic sections of the index page.
    pub sections: Vec<CuratedSection>,
    /// "Why These Topics Matter" bullets.
    #[serde(default)]
    pub why: Vec<String>,
    /// "How to Use These Guides" numbered items.
    #[serde(default)]
    pub how_to_use: Vec<String>,
    /// File name of the navigation snippet.
    #[serde(default = "default_nav_file")]
    pub nav_file: String,
    #[serde(default = "default_nav_heading")]
    pub nav_heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_intro: Option<String>,
    /// Sections of the snippet; falls back to `sections` when empty.
    #[serde(default)]
    pub nav_sections: Vec<CuratedSection>,
}

fn default_essentials_id() -> String {
    "essential-topics-index".into()
}
fn default_nav_file() -> String {
    "nav-update.txt".into()
}
fn default_nav_heading() -> String {
    "Essential Topics".into()
}

impl Essentials {
    /// Sections used by the navigation snippet.
    pub fn effective_nav_sections(&self) -> &[CuratedSection] {
        if self.nav_sections.is_empty() {
            &self.sections
        } else {
            &self.nav_sections
        }
    }
}

/// One thematic group in a curated index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuratedSection {
    pub heading: String,
    pub entries: Vec<CuratedEntry>,
}

/// A link to a catalog topic, optionally with a custom label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuratedEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

// ---------------------------------------------------------------------------
// RenderedDocument
// ---------------------------------------------------------------------------

/// Final document text paired with where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Identifier the document was rendered for.
    pub output_id: String,
    /// File name relative to the output directory.
    pub file_name: String,
    /// Full document text.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_style_serde_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            style: PageStyle,
        }
        let w: Wrapper = toml::from_str(r#"style = "guide""#).expect("parse");
        assert_eq!(w.style, PageStyle::Guide);
        assert_eq!(PageStyle::Model.to_string(), "model");
    }

    #[test]
    fn page_style_token_budgets() {
        assert_eq!(PageStyle::Research.default_max_tokens(), 2000);
        assert_eq!(PageStyle::Model.default_max_tokens(), 2500);
        assert_eq!(PageStyle::Guide.default_max_tokens(), 3000);
    }

    #[test]
    fn short_title_splits_on_dash_separator() {
        let topic = TopicDescriptor {
            output_id: "farsite".into(),
            title: "FARSITE - Fire Area Simulator".into(),
            category: "Operational Fire Spread Models".into(),
            focus: "fire growth".into(),
            description: None,
            organization: None,
            model_type: None,
        };
        assert_eq!(topic.short_title(), "FARSITE");

        let plain = TopicDescriptor {
            title: "Phoenix RapidFire".into(),
            ..topic
        };
        assert_eq!(plain.short_title(), "Phoenix RapidFire");
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(RunId::new(), RunId::new());
    }
}
