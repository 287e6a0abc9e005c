//! Topic catalog loading and validation.
//!
//! A catalog is a TOML file holding the page style, the site boilerplate,
//! the ordered topic list, and an optional curated `[essentials]` index.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TopicPressError};
use crate::types::{Essentials, PageStyle, SiteInfo, TopicDescriptor};

/// Valid `output_id`: lowercase, starts alphanumeric, then `[a-z0-9._-]`.
static OUTPUT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9._-]*$").expect("valid regex"));

/// A loaded topic catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub style: PageStyle,
    pub site: SiteInfo,
    #[serde(default)]
    pub topics: Vec<TopicDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essentials: Option<Essentials>,
}

impl Catalog {
    /// Parse and validate a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(content)
            .map_err(|e| TopicPressError::parse(format!("invalid catalog: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the invariants the rest of the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for topic in &self.topics {
            if !OUTPUT_ID_RE.is_match(&topic.output_id) {
                return Err(TopicPressError::validation(format!(
                    "invalid output_id '{}': use lowercase letters, digits, '.', '_' or '-'",
                    topic.output_id
                )));
            }
            if !seen.insert(topic.output_id.as_str()) {
                return Err(TopicPressError::validation(format!(
                    "duplicate output_id '{}'",
                    topic.output_id
                )));
            }
            for (field, value) in [
                ("title", &topic.title),
                ("category", &topic.category),
                ("focus", &topic.focus),
            ] {
                if value.trim().is_empty() {
                    return Err(TopicPressError::validation(format!(
                        "topic '{}' has an empty {field}",
                        topic.output_id
                    )));
                }
            }
            if self.style == PageStyle::Model
                && (topic.organization.is_none() || topic.model_type.is_none())
            {
                return Err(TopicPressError::validation(format!(
                    "topic '{}' needs organization and model_type for the model style",
                    topic.output_id
                )));
            }
        }

        check_file_part("site.extension", &self.site.extension)?;

        // Index pages share the output directory with topic pages, and with
        // each other.
        let mut index_pages: Vec<(String, String)> = self
            .categories()
            .into_iter()
            .map(|c| (category_index_id(c), format!("category '{c}'")))
            .collect();

        if let Some(essentials) = &self.essentials {
            check_file_part("essentials.output_id", &essentials.output_id)?;
            check_file_part("essentials.nav_file", &essentials.nav_file)?;
            index_pages.push((
                essentials.output_id.clone(),
                "essentials.output_id".to_string(),
            ));

            let sections = essentials
                .sections
                .iter()
                .chain(essentials.nav_sections.iter());
            for section in sections {
                for entry in &section.entries {
                    if !seen.contains(entry.id.as_str()) {
                        return Err(TopicPressError::validation(format!(
                            "curated section '{}' references unknown topic '{}'",
                            section.heading, entry.id
                        )));
                    }
                }
            }
        }

        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (id, owner) in &index_pages {
            if seen.contains(id.as_str()) {
                return Err(TopicPressError::validation(format!(
                    "output_id '{id}' collides with a generated index page"
                )));
            }
            if let Some(first) = owners.insert(id, owner) {
                return Err(TopicPressError::validation(format!(
                    "index page '{id}' is produced by both {first} and {owner}"
                )));
            }
        }

        debug!(
            topics = self.topics.len(),
            style = %self.style,
            "catalog validated"
        );
        Ok(())
    }

    /// Distinct categories in first-occurrence order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.topics
            .iter()
            .map(|t| t.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Topics grouped by category. Groups keep first-occurrence order and
    /// members keep catalog order.
    pub fn group_by_category(&self) -> Vec<(&str, Vec<&TopicDescriptor>)> {
        self.categories()
            .into_iter()
            .map(|category| {
                let members = self
                    .topics
                    .iter()
                    .filter(|t| t.category == category)
                    .collect();
                (category, members)
            })
            .collect()
    }

    /// Look up a topic by output id.
    pub fn topic(&self, output_id: &str) -> Option<&TopicDescriptor> {
        self.topics.iter().find(|t| t.output_id == output_id)
    }

    /// Fail when any of `ids` is not in the catalog.
    pub fn check_ids(&self, ids: &[String]) -> Result<()> {
        let unknown: Vec<&str> = ids
            .iter()
            .filter(|id| self.topic(id).is_none())
            .map(String::as_str)
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(TopicPressError::validation(format!(
                "unknown topic id(s): {}",
                unknown.join(", ")
            )))
        }
    }
}

/// Load and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path).map_err(|e| TopicPressError::io(path, e))?;
    Catalog::from_toml_str(&content).map_err(|e| match e {
        TopicPressError::Parse { message } => {
            TopicPressError::parse(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

/// Reject file-name parts that could leave the output directory.
fn check_file_part(field: &str, value: &str) -> Result<()> {
    if OUTPUT_ID_RE.is_match(value) {
        Ok(())
    } else {
        Err(TopicPressError::validation(format!(
            "invalid {field} '{value}': use lowercase letters, digits, '.', '_' or '-'"
        )))
    }
}

/// Output id of the listing page for `category`.
///
/// `"Smoke and Air Quality"` → `"smoke-and-air-quality-index"`.
pub fn category_index_id(category: &str) -> String {
    let slug = category.to_lowercase().replace([' ', '/'], "-");
    format!("{slug}-index")
}
