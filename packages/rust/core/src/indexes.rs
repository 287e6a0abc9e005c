//! Category listings, the curated essentials index, and the navigation
//! snippet.
//!
//! Indexes always cover the whole catalog. Whether a topic page was
//! generated in this run does not matter, so a retry with `--only` never
//! shrinks the navigation.

use chrono::NaiveDate;
use tracing::{debug, instrument};

use topicpress_render::FrontMatter;
use topicpress_render::boilerplate::part_of;
use topicpress_shared::{
    Catalog, CuratedSection, Essentials, PageStyle, RenderedDocument, SiteInfo, TopicDescriptor,
    category_index_id,
};

/// Build every index document for `catalog`.
///
/// Order: category listings (first-occurrence order), then the curated
/// index and nav snippet when the catalog has an `[essentials]` block.
#[instrument(skip_all, fields(topics = catalog.topics.len()))]
pub fn build_indexes(catalog: &Catalog, date: NaiveDate) -> Vec<RenderedDocument> {
    let mut docs: Vec<RenderedDocument> = catalog
        .group_by_category()
        .into_iter()
        .map(|(category, members)| category_listing(catalog, category, &members, date))
        .collect();

    if let Some(essentials) = &catalog.essentials {
        docs.push(essentials_index(catalog, essentials, date));
        docs.push(nav_snippet(catalog, essentials));
    }

    debug!(count = docs.len(), "index documents built");
    docs
}

/// Plural noun for catalog entries ("models" for model directories).
fn entry_noun(style: PageStyle) -> (&'static str, &'static str) {
    match style {
        PageStyle::Model => ("Model", "Models"),
        PageStyle::Research | PageStyle::Guide => ("Topic", "Topics"),
    }
}

fn category_listing(
    catalog: &Catalog,
    category: &str,
    members: &[&TopicDescriptor],
    date: NaiveDate,
) -> RenderedDocument {
    let site = &catalog.site;
    let (singular, plural) = entry_noun(catalog.style);
    let category_lower = category.to_lowercase();

    let description = format!(
        "Complete listing of {category_lower} for {} research and operations",
        site.subject
    );
    let mut doc = FrontMatter {
        title: category,
        description: &description,
        date,
        categories: &[],
        author: None,
        toc_depth: None,
    }
    .render();

    doc.push_str(&format!("\n# {category}\n\n"));
    doc.push_str(&format!(
        "This section contains detailed information about {} {category_lower} used in {} \
         research and operations.\n\n",
        members.len(),
        site.subject
    ));
    doc.push_str(&format!("## {plural} in This Category\n"));

    for topic in members {
        doc.push_str(&listing_entry(site, topic));
    }

    doc.push_str(&format!(
        "\n\n## Category Overview\n\n\
         The {category} category includes {} that focus on specific aspects of {} \
         behavior, management, and analysis. These resources are essential for:\n\n\
         - Operational decision-making\n\
         - Research and development\n\
         - Planning and risk assessment\n\
         - Training and education\n\n",
        plural.to_lowercase(),
        site.subject
    ));
    doc.push_str(&format!(
        "## Choosing the Right {singular}\n\n\
         When selecting a {} from this category, consider:\n\
         - Your specific use case and objectives\n\
         - Available data and computational resources\n\
         - Required spatial and temporal resolution\n\
         - Integration with existing workflows\n\
         - Training and support availability\n\n",
        singular.to_lowercase()
    ));
    doc.push_str("---\n\n");
    doc.push_str(&part_of(site));

    let output_id = category_index_id(category);
    RenderedDocument {
        file_name: site.file_name(&output_id),
        output_id,
        content: doc,
    }
}

fn listing_entry(site: &SiteInfo, topic: &TopicDescriptor) -> String {
    let mut entry = format!(
        "\n### [{}]({})\n",
        topic.title,
        site.file_name(&topic.output_id)
    );
    if let Some(organization) = &topic.organization {
        entry.push_str(&format!("**Organization**: {organization}  \n"));
    }
    if let Some(model_type) = &topic.model_type {
        entry.push_str(&format!("**Type**: {model_type}  \n"));
    }
    entry.push_str(&format!("**Focus**: {}\n\n---\n", topic.focus));
    entry
}

fn essentials_index(catalog: &Catalog, essentials: &Essentials, date: NaiveDate) -> RenderedDocument {
    let site = &catalog.site;
    let mut doc = FrontMatter {
        title: &essentials.title,
        description: &essentials.description,
        date,
        categories: &[],
        author: None,
        toc_depth: None,
    }
    .render();

    doc.push_str(&format!("\n# {}\n\n", essentials.title));
    doc.push_str(&format!("{}\n\n", essentials.intro.trim_end()));
    doc.push_str(&format!("## {} by Category\n\n", entry_noun(catalog.style).1));
    doc.push_str(&curated_sections(catalog, &essentials.sections));

    if !essentials.why.is_empty() {
        doc.push_str(&format!(
            "## Why These {} Matter\n\n\
             These represent critical areas of {} science and management that:\n",
            entry_noun(catalog.style).1,
            site.subject
        ));
        for line in &essentials.why {
            doc.push_str(&format!("- {line}\n"));
        }
        doc.push('\n');
    }

    if !essentials.how_to_use.is_empty() {
        doc.push_str("## How to Use These Guides\n\nEach page provides:\n");
        for (i, line) in essentials.how_to_use.iter().enumerate() {
            doc.push_str(&format!("{}. {line}\n", i + 1));
        }
        doc.push('\n');
    }

    doc.push_str("---\n\n");
    doc.push_str(&part_of(site));

    RenderedDocument {
        output_id: essentials.output_id.clone(),
        file_name: site.file_name(&essentials.output_id),
        content: doc,
    }
}

/// Markdown for the home page, written as plain text for manual splicing.
fn nav_snippet(catalog: &Catalog, essentials: &Essentials) -> RenderedDocument {
    let mut doc = format!("\n## {}\n\n", essentials.nav_heading);
    if let Some(intro) = &essentials.nav_intro {
        doc.push_str(&format!("{}\n\n", intro.trim_end()));
    }
    doc.push_str(&curated_sections(catalog, essentials.effective_nav_sections()));
    doc.push_str(&format!(
        "[View All {}]({})\n",
        essentials.nav_heading,
        catalog.site.file_name(&essentials.output_id)
    ));

    RenderedDocument {
        output_id: essentials.nav_file.clone(),
        file_name: essentials.nav_file.clone(),
        content: doc,
    }
}

/// `### heading` followed by one link per entry, labelled by the entry's
/// label or the topic title.
fn curated_sections(catalog: &Catalog, sections: &[CuratedSection]) -> String {
    let mut out = String::new();
    for section in sections {
        out.push_str(&format!("### {}\n", section.heading));
        for entry in &section.entries {
            // Catalog validation guarantees the id exists.
            let Some(topic) = catalog.topic(&entry.id) else {
                continue;
            };
            let label = entry.label.as_deref().unwrap_or(&topic.title);
            out.push_str(&format!(
                "- [{label}]({})\n",
                catalog.site.file_name(&topic.output_id)
            ));
        }
        out.push('\n');
    }
    out
}
