//! Topic page template.

use chrono::NaiveDate;
use tracing::debug;

use topicpress_shared::{PageStyle, RenderedDocument, SiteInfo, TopicDescriptor, category_index_id};

use crate::boilerplate;
use crate::frontmatter::{FrontMatter, long_date};

/// Merge a topic, its generated prose, and the page template.
///
/// Pure: the same inputs always give byte-identical output. The prose is
/// inserted verbatim.
pub fn render_topic(
    site: &SiteInfo,
    style: PageStyle,
    topic: &TopicDescriptor,
    prose: &str,
    date: NaiveDate,
) -> RenderedDocument {
    let description = topic
        .description
        .clone()
        .unwrap_or_else(|| default_description(site, style, topic));

    let mut doc = FrontMatter {
        title: &topic.title,
        description: &description,
        date,
        categories: &[topic.category.as_str()],
        author: Some(&site.author),
        toc_depth: Some(3),
    }
    .render();

    doc.push('\n');
    doc.push_str(&format!("# {}\n\n", topic.title));
    doc.push_str(&callout(style, topic, date));
    doc.push('\n');
    doc.push_str(prose);
    if !prose.ends_with('\n') {
        doc.push('\n');
    }
    doc.push_str("\n---\n\n");
    doc.push_str(&related(site, style, topic));
    doc.push_str("\n---\n\n");
    doc.push_str(&boilerplate::contributing(site));
    doc.push_str("\n---\n\n");
    doc.push_str(&boilerplate::professional_services(site, &topic.category));
    doc.push_str("\n---\n\n");
    doc.push_str(&boilerplate::provenance(site, date));

    debug!(output_id = %topic.output_id, bytes = doc.len(), "rendered topic page");

    RenderedDocument {
        output_id: topic.output_id.clone(),
        file_name: site.file_name(&topic.output_id),
        content: doc,
    }
}

fn default_description(site: &SiteInfo, style: PageStyle, topic: &TopicDescriptor) -> String {
    match style {
        PageStyle::Research => format!(
            "Comprehensive resource on {} in {} research",
            topic.title.to_lowercase(),
            site.subject
        ),
        PageStyle::Model => format!("Comprehensive guide to {} - {}", topic.title, topic.focus),
        PageStyle::Guide => format!("Comprehensive guide to {}", topic.title),
    }
}

/// Quick-facts callout summarizing the descriptor.
fn callout(style: PageStyle, topic: &TopicDescriptor, date: NaiveDate) -> String {
    let mut out = String::new();
    match style {
        PageStyle::Research => {
            out.push_str("::: {.callout-tip}\n## At a Glance\n");
            out.push_str(&format!("- **Category**: {}\n", topic.category));
            out.push_str(&format!("- **Focus Areas**: {}\n", topic.focus));
        }
        PageStyle::Model => {
            out.push_str("::: {.callout-note}\n## Quick Facts\n");
            out.push_str(&format!("- **Category**: {}\n", topic.category));
            if let Some(model_type) = &topic.model_type {
                out.push_str(&format!("- **Model Type**: {model_type}\n"));
            }
            if let Some(organization) = &topic.organization {
                out.push_str(&format!("- **Developed by**: {organization}\n"));
            }
            out.push_str(&format!("- **Primary Focus**: {}\n", topic.focus));
        }
        PageStyle::Guide => {
            // Two trailing spaces force Markdown line breaks.
            out.push_str("::: {.callout-important}\n## Topic Overview\n");
            out.push_str(&format!("**Category**: {}  \n", topic.category));
            out.push_str(&format!("**Focus Areas**: {}  \n", topic.focus));
            out.push_str(&format!("**Last Updated**: {}\n", long_date(date)));
        }
    }
    out.push_str(":::\n");
    out
}

/// Cross-reference section linking back to the aggregate index pages.
fn related(site: &SiteInfo, style: PageStyle, topic: &TopicDescriptor) -> String {
    let category_page = site.file_name(&category_index_id(&topic.category));
    let home_page = site.file_name(&site.home_page);
    let category_lower = topic.category.to_lowercase();

    match style {
        PageStyle::Research => format!(
            "## Related Topics\n\n\
             Browse all [{category} pages]({category_page}) or return to the \
             [{short_name}]({home_page}).\n",
            category = topic.category,
            short_name = site.short_name,
        ),
        PageStyle::Model => format!(
            "## Related Models and Resources\n\n\
             ### Similar Models in This Category\n\
             Explore other [{category_lower} models]({category_page}) in our directory.\n\n\
             ### Integration Partners\n\
             Models that commonly integrate with {short_title}. \
             Browse the full [model directory]({home_page}) for details.\n",
            short_title = topic.short_title(),
        ),
        PageStyle::Guide => format!(
            "## Related Topics in This Directory\n\n\
             ### Related Models and Systems\n\
             Browse our comprehensive [model directory]({home_page}) for specific \
             simulation and modeling tools related to this topic.\n\n\
             ### More in {category}\n\
             See every page in [{category}]({category_page}).\n\n\
             ### Integration Opportunities\n\
             This topic integrates with multiple models and systems documented in our \
             directory. See specific model pages for technical integration details.\n",
            category = topic.category,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boilerplate::tests::site;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn model_topic() -> TopicDescriptor {
        TopicDescriptor {
            output_id: "farsite".into(),
            title: "FARSITE - Fire Area Simulator".into(),
            category: "Operational Fire Spread Models".into(),
            focus: "spatially explicit fire growth simulation".into(),
            description: None,
            organization: Some("USDA Forest Service".into()),
            model_type: Some("Semi-empirical".into()),
        }
    }

    const PROSE: &str = "## Overview\n\nFARSITE simulates fire growth.";

    #[test]
    fn render_is_pure() {
        let a = render_topic(&site(), PageStyle::Model, &model_topic(), PROSE, date());
        let b = render_topic(&site(), PageStyle::Model, &model_topic(), PROSE, date());
        assert_eq!(a, b);
    }

    #[test]
    fn output_names_follow_output_id() {
        let doc = render_topic(&site(), PageStyle::Model, &model_topic(), PROSE, date());
        assert_eq!(doc.output_id, "farsite");
        assert_eq!(doc.file_name, "farsite.qmd");
    }

    #[test]
    fn model_page_structure() {
        let doc = render_topic(&site(), PageStyle::Model, &model_topic(), PROSE, date()).content;

        assert!(doc.starts_with("---\ntitle: \"FARSITE - Fire Area Simulator\"\n"));
        assert!(doc.contains(
            "description: \"Comprehensive guide to FARSITE - Fire Area Simulator - spatially explicit fire growth simulation\""
        ));
        assert!(doc.contains("date: 2025-06-15\n"));
        assert!(doc.contains("categories: [\"Operational Fire Spread Models\"]"));
        assert!(doc.contains("::: {.callout-note}\n## Quick Facts\n"));
        assert!(doc.contains("- **Developed by**: USDA Forest Service\n"));
        assert!(doc.contains("integrate with FARSITE."));
        assert!(doc.contains("(operational-fire-spread-models-index.qmd)"));
        assert!(doc.contains("*Last updated: June 15, 2025*"));

        // Prose lands verbatim between the callout and the closing sections.
        let callout_end = doc.find(":::\n\n").unwrap();
        let prose_at = doc.find(PROSE).unwrap();
        let closing_at = doc.find("## Related Models and Resources").unwrap();
        assert!(callout_end < prose_at && prose_at < closing_at);
    }

    #[test]
    fn guide_page_uses_description_and_overview_callout() {
        let topic = TopicDescriptor {
            output_id: "burn-severity-mapping".into(),
            title: "Burn Severity Mapping and Assessment".into(),
            category: "Post-Fire Assessment".into(),
            focus: "dNBR, RdNBR, CBI methods".into(),
            description: Some("Methods for mapping burn severity".into()),
            organization: None,
            model_type: None,
        };
        let doc = render_topic(&site(), PageStyle::Guide, &topic, PROSE, date()).content;

        assert!(doc.contains("description: \"Methods for mapping burn severity\""));
        assert!(doc.contains("::: {.callout-important}\n## Topic Overview\n"));
        assert!(doc.contains("**Last Updated**: June 15, 2025"));
        assert!(doc.contains("[model directory](index.qmd)"));
        assert!(doc.contains("related to post-fire assessment:"));
    }

    #[test]
    fn research_page_default_description() {
        let topic = TopicDescriptor {
            output_id: "fuel-moisture".into(),
            title: "Fuel Moisture Content Modeling".into(),
            category: "Fuel Dynamics".into(),
            focus: "live and dead fuel moisture".into(),
            description: None,
            organization: None,
            model_type: None,
        };
        let doc = render_topic(&site(), PageStyle::Research, &topic, PROSE, date()).content;
        assert!(doc.contains(
            "description: \"Comprehensive resource on fuel moisture content modeling in wildfire research\""
        ));
        assert!(doc.contains("## At a Glance"));
        assert!(doc.contains("[Fuel Dynamics pages](fuel-dynamics-index.qmd)"));
    }

    #[test]
    fn boilerplate_identical_across_topics() {
        let first = render_topic(&site(), PageStyle::Model, &model_topic(), PROSE, date()).content;
        let other_topic = TopicDescriptor {
            output_id: "flammap".into(),
            title: "FlamMap".into(),
            ..model_topic()
        };
        let second =
            render_topic(&site(), PageStyle::Model, &other_topic, "Different prose.", date())
                .content;

        let tail = |doc: &str| doc[doc.find("## Contributing to This Page").unwrap()..].to_string();
        assert_eq!(tail(&first), tail(&second));
    }
}
