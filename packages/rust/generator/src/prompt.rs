//! Prompt templates, one per page style.
//!
//! Section lists are fixed per style; only descriptor fields and the site
//! subject are interpolated.

use topicpress_shared::{PageStyle, TopicDescriptor};

/// A required section of the generated page and what it should cover.
struct Section {
    heading: &'static str,
    guidance: &'static str,
}

const RESEARCH_SECTIONS: &[Section] = &[
    Section {
        heading: "Overview",
        guidance: "2-3 paragraphs explaining the topic and its importance",
    },
    Section {
        heading: "Key Concepts",
        guidance: "main technical concepts and terminology",
    },
    Section {
        heading: "Current Research",
        guidance: "latest developments and active research areas",
    },
    Section {
        heading: "Software and Tools",
        guidance: "specific tools, models, and software packages",
    },
    Section {
        heading: "Research Groups and Institutions",
        guidance: "major contributors to this field",
    },
    Section {
        heading: "Datasets and Resources",
        guidance: "available data sources",
    },
    Section {
        heading: "Recent Publications",
        guidance: "important papers - just titles and brief descriptions",
    },
    Section {
        heading: "Challenges and Future Directions",
        guidance: "open problems and where the field is heading",
    },
];

const MODEL_SECTIONS: &[Section] = &[
    Section {
        heading: "Overview",
        guidance: "Provide 2-3 paragraphs explaining what this model/system is, its primary purpose, and why it's important in {subject} management.",
    },
    Section {
        heading: "Key Features and Capabilities",
        guidance: "List and explain the main features and what makes this model unique.",
    },
    Section {
        heading: "Technical Specifications",
        guidance: "- Model type and approach\n- Input data requirements\n- Output products\n- Spatial and temporal resolution\n- Computational requirements",
    },
    Section {
        heading: "Applications and Use Cases",
        guidance: "- Operational uses\n- Research applications\n- Planning and management applications\n- Case studies or notable deployments",
    },
    Section {
        heading: "Strengths and Limitations",
        guidance: "- What this model does well\n- Known limitations or constraints\n- Best use conditions",
    },
    Section {
        heading: "Data Requirements",
        guidance: "- Input data needed\n- Data formats\n- Data sources",
    },
    Section {
        heading: "Training and Resources",
        guidance: "- Available training materials\n- Documentation\n- User communities\n- Support resources",
    },
    Section {
        heading: "Integration with Other Systems",
        guidance: "- Compatible models and systems\n- Data exchange formats\n- Workflow integration",
    },
    Section {
        heading: "Recent Updates and Developments",
        guidance: "- Latest version information\n- Recent improvements\n- Ongoing research",
    },
    Section {
        heading: "Access and Availability",
        guidance: "- How to obtain the software\n- Licensing information\n- System requirements\n- Cost (if applicable)",
    },
];

const GUIDE_SECTIONS: &[Section] = &[
    Section {
        heading: "Overview",
        guidance: "Provide 3-4 paragraphs explaining this topic's importance, current state, and role in {subject} management and research.",
    },
    Section {
        heading: "Core Concepts and Principles",
        guidance: "Explain the fundamental concepts, theories, and scientific principles underlying this topic.",
    },
    Section {
        heading: "Methods and Approaches",
        guidance: "Detail the main methodologies, techniques, and approaches used in this area.",
    },
    Section {
        heading: "Current Tools and Technologies",
        guidance: "List and describe specific tools, software, platforms, and technologies currently used.\nInclude both operational and research tools.",
    },
    Section {
        heading: "Data Sources and Requirements",
        guidance: "- Key datasets used\n- Data collection methods\n- Data formats and standards\n- Availability and access",
    },
    Section {
        heading: "Applications and Use Cases",
        guidance: "Provide real-world examples of how this is applied in:\n- Operational management\n- Research studies\n- Planning and policy\n- Risk assessment",
    },
    Section {
        heading: "Case Studies and Examples",
        guidance: "Describe 2-3 specific examples or case studies demonstrating successful application.",
    },
    Section {
        heading: "Current Research and Developments",
        guidance: "- Active research areas\n- Recent advances\n- Emerging technologies\n- Future directions",
    },
    Section {
        heading: "Challenges and Limitations",
        guidance: "- Technical challenges\n- Operational constraints\n- Data limitations\n- Areas needing improvement",
    },
    Section {
        heading: "Best Practices and Guidelines",
        guidance: "- Industry standards\n- Recommended procedures\n- Quality assurance\n- Common pitfalls to avoid",
    },
    Section {
        heading: "Integration with Other Systems",
        guidance: "How this topic connects with other {subject} management tools and approaches.",
    },
    Section {
        heading: "Resources and Training",
        guidance: "- Educational resources\n- Training programs\n- Certification options\n- Professional organizations\n- Key publications",
    },
    Section {
        heading: "Stakeholders and Users",
        guidance: "Who uses this information and how:\n- Managers\n- Researchers\n- Policy makers\n- Communities\n- Industry sectors",
    },
];

/// System persona for a style, with the site subject filled in.
pub fn default_persona(style: PageStyle, subject: &str) -> String {
    match style {
        PageStyle::Research => {
            format!("You are an expert in {subject} modeling and simulation research.")
        }
        PageStyle::Model => format!(
            "You are an expert in {subject} modeling and simulation systems with deep knowledge of operational management tools."
        ),
        PageStyle::Guide => format!(
            "You are a leading expert in {subject} science, management, and risk assessment with deep knowledge of operational tools, research methods, and policy applications."
        ),
    }
}

/// Build the user prompt for one topic.
pub fn build_prompt(style: PageStyle, subject: &str, topic: &TopicDescriptor) -> String {
    let mut prompt = String::new();

    match style {
        PageStyle::Research => {
            prompt.push_str(&format!(
                "Create a comprehensive research directory page about {} for {subject} researchers.\n",
                topic.title
            ));
            prompt.push_str(&format!("Category: {}\n", topic.category));
            prompt.push_str(&format!("Focus areas: {}\n\n", topic.focus));
            prompt.push_str("Structure the content with these sections:\n");
            for (i, section) in RESEARCH_SECTIONS.iter().enumerate() {
                prompt.push_str(&format!(
                    "{}. {} ({})\n",
                    i + 1,
                    section.heading,
                    section.guidance
                ));
            }
            prompt.push_str(
                "\nWrite in a professional, technical tone suitable for researchers and practitioners.\n\
                 Include specific model names, research institutions, and technical details.\n\
                 Make the content informative and comprehensive.\n",
            );
        }
        PageStyle::Model => {
            prompt.push_str(&format!(
                "Create a comprehensive research directory page about {} for {subject} researchers and practitioners.\n\n",
                topic.title
            ));
            prompt.push_str("Model Details:\n");
            prompt.push_str(&format!("- Category: {}\n", topic.category));
            if let Some(model_type) = &topic.model_type {
                prompt.push_str(&format!("- Type: {model_type}\n"));
            }
            if let Some(organization) = &topic.organization {
                prompt.push_str(&format!("- Organization: {organization}\n"));
            }
            prompt.push_str(&format!("- Focus areas: {}\n\n", topic.focus));
            push_heading_sections(&mut prompt, MODEL_SECTIONS, subject);
            prompt.push_str(
                "Write in a professional, technical tone suitable for researchers, managers, and practitioners.\n\
                 Include specific technical details, actual use cases, and practical information.\n\
                 Be comprehensive and accurate, focusing on practical application.\n",
            );
        }
        PageStyle::Guide => {
            prompt.push_str(&format!(
                "Create a comprehensive, authoritative research directory page about: {}\n\n",
                topic.title
            ));
            prompt.push_str("Topic Details:\n");
            prompt.push_str(&format!("- Category: {}\n", topic.category));
            prompt.push_str(&format!("- Focus areas: {}\n", topic.focus));
            if let Some(description) = &topic.description {
                prompt.push_str(&format!("- Description: {description}\n"));
            }
            prompt.push('\n');
            push_heading_sections(&mut prompt, GUIDE_SECTIONS, subject);
            prompt.push_str(
                "Write in a professional, technical tone suitable for researchers, practitioners, and decision-makers.\n\
                 Include specific examples, actual tools, and practical guidance.\n\
                 Be comprehensive, accurate, and focused on real-world application.\n\
                 Make this the definitive reference page for this topic.\n",
            );
        }
    }

    prompt
}

fn push_heading_sections(prompt: &mut String, sections: &[Section], subject: &str) {
    prompt.push_str("Structure the content with these sections:\n\n");
    for section in sections {
        prompt.push_str(&format!(
            "## {}\n{}\n\n",
            section.heading,
            section.guidance.replace("{subject}", subject)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> TopicDescriptor {
        TopicDescriptor {
            output_id: "wui-modeling".into(),
            title: "Wildland-Urban Interface (WUI) Modeling and Risk".into(),
            category: "WUI Risk Assessment".into(),
            focus: "WUI mapping, structure ignition, defensible space".into(),
            description: Some("Approaches to modeling risk in the WUI".into()),
            organization: Some("NIST".into()),
            model_type: Some("Physics-based".into()),
        }
    }

    #[test]
    fn guide_prompt_lists_every_section_in_order() {
        let prompt = build_prompt(PageStyle::Guide, "wildfire", &topic());
        let mut last = 0;
        for section in GUIDE_SECTIONS {
            let pos = prompt
                .find(&format!("## {}", section.heading))
                .unwrap_or_else(|| panic!("missing section {}", section.heading));
            assert!(pos >= last, "section {} out of order", section.heading);
            last = pos;
        }
        assert!(prompt.contains("- Description: Approaches to modeling risk in the WUI"));
        assert!(prompt.contains("role in wildfire management"));
        assert!(!prompt.contains("{subject}"));
    }

    #[test]
    fn model_prompt_includes_organization_and_type() {
        let prompt = build_prompt(PageStyle::Model, "wildfire", &topic());
        assert!(prompt.contains("- Type: Physics-based"));
        assert!(prompt.contains("- Organization: NIST"));
        assert!(prompt.contains("## Access and Availability"));
    }

    #[test]
    fn research_prompt_numbers_sections() {
        let prompt = build_prompt(PageStyle::Research, "wildfire", &topic());
        assert!(prompt.contains("for wildfire researchers"));
        assert!(prompt.contains("1. Overview"));
        assert!(prompt.contains("8. Challenges and Future Directions"));
        assert!(!prompt.contains("Description:"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let a = build_prompt(PageStyle::Guide, "wildfire", &topic());
        let b = build_prompt(PageStyle::Guide, "wildfire", &topic());
        assert_eq!(a, b);
    }

    #[test]
    fn persona_mentions_subject() {
        for style in [PageStyle::Research, PageStyle::Model, PageStyle::Guide] {
            assert!(default_persona(style, "flood").contains("flood"));
        }
    }
}
