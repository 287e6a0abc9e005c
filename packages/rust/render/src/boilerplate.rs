//! Closing blocks shared by every generated page.
//!
//! These only interpolate [`SiteInfo`] fields (plus a category or a date),
//! so all pages of a directory carry identical boilerplate.

use chrono::NaiveDate;

use topicpress_shared::SiteInfo;

use crate::frontmatter::long_date;

/// "Contributing to This Page" with the static contact links.
pub fn contributing(site: &SiteInfo) -> String {
    let mut out = String::from("## Contributing to This Page\n\n");
    out.push_str(&format!(
        "This page is part of the [{}]({}) maintained by [{}]({}).\n\n",
        site.name, site.url, site.maintainer, site.maintainer_url
    ));
    out.push_str("### How You Can Contribute:\n");
    out.push_str("- **Share Case Studies**: Document successful applications of these methods\n");
    out.push_str("- **Provide Updates**: Submit new tools, research, or methodologies\n");
    out.push_str("- **Report Corrections**: Help us maintain accuracy\n");
    out.push_str("- **Add Resources**: Share training materials or documentation\n\n");
    out.push_str("**Contact Options:**\n");
    out.push_str(&format!("- [Open an Issue on GitHub]({})\n", site.issues_url));
    out.push_str(&format!(
        "- [Contact {}]({})\n",
        site.maintainer, site.contact_url
    ));
    if let Some(email) = &site.email {
        out.push_str(&format!("- Email: {email}\n"));
    }
    out
}

/// "Professional Services" advertisement, scoped to `category`.
pub fn professional_services(site: &SiteInfo, category: &str) -> String {
    let mut out = String::from("## Professional Services\n\n");
    out.push_str(&format!(
        "**{}** offers consulting services related to {}:\n",
        site.maintainer,
        category.to_lowercase()
    ));
    for service in &site.services {
        out.push_str(&format!("- {service}\n"));
    }
    out.push_str(&format!(
        "\n[Learn more about our services]({})\n",
        site.maintainer_url
    ));
    out
}

/// Generation provenance footer carrying the render date.
pub fn provenance(site: &SiteInfo, date: NaiveDate) -> String {
    let mut out = format!("*Last updated: {}*\n", long_date(date));
    out.push_str(
        "*This page was automatically generated using AI-assisted research. \
         Content is regularly updated to reflect the latest developments.*\n",
    );
    if let Some(initiative) = &site.initiative {
        out.push_str(&format!("\n*{initiative}*\n"));
    }
    out.push('\n');
    out.push_str(&part_of(site));
    out
}

/// `*Part of the [Directory](url) by [Maintainer](url)*` line.
pub fn part_of(site: &SiteInfo) -> String {
    format!(
        "*Part of the [{}]({}) by [{}]({})*\n",
        site.short_name, site.url, site.maintainer, site.maintainer_url
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn site() -> SiteInfo {
        SiteInfo {
            name: "Wildfire Simulation & Modeling Research Directory".into(),
            short_name: "Wildfire Research Directory".into(),
            url: "https://wildfire-directory.netlify.app".into(),
            subject: "wildfire".into(),
            maintainer: "Rallypoint One".into(),
            maintainer_url: "https://rallypoint1.com".into(),
            contact_url: "https://rallypoint1.com/contact".into(),
            issues_url: "https://github.com/RallypointOne/wildfire-directory/issues".into(),
            email: Some("info@rallypoint1.com".into()),
            author: "AI Research Assistant".into(),
            home_page: "index".into(),
            extension: "qmd".into(),
            initiative: None,
            services: vec!["Implementation support".into(), "Training".into()],
        }
    }

    #[test]
    fn contributing_links_contacts() {
        let text = contributing(&site());
        assert!(text.contains("[Open an Issue on GitHub](https://github.com/RallypointOne/wildfire-directory/issues)"));
        assert!(text.contains("[Contact Rallypoint One](https://rallypoint1.com/contact)"));
        assert!(text.contains("- Email: info@rallypoint1.com"));

        let no_email = SiteInfo {
            email: None,
            ..site()
        };
        assert!(!contributing(&no_email).contains("Email:"));
    }

    #[test]
    fn services_lowercase_category() {
        let text = professional_services(&site(), "Smoke and Air Quality");
        assert!(text.contains("related to smoke and air quality:"));
        assert!(text.contains("- Implementation support\n- Training\n"));
    }

    #[test]
    fn provenance_includes_date_and_initiative() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let text = provenance(&site(), date);
        assert!(text.starts_with("*Last updated: August 01, 2025*"));
        assert!(!text.contains("Initiative"));

        let with = SiteInfo {
            initiative: Some("Part of the NSF ASCEND Engine Wildfire Research Initiative".into()),
            ..site()
        };
        assert!(provenance(&with, date).contains("*Part of the NSF ASCEND Engine"));
    }
}
