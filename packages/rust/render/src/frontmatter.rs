//! Quarto/YAML front matter block.

use chrono::NaiveDate;

/// Metadata header written at the top of every document.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub date: NaiveDate,
    pub categories: &'a [&'a str],
    pub author: Option<&'a str>,
    /// Depth for the `toc-depth` key; the key is omitted when `None`.
    pub toc_depth: Option<u8>,
}

impl FrontMatter<'_> {
    /// Render the `---` delimited block, including the trailing newline.
    pub fn render(&self) -> String {
        let mut fm = String::from("---\n");
        fm.push_str(&format!("title: \"{}\"\n", escape_yaml_string(self.title)));
        fm.push_str(&format!(
            "description: \"{}\"\n",
            escape_yaml_string(self.description)
        ));
        fm.push_str(&format!("date: {}\n", self.date.format("%Y-%m-%d")));
        if !self.categories.is_empty() {
            let quoted: Vec<String> = self
                .categories
                .iter()
                .map(|c| format!("\"{}\"", escape_yaml_string(c)))
                .collect();
            fm.push_str(&format!("categories: [{}]\n", quoted.join(", ")));
        }
        if let Some(author) = self.author {
            fm.push_str(&format!("author: \"{}\"\n", escape_yaml_string(author)));
        }
        fm.push_str("toc: true\n");
        if let Some(depth) = self.toc_depth {
            fm.push_str(&format!("toc-depth: {depth}\n"));
        }
        fm.push_str("---\n");
        fm
    }
}

/// Escape special characters in a YAML double-quoted string value.
pub(crate) fn escape_yaml_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `2026-10-18` → `October 18, 2026`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn renders_all_keys() {
        let fm = FrontMatter {
            title: "FARSITE",
            description: "Fire area simulator",
            date: date(),
            categories: &["Operational Fire Spread Models"],
            author: Some("AI Research Assistant"),
            toc_depth: Some(3),
        }
        .render();

        assert_eq!(
            fm,
            "---\n\
             title: \"FARSITE\"\n\
             description: \"Fire area simulator\"\n\
             date: 2025-03-07\n\
             categories: [\"Operational Fire Spread Models\"]\n\
             author: \"AI Research Assistant\"\n\
             toc: true\n\
             toc-depth: 3\n\
             ---\n"
        );
    }

    #[test]
    fn omits_optional_keys() {
        let fm = FrontMatter {
            title: "Index",
            description: "d",
            date: date(),
            categories: &[],
            author: None,
            toc_depth: None,
        }
        .render();
        assert!(!fm.contains("categories"));
        assert!(!fm.contains("author"));
        assert!(!fm.contains("toc-depth"));
        assert!(fm.contains("toc: true"));
    }

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(escape_yaml_string(r#"say "hi" \o/"#), r#"say \"hi\" \\o/"#);
    }

    #[test]
    fn long_date_format() {
        assert_eq!(long_date(date()), "March 07, 2025");
    }
}
