//! schema.org JSON-LD embedded in every page head.

use crate::config::SiteConfig;
use serde_json::{Value, json};

/// `SoftwareApplication` describing the plugin, for the home page.
pub fn software_application(config: &SiteConfig, node_count: usize) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "SoftwareApplication",
        "name": config.base.title,
        "description": config.base.description,
        "applicationCategory": "DeveloperApplication",
        "operatingSystem": "Windows, macOS, Linux",
        "url": config.base.absolute_url("/"),
        "downloadUrl": config.base.store_url,
        "featureList": format!("{node_count} Blueprint nodes"),
        "author": organization(config),
    })
}

/// `TechArticle` for a documentation page.
pub fn tech_article(config: &SiteConfig, headline: &str, description: &str, path: &str, modified: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "TechArticle",
        "headline": headline,
        "description": description,
        "url": config.base.absolute_url(path),
        "inLanguage": config.base.language,
        "dateModified": modified,
        "author": organization(config),
        "publisher": organization(config),
        "about": {
            "@type": "SoftwareApplication",
            "name": config.base.title,
        },
    })
}

fn organization(config: &SiteConfig) -> Value {
    json!({
        "@type": "Organization",
        "name": config.base.author,
    })
}

/// `<script>` tag for `data`. `</` is escaped so text cannot end the tag.
pub fn script_tag(data: &Value) -> String {
    let json = data.to_string().replace("</", "<\\/");
    format!(r#"<script type="application/ld+json">{json}</script>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_software_application() {
        let mut config = SiteConfig::default();
        config.base.url = Some("https://nodesplus.dev".into());
        let data = software_application(&config, 37);

        assert_eq!(data["@type"], "SoftwareApplication");
        assert_eq!(data["name"], "NodesPlus");
        assert_eq!(data["url"], "https://nodesplus.dev/");
        assert_eq!(data["featureList"], "37 Blueprint nodes");
    }

    #[test]
    fn test_tech_article_without_url() {
        let config = SiteConfig::default();
        let data = tech_article(&config, "Variance", "Population variance", "/documentation/math/variance", "2025-01-01");

        assert_eq!(data["@type"], "TechArticle");
        assert_eq!(data["headline"], "Variance");
        assert_eq!(data["dateModified"], "2025-01-01");
        assert!(data["url"].is_null());
    }

    #[test]
    fn test_script_tag_escapes_closing_tags() {
        let tag = script_tag(&json!({ "name": "</script><b>" }));
        assert!(tag.starts_with(r#"<script type="application/ld+json">"#));
        assert_eq!(tag.matches("</script>").count(), 1);
    }
}
