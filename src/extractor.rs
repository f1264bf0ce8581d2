//! Text-based sitemap extraction.
//!
//! Sitemaps are produced by a trusted generator, so records are pulled out
//! with a handful of regexes instead of a validating XML parser. The patterns
//! accept extra attributes and namespaces on the root element (for example
//! `xmlns:image`) and child values spread over several lines.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Namespace every sitemap root element must declare
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// A `<url>` record of a urlset document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub loc: Option<String>,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
}

/// A `<sitemap>` record of a sitemap index document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapIndexEntry {
    pub loc: Option<String>,
    pub lastmod: Option<String>,
}

struct Patterns {
    urlset_namespace: Regex,
    sitemapindex_namespace: Regex,
    urlset_element: Regex,
    google_news: Regex,
    url_block: Regex,
    sitemap_block: Regex,
    loc: Regex,
    lastmod: Regex,
    changefreq: Regex,
    priority: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn root_namespace_regex(root: &str) -> Regex {
    let pattern = format!(
        r#"<{}\b[^>]*\bxmlns\s*=\s*["']{}["']"#,
        root,
        regex::escape(SITEMAP_NAMESPACE)
    );
    Regex::new(&pattern).expect("Failed to compile root namespace regex")
}

fn child_tag_regex(tag: &str) -> Regex {
    let pattern = format!(r"(?s)<{tag}(?:\s[^>]*)?>(.*?)</{tag}\s*>");
    Regex::new(&pattern).expect("Failed to compile child tag regex")
}

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        urlset_namespace: root_namespace_regex("urlset"),
        sitemapindex_namespace: root_namespace_regex("sitemapindex"),
        urlset_element: Regex::new(r"<urlset\b").expect("Failed to compile urlset regex"),
        // `sitemap-news` only counts inside a namespace declaration, never in
        // record content such as a `<loc>` path.
        google_news: Regex::new(
            r#"(?i)xmlns:news\b|xmlns(?::[\w.-]+)?\s*=\s*["'][^"']*sitemap-news[^"']*["']|</?news:"#,
        )
        .expect("Failed to compile Google News regex"),
        // The opening tag must end or continue with whitespace right after the
        // name so that `<urlset` and `<sitemapindex` never match.
        url_block: child_tag_regex("url"),
        sitemap_block: child_tag_regex("sitemap"),
        loc: child_tag_regex("loc"),
        lastmod: child_tag_regex("lastmod"),
        changefreq: child_tag_regex("changefreq"),
        priority: child_tag_regex("priority"),
    })
}

/// First match of a child tag, trimmed; an empty child counts as absent
fn first_value(regex: &Regex, block: &str) -> Option<String> {
    regex
        .captures(block)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Check for an XML declaration anywhere in the document
pub fn has_xml_declaration(content: &str) -> bool {
    content.contains("<?xml")
}

/// Check that the `<urlset>` root declares the sitemaps.org namespace
pub fn has_urlset_namespace(content: &str) -> bool {
    patterns().urlset_namespace.is_match(content)
}

/// Check that the `<sitemapindex>` root declares the sitemaps.org namespace
pub fn has_sitemapindex_namespace(content: &str) -> bool {
    patterns().sitemapindex_namespace.is_match(content)
}

/// Check whether a `<urlset` opening tag is present at all
pub fn has_urlset_element(content: &str) -> bool {
    patterns().urlset_element.is_match(content)
}

/// Detect Google News namespaces or `news:` tags
pub fn has_google_news(content: &str) -> bool {
    patterns().google_news.is_match(content)
}

/// Extract every `<url>` record in document order
pub fn extract_url_entries(content: &str) -> Vec<SitemapEntry> {
    let p = patterns();
    p.url_block
        .captures_iter(content)
        .map(|caps| {
            let block = &caps[1];
            SitemapEntry {
                loc: first_value(&p.loc, block),
                lastmod: first_value(&p.lastmod, block),
                changefreq: first_value(&p.changefreq, block),
                priority: first_value(&p.priority, block),
            }
        })
        .collect()
}

/// Extract every `<sitemap>` record of an index document in document order
pub fn extract_index_entries(content: &str) -> Vec<SitemapIndexEntry> {
    let p = patterns();
    p.sitemap_block
        .captures_iter(content)
        .map(|caps| {
            let block = &caps[1];
            SitemapIndexEntry {
                loc: first_value(&p.loc, block),
                lastmod: first_value(&p.lastmod, block),
            }
        })
        .collect()
}
