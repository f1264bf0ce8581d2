use validate_sitemaps::extractor::{
    extract_index_entries, extract_url_entries, has_google_news, has_sitemapindex_namespace,
    has_urlset_element, has_urlset_namespace, has_xml_declaration,
};

use crate::common::test_helpers::{index_xml, urlset_xml};

#[test]
fn test_generated_documents_are_recognised() {
    let urlset = urlset_xml(&["https://example.com/", "https://example.com/cars"]);
    assert!(has_xml_declaration(&urlset));
    assert!(has_urlset_element(&urlset));
    assert!(has_urlset_namespace(&urlset));
    assert!(!has_google_news(&urlset));

    let entries = extract_url_entries(&urlset);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].loc.as_deref(), Some("https://example.com/cars"));
    assert_eq!(entries[1].lastmod.as_deref(), Some("2024-01-15"));
    assert_eq!(entries[1].changefreq.as_deref(), Some("weekly"));
    assert_eq!(entries[1].priority.as_deref(), Some("0.8"));

    let index = index_xml(&["sitemap.xml"]);
    assert!(has_sitemapindex_namespace(&index));
    assert!(!has_urlset_namespace(&index));
    let entries = extract_index_entries(&index);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].loc.as_deref(), Some("https://example.com/sitemap.xml"));
}

#[test]
fn test_namespace_tolerates_attribute_order_and_quotes() {
    let content = "<?xml version='1.0'?>\n<urlset\n  xmlns:xhtml='http://www.w3.org/1999/xhtml'\n  xmlns = 'http://www.sitemaps.org/schemas/sitemap/0.9'>\n</urlset>";
    assert!(has_urlset_namespace(content));

    let wrong = r#"<?xml version="1.0"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.8"></urlset>"#;
    assert!(!has_urlset_namespace(wrong));
    assert!(has_urlset_element(wrong));
}

#[test]
fn test_multiline_and_missing_children() {
    let content = r#"<?xml version="1.0"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>
      https://example.com/multi
    </loc>
  </url>
  <url>
    <lastmod>2024-01-01</lastmod>
  </url>
</urlset>"#;

    let entries = extract_url_entries(content);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].loc.as_deref(), Some("https://example.com/multi"));
    assert_eq!(entries[0].lastmod, None);
    assert_eq!(entries[1].loc, None);
    assert_eq!(entries[1].lastmod.as_deref(), Some("2024-01-01"));
}

#[test]
fn test_google_news_detection() {
    assert!(has_google_news(
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:news="http://www.google.com/schemas/sitemap-news/0.9">"#
    ));
    assert!(has_google_news("<url><news:news></news:news></url>"));
    assert!(!has_google_news("<url><loc>https://example.com/newsroom</loc></url>"));
}
