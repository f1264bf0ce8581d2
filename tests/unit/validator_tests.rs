use validate_sitemaps::run::{FileStatus, SitemapKind};
use validate_sitemaps::validator::SitemapValidator;

use crate::common::test_helpers::{SitemapFixture, XML_DECLARATION, urlset_xml};

#[tokio::test]
async fn test_complete_directory_passes() {
    let fixture = SitemapFixture::complete();
    let validator = SitemapValidator::new(fixture.sitemaps_config());

    let run = validator.run().await;

    assert!(run.errors().is_empty(), "errors: {:?}", run.errors());
    assert!(run.warnings().is_empty(), "warnings: {:?}", run.warnings());
    assert_eq!(run.total_urls(), 7);
    assert_eq!(run.exit_code(), 0);

    let files = run.files();
    assert_eq!(files.len(), 5);
    assert_eq!(files[1].name, "vehicle-sitemap.xml");
    assert_eq!(files[1].records, 3);
    assert_eq!(files[4].kind, SitemapKind::Index);
    assert_eq!(files[4].records, 4);
}

#[tokio::test]
async fn test_duplicate_across_files_reported_once() {
    let fixture = SitemapFixture::complete();
    fixture.write(
        "blog-sitemap.xml",
        &urlset_xml(&["https://example.com/cars/2", "https://example.com/blog/launch"]),
    );

    let run = SitemapValidator::new(fixture.sitemaps_config())
        .run()
        .await;

    assert_eq!(
        run.errors(),
        ["blog-sitemap.xml [url #1]: Duplicate URL: https://example.com/cars/2"]
    );
    assert_eq!(run.total_urls(), 8);
}

#[tokio::test]
async fn test_missing_file_is_a_warning_and_index_reports_it() {
    let fixture = SitemapFixture::complete();
    fixture.remove("accessories-sitemap.xml");

    let run = SitemapValidator::new(fixture.sitemaps_config())
        .run()
        .await;

    assert_eq!(
        run.warnings(),
        ["accessories-sitemap.xml: File does not exist (skipped)"]
    );
    assert_eq!(
        run.errors(),
        ["sitemap-index.xml [sitemap #4]: Referenced sitemap file does not exist: accessories-sitemap.xml"]
    );
    assert_eq!(run.files()[3].status, FileStatus::Missing);
}

#[tokio::test]
async fn test_structural_failures_stop_the_file() {
    let fixture = SitemapFixture::complete();
    fixture.write(
        "sitemap.xml",
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\"></urlset>",
    );
    fixture.write(
        "vehicle-sitemap.xml",
        &format!("{}\n<feed><entry/></feed>", XML_DECLARATION),
    );
    fixture.write(
        "blog-sitemap.xml",
        &format!(
            "{}\n<urlset><url><loc>http://example.com/</loc></url></urlset>",
            XML_DECLARATION
        ),
    );

    let run = SitemapValidator::new(fixture.sitemaps_config())
        .run()
        .await;

    assert_eq!(run.errors().len(), 3, "errors: {:?}", run.errors());
    assert_eq!(
        run.errors()[0],
        "sitemap.xml: Not a valid XML document (missing XML declaration)"
    );
    assert_eq!(
        run.errors()[1],
        "vehicle-sitemap.xml: Invalid sitemap structure (no <urlset> element found)"
    );
    assert!(run.errors()[2].starts_with("blog-sitemap.xml: Root element must be <urlset>"));
    assert_eq!(run.total_urls(), 1);
    assert_eq!(run.exit_code(), 1);
}

#[tokio::test]
async fn test_every_field_violation_is_reported() {
    let fixture = SitemapFixture::complete();
    fixture.write(
        "accessories-sitemap.xml",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/accessories/mats</loc>
    <lastmod>15/01/2024</lastmod>
    <changefreq>sometimes</changefreq>
    <priority>2</priority>
  </url>
  <url>
    <loc>https://example.com/accessories?id=4</loc>
    <priority>9</priority>
  </url>
</urlset>"#,
    );

    let run = SitemapValidator::new(fixture.sitemaps_config())
        .run()
        .await;

    let errors = run.errors();
    assert_eq!(errors.len(), 4, "errors: {:?}", errors);
    assert!(errors[0].starts_with("accessories-sitemap.xml [url #1]: Invalid date format"));
    assert!(errors[1].starts_with("accessories-sitemap.xml [url #1]: Invalid changefreq"));
    assert!(errors[2].starts_with("accessories-sitemap.xml [url #1]: Invalid priority: 2"));
    assert_eq!(
        errors[3],
        "accessories-sitemap.xml [url #2]: URL must not contain query string parameters: https://example.com/accessories?id=4"
    );
    assert_eq!(run.total_urls(), 8);
}

#[tokio::test]
async fn test_google_news_is_rejected_but_entries_still_checked() {
    let fixture = SitemapFixture::complete();
    fixture.write(
        "blog-sitemap.xml",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:news="http://www.google.com/schemas/sitemap-news/0.9">
  <url>
    <loc>http://example.com/blog/news</loc>
  </url>
</urlset>"#,
    );

    let run = SitemapValidator::new(fixture.sitemaps_config())
        .run()
        .await;

    assert_eq!(
        run.errors(),
        [
            "blog-sitemap.xml: Google News sitemap extensions are not allowed",
            "blog-sitemap.xml [url #1]: URL must use HTTPS: http://example.com/blog/news",
        ]
    );
}
