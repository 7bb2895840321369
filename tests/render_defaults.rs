//! End-to-end rendering through the real imaging backend.
//!
//! Builds an engine over a tempdir site root with a real PNG fallback
//! image, no caller configuration beyond the config file fields, and
//! checks the default tag set output — including the actually-scaled
//! og:image variant on disk.

use metahead::config::SiteConfig;
use metahead::engine::Seo;
use metahead::imaging::RustBackend;
use metahead::subject::{MapSubject, Subject};
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

const LONG_TITLE: &str =
    "A Reasonably Long Page Title That Exceeds Sixty Characters For Truncation";

fn site_config(root: &Path) -> SiteConfig {
    SiteConfig {
        root_path: root.to_path_buf(),
        base_url: "https://example.com/".to_string(),
        fallback_images: Some("assets/og".to_string()),
        ..SiteConfig::default()
    }
}

fn write_fallback_png(root: &Path) {
    let dir = root.join("assets/og");
    fs::create_dir_all(&dir).unwrap();
    image::RgbImage::new(8, 6)
        .save(dir.join("001-cover.png"))
        .unwrap();
}

fn engine(root: &Path) -> Seo {
    Seo::new(
        site_config(root),
        Rc::new(RustBackend::new()),
        Rc::new(MapSubject::new().with("title", LONG_TITLE)),
    )
}

#[test]
fn default_tag_set_renders_end_to_end() {
    let tmp = TempDir::new().unwrap();
    write_fallback_png(tmp.path());
    let seo = engine(tmp.path());

    let out = seo.render().unwrap();

    assert!(out.starts_with("<!-- metahead -->\n  "));

    // Title truncated at the word boundary nearest 60, no ellipsis
    assert!(out.contains(
        "<title>A Reasonably Long Page Title That Exceeds Sixty Characters</title>"
    ));
    // og:title allows 95 chars; the full title fits
    assert!(out.contains(&format!(
        r#"<meta property="og:title" content="{LONG_TITLE}">"#
    )));

    // og:image resolved the fallback, scaled it into the 1200x630 box,
    // and mapped the variant path to the public URL
    assert!(out.contains(
        r#"<meta property="og:image" content="https://example.com/assets/og/001-cover-1200x630.png">"#
    ));
    assert!(out.contains(r#"<meta property="og:image:type" content="image/png">"#));
    assert!(out.contains(r#"<meta property="og:image:width" content="1200">"#));
    assert!(out.contains(r#"<meta property="og:image:height" content="630">"#));
    assert!(out.contains(&format!(
        r#"<meta property="og:image:alt" content="{LONG_TITLE}">"#
    )));

    // The scaled variant actually exists with the right dimensions
    let variant = tmp.path().join("assets/og/001-cover-1200x630.png");
    assert!(variant.is_file());
    assert_eq!(image::image_dimensions(&variant).unwrap(), (1200, 630));
}

#[test]
fn repeated_renders_are_identical() {
    let tmp = TempDir::new().unwrap();
    write_fallback_png(tmp.path());
    let seo = engine(tmp.path());

    let first = seo.render().unwrap();
    let second = seo.render().unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_fallback_dir_degrades_to_empty_image_tags() {
    let tmp = TempDir::new().unwrap();
    // No assets/og directory at all
    let seo = engine(tmp.path());

    let out = seo.render().unwrap();
    assert!(out.contains(r#"<meta property="og:image" content="">"#));
    assert!(out.contains(r#"<meta property="og:image:width" content="">"#));
    assert!(out.contains(&format!(
        r#"<meta property="og:image:alt" content="{LONG_TITLE}">"#
    )));
}

#[test]
fn subject_field_lookup_drives_the_title() {
    let tmp = TempDir::new().unwrap();
    let subject = MapSubject::new().with("title", "Short");
    assert_eq!(subject.field("title").as_deref(), Some("Short"));

    let seo = Seo::new(
        site_config(tmp.path()),
        Rc::new(RustBackend::new()),
        Rc::new(subject),
    );
    assert!(seo.render().unwrap().contains("<title>Short</title>"));
}
