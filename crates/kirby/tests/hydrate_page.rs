//! End-to-end hydration of a CMS-shaped page: inline data scripts are
//! extracted first, then the page is hydrated against the default registry.

use blockmount_kirby::{HydrateOptions, default_block_registry, extract_block_data, hydrate_page};
use once_cell::sync::Lazy;

static PAGE: Lazy<String> = Lazy::new(|| {
    r#"<!doctype html>
<html>
<head><title>Blogsite</title></head>
<body>
<div id="navbar-a1" class="navbar-container"></div>
<script>
window.blockData = window.blockData || {};
window.blockData['navbar-a1'] = {"logo": "Blogsite", "links": [{"title": "Blog", "url": "/blog", "external": false}]};
</script>
<div id="hero-b2" class="hero-container"></div>
<script>
window.blockData = window.blockData || {};
window.blockData['hero-b2'] = {"title": "Welcome", "subtitle": "Notes on systems", "buttonText": "Read the blog", "buttonUrl": "/blog"};
</script>
<div id="blog-c3" class="blog-container"></div>
<script>
window.blockData = window.blockData || {};
window.blockData['blog-c3'] = {"title": "Posts", "articles": [{"title": "On parsers", "description": "Parsing things.", "category": "Technology", "date": "Nov 20, 2024", "readTime": 5, "url": "/blog/on-parsers", "author": "Jane Roe"}]};
</script>
<div id="applecarousel-d4" class="applecarousel-container"></div>
<div id="footer-e5" class="footer-container"></div>
</body>
</html>"#
        .to_string()
});

#[test]
fn full_page_extract_then_hydrate() {
    let registry = default_block_registry();
    let table = extract_block_data(&PAGE).expect("data extraction should succeed");
    assert_eq!(table.len(), 3);

    let output =
        hydrate_page(&PAGE, &registry, &table, &HydrateOptions::default()).expect("hydration runs");

    let mounted: Vec<&str> = output
        .summary
        .mounted
        .iter()
        .map(|m| m.element_id.as_str())
        .collect();
    assert_eq!(mounted, vec!["navbar-a1", "hero-b2", "blog-c3"]);

    // The carousel has no renderer in the default registry; the footer has a
    // renderer but no data. Both stay untouched and retryable.
    assert_eq!(output.summary.unregistered, vec!["applecarousel".to_string()]);
    assert_eq!(output.summary.missing_data, vec!["footer-e5".to_string()]);
    assert!(output.html.contains(r#"<div id="applecarousel-d4" class="applecarousel-container"></div>"#));
    assert!(output.html.contains(r#"<div id="footer-e5" class="footer-container"></div>"#));

    // The inline data scripts themselves pass through unchanged.
    assert!(output.html.contains("window.blockData['hero-b2']"));
}

#[test]
fn hydrated_fragments_match_expectations() {
    let registry = default_block_registry();
    let table = extract_block_data(&PAGE).expect("data extraction should succeed");
    let output =
        hydrate_page(&PAGE, &registry, &table, &HydrateOptions::default()).expect("hydration runs");

    let hero_start = output.html.find("<div id=\"hero-b2\"").expect("hero present");
    let hero_end = output.html[hero_start..]
        .find("</section></div>")
        .expect("hero closes")
        + hero_start
        + "</section></div>".len();
    insta::assert_snapshot!(&output.html[hero_start..hero_end], @r###"<div id="hero-b2" class="hero-container" data-mounted="true"><section class="hero hero--default"><div class="hero__inner"><h1 class="hero__title">Welcome</h1><p class="hero__subtitle">Notes on systems</p><a class="hero__button" href="/blog">Read the blog</a></div></section></div>"###);
}

#[test]
fn hydration_is_idempotent_over_its_own_output() {
    let registry = default_block_registry();
    let table = extract_block_data(&PAGE).expect("data extraction should succeed");

    let first =
        hydrate_page(&PAGE, &registry, &table, &HydrateOptions::default()).expect("first pass");
    let second = hydrate_page(&first.html, &registry, &table, &HydrateOptions::default())
        .expect("second pass");

    assert!(second.summary.mounted.is_empty());
    assert_eq!(second.html, first.html);
}
