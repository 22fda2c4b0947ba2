use crate::analyzer::extract;
use scraper::Html;
use url::Url;

fn base() -> Url {
    Url::parse("https://example.com/article").unwrap()
}

#[test]
fn test_extract_links_resolves_and_dedupes() {
    let html = r#"
        <html><body>
            <a href="/about">About</a>
            <a href="https://example.com/about">About again</a>
            <a href="https://other.com/page">Other</a>
            <a href="/about">Third copy</a>
        </body></html>
    "#;
    let doc = Html::parse_document(html);
    let links = extract::extract_links(&doc, &base());

    assert_eq!(
        links,
        vec![
            "https://example.com/about".to_string(),
            "https://other.com/page".to_string(),
        ]
    );
}

#[test]
fn test_extract_links_excludes_fragments() {
    let html = r##"
        <html><body>
            <a href="#section">Jump</a>
            <a href="/page#top">Page with fragment</a>
            <a href="/page">Plain page</a>
        </body></html>
    "##;
    let doc = Html::parse_document(html);
    let links = extract::extract_links(&doc, &base());

    assert_eq!(links, vec!["https://example.com/page".to_string()]);
    assert!(links.iter().all(|l| !l.contains('#')));
}

#[test]
fn test_extract_links_caps_at_500() {
    let mut html = String::from("<html><body>");
    for i in 0..600 {
        html.push_str(&format!(r#"<a href="/page-{}">p</a>"#, i));
    }
    html.push_str("</body></html>");

    let doc = Html::parse_document(&html);
    let links = extract::extract_links(&doc, &base());

    assert_eq!(links.len(), extract::MAX_LINKS);
    // First-seen order preserved up to the cap
    assert_eq!(links[0], "https://example.com/page-0");
    assert_eq!(links[499], "https://example.com/page-499");
}

#[test]
fn test_extract_links_skips_malformed_hrefs() {
    let html = r#"
        <html><body>
            <a href="https://good.example.com/page">good</a>
            <a href="http://[invalid">bad</a>
        </body></html>
    "#;
    let doc = Html::parse_document(html);
    let links = extract::extract_links(&doc, &base());

    // The malformed href is skipped, not fatal
    assert_eq!(links, vec!["https://good.example.com/page".to_string()]);
}

#[test]
fn test_anchor_hrefs_keeps_duplicates_and_fragments() {
    let html = r#"
        <html><body>
            <a href="/deal?affiliate=1">one</a>
            <a href="/deal?affiliate=1">one again</a>
            <a href="/deal#ref">with fragment</a>
        </body></html>
    "#;
    let doc = Html::parse_document(html);
    let hrefs = extract::anchor_hrefs(&doc, &base());
    assert_eq!(hrefs.len(), 3);
}

#[test]
fn test_author_from_meta_tag() {
    let html = r#"
        <html><head><meta name="author" content="Jane Doe"></head>
        <body><div class="byline">Someone Else</div></body></html>
    "#;
    let doc = Html::parse_document(html);
    let author = extract::extract_author(&doc, &[".byline".to_string()]);
    assert_eq!(author.as_deref(), Some("Jane Doe"));
}

#[test]
fn test_author_from_json_ld() {
    let html = r#"
        <html><head>
            <script type="application/ld+json">not json at all</script>
            <script type="application/ld+json">
                {"@type": "Article", "author": {"name": "John Smith"}}
            </script>
        </head><body></body></html>
    "#;
    let doc = Html::parse_document(html);
    // The malformed block is skipped; the valid one wins
    let author = extract::extract_author(&doc, &[]);
    assert_eq!(author.as_deref(), Some("John Smith"));
}

#[test]
fn test_author_from_byline_selector_order() {
    let html = r#"
        <html><body>
            <div class="post-author">Second Choice</div>
            <span class="author">  First Choice  </span>
        </body></html>
    "#;
    let doc = Html::parse_document(html);
    let selectors = vec![".author".to_string(), ".post-author".to_string()];
    let author = extract::extract_author(&doc, &selectors);
    // Selector list order decides, not document order, and text is trimmed
    assert_eq!(author.as_deref(), Some("First Choice"));
}

#[test]
fn test_author_absent() {
    let html = "<html><body><p>No byline here.</p></body></html>";
    let doc = Html::parse_document(html);
    let selectors = vec![".author".to_string(), "%%bad selector%%".to_string()];
    assert_eq!(extract::extract_author(&doc, &selectors), None);
}

#[test]
fn test_author_skips_empty_matches() {
    let html = r#"
        <html><head><meta name="author" content="   "></head>
        <body><div class="author">   </div><div class="byline">Real Author</div></body></html>
    "#;
    let doc = Html::parse_document(html);
    let selectors = vec![".author".to_string(), ".byline".to_string()];
    let author = extract::extract_author(&doc, &selectors);
    assert_eq!(author.as_deref(), Some("Real Author"));
}

#[test]
fn test_excerpt_truncates_to_3000_chars() {
    let long = "word ".repeat(1000);
    let excerpt = extract::excerpt(&long);
    assert_eq!(excerpt.chars().count(), extract::EXCERPT_CHARS);

    let short = "just a little text";
    assert_eq!(extract::excerpt(short), short);
}

#[test]
fn test_page_text_normalizes_whitespace() {
    let html = "<html><body><p>Hello   world</p>\n\n<p>again</p></body></html>";
    let doc = Html::parse_document(html);
    assert_eq!(extract::page_text(&doc), "Hello world again");
}

#[test]
fn test_page_title() {
    let html = "<html><head><title>  My Page  </title></head><body></body></html>";
    let doc = Html::parse_document(html);
    assert_eq!(extract::page_title(&doc), "My Page");

    let doc = Html::parse_document("<html><body></body></html>");
    assert_eq!(extract::page_title(&doc), "");
}
