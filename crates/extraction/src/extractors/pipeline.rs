//! Shared extraction pipeline
//!
//! The algorithm every vendor variant runs: fetch each documentation path,
//! locate headings (levels 1-4) matching the relevant section keywords as
//! case-insensitive regexes, walk forward collecting content-bearing nodes
//! until the next heading, score each block against the keywords, and
//! attach any code / configuration / API sub-artifacts found in the
//! block's markup. "Walk forward" is a linear scan with a stopping
//! predicate, in document order or sibling order per vendor profile.

use cdpbot_common::cache::keys;
use cdpbot_common::errors::Result;
use cdpbot_common::metrics;
use cdpbot_common::model::{ApiDetails, DocumentSnippet, Platform, Task};
use cdpbot_common::scoring::RelevanceScorer;
use regex_lite::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

use super::{BlockSpec, DivPolicy, ExtractorCore, VendorProfile, WalkStrategy};

/// Heading levels considered section boundaries
const HEADING_TAGS: [&str; 4] = ["h1", "h2", "h3", "h4"];

/// Content-bearing tags collected during a heading walk (containers are
/// handled separately via the vendor's div policy)
const WALK_CONTENT_TAGS: [&str; 5] = ["p", "ul", "ol", "pre", "code"];

/// Content-bearing tags scanned during free-text search
const SEARCH_CONTENT_TAGS: [&str; 4] = ["p", "li", "pre", "code"];

/// Everything the walk needs to see, in document order
const SCOPE_SELECTOR: &str = "h1, h2, h3, h4, p, ul, ol, pre, code, div";

/// Join a documentation-relative path onto a vendor base URL
pub(crate) fn join_docs_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Cache-check, fetch, extract, and cache for a task extraction
pub(crate) async fn run_extract_docs(
    core: &ExtractorCore,
    profile: &VendorProfile,
    base_url: &str,
    paths: &[&str],
    task: Task,
    sections: &[&str],
) -> Result<Vec<DocumentSnippet>> {
    let platform = profile.platform;
    let key = keys::task(task);

    if core.cache.is_enabled() {
        if let Some(cached) = core.cache.get::<Vec<DocumentSnippet>>(platform, &key) {
            metrics::record_cache_lookup(platform.as_str(), true);
            return Ok(cached);
        }
        metrics::record_cache_lookup(platform.as_str(), false);
    }

    let mut results = Vec::new();
    for path in paths {
        let url = join_docs_url(base_url, path);
        let html = match core.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %url, error = %e, "Skipping unreachable documentation page");
                continue;
            }
        };
        results.extend(extract_page(&html, &url, sections, profile, &core.scorer));
    }

    metrics::record_snippets(platform.as_str(), results.len());
    if !results.is_empty() {
        core.cache.set(platform, &key, &results);
    }
    Ok(results)
}

/// Fetch and scan every known path for a free-text query
pub(crate) async fn run_search(
    core: &ExtractorCore,
    profile: &VendorProfile,
    base_url: &str,
    paths: &[&str],
    query: &str,
) -> Result<Vec<DocumentSnippet>> {
    let platform = profile.platform;
    let key = keys::search(query);

    if core.cache.is_enabled() {
        if let Some(cached) = core.cache.get::<Vec<DocumentSnippet>>(platform, &key) {
            metrics::record_cache_lookup(platform.as_str(), true);
            return Ok(cached);
        }
        metrics::record_cache_lookup(platform.as_str(), false);
    }

    let tokens: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut results = Vec::new();
    for path in paths {
        let url = join_docs_url(base_url, path);
        let html = match core.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %url, error = %e, "Skipping unreachable documentation page");
                continue;
            }
        };
        results.extend(search_page(&html, &url, &tokens, profile, &core.scorer));
    }

    cdpbot_common::scoring::sort_by_relevance(&mut results);
    metrics::record_snippets(platform.as_str(), results.len());
    core.cache.set(platform, &key, &results);
    Ok(results)
}

/// Extract snippets for the given section keywords from one page
pub(crate) fn extract_page(
    html: &str,
    url: &str,
    sections: &[&str],
    profile: &VendorProfile,
    scorer: &RelevanceScorer,
) -> Vec<DocumentSnippet> {
    let doc = Html::parse_document(html);
    let root = scope_root(&doc, profile);
    let elements = select_within(root, SCOPE_SELECTOR);

    let mut collected: Vec<ElementRef> = Vec::new();
    let mut any_heading_matched = false;

    for section in sections {
        let Ok(re) = Regex::new(&format!("(?i){}", section)) else {
            debug!(section, "Skipping unparsable section keyword");
            continue;
        };

        for (idx, el) in elements.iter().enumerate() {
            if !is_heading(el) || !re.is_match(&element_text(el)) {
                continue;
            }
            any_heading_matched = true;

            match profile.walk {
                WalkStrategy::Document => {
                    for following in &elements[idx + 1..] {
                        if is_heading(following) {
                            break;
                        }
                        if is_walk_content(following, profile) {
                            collected.push(*following);
                        }
                    }
                }
                WalkStrategy::Siblings => {
                    let mut node = el.next_sibling();
                    while let Some(n) = node {
                        if let Some(sibling) = ElementRef::wrap(n) {
                            if is_heading(&sibling) {
                                break;
                            }
                            if is_walk_content(&sibling, profile) {
                                collected.push(sibling);
                            }
                        }
                        node = n.next_sibling();
                    }
                }
            }
        }
    }

    // No section heading found: score every content-bearing node instead
    // and let relevance filtering drop the noise
    if !any_heading_matched {
        collected = elements
            .iter()
            .filter(|el| !is_heading(el) && is_walk_content(el, profile))
            .copied()
            .collect();
    }

    collected
        .into_iter()
        .filter_map(|el| element_to_snippet(el, url, sections, profile, scorer))
        .collect()
}

/// Scan one page's content-bearing nodes for a token query
pub(crate) fn search_page<S: AsRef<str>>(
    html: &str,
    url: &str,
    tokens: &[S],
    profile: &VendorProfile,
    scorer: &RelevanceScorer,
) -> Vec<DocumentSnippet> {
    let doc = Html::parse_document(html);
    let elements = select_within(doc.root_element(), "p, li, pre, code, div");

    elements
        .into_iter()
        .filter(|el| is_search_content(el, profile))
        .filter_map(|el| element_to_snippet(el, url, tokens, profile, scorer))
        .collect()
}

/// Build a snippet from one collected element, or discard it
fn element_to_snippet<S: AsRef<str>>(
    el: ElementRef,
    url: &str,
    keywords: &[S],
    profile: &VendorProfile,
    scorer: &RelevanceScorer,
) -> Option<DocumentSnippet> {
    let text = element_text(&el);
    if text.is_empty() {
        return None;
    }

    if profile.cross_vendor_guard && mentions_other_vendor_only(&text, profile.platform) {
        debug!(platform = %profile.platform, "Discarding cross-vendor block");
        return None;
    }

    let relevance = scorer.score(&text, keywords);
    if relevance <= 0.0 {
        return None;
    }

    let fragment = el.html();
    let mut snippet = DocumentSnippet::new(text, url, relevance);

    if let Some(spec) = &profile.code_examples {
        snippet.code_examples = classed_block_texts(&fragment, spec);
    }
    if let Some(spec) = &profile.configuration_examples {
        snippet.configuration_examples = classed_block_texts(&fragment, spec);
    }
    if let Some(spec) = &profile.api_details {
        snippet.api_details = extract_api_details(&fragment, spec);
    }
    if !profile.content_markers.is_empty() {
        snippet.content_type = Some(identify_content_type(&el, profile));
    }

    Some(snippet)
}

/// The element the walk is scoped to: the page's `main` when the profile
/// prefers it and one exists, the document root otherwise
fn scope_root<'a>(doc: &'a Html, profile: &VendorProfile) -> ElementRef<'a> {
    if profile.prefer_main {
        if let Ok(sel) = Selector::parse("main") {
            if let Some(main) = doc.select(&sel).next() {
                return main;
            }
        }
    }
    doc.root_element()
}

/// All elements matching `css` under `root`, in document order
fn select_within<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(sel) => root.select(&sel).collect(),
        Err(_) => Vec::new(),
    }
}

fn is_heading(el: &ElementRef) -> bool {
    HEADING_TAGS.contains(&el.value().name())
}

fn is_walk_content(el: &ElementRef, profile: &VendorProfile) -> bool {
    let name = el.value().name();
    if WALK_CONTENT_TAGS.contains(&name) {
        return true;
    }
    name == "div" && div_admitted(el, profile.div_policy)
}

fn is_search_content(el: &ElementRef, profile: &VendorProfile) -> bool {
    let name = el.value().name();
    if SEARCH_CONTENT_TAGS.contains(&name) {
        return true;
    }
    name == "div" && div_admitted(el, profile.div_policy)
}

fn div_admitted(el: &ElementRef, policy: DivPolicy) -> bool {
    let classes: Vec<&str> = el.value().classes().collect();
    match policy {
        DivPolicy::Skip => false,
        DivPolicy::FirstClassIn(allowed) => {
            classes.first().is_some_and(|first| allowed.contains(first))
        }
        DivPolicy::ClasslessOrAllowed(allowed) => {
            classes.is_empty() || classes.iter().any(|c| allowed.contains(c))
        }
        DivPolicy::ClassIn(allowed) => classes.iter().any(|c| allowed.contains(c)),
    }
}

/// Plain text of an element with script/style content removed and
/// whitespace collapsed
pub(crate) fn element_text(el: &ElementRef) -> String {
    let mut out = String::new();
    collect_text(el, &mut out);
    collapse_whitespace(&out)
}

fn collect_text(el: &ElementRef, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => {
                out.push(' ');
                out.push_str(text);
            }
            Node::Element(e) if e.name() == "script" || e.name() == "style" => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(&child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// Collapse runs of whitespace to single spaces and trim
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip any markup from a content string, collapsing whitespace
pub(crate) fn strip_html(content: &str) -> String {
    if !content.contains('<') {
        return collapse_whitespace(content);
    }
    let frag = Html::parse_fragment(content);
    element_text(&frag.root_element())
}

/// True when the text names another known vendor but not this one
fn mentions_other_vendor_only(text: &str, platform: Platform) -> bool {
    let lower = text.to_lowercase();
    if lower.contains(platform.as_str()) {
        return false;
    }
    Platform::ALL
        .iter()
        .any(|other| *other != platform && lower.contains(other.as_str()))
}

/// Texts of blocks matching a tag/class spec within an element's markup
pub(crate) fn classed_block_texts(fragment_html: &str, spec: &BlockSpec) -> Vec<String> {
    let frag = Html::parse_fragment(fragment_html);
    let Ok(sel) = Selector::parse(&spec.tags.join(", ")) else {
        return Vec::new();
    };

    frag.select(&sel)
        .filter(|el| {
            spec.classes.is_empty() || el.value().classes().any(|c| spec.classes.contains(&c))
        })
        .filter_map(|el| {
            let text = el.text().collect::<String>().trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .collect()
}

/// Sniff API call details out of an element's markup
pub(crate) fn extract_api_details(fragment_html: &str, spec: &BlockSpec) -> Option<ApiDetails> {
    let blocks = classed_block_texts(fragment_html, spec);
    if blocks.is_empty() {
        return None;
    }

    let endpoint_re = Regex::new(r"(GET|POST|PUT|DELETE)\s+(/\S+)").ok()?;
    let mut details = ApiDetails::default();

    for text in blocks {
        if let Some(caps) = endpoint_re.captures(&text) {
            details.method = Some(caps[1].to_string());
            details.endpoint = Some(caps[2].to_string());
        }

        let lower = text.to_lowercase();
        if lower.contains("request") {
            details.request_example = Some(text);
        } else if lower.contains("response") {
            details.response_example = Some(text);
        }
    }

    (!details.is_empty()).then_some(details)
}

/// Vendor-specific content classification by class and marker text
fn identify_content_type(el: &ElementRef, profile: &VendorProfile) -> String {
    let classes: Vec<&str> = el.value().classes().collect();
    let text = element_text(el).to_lowercase();

    for marker in profile.content_markers {
        if marker.classes.iter().any(|c| classes.contains(c)) {
            return marker.name.to_string();
        }
        if marker
            .text_markers
            .iter()
            .any(|m| text.contains(&m.to_lowercase()))
        {
            return marker.name.to_string();
        }
    }

    "general".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{lytics, mparticle, segment, zeotap};

    const SECTIONS: [&str; 2] = ["sources", "setup"];

    fn scorer() -> RelevanceScorer {
        RelevanceScorer::new()
    }

    #[test]
    fn test_join_docs_url() {
        assert_eq!(
            join_docs_url("https://segment.com/docs/", "/profiles/"),
            "https://segment.com/docs/profiles/"
        );
        assert_eq!(
            join_docs_url("https://docs.lytics.com", "/segments/"),
            "https://docs.lytics.com/segments/"
        );
    }

    #[test]
    fn test_document_walk_stops_at_next_heading() {
        let html = r#"
            <html><body>
              <h2>Sources overview</h2>
              <p>Connect your sources here.</p>
              <ul><li>First add a sources entry</li></ul>
              <h2>Unrelated</h2>
              <p>This paragraph mentions sources but sits after the boundary.</p>
            </body></html>
        "#;
        let snippets = extract_page(html, "https://x/", &SECTIONS, &mparticle::PROFILE, &scorer());

        assert_eq!(snippets.len(), 2);
        assert!(snippets[0].content.contains("Connect your sources"));
        assert!(snippets[1].content.contains("add a sources entry"));
    }

    #[test]
    fn test_sibling_walk_skips_nested_content() {
        // The paragraph inside the aside is not a sibling of the heading
        // and must not be collected under the sibling strategy.
        let html = r#"
            <html><body><main>
              <h3>Sources</h3>
              <p>Sibling paragraph about sources.</p>
              <aside><p>Nested paragraph about sources.</p></aside>
              <h3>Next</h3>
            </main></body></html>
        "#;
        let snippets = extract_page(html, "https://x/", &SECTIONS, &lytics::PROFILE, &scorer());

        assert_eq!(snippets.len(), 1);
        assert!(snippets[0].content.contains("Sibling paragraph"));
    }

    #[test]
    fn test_fallback_collects_page_content_when_no_heading_matches() {
        let html = r#"
            <html><body>
              <h2>Something else entirely</h2>
              <p>Plenty of sources talk in the body text.</p>
              <p>Totally irrelevant paragraph.</p>
            </body></html>
        "#;
        let snippets = extract_page(html, "https://x/", &SECTIONS, &mparticle::PROFILE, &scorer());

        // Fallback scanned both paragraphs; only the relevant one scored
        assert_eq!(snippets.len(), 1);
        assert!(snippets[0].content.contains("sources talk"));
    }

    #[test]
    fn test_zero_relevance_blocks_are_discarded() {
        let html = r#"
            <html><body>
              <h2>Sources</h2>
              <p>Nothing matching the keywords at all.</p>
            </body></html>
        "#;
        let snippets = extract_page(html, "https://x/", &SECTIONS, &mparticle::PROFILE, &scorer());
        assert!(snippets.is_empty());
    }

    #[test]
    fn test_div_first_class_policy() {
        let html = r#"
            <html><body>
              <h2>Sources</h2>
              <div class="content">Admitted sources container.</div>
              <div class="sidebar content">Rejected: first class is sidebar, sources or not.</div>
            </body></html>
        "#;
        let snippets = extract_page(html, "https://x/", &SECTIONS, &mparticle::PROFILE, &scorer());

        assert_eq!(snippets.len(), 1);
        assert!(snippets[0].content.contains("Admitted"));
    }

    #[test]
    fn test_div_classless_or_allowed_policy() {
        let html = r#"
            <html><body><main>
              <h3>Sources</h3>
              <div>Classless sources div.</div>
              <div class="tutorial">Allowed sources tutorial div.</div>
              <div class="nav">Rejected nav div about sources.</div>
            </main></body></html>
        "#;
        let snippets = extract_page(html, "https://x/", &SECTIONS, &lytics::PROFILE, &scorer());

        let contents: Vec<_> = snippets.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents.len(), 2);
        assert!(contents[0].contains("Classless"));
        assert!(contents[1].contains("tutorial"));
    }

    #[test]
    fn test_div_class_allow_list_policy() {
        let html = r#"
            <html><body>
              <h2>Sources</h2>
              <div class="tutorial">Sources walkthrough div.</div>
              <div>Classless sources div is rejected for this vendor.</div>
            </body></html>
        "#;
        let snippets = extract_page(html, "https://x/", &SECTIONS, &zeotap::PROFILE, &scorer());

        assert_eq!(snippets.len(), 1);
        assert!(snippets[0].content.contains("walkthrough"));
    }

    #[test]
    fn test_cross_vendor_guard() {
        let html = r#"
            <html><body><main>
              <h3>Sources</h3>
              <p>Segment sources require a workspace.</p>
              <p>Lytics sources are configured inline.</p>
              <p>Segment and lytics sources can coexist.</p>
            </main></body></html>
        "#;
        let snippets = extract_page(html, "https://x/", &SECTIONS, &lytics::PROFILE, &scorer());

        let contents: Vec<_> = snippets.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents.len(), 2);
        assert!(contents.iter().all(|c| c.to_lowercase().contains("lytics")));
    }

    #[test]
    fn test_code_examples_require_listed_classes() {
        let html = r#"
            <html><body>
              <h2>Sources</h2>
              <div class="content">Install the sources SDK:
                <pre class="highlight">npm install sdk</pre>
                <pre>ignored plain block</pre>
              </div>
            </body></html>
        "#;
        let snippets = extract_page(html, "https://x/", &SECTIONS, &mparticle::PROFILE, &scorer());

        assert!(!snippets.is_empty());
        let with_code: Vec<_> = snippets
            .iter()
            .flat_map(|s| s.code_examples.iter())
            .collect();
        assert_eq!(with_code, vec!["npm install sdk"]);
    }

    #[test]
    fn test_segment_code_examples_take_bare_blocks() {
        let html = r#"
            <html><body>
              <h2>Setup</h2>
              <pre>analytics.load("writeKey")</pre>
            </body></html>
        "#;
        let snippets = extract_page(html, "https://x/", &SECTIONS, &segment::PROFILE, &scorer());

        assert!(!snippets.is_empty());
        assert_eq!(snippets[0].code_examples, vec!["analytics.load(\"writeKey\")"]);
    }

    #[test]
    fn test_configuration_examples() {
        let html = r#"
            <html><body><main>
              <h3>Setup</h3>
              <div class="tutorial">Setup goes like this:
                <pre class="yaml">stream: default</pre>
              </div>
            </main></body></html>
        "#;
        let snippets = extract_page(html, "https://x/", &SECTIONS, &lytics::PROFILE, &scorer());

        assert!(!snippets.is_empty());
        assert_eq!(snippets[0].configuration_examples, vec!["stream: default"]);
    }

    #[test]
    fn test_api_details_extraction() {
        let spec = BlockSpec {
            tags: &["div", "pre", "code"],
            classes: &["api", "endpoint", "method"],
        };
        let fragment = r#"
            <div class="api">POST /v2/identify with the request body below</div>
            <pre class="endpoint">response: {"status": "ok"}</pre>
        "#;
        let details = extract_api_details(fragment, &spec).unwrap();

        assert_eq!(details.method.as_deref(), Some("POST"));
        assert_eq!(details.endpoint.as_deref(), Some("/v2/identify"));
        assert!(details.request_example.is_some());
        assert!(details.response_example.is_some());
    }

    #[test]
    fn test_api_details_absent_without_matching_blocks() {
        let spec = BlockSpec {
            tags: &["div", "pre", "code"],
            classes: &["api", "endpoint", "method"],
        };
        assert!(extract_api_details("<p>GET /nope</p>", &spec).is_none());
    }

    #[test]
    fn test_content_type_identification() {
        let html = r#"
            <html><body>
              <h2>Sources</h2>
              <div class="tutorial">Step by step sources guide.</div>
            </body></html>
        "#;
        let snippets = extract_page(html, "https://x/", &SECTIONS, &zeotap::PROFILE, &scorer());

        assert!(!snippets.is_empty());
        assert_eq!(snippets[0].content_type.as_deref(), Some("tutorial"));
    }

    #[test]
    fn test_element_text_skips_script_and_style() {
        let html = "<html><body><p>Visible sources text<script>var x = 1;</script></p></body></html>";
        let snippets = extract_page(html, "https://x/", &SECTIONS, &mparticle::PROFILE, &scorer());

        assert_eq!(snippets.len(), 1);
        assert!(!snippets[0].content.contains("var x"));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello   <b>world</b></p>"), "Hello world");
        assert_eq!(strip_html("already   plain"), "already plain");
    }

    #[test]
    fn test_search_page_scores_tokens() {
        let html = r#"
            <html><body>
              <p>Identity resolution merges user profiles.</p>
              <li>Unrelated navigation item</li>
            </body></html>
        "#;
        let tokens = ["identity".to_string(), "resolution".to_string()];
        let results = search_page(html, "https://x/", &tokens, &mparticle::PROFILE, &scorer());

        assert_eq!(results.len(), 1);
        assert!(results[0].relevance > 0.0);
        assert!(results[0].content.contains("Identity resolution"));
    }
}
