use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

use crate::budget::{truncate_chars, BODY_CHAR_BUDGET, DESCRIPTION_CHAR_BUDGET, TITLE_CHAR_BUDGET};
use crate::fetch::FetchedPage;
use crate::models::NormalizedContent;

/// Elements whose whole subtree is dropped before body text extraction.
const NOISE_ELEMENTS: &[&str] = &["script", "style", "nav", "header", "footer"];

pub fn normalize_page(page: &FetchedPage) -> NormalizedContent {
    let document = Html::parse_document(&page.html);

    let title = extract_title(&document);
    let description = extract_description(&document);
    let raw_body = extract_body_text(&document);
    let body_text = truncate_chars(&raw_body, BODY_CHAR_BUDGET).to_string();

    let title = truncate_chars(&title, TITLE_CHAR_BUDGET).to_string();
    let description = truncate_chars(&description, DESCRIPTION_CHAR_BUDGET).to_string();

    debug!(
        "Normalized page - domain={}, title_chars={}, description_chars={}, body_chars={} (of {})",
        page.domain,
        title.chars().count(),
        description.chars().count(),
        body_text.chars().count(),
        raw_body.chars().count()
    );

    let analyzable_text = compose_analyzable_text(&page.domain, &title, &description, &body_text);

    NormalizedContent {
        source_domain: Some(page.domain.clone()),
        title: Some(title).filter(|t| !t.is_empty()),
        description: Some(description).filter(|d| !d.is_empty()),
        body_text,
        analyzable_text,
    }
}

/// Manual headline/body input: no markup handling, just the body budget.
pub fn normalize_text(text: &str) -> NormalizedContent {
    let body_text = truncate_chars(text, BODY_CHAR_BUDGET).to_string();
    NormalizedContent {
        source_domain: None,
        title: None,
        description: None,
        analyzable_text: body_text.clone(),
        body_text,
    }
}

/// The layout downstream fixtures are recorded against:
/// source line, title line, blank, description, blank, body.
pub fn compose_analyzable_text(domain: &str, title: &str, description: &str, body: &str) -> String {
    format!(
        "Source: {}\nTitle: {}\n\n{}\n\n{}",
        domain,
        title,
        description,
        truncate_chars(body, BODY_CHAR_BUDGET)
    )
}

fn extract_title(document: &Html) -> String {
    let Ok(sel) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&sel)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn extract_description(document: &Html) -> String {
    let Ok(sel) = Selector::parse(r#"meta[name="description"]"#) else {
        return String::new();
    };
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default()
        .to_string()
}

fn extract_body_text(document: &Html) -> String {
    let Some(body) = Selector::parse("body")
        .ok()
        .and_then(|sel| document.select(&sel).next())
    else {
        return String::new();
    };
    let mut raw = String::new();
    collect_visible_text(body, &mut raw);
    collapse_whitespace(&raw)
}

fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if NOISE_ELEMENTS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_visible_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn page(html: &str) -> FetchedPage {
        FetchedPage {
            domain: "news.example.org".into(),
            html: html.into(),
        }
    }

    const ARTICLE: &str = r#"<!doctype html>
<html>
  <head>
    <title>  Council passes budget </title>
    <meta name="description" content="The vote ended a month of debate.">
    <style>body { color: red; }</style>
  </head>
  <body>
    <header><h1>Example News</h1></header>
    <nav><a href="/">Home</a> <a href="/world">World</a></nav>
    <article>
      <p>The city council   approved the
         budget on Tuesday.</p>
      <script>trackPageview("budget");</script>
      <div><span>Officials said</span> <footer>share this</footer> the vote was close.</div>
    </article>
    <footer>Copyright 2026</footer>
  </body>
</html>"#;

    #[test]
    fn strips_noise_and_collapses_whitespace() {
        let n = normalize_page(&page(ARTICLE));
        assert_eq!(
            n.body_text,
            "The city council approved the budget on Tuesday. Officials said the vote was close."
        );
        assert_eq!(n.title.as_deref(), Some("Council passes budget"));
        assert_eq!(n.description.as_deref(), Some("The vote ended a month of debate."));
        assert_eq!(n.source_domain.as_deref(), Some("news.example.org"));
    }

    #[test]
    fn composes_the_fixed_layout() {
        let n = normalize_page(&page(ARTICLE));
        assert_eq!(
            n.analyzable_text,
            "Source: news.example.org\nTitle: Council passes budget\n\n\
             The vote ended a month of debate.\n\n\
             The city council approved the budget on Tuesday. Officials said the vote was close."
        );
    }

    #[test]
    fn missing_title_and_description_default_to_empty() {
        let n = normalize_page(&page("<html><body><p>Just text.</p></body></html>"));
        assert_eq!(n.title, None);
        assert_eq!(n.description, None);
        assert_eq!(
            n.analyzable_text,
            "Source: news.example.org\nTitle: \n\n\n\nJust text."
        );
    }

    #[test]
    fn body_is_capped_regardless_of_document_size() {
        let para = "<p>word </p>".repeat(5_000);
        let n = normalize_page(&page(&format!("<html><body>{para}</body></html>")));
        assert_eq!(n.body_text.chars().count(), BODY_CHAR_BUDGET);
        let body_part = n.analyzable_text.rsplit("\n\n").next().unwrap();
        assert_eq!(body_part.chars().count(), BODY_CHAR_BUDGET);
    }

    #[test]
    fn manual_text_is_used_verbatim() {
        let n = normalize_text("<b>Not stripped</b>  twice");
        assert_eq!(n.analyzable_text, "<b>Not stripped</b>  twice");
        assert_eq!(n.source_domain, None);
    }

    proptest! {
        #[test]
        fn body_never_exceeds_the_cap(words in prop::collection::vec("[a-zé]{1,12}", 0..800)) {
            let html = format!("<html><body><p>{}</p></body></html>", words.join(" "));
            let n = normalize_page(&page(&html));
            prop_assert!(n.body_text.chars().count() <= BODY_CHAR_BUDGET);
            prop_assert!(normalize_text(&words.join("  ")).body_text.chars().count() <= BODY_CHAR_BUDGET);
        }
    }
}
