//! The Hacker News front page scraper.
//!
//! Every story on [The Hacker News](https://thehackernews.com) front page is
//! rendered as a `.body-post` block:
//!
//! ```html
//! <div class="body-post clear">
//!   <a class="story-link" href="https://thehackernews.com/2024/03/slug.html">
//!     <div class="img-ratio"><img data-src="https://…/preview.jpg"></div>
//!     <h2 class="home-title">Headline</h2>
//!     <div class="item-label">
//!       <span class="h-datetime"><i class="icon-font icon-calendar">&#59394;</i>Mar 05, 2024</span>
//!       <span class="h-author"><i class="icon-font icon-user">&#59396;</i>Ravie Lakshmanan</span>
//!       <span class="h-tags">Vulnerability / Cyber Attack</span>
//!     </div>
//!     <div class="home-desc">Short description…</div>
//!   </a>
//! </div>
//! ```
//!
//! The byline span is optional. Date and tag spans are never taken as the
//! author, so a post without a byline gets an empty author.

use super::Visitor;
use crate::error::FetchError;
use crate::labels::{parse_author, parse_published_label};
use crate::models::Record;
use crate::pipeline::producer::RecordSink;
use crate::utils::truncate_for_log;
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Fetches the front page over HTTP and extracts its stories.
#[derive(Debug, Clone)]
pub struct HackerNewsVisitor {
    client: reqwest::Client,
}

impl HackerNewsVisitor {
    /// Build a visitor whose requests give up after `request_timeout`.
    pub fn new(request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Visitor for HackerNewsVisitor {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn visit(&self, url: &str, sink: &RecordSink) -> Result<(), FetchError> {
        let base = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        info!("Visiting");
        let response = self.client.get(base.clone()).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let html = response.text().await.map_err(transport)?;
        info!(bytes = html.len(), "Visited");

        // `Html` is not `Send`, so extraction finishes before the first emit.
        let records = extract_records(&html, &base);
        for record in records {
            sink.emit(record).await?;
        }
        Ok(())
    }
}

struct StorySelectors {
    post: Selector,
    link: Selector,
    image: Selector,
    title: Selector,
    label: Selector,
    byline_span: Selector,
    summary: Selector,
}

impl StorySelectors {
    fn new() -> Self {
        let parse = |css| Selector::parse(css).expect("static selector is valid");
        Self {
            post: parse(".body-post"),
            link: parse(".story-link"),
            image: parse(".img-ratio img"),
            title: parse(".home-title"),
            label: parse(".item-label"),
            byline_span: parse(".item-label span:not(.h-datetime):not(.h-tags)"),
            summary: parse(".home-desc"),
        }
    }
}

/// Extract all stories from a front page document, in page order.
///
/// Stories without a usable link are skipped. Malformed date or author
/// labels only blank that field.
pub fn extract_records(html: &str, base: &Url) -> Vec<Record> {
    let document = Html::parse_document(html);
    let selectors = StorySelectors::new();

    let mut records = Vec::new();
    for (index, post) in document.select(&selectors.post).enumerate() {
        match extract_record(&post, &selectors, base) {
            Some(record) => {
                debug!(index, title = %record.title, "Extracted story");
                records.push(record);
            }
            None => warn!(index, "Story has no usable link; skipping"),
        }
    }

    info!(count = records.len(), source = %base, "Extracted stories");
    records
}

fn extract_record(post: &ElementRef, selectors: &StorySelectors, base: &Url) -> Option<Record> {
    let source_url = child_attr(post, &selectors.link, "href").and_then(|href| resolve(base, href))?;
    let image_url = post
        .select(&selectors.image)
        .next()
        .and_then(|img| img.value().attr("data-src").or_else(|| img.value().attr("src")))
        .and_then(|src| resolve(base, src))
        .unwrap_or_default();
    let title = child_text(post, &selectors.title);

    let raw_date = child_text(post, &selectors.label);
    let published_label = parse_published_label(&raw_date).unwrap_or_else(|e| {
        warn!(error = %e, raw = %truncate_for_log(&raw_date, 80), %title, "Malformed date label");
        String::new()
    });

    let spans: Vec<String> = post.select(&selectors.byline_span).map(|s| normalized_text(&s)).collect();
    let author = parse_author(spans.iter().map(String::as_str)).unwrap_or_else(|e| {
        debug!(error = %e, %title, "No author label");
        String::new()
    });

    Some(Record {
        source_url,
        image_url,
        title,
        published_label,
        author,
        summary: child_text(post, &selectors.summary),
    })
}

fn resolve(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().map(|u| u.to_string())
}

fn child_attr<'a>(el: &ElementRef<'a>, selector: &Selector, attr: &str) -> Option<&'a str> {
    // the story link may be the post element itself or a descendant
    if selector.matches(el) {
        if let Some(value) = el.value().attr(attr) {
            return Some(value);
        }
    }
    el.select(selector).find_map(|e| e.value().attr(attr))
}

fn child_text(el: &ElementRef, selector: &Selector) -> String {
    el.select(selector)
        .next()
        .map(|e| normalized_text(&e))
        .unwrap_or_default()
}

fn normalized_text(el: &ElementRef) -> String {
    el.text().flat_map(str::split_whitespace).join(" ")
}
