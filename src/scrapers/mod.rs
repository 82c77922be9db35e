//! Fetch and extraction of stories from a news page.
//!
//! A [`Visitor`] walks one page and hands every story it finds to the
//! pipeline through a [`RecordSink`]. The return value is the terminal
//! signal: `Ok(())` when the walk is complete, `Err` when it failed. The
//! sink is only borrowed for the duration of the call, so nothing can be
//! emitted after the walk has ended.
//!
//! # Supported Sources
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | The Hacker News | [`hackernews`] | HTML scraping of the front page |

use crate::error::FetchError;
use crate::pipeline::producer::RecordSink;
use std::future::Future;

pub mod hackernews;

/// Walks a page and emits the stories found on it.
pub trait Visitor: Send + Sync + 'static {
    /// Visit `url`, emitting stories in page order.
    ///
    /// Emitting waits while the sink is full. An error from
    /// [`RecordSink::emit`] should be propagated, it means nobody is
    /// listening any more.
    fn visit(
        &self,
        url: &str,
        sink: &RecordSink,
    ) -> impl Future<Output = Result<(), FetchError>> + Send;
}
