//! Pagination types.

use serde::{Deserialize, Serialize};
use url::Url;

/// A navigation link (`first`, `next`, `previous`) inside a list page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    /// Absolute or relative URL of the linked page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Cursor token to pass as `start` to reach the linked page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

impl PageLink {
    /// The cursor this link points at.
    ///
    /// Uses `start` when present, otherwise the `start` query parameter of
    /// `href`. Empty tokens count as missing.
    #[must_use]
    pub fn cursor(&self) -> Option<String> {
        if let Some(start) = self.start.as_deref().filter(|s| !s.is_empty()) {
            return Some(start.to_owned());
        }

        let href = self.href.as_deref()?;
        // Relative hrefs need a base before they can be parsed.
        let url = Url::parse(href)
            .or_else(|_| Url::parse("http://relative.invalid/").and_then(|base| base.join(href)))
            .ok()?;
        url.query_pairs()
            .find(|(k, _)| k == "start")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
    }
}

/// A response type that is one page of a larger listing.
pub trait Paginated {
    /// The individual item type within a page.
    type Item;

    /// Consume the page and return its items in server order.
    fn into_items(self) -> Vec<Self::Item>;

    /// The `next` link, present only if more items exist.
    fn next_link(&self) -> Option<&PageLink>;
}
