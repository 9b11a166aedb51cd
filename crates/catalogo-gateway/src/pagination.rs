//! Page selection for query results.

use catalogo_core::params::lenient_int;
use serde::Deserialize;

use crate::config::PageLimits;

/// Raw `page`/`page_size` query string values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub page_size: Option<String>,
}

/// A resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    /// Rows per page.
    pub size: usize,
}

impl Page {
    /// Resolve raw values against `limits`. Garbage falls back to defaults.
    pub fn resolve(params: &PageParams, limits: &PageLimits) -> Self {
        let number = lenient_int(params.page.as_deref(), 1).max(1);
        let max = limits.max_page_size.max(1);
        let size = lenient_int(
            params.page_size.as_deref(),
            limits.default_page_size as i64,
        )
        .clamp(1, max as i64);

        Self {
            number: usize::try_from(number).unwrap_or(usize::MAX),
            size: size as usize,
        }
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> usize {
        (self.number - 1).saturating_mul(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: Option<&str>, size: Option<&str>) -> Page {
        let params = PageParams {
            page: page.map(str::to_string),
            page_size: size.map(str::to_string),
        };
        Page::resolve(&params, &PageLimits::default())
    }

    #[test]
    fn test_defaults() {
        let p = page(None, None);
        assert_eq!(p, Page { number: 1, size: 50 });
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(page(Some("0"), Some("0")), Page { number: 1, size: 1 });
        assert_eq!(page(Some("-4"), Some("1000")), Page { number: 1, size: 100 });
        assert_eq!(page(Some("3"), Some("10")).offset(), 20);
    }

    #[test]
    fn test_garbage_uses_defaults() {
        assert_eq!(page(Some("two"), Some("many")), Page { number: 1, size: 50 });
    }

    #[test]
    fn test_leading_integer_is_kept() {
        assert_eq!(page(Some("2.5"), Some("10 rows")), Page { number: 2, size: 10 });
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let p = page(Some("9223372036854775807"), Some("100"));
        assert_eq!(p.offset(), usize::MAX);
    }
}
