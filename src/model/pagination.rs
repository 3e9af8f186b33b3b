//! Pagination metadata and the canonical paged response.
//!
//! The backend answers list requests in one of two shapes:
//!
//! - `{success, data, pagination: {total, pages, page}}`
//! - `{success, data, total}`
//!
//! Both are decoded by [`PageEnvelope`] and reconciled into a [`Page`]. The
//! page count is always derived locally from `total` and the page size, so
//! both shapes yield the same metadata.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::catalog::ApiError;
use super::lenient;

/// The supported page sizes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PageSize {
    Ten,
    #[default]
    Twenty,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [Self::Ten, Self::Twenty, Self::Fifty, Self::Hundred];

    pub fn get(self) -> u32 {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }

    pub fn from_value(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.get() == value)
    }

    /// Next larger size, or `self` when already the largest
    pub fn larger(self) -> Self {
        match self {
            Self::Ten => Self::Twenty,
            Self::Twenty => Self::Fifty,
            Self::Fifty | Self::Hundred => Self::Hundred,
        }
    }

    /// Next smaller size, or `self` when already the smallest
    pub fn smaller(self) -> Self {
        match self {
            Self::Ten | Self::Twenty => Self::Ten,
            Self::Fifty => Self::Twenty,
            Self::Hundred => Self::Fifty,
        }
    }
}

/// ceil(total / page_size)
pub fn page_count(total: u64, page_size: PageSize) -> u32 {
    let size = u64::from(page_size.get());
    total.div_ceil(size).min(u64::from(u32::MAX)) as u32
}

/// One window into a list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: PageSize,
    pub total: u64,
}

impl Pagination {
    pub fn pages(&self) -> u32 {
        page_count(self.total, self.page_size)
    }

    /// Largest page number that can be requested (at least 1)
    pub fn last_page(&self) -> u32 {
        self.pages().max(1)
    }

    /// Zero-based position of the first item on this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size.get())
    }
}

/// Canonical paged result handed to the list state
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
struct WirePagination {
    #[serde(default, deserialize_with = "lenient::uint")]
    total: Option<u64>,
    #[serde(default, deserialize_with = "lenient::uint")]
    page: Option<u64>,
}

/// Wire form of every list response
#[derive(Debug, Default, Deserialize)]
pub struct PageEnvelope {
    #[serde(default, deserialize_with = "lenient::flag")]
    success: Option<bool>,
    #[serde(default)]
    data: Option<Vec<Value>>,
    #[serde(default)]
    pagination: Option<WirePagination>,
    #[serde(default, deserialize_with = "lenient::uint")]
    total: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    message: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    error: Option<String>,
}

impl PageEnvelope {
    /// Reconcile either response shape into a [`Page`].
    ///
    /// `requested` is the window that was asked for; it supplies the page
    /// number when the response does not echo one. Records that cannot be
    /// decoded at all are skipped. A missing total falls back to the number
    /// of items seen up to and including this page.
    pub fn into_page<R, T>(
        self,
        requested: Pagination,
        normalize: impl Fn(R) -> T,
    ) -> Result<Page<T>, ApiError>
    where
        R: DeserializeOwned,
    {
        if self.success == Some(false) {
            let message = self
                .message
                .or(self.error)
                .unwrap_or_else(|| "request was not successful".to_string());
            return Err(ApiError::Unsuccessful(message));
        }

        let records = self.data.unwrap_or_default();
        let received = records.len();
        let items: Vec<T> = records
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<R>(value) {
                Ok(raw) => Some(normalize(raw)),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping undecodable record");
                    None
                }
            })
            .collect();
        if items.len() < received {
            tracing::debug!(received, decoded = items.len(), "Some records were dropped");
        }

        let wire = self.pagination.unwrap_or_default();
        let page = wire
            .page
            .filter(|p| *p > 0)
            .map(|p| p.min(u64::from(u32::MAX)) as u32)
            .unwrap_or(requested.page);
        let total = wire
            .total
            .or(self.total)
            .unwrap_or_else(|| requested.offset() + received as u64);

        Ok(Page {
            items,
            pagination: Pagination {
                page,
                page_size: requested.page_size,
                total,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::{Track, UNKNOWN_TITLE};

    fn window(page: u32, page_size: PageSize) -> Pagination {
        Pagination { page, page_size, total: 0 }
    }

    fn decode(json: &str, requested: Pagination) -> Result<Page<Track>, ApiError> {
        let envelope: PageEnvelope = serde_json::from_str(json).unwrap();
        envelope.into_page(requested, Track::normalize)
    }

    #[test]
    fn page_count_is_ceiling_of_total_over_size() {
        for size in PageSize::ALL {
            let s = u64::from(size.get());
            for total in [0, 1, s - 1, s, s + 1, 3 * s, 3 * s + 7, 1_000_003] {
                let expected = ((total + s - 1) / s) as u32;
                assert_eq!(page_count(total, size), expected, "total={total} size={s}");
            }
        }
    }

    #[test]
    fn ninety_five_items_in_tens_is_ten_pages() {
        let p = Pagination { page: 1, page_size: PageSize::Ten, total: 95 };
        assert_eq!(p.pages(), 10);
        assert_eq!(p.last_page(), 10);
    }

    #[test]
    fn empty_list_still_has_one_addressable_page() {
        let p = Pagination { page: 1, page_size: PageSize::Fifty, total: 0 };
        assert_eq!(p.pages(), 0);
        assert_eq!(p.last_page(), 1);
    }

    #[test]
    fn page_sizes_step_within_bounds() {
        assert_eq!(PageSize::Ten.smaller(), PageSize::Ten);
        assert_eq!(PageSize::Ten.larger(), PageSize::Twenty);
        assert_eq!(PageSize::Hundred.larger(), PageSize::Hundred);
        assert_eq!(PageSize::from_value(50), Some(PageSize::Fifty));
        assert_eq!(PageSize::from_value(25), None);
    }

    #[test]
    fn nested_pagination_shape() {
        let page = decode(
            r#"{"success": true, "data": [{"id": "a"}, {"id": "b"}],
                "pagination": {"total": 42, "pages": 3, "page": 2}}"#,
            window(2, PageSize::Twenty),
        )
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total, 42);
        assert_eq!(page.pagination.page, 2);
        assert_eq!(page.pagination.pages(), 3);
    }

    #[test]
    fn flat_total_shape_derives_pages() {
        let page = decode(
            r#"{"success": true, "data": [{"title": "x"}], "total": 95}"#,
            window(4, PageSize::Ten),
        )
        .unwrap();

        assert_eq!(page.pagination.page, 4);
        assert_eq!(page.pagination.total, 95);
        assert_eq!(page.pagination.pages(), 10);
    }

    #[test]
    fn server_page_count_is_not_trusted() {
        let page = decode(
            r#"{"data": [], "pagination": {"total": 95, "pages": 7, "page": 1}}"#,
            window(1, PageSize::Ten),
        )
        .unwrap();
        assert_eq!(page.pagination.pages(), 10);
    }

    #[test]
    fn unsuccessful_response_surfaces_message() {
        let err = decode(
            r#"{"success": false, "message": "database offline"}"#,
            window(1, PageSize::Ten),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Unsuccessful(ref m) if m == "database offline"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let page = decode("{}", window(1, PageSize::Ten)).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.page, 1);
    }

    #[test]
    fn missing_total_falls_back_to_items_seen() {
        let page = decode(r#"{"data": [{}, {}, {}]}"#, window(2, PageSize::Ten)).unwrap();
        assert_eq!(page.pagination.total, 13);
    }

    #[test]
    fn undecodable_records_are_skipped() {
        let page = decode(
            r#"{"data": [{"title": "ok"}, "garbage", {}], "total": 3}"#,
            window(1, PageSize::Ten),
        )
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].title, UNKNOWN_TITLE);
    }
}
