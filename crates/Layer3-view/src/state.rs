//! View state and location-descriptor codec
//!
//! `ViewState` is what a bookmarkable location captures about the list view:
//! page, search text, page size. The encoding is sparse: a field equal to
//! its default is omitted entirely, so the default view encodes as an empty
//! descriptor.
//!
//! Decoding never fails. Malformed or out-of-range values are defaulted or
//! clamped, never rejected.

use std::collections::BTreeMap;
use url::form_urlencoded;

/// Discrete page sizes the view offers
pub const PAGE_SIZES: [u32; 4] = [12, 24, 48, 96];

/// Default page size
pub const DEFAULT_PAGE_SIZE: u32 = 24;

const KEY_PAGE: &str = "page";
const KEY_SEARCH: &str = "search";
const KEY_PAGE_SIZE: &str = "pageSize";
const KEY_FROM: &str = "from";

/// Saturate a parsed page number into `[1, u32::MAX]`.
///
/// A plain `as u32` cast would wrap values past 2^32 back to 0 and break
/// the positive-page invariant.
fn saturate_page(raw: i64) -> u32 {
    raw.clamp(1, u32::MAX as i64) as u32
}

/// Snap a raw page-size value into the allowed discrete set.
///
/// Clamps into `[min, max]` first, then picks the nearest allowed value
/// (ties snap down).
pub fn snap_page_size(raw: i64) -> u32 {
    let min = PAGE_SIZES[0] as i64;
    let max = PAGE_SIZES[PAGE_SIZES.len() - 1] as i64;
    let clamped = raw.clamp(min, max);

    PAGE_SIZES
        .iter()
        .copied()
        .min_by_key(|&p| (clamped - p as i64).abs())
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Bookmarkable state of the list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Current page, 1-based
    pub page: u32,
    /// Search text, used verbatim (no trimming, case preserved)
    pub search: String,
    /// Items per page, always one of `PAGE_SIZES`
    pub page_size: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewState {
    /// Encode to a flat key→value descriptor, omitting defaults.
    pub fn encode(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();

        if self.page != 1 {
            params.insert(KEY_PAGE.to_string(), self.page.to_string());
        }
        if !self.search.is_empty() {
            params.insert(KEY_SEARCH.to_string(), self.search.clone());
        }
        if self.page_size != DEFAULT_PAGE_SIZE {
            params.insert(KEY_PAGE_SIZE.to_string(), self.page_size.to_string());
        }

        params
    }

    /// Decode from a descriptor. Missing keys mean defaults; malformed
    /// values are floored/clamped/snapped rather than rejected.
    pub fn decode(params: &BTreeMap<String, String>) -> Self {
        let page = params
            .get(KEY_PAGE)
            .and_then(|v| v.parse::<i64>().ok())
            .map(saturate_page)
            .unwrap_or(1);

        let search = params.get(KEY_SEARCH).cloned().unwrap_or_default();

        let page_size = params
            .get(KEY_PAGE_SIZE)
            .and_then(|v| v.parse::<i64>().ok())
            .map(snap_page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            page,
            search,
            page_size,
        }
    }

    /// Encode as a URL query string (sparse, percent-encoded).
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.encode() {
            serializer.append_pair(&key, &value);
        }
        serializer.finish()
    }

    /// Decode from a URL query string. Unrecognized keys are ignored;
    /// repeated keys keep the last occurrence.
    pub fn from_query(query: &str) -> Self {
        let params: BTreeMap<String, String> = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self::decode(&params)
    }
}

/// Back-navigation state carried on a detail-view descriptor.
///
/// `from` is a copy of the list view's page at navigation time so that
/// returning from a detail view restores the prior list position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailReturn {
    /// List-view page at navigation time, 1-based
    pub from: u32,
    /// List-view search at navigation time
    pub search: String,
}

impl Default for DetailReturn {
    fn default() -> Self {
        Self {
            from: 1,
            search: String::new(),
        }
    }
}

impl DetailReturn {
    /// Capture back-navigation state from the current list view
    pub fn from_view_state(state: &ViewState) -> Self {
        Self {
            from: state.page,
            search: state.search.clone(),
        }
    }

    /// Reconstruct the list view this detail view was entered from.
    /// `page_size` is not carried on detail descriptors; the caller supplies
    /// the current one.
    pub fn to_view_state(&self, page_size: u32) -> ViewState {
        ViewState {
            page: self.from.max(1),
            search: self.search.clone(),
            page_size: snap_page_size(page_size as i64),
        }
    }

    /// Encode with the same default-omission rules as `ViewState`
    pub fn encode(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        if self.from != 1 {
            params.insert(KEY_FROM.to_string(), self.from.to_string());
        }
        if !self.search.is_empty() {
            params.insert(KEY_SEARCH.to_string(), self.search.clone());
        }
        params
    }

    /// Decode from a detail-view descriptor
    pub fn decode(params: &BTreeMap<String, String>) -> Self {
        let from = params
            .get(KEY_FROM)
            .and_then(|v| v.parse::<i64>().ok())
            .map(saturate_page)
            .unwrap_or(1);

        let search = params.get(KEY_SEARCH).cloned().unwrap_or_default();

        Self { from, search }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(page: u32, search: &str, page_size: u32) -> ViewState {
        ViewState {
            page,
            search: search.to_string(),
            page_size,
        }
    }

    #[test]
    fn test_default_state_encodes_empty() {
        assert!(ViewState::default().encode().is_empty());
        assert_eq!(ViewState::default().to_query(), "");
    }

    #[test]
    fn test_only_non_defaults_encoded() {
        let params = state(2, "", 24).encode();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("page").map(String::as_str), Some("2"));

        let params = state(1, "car", 48).encode();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("search").map(String::as_str), Some("car"));
        assert_eq!(params.get("pageSize").map(String::as_str), Some("48"));
    }

    #[test]
    fn test_round_trip_law() {
        let cases = [
            ViewState::default(),
            state(2, "", 24),
            state(1, "magnus", 24),
            state(7, "Car uana", 12),
            state(3, "  Bob ", 96), // whitespace is part of the search
            state(1, "ĞM", 48),
        ];
        for s in cases {
            assert_eq!(ViewState::decode(&s.encode()), s, "map round trip: {s:?}");
            assert_eq!(ViewState::from_query(&s.to_query()), s, "query round trip: {s:?}");
        }
    }

    #[test]
    fn test_decode_missing_keys_are_defaults() {
        assert_eq!(ViewState::decode(&BTreeMap::new()), ViewState::default());
    }

    #[test]
    fn test_decode_malformed_page() {
        for raw in ["abc", "-5", "0", "", "2.5", "99999999999999999999"] {
            let mut params = BTreeMap::new();
            params.insert("page".to_string(), raw.to_string());
            assert_eq!(ViewState::decode(&params).page, 1, "page={raw:?}");
        }
    }

    #[test]
    fn test_decode_page_beyond_u32_saturates() {
        // 2^32 would wrap to 0 under a plain cast; it must saturate instead
        let mut params = BTreeMap::new();
        params.insert("page".to_string(), "4294967296".to_string());
        let s = ViewState::decode(&params);
        assert_eq!(s.page, u32::MAX);
        assert_eq!(ViewState::decode(&s.encode()), s);

        let mut params = BTreeMap::new();
        params.insert("from".to_string(), "4294967296".to_string());
        let ret = DetailReturn::decode(&params);
        assert_eq!(ret.from, u32::MAX);
        assert_eq!(DetailReturn::decode(&ret.encode()), ret);
    }

    #[test]
    fn test_page_size_clamp_and_snap() {
        assert_eq!(snap_page_size(12), 12);
        assert_eq!(snap_page_size(96), 96);
        // Clamped into range first
        assert_eq!(snap_page_size(1), 12);
        assert_eq!(snap_page_size(100_000), 96);
        assert_eq!(snap_page_size(-3), 12);
        // Snapped to nearest allowed value
        assert_eq!(snap_page_size(30), 24);
        assert_eq!(snap_page_size(40), 48);
        assert_eq!(snap_page_size(70), 48);
        assert_eq!(snap_page_size(73), 96);
        // Tie snaps down
        assert_eq!(snap_page_size(18), 12);
        assert_eq!(snap_page_size(36), 24);
    }

    #[test]
    fn test_search_is_verbatim() {
        let mut params = BTreeMap::new();
        params.insert("search".to_string(), "  MiXeD  ".to_string());
        assert_eq!(ViewState::decode(&params).search, "  MiXeD  ");
    }

    #[test]
    fn test_query_percent_encoding_round_trip() {
        let s = state(2, "a&b=c d", 24);
        let query = s.to_query();
        assert!(query.contains("page=2"));
        assert_eq!(ViewState::from_query(&query), s);
    }

    #[test]
    fn test_unrecognized_keys_ignored() {
        let s = ViewState::from_query("page=3&theme=dark&utm_source=x");
        assert_eq!(s, state(3, "", 24));
    }

    #[test]
    fn test_detail_return_round_trip_and_omission() {
        let default_return = DetailReturn::default();
        assert!(default_return.encode().is_empty());

        let ret = DetailReturn {
            from: 4,
            search: "naka".to_string(),
        };
        assert_eq!(DetailReturn::decode(&ret.encode()), ret);

        // from==1 is omitted even when a search is carried
        let ret = DetailReturn {
            from: 1,
            search: "naka".to_string(),
        };
        assert_eq!(ret.encode().len(), 1);
    }

    #[test]
    fn test_detail_return_reconstructs_list_view() {
        let list = state(4, "naka", 48);
        let ret = DetailReturn::from_view_state(&list);
        assert_eq!(ret.to_view_state(48), list);
    }
}
