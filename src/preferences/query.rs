//! Query-string encoding of [`Preferences`].
//!
//! The address bar is the persistence layer, so the encoding is a contract:
//! scalars appear once, filter lists as repeated keys, keys in a fixed
//! order. Parsing never fails. An unknown or missing value falls back to the
//! default, and unknown keys are ignored.

use super::{FilterDimension, GroupBy, Preferences, SortBy, SortOrder};
use url::form_urlencoded;
use url::Url;

/// Query-string keys, in serialization order.
pub mod keys {
    pub const QUERY: &str = "query";
    pub const GROUP_BY: &str = "groupBy";
    pub const SORT_BY: &str = "sortBy";
    pub const SORT_ORDER: &str = "sortOrder";
    pub const LANGUAGES: &str = "languages";
    pub const LICENSE: &str = "license";
    pub const DRAFTS: &str = "drafts";
    pub const TOOLING_TYPES: &str = "toolingTypes";
}

impl Preferences {
    /// Parse a query string (with or without its leading `?`).
    ///
    /// Scalars take their first occurrence; filter keys collect every
    /// occurrence in order. Values are percent-decoded once.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }

    /// Parse the query component of a URL.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs())
    }

    /// Parse whatever the user pasted: a full URL, a path with a query, or a
    /// bare query string. A fragment is dropped.
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        if let Ok(url) = Url::parse(location) {
            return Self::from_url(&url);
        }
        let without_fragment = location.split('#').next().unwrap_or_default();
        match without_fragment.split_once('?') {
            Some((_, query)) => Self::from_query(query),
            None if without_fragment.contains('=') => Self::from_query(without_fragment),
            None => Self::default(),
        }
    }

    fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    {
        let mut prefs = Self::default();
        let mut query = None;
        let mut group_by = None;
        let mut sort_by = None;
        let mut sort_order = None;

        for (key, value) in pairs {
            match key.as_ref() {
                keys::QUERY => {
                    query.get_or_insert_with(|| value.into_owned());
                }
                keys::GROUP_BY => {
                    group_by.get_or_insert_with(|| GroupBy::parse(&value));
                }
                keys::SORT_BY => {
                    sort_by.get_or_insert_with(|| SortBy::parse(&value));
                }
                keys::SORT_ORDER => {
                    sort_order.get_or_insert_with(|| SortOrder::parse(&value));
                }
                other => {
                    if let Some(dimension) = dimension_for_key(other) {
                        prefs.filter_mut(dimension).push(value.into_owned());
                    }
                }
            }
        }

        if let Some(query) = query {
            prefs.query = query;
        }
        // First occurrence wins even when it is invalid: an invalid first
        // value means the default, not the next occurrence.
        prefs.group_by = group_by.flatten().unwrap_or_default();
        prefs.sort_by = sort_by.flatten().unwrap_or_default();
        prefs.sort_order = sort_order.flatten().unwrap_or_default();
        prefs
    }

    /// Serialize to a query string without the leading `?`.
    ///
    /// `Preferences::from_query(&p.to_query_string()) == p` for every `p`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer
            .append_pair(keys::QUERY, &self.query)
            .append_pair(keys::GROUP_BY, self.group_by.as_str())
            .append_pair(keys::SORT_BY, self.sort_by.as_str())
            .append_pair(keys::SORT_ORDER, self.sort_order.as_str());
        for dimension in FilterDimension::ALL {
            for value in self.filter(dimension) {
                serializer.append_pair(dimension.query_key(), value);
            }
        }
        serializer.finish()
    }

    /// Replace `url`'s query with these preferences, keeping path and
    /// fragment.
    pub fn apply_to_url(&self, url: &mut Url) {
        url.set_query(Some(&self.to_query_string()));
    }
}

fn dimension_for_key(key: &str) -> Option<FilterDimension> {
    FilterDimension::ALL
        .into_iter()
        .find(|d| d.query_key() == key)
}
