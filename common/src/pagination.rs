//! Abstractions for offset pagination.

/// Default number of items on a [`Page`].
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A single [`Page`] of a listing.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub content: Vec<I>,

    /// Zero-based number of this [`Page`].
    pub page: u32,

    /// Requested size of this [`Page`].
    pub size: u32,

    /// Total number of items in the listing.
    pub total_elements: u64,

    /// Total number of [`Page`]s in the listing.
    pub total_pages: u32,

    /// Indicator whether this [`Page`] is the last one.
    pub last: bool,
}

impl<I> Page<I> {
    /// Returns the number of items on this [`Page`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Indicates whether this [`Page`] contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Indicates whether the listing has more [`Page`]s after this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.last
    }

    /// Maps the items of this [`Page`] preserving its pagination metadata.
    #[must_use]
    pub fn map<J>(self, f: impl FnMut(I) -> J) -> Page<J> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last: self.last,
        }
    }
}

/// Arguments for requesting a [`Page`].
#[derive(Clone, Copy, Debug)]
pub struct Arguments {
    /// Zero-based number of the requested [`Page`].
    pub page: u32,

    /// Number of items on the requested [`Page`].
    pub size: u32,
}

impl Arguments {
    /// Creates new [`Arguments`] requesting the given [`Page`] number with
    /// the [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn at(page: u32) -> Self {
        Self {
            page,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Returns the query parameters representing these [`Arguments`].
    #[must_use]
    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
        ]
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self::at(0)
    }
}

/// Pagination selector.
#[derive(Clone, Debug, Default)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Order of a sorted listing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Order {
    /// Ascending order.
    Ascending,

    /// Descending order.
    Descending,
}

impl Order {
    /// Returns the query parameter value representing this [`Order`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of [`Node`]s."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for requesting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Page, DEFAULT_PAGE_SIZE};

    #[test]
    fn arguments_default_to_first_page() {
        let args = Arguments::default();

        assert_eq!(args.page, 0);
        assert_eq!(args.size, DEFAULT_PAGE_SIZE);
        assert_eq!(
            args.query(),
            [("page", "0".to_owned()), ("size", "10".to_owned())],
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn page_decodes_wire_envelope() {
        let page: Page<u32> = serde_json::from_value(serde_json::json!({
            "content": [1, 2, 3],
            "page": 0,
            "size": 10,
            "totalElements": 3,
            "totalPages": 1,
            "last": true,
        }))
        .unwrap();

        assert_eq!(page.content, [1, 2, 3]);
        assert_eq!(page.len(), 3);
        assert!(page.last);
        assert!(!page.has_more());
    }
}
