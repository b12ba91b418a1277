//! Page router: the six mutually exclusive views of the desk.

use crate::{
    error::{DeskError, DeskResult},
    record::Collection,
};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Overview,
    Channels,
    Products,
    Flows,
    Settlements,
    Payments,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 6] = [
        Page::Overview,
        Page::Channels,
        Page::Products,
        Page::Flows,
        Page::Settlements,
        Page::Payments,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Overview    => "overview",
            Self::Channels    => "channels",
            Self::Products    => "products",
            Self::Flows       => "flows",
            Self::Settlements => "settlements",
            Self::Payments    => "payments",
        }
    }

    /// Label in the sidebar selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview    => "Data overview",
            Self::Channels    => "Channels",
            Self::Products    => "Products",
            Self::Flows       => "Revenue flows",
            Self::Settlements => "Settlements",
            Self::Payments    => "Payments",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::Overview    => "Data Overview",
            Self::Channels    => "Channel Information",
            Self::Products    => "Signed Products",
            Self::Flows       => "Channel Revenue Flows",
            Self::Settlements => "Settlement Periods",
            Self::Payments    => "Payment Collection",
        }
    }

    /// Noun used in the "Add new ..." form title.
    pub fn item_noun(self) -> &'static str {
        match self {
            Self::Overview    => "",
            Self::Channels    => "channel",
            Self::Products    => "product",
            Self::Flows       => "flow",
            Self::Settlements => "settlement period",
            Self::Payments    => "payment",
        }
    }

    /// The collection this page lists and appends to. The overview has none.
    pub fn collection(self) -> Option<Collection> {
        match self {
            Self::Overview    => None,
            Self::Channels    => Some(Collection::Channels),
            Self::Products    => Some(Collection::Products),
            Self::Flows       => Some(Collection::Flows),
            Self::Settlements => Some(Collection::Settlements),
            Self::Payments    => Some(Collection::Payments),
        }
    }
}

impl FromStr for Page {
    type Err = DeskError;

    fn from_str(s: &str) -> DeskResult<Self> {
        Page::ALL
            .into_iter()
            .find(|p| p.slug() == s)
            .ok_or_else(|| DeskError::UnknownPage { slug: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for page in Page::ALL {
            assert_eq!(page.slug().parse::<Page>().unwrap(), page);
        }
    }

    #[test]
    fn unknown_slug_is_rejected() {
        let err = "reports".parse::<Page>().unwrap_err();
        assert!(matches!(err, DeskError::UnknownPage { .. }));
    }

    #[test]
    fn every_collection_has_exactly_one_page() {
        for collection in Collection::ALL {
            let pages: Vec<_> = Page::ALL
                .into_iter()
                .filter(|p| p.collection() == Some(collection))
                .collect();
            assert_eq!(pages.len(), 1, "{}", collection.name());
        }
        assert_eq!(Page::Overview.collection(), None);
    }
}
