//! Storefront destinations and the collaborators the header talks to

use serde::Serialize;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Named storefront pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    Catalog,
    About,
    Delivery,
    Contact,
    Cart,
    Checkout,
    Wishlist,
}

impl Page {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Catalog => "/catalog",
            Self::About => "/about",
            Self::Delivery => "/delivery",
            Self::Contact => "/contact",
            Self::Cart => "/cart",
            Self::Checkout => "/checkout",
            Self::Wishlist => "/wishlist",
        }
    }
}

/// Where a navigation request leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Page(Page),
    /// The catalog, optionally narrowed to a category slug
    Catalog { category: Option<String> },
    /// Catalog search results for a term
    Search(String),
    /// A product page by slug
    Product(String),
}

impl Destination {
    pub fn search(term: impl Into<String>) -> Self {
        Self::Search(term.into())
    }

    /// URL path, with query string when the destination has one
    pub fn path(&self) -> String {
        match self {
            Self::Page(page) => page.path().to_string(),
            Self::Catalog { category: None } => Page::Catalog.path().to_string(),
            Self::Catalog {
                category: Some(slug),
            } => format!("/catalog?category={}", urlencoding::encode(slug)),
            Self::Search(term) => format!("/catalog?search={}", urlencoding::encode(term)),
            Self::Product(slug) => format!("/product/{}", urlencoding::encode(slug)),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Performs navigation on behalf of the storefront
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: &Destination);
}

/// Navigator that records every visited path
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    visited: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current(&self) -> Option<String> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, destination: &Destination) {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(destination.path());
    }
}

/// Cart totals shown in the header
pub trait CartSummary: Send + Sync {
    fn total_count(&self) -> u32;
    fn total_amount(&self) -> f64;
}

/// Wishlist size shown in the header
pub trait WishlistSummary: Send + Sync {
    fn count(&self) -> u32;
}

/// Snapshot of the header counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HeaderBadges {
    pub cart_count: u32,
    pub cart_amount: f64,
    pub wishlist_count: u32,
}

impl HeaderBadges {
    pub fn collect(cart: &dyn CartSummary, wishlist: &dyn WishlistSummary) -> Self {
        Self {
            cart_count: cart.total_count(),
            cart_amount: cart.total_amount(),
            wishlist_count: wishlist.count(),
        }
    }
}
