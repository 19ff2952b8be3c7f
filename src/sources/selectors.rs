//! CSS selectors for retailer search pages.
//!
//! Field selectors are candidate lists tried in order; the first one that
//! yields a non-empty value wins. Update this file when a retailer changes
//! its markup, then add a fixture to the adapter tests.

use scraper::Selector;
use std::sync::LazyLock;

fn candidates(list: &[&str]) -> Vec<Selector> {
    list.iter().map(|s| Selector::parse(s).unwrap()).collect()
}

/// Selectors for Amazon search results.
pub mod amazon {
    use super::*;

    /// Search result card.
    pub static RESULT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("[data-component-type='s-search-result']").unwrap());

    /// Product title text.
    pub static NAME: LazyLock<Vec<Selector>> =
        LazyLock::new(|| candidates(&["h2 a span", "h2 span", ".a-text-normal"]));

    /// Full current price (screen-reader text, e.g. `$1,299.99`).
    pub static PRICE_OFFSCREEN: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        candidates(&[".a-price:not([data-a-strike]) .a-offscreen", ".a-price .a-offscreen"])
    });

    /// Whole price (dollars part).
    pub static PRICE_WHOLE: LazyLock<Vec<Selector>> =
        LazyLock::new(|| candidates(&[".a-price .a-price-whole", ".a-price-whole"]));

    /// Fractional price (cents part).
    pub static PRICE_FRACTION: LazyLock<Vec<Selector>> =
        LazyLock::new(|| candidates(&[".a-price .a-price-fraction", ".a-price-fraction"]));

    /// Title link.
    pub static LINK: LazyLock<Vec<Selector>> =
        LazyLock::new(|| candidates(&["h2 a", "a.a-link-normal.s-no-outline"]));

    /// Product image.
    pub static IMAGE: LazyLock<Vec<Selector>> =
        LazyLock::new(|| candidates(&["img.s-image", ".s-product-image-container img"]));

    /// Card text meaning the item cannot be bought.
    pub const OUT_OF_STOCK_MARKERS: &[&str] = &["Currently unavailable"];
}

/// Selectors for Best Buy search results.
pub mod bestbuy {
    use super::*;

    /// Current result card markup.
    pub static SKU_ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".sku-item").unwrap());

    /// Older list layout.
    pub static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".list-item").unwrap());

    /// Any element tagged with a SKU id.
    pub static SKU_ID: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[data-sku-id]").unwrap());

    /// Product title text.
    pub static NAME: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        candidates(&[".sku-title a", "h4.sku-title", ".sku-header a", "[class*='title']"])
    });

    /// Price text.
    pub static PRICE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        candidates(&[
            ".priceView-customer-price span[aria-hidden='true']",
            ".priceView-hero-price span",
            "[class*='price']",
        ])
    });

    /// Title link.
    pub static LINK: LazyLock<Vec<Selector>> =
        LazyLock::new(|| candidates(&[".sku-title a", "h4.sku-title a", "a[class*='title']"]));

    /// Product image.
    pub static IMAGE: LazyLock<Vec<Selector>> =
        LazyLock::new(|| candidates(&[".product-image img", "img[class*='product']", "img"]));

    /// Disabled add-to-cart button.
    pub static CART_DISABLED: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".fulfillment-add-to-cart-button.btn-disabled, \
             .fulfillment-add-to-cart-button .btn-disabled",
        )
        .unwrap()
    });

    /// Card text meaning the item cannot be bought.
    pub const OUT_OF_STOCK_MARKERS: &[&str] = &["Sold Out", "Coming Soon"];
}

/// Selectors for Newegg search results.
pub mod newegg {
    use super::*;

    /// Search result cell.
    pub static ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".item-cell").unwrap());

    /// Product title text.
    pub static NAME: LazyLock<Vec<Selector>> = LazyLock::new(|| candidates(&[".item-title"]));

    /// Dollars part of the current price.
    pub static PRICE_WHOLE: LazyLock<Vec<Selector>> =
        LazyLock::new(|| candidates(&[".price-current strong"]));

    /// Cents part of the current price (e.g. `.99`).
    pub static PRICE_CENTS: LazyLock<Vec<Selector>> = LazyLock::new(|| candidates(&[".price-current sup"]));

    /// Title link.
    pub static LINK: LazyLock<Vec<Selector>> = LazyLock::new(|| candidates(&["a.item-title", ".item-title"]));

    /// Product image.
    pub static IMAGE: LazyLock<Vec<Selector>> = LazyLock::new(|| candidates(&[".item-img img"]));

    /// Card text meaning the item cannot be bought.
    pub const OUT_OF_STOCK_MARKERS: &[&str] = &["OUT OF STOCK"];
}
