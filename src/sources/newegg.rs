//! Newegg search result parsing.

use super::extract::{compose_price, contains_any, first_attr, first_text, listing_url, qualify, text_of};
use super::selectors::newegg;
use super::{ContainerStrategy, PageParser, SelectorChain};
use crate::error::ExtractError;
use crate::models::{Category, Retailer, ScrapedRecord};
use scraper::ElementRef;

/// Parser for `newegg.com/p/pl?d=` result pages.
#[derive(Debug)]
pub struct NeweggParser {
    chain: SelectorChain,
}

impl NeweggParser {
    pub fn new() -> Self {
        Self { chain: SelectorChain::new(vec![ContainerStrategy::css("item-cell", &newegg::ITEM)]) }
    }
}

impl Default for NeweggParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PageParser for NeweggParser {
    fn retailer(&self) -> Retailer {
        Retailer::Newegg
    }

    fn search_url(&self, base: &str, query: &str) -> String {
        format!("{}/p/pl?d={}", base, urlencoding::encode(query))
    }

    fn chain(&self) -> &SelectorChain {
        &self.chain
    }

    fn extract(
        &self,
        cell: ElementRef,
        category: Category,
        origin: &str,
    ) -> Result<Option<ScrapedRecord>, ExtractError> {
        let Some(name) = first_text(cell, &newegg::NAME) else {
            return Ok(None);
        };

        // Dollars live in <strong>, cents in <sup>
        let Some(whole) = first_text(cell, &newegg::PRICE_WHOLE) else {
            return Ok(None);
        };
        let cents = first_text(cell, &newegg::PRICE_CENTS);
        let price = compose_price(&whole, cents.as_deref()).ok_or(ExtractError::Price(whole))?;

        let url = listing_url(first_attr(cell, &newegg::LINK, "href").as_deref(), origin);

        let mut record = ScrapedRecord::new(name, price, url, category);
        record.image_url = first_attr(cell, &newegg::IMAGE, "src").and_then(|src| qualify(&src, origin).ok());
        record.in_stock = !contains_any(&text_of(cell), newegg::OUT_OF_STOCK_MARKERS);

        Ok(Some(record))
    }
}
