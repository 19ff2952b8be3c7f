//! Amazon search result parsing.

use super::extract::{compose_price, contains_any, first_attr, first_text, listing_url, price_from, qualify, text_of};
use super::selectors::amazon;
use super::{ContainerStrategy, PageParser, SelectorChain};
use crate::error::ExtractError;
use crate::models::{Category, Retailer, ScrapedRecord};
use scraper::ElementRef;

/// Parser for `amazon.com/s?k=` result pages.
#[derive(Debug)]
pub struct AmazonParser {
    chain: SelectorChain,
}

impl AmazonParser {
    pub fn new() -> Self {
        Self { chain: SelectorChain::new(vec![ContainerStrategy::css("s-search-result", &amazon::RESULT)]) }
    }
}

impl Default for AmazonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PageParser for AmazonParser {
    fn retailer(&self) -> Retailer {
        Retailer::Amazon
    }

    fn search_url(&self, base: &str, query: &str) -> String {
        format!("{}/s?k={}", base, urlencoding::encode(query))
    }

    fn chain(&self) -> &SelectorChain {
        &self.chain
    }

    fn extract(
        &self,
        card: ElementRef,
        category: Category,
        origin: &str,
    ) -> Result<Option<ScrapedRecord>, ExtractError> {
        let Some(name) = first_text(card, &amazon::NAME) else {
            return Ok(None);
        };

        // The screen-reader price is complete; the visible one is split in two.
        let price = match first_text(card, &amazon::PRICE_OFFSCREEN) {
            Some(text) => price_from(Some(text))?,
            None => match first_text(card, &amazon::PRICE_WHOLE) {
                Some(whole) => {
                    let fraction = first_text(card, &amazon::PRICE_FRACTION);
                    let price = compose_price(&whole, fraction.as_deref());
                    Some(price.ok_or(ExtractError::Price(whole))?)
                }
                None => None,
            },
        };
        let Some(price) = price else {
            return Ok(None);
        };

        let url = listing_url(first_attr(card, &amazon::LINK, "href").as_deref(), origin);

        let mut record = ScrapedRecord::new(name, price, url, category);
        record.image_url =
            first_attr(card, &amazon::IMAGE, "src").and_then(|src| qualify(&src, origin).ok());
        record.in_stock = !contains_any(&text_of(card), amazon::OUT_OF_STOCK_MARKERS);

        Ok(Some(record))
    }
}
