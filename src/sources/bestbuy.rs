//! Best Buy search result parsing.
//!
//! Best Buy serves several result layouts, so containers come from an ordered
//! chain: `.sku-item`, then `.list-item`, then anything with `data-sku-id`.

use super::extract::{contains_any, first_attr, first_text, listing_url, price_from, qualify, text_of};
use super::selectors::bestbuy;
use super::{ContainerStrategy, PageParser, SelectorChain};
use crate::error::ExtractError;
use crate::models::{Category, Retailer, ScrapedRecord};
use scraper::ElementRef;

/// Parser for `bestbuy.com/site/searchpage.jsp` result pages.
#[derive(Debug)]
pub struct BestBuyParser {
    chain: SelectorChain,
}

impl BestBuyParser {
    pub fn new() -> Self {
        Self::with_chain(container_chain())
    }

    /// Uses a custom container chain.
    pub fn with_chain(chain: SelectorChain) -> Self {
        Self { chain }
    }
}

impl Default for BestBuyParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Default container strategies, in priority order.
pub fn container_chain() -> SelectorChain {
    SelectorChain::new(vec![
        ContainerStrategy::css("sku-item", &bestbuy::SKU_ITEM),
        ContainerStrategy::css("list-item", &bestbuy::LIST_ITEM),
        ContainerStrategy::css("data-sku-id", &bestbuy::SKU_ID),
    ])
}

impl PageParser for BestBuyParser {
    fn retailer(&self) -> Retailer {
        Retailer::BestBuy
    }

    fn search_url(&self, base: &str, query: &str) -> String {
        format!("{}/site/searchpage.jsp?st={}", base, urlencoding::encode(query))
    }

    fn chain(&self) -> &SelectorChain {
        &self.chain
    }

    fn extract(
        &self,
        item: ElementRef,
        category: Category,
        origin: &str,
    ) -> Result<Option<ScrapedRecord>, ExtractError> {
        let Some(name) = first_text(item, &bestbuy::NAME) else {
            return Ok(None);
        };
        let Some(price) = price_from(first_text(item, &bestbuy::PRICE))? else {
            return Ok(None);
        };

        let url = listing_url(first_attr(item, &bestbuy::LINK, "href").as_deref(), origin);

        let mut record = ScrapedRecord::new(name, price, url, category);
        record.image_url =
            first_attr(item, &bestbuy::IMAGE, "src").and_then(|src| qualify(&src, origin).ok());
        record.in_stock = item.select(&bestbuy::CART_DISABLED).next().is_none()
            && !contains_any(&text_of(item), bestbuy::OUT_OF_STOCK_MARKERS);

        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testing::StaticFetcher;
    use crate::sources::{BestBuySource, Source};
    use scraper::Html;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const SKU_ITEM_PAGE: &str = r#"<html><body><ol class="sku-item-list">
        <li class="sku-item" data-sku-id="6535495">
            <div class="product-image"><img src="https://pisces.bbystatic.com/image2/6535495.jpg"></div>
            <h4 class="sku-title"><a href="/site/dell-xps-15/6535495.p?skuId=6535495">Dell XPS 15 9530 Laptop</a></h4>
            <div class="priceView-customer-price"><span aria-hidden="true">$1,299.99</span><span class="sr-only">Your price</span></div>
            <div class="fulfillment-add-to-cart-button"><button class="btn btn-primary">Add to Cart</button></div>
        </li>
        <li class="sku-item" data-sku-id="6537321">
            <h4 class="sku-title"><a href="/site/hp-pavilion/6537321.p">HP Pavilion 15 Laptop</a></h4>
            <div class="priceView-customer-price"><span aria-hidden="true">$549.99</span></div>
            <div class="fulfillment-add-to-cart-button"><button class="btn btn-disabled">Sold Out</button></div>
        </li>
    </ol></body></html>"#;

    fn parse(html: &str, category: Category) -> Vec<ScrapedRecord> {
        BestBuySource::new(BestBuyParser::new(), StaticFetcher::status(500)).parse(html, category)
    }

    #[test]
    fn test_search_url() {
        let parser = BestBuyParser::new();
        assert_eq!(
            parser.search_url("https://www.bestbuy.com", "noise cancelling"),
            "https://www.bestbuy.com/site/searchpage.jsp?st=noise%20cancelling"
        );
    }

    #[test]
    fn test_chain_order() {
        assert_eq!(container_chain().names(), vec!["sku-item", "list-item", "data-sku-id"]);
    }

    #[test]
    fn test_parse_sku_items() {
        let records = parse(SKU_ITEM_PAGE, Category::Laptop);
        assert_eq!(records.len(), 2);

        let xps = &records[0];
        assert_eq!(xps.name, "Dell XPS 15 9530 Laptop");
        assert_eq!(xps.brand, "Dell");
        assert_eq!(xps.price, 1299.99);
        assert_eq!(xps.url, "https://www.bestbuy.com/site/dell-xps-15/6535495.p?skuId=6535495");
        assert_eq!(xps.image_url.as_deref(), Some("https://pisces.bbystatic.com/image2/6535495.jpg"));
        assert!(xps.in_stock);

        assert_eq!(records[1].price, 549.99);
        assert!(!records[1].in_stock);
    }

    #[test]
    fn test_sku_items_win_over_list_items() {
        let html = r#"<html><body>
            <div class="list-item"><h4 class="sku-title"><a href="/a">Legacy Monitor A</a></h4><div class="priceView-hero-price"><span>$99.99</span></div></div>
            <div class="sku-item"><h4 class="sku-title"><a href="/b">Samsung Odyssey G5</a></h4><div class="priceView-hero-price"><span>$299.99</span></div></div>
            <div class="list-item"><h4 class="sku-title"><a href="/c">Legacy Monitor C</a></h4><div class="priceView-hero-price"><span>$89.99</span></div></div>
        </body></html>"#;

        let records = parse(html, Category::Monitor);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Samsung Odyssey G5");
    }

    #[test]
    fn test_list_item_layout() {
        let html = r#"<html><body>
            <div class="list-item"><a class="product-title" href="/site/sony/1.p">Sony WH-1000XM5</a><span class="customer-price">$329.99</span></div>
        </body></html>"#;

        let records = parse(html, Category::Headphone);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Sony WH-1000XM5");
        assert_eq!(records[0].price, 329.99);
        assert_eq!(records[0].url, "https://www.bestbuy.com/site/sony/1.p");
    }

    #[test]
    fn test_data_sku_id_layout() {
        let html = r#"<html><body>
            <section data-sku-id="42"><h4 class="sku-title"><a href="/site/lg/42.p">LG UltraGear 27GN950</a></h4><div class="priceView-hero-price"><span>$699.99</span></div></section>
        </body></html>"#;

        let records = parse(html, Category::Monitor);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "LG UltraGear 27GN950");
    }

    #[test]
    fn test_coming_soon_is_out_of_stock() {
        let html = r#"<html><body>
            <li class="sku-item"><h4 class="sku-title"><a href="/x">Apple AirPods Max</a></h4>
            <div class="priceView-customer-price"><span aria-hidden="true">$549.00</span></div>
            <button class="add-to-cart">Coming Soon</button></li>
        </body></html>"#;

        let records = parse(html, Category::Headphone);
        assert!(!records[0].in_stock);
    }

    #[test]
    fn test_invalid_items_dropped() {
        let html = r#"<html><body>
            <li class="sku-item"><h4 class="sku-title"><a href="/1">No Price Laptop</a></h4></li>
            <li class="sku-item"><div class="priceView-customer-price"><span aria-hidden="true">$10.00</span></div></li>
            <li class="sku-item"><h4 class="sku-title"><a href="/3">Lenovo Legion 5</a></h4><div class="priceView-customer-price"><span aria-hidden="true">$1,099.99</span></div></li>
        </body></html>"#;

        let records = parse(html, Category::Laptop);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Lenovo Legion 5");
    }

    #[test]
    fn test_generic_price_block_reads_first_amount() {
        let html = r#"<html><body>
            <li class="sku-item"><h4 class="sku-title"><a href="/site/asus-rog/1.p">ASUS ROG Strix G16</a></h4>
            <div class="pricing-block"><span>$1,049.99</span> <span>Save $150</span></div></li>
            <li class="sku-item"><h4 class="sku-title"><a href="/site/hp-omen/2.p">HP OMEN 16</a></h4>
            <div class="pricing-block"><span>$999.99</span> <span>Was $1,199.99</span></div></li>
        </body></html>"#;

        let records = parse(html, Category::Laptop);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price, 1049.99);
        assert_eq!(records[1].price, 999.99);
    }

    #[test]
    fn test_script_link_keeps_listing() {
        let html = r#"<html><body>
            <li class="sku-item"><h4 class="sku-title"><a href="javascript:void(0)">Sony WH-1000XM5</a></h4>
            <div class="priceView-customer-price"><span aria-hidden="true">$399.99</span></div></li>
        </body></html>"#;

        let records = parse(html, Category::Headphone);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://www.bestbuy.com");
        assert_eq!(records[0].price, 399.99);
    }

    #[tokio::test]
    async fn test_later_strategies_skipped_after_match() {
        let list_calls = Arc::new(AtomicUsize::new(0));
        let counter = list_calls.clone();

        let chain = SelectorChain::new(vec![
            ContainerStrategy::css("sku-item", &bestbuy::SKU_ITEM),
            ContainerStrategy::new("list-item", move |document| {
                counter.fetch_add(1, Ordering::SeqCst);
                let found: Vec<_> = document.select(&bestbuy::LIST_ITEM).collect();
                (!found.is_empty()).then_some(found)
            }),
        ]);

        let source = BestBuySource::new(BestBuyParser::with_chain(chain), StaticFetcher::ok(SKU_ITEM_PAGE));
        let records = source.scrape("laptop", Category::Laptop).await;

        assert_eq!(records.len(), 2);
        assert_eq!(list_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_extract_directly() {
        let parser = BestBuyParser::new();
        let document = Html::parse_document(SKU_ITEM_PAGE);
        let (name, items) = parser.chain().first_match(&document).unwrap();
        assert_eq!(name, "sku-item");

        let record = parser.extract(items[0], Category::Laptop, Retailer::BestBuy.origin()).unwrap().unwrap();
        assert_eq!(record.name, "Dell XPS 15 9530 Laptop");
    }
}
