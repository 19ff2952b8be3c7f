//! End-to-end tests: retailer pages served by wiremock, scraped concurrently,
//! normalized and saved.

use pricewatch::client::{FetchClient, OfflineFetcher, PageFetcher};
use pricewatch::config::{Config, SavePolicy};
use pricewatch::mock;
use pricewatch::models::{Category, Origin, Retailer};
use pricewatch::orchestrator::Orchestrator;
use pricewatch::service::{ListRequest, PriceWatch, ScrapeRequest};
use pricewatch::sources::{
    AmazonParser, AmazonSource, BestBuyParser, BestBuySource, NeweggParser, NeweggSource, Source,
};
use pricewatch::store::{JsonFileStore, MemoryStore, ProductStore, HISTORY_LIMIT};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AMAZON_PAGE: &str = r#"<html><body>
    <div data-component-type="s-search-result" data-asin="B0XPS15">
        <h2><a class="a-link-normal" href="/Dell-XPS-15/dp/B0XPS15?ref=sr_1_1"><span>Dell XPS 15 Laptop, Intel Core i7, 16GB RAM, 512GB SSD</span></a></h2>
        <img class="s-image" src="https://m.media-amazon.com/images/I/xps.jpg">
        <span class="a-price"><span class="a-offscreen">$1,299.99</span></span>
    </div>
    <div data-component-type="s-search-result" data-asin="B0NOPRICE">
        <h2><a href="/dp/B0NOPRICE"><span>Listing Without A Price</span></a></h2>
    </div>
    <div data-component-type="s-search-result" data-asin="B0IDEAPAD">
        <h2><a href="/Lenovo-IdeaPad/dp/B0IDEAPAD"><span>Lenovo IdeaPad Slim 5 16" WUXGA Ryzen 7 16GB</span></a></h2>
        <span class="a-price"><span class="a-price-whole">649.</span><span class="a-price-fraction">00</span></span>
    </div>
</body></html>"#;

const NEWEGG_PAGE: &str = r#"<html><body><div class="item-cells-wrap">
    <div class="item-cell">
        <a class="item-title" href="https://www.newegg.com/asus-tuf-f15/p/N82E16834236">ASUS TUF Gaming F15 Intel Core i5 RTX 3050</a>
        <ul class="price"><li class="price-current">$<strong>749</strong><sup>.99</sup></li></ul>
    </div>
</div></body></html>"#;

const BESTBUY_PAGE: &str = r#"<html><body><ol class="sku-item-list">
    <li class="sku-item" data-sku-id="6535495">
        <h4 class="sku-title"><a href="/site/dell-xps-13/6535495.p?skuId=6535495">Dell XPS 13 13.4" FHD+ Laptop</a></h4>
        <div class="priceView-hero-price priceView-customer-price"><span aria-hidden="true">$999.99</span></div>
    </li>
    <li class="sku-item" data-sku-id="6571367">
        <h4 class="sku-title"><a href="/site/hp-envy/6571367.p?skuId=6571367">HP Envy x360 2-in-1 Laptop</a></h4>
        <div class="priceView-hero-price priceView-customer-price"><span aria-hidden="true">$849.00</span></div>
    </li>
</ol>
<div class="list-item">
    <h4 class="sku-title"><a href="/site/legacy/1.p">Legacy Layout Laptop</a></h4>
    <div class="priceView-customer-price"><span aria-hidden="true">$10.00</span></div>
</div>
</body></html>"#;

/// Held by every test that touches `PRICEWATCH_*` variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Orchestrator whose adapters all point at the mock server.
fn orchestrator_for(server: &MockServer) -> Orchestrator {
    let config = Config { timeout_ms: 2000, ..Config::default() };
    let fetcher: Arc<dyn PageFetcher> = Arc::new(FetchClient::new(&config).unwrap());

    let sources: Vec<Arc<dyn Source>> = vec![
        Arc::new(AmazonSource::new(AmazonParser::new(), fetcher.clone()).with_base_url(server.uri())),
        Arc::new(BestBuySource::new(BestBuyParser::new(), fetcher.clone()).with_base_url(server.uri())),
        Arc::new(NeweggSource::new(NeweggParser::new(), fetcher).with_base_url(server.uri())),
    ];
    Orchestrator::new(sources)
}

fn offline_orchestrator() -> Orchestrator {
    let config = Config { offline: true, ..Config::default() };
    Orchestrator::from_config(&config).unwrap()
}

/// Amazon and Newegg serve results, Best Buy is down.
async fn start_retailers() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "laptop"))
        .respond_with(ResponseTemplate::new(200).set_body_string(AMAZON_PAGE))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/site/searchpage.jsp"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/p/pl"))
        .and(query_param("d", "laptop"))
        .respond_with(ResponseTemplate::new(200).set_body_string(NEWEGG_PAGE))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn test_orchestration_mixes_live_and_fallback() {
    let server = start_retailers().await;
    let batch = orchestrator_for(&server).run(Category::Laptop, "laptop").await.unwrap();

    let amazon = batch.get(Retailer::Amazon).unwrap();
    assert_eq!(amazon.len(), 2);
    assert!(amazon.iter().all(|r| r.origin == Origin::Live));
    assert_eq!(amazon[0].price, 1299.99);
    assert_eq!(amazon[0].url, "https://www.amazon.com/Dell-XPS-15/dp/B0XPS15?ref=sr_1_1");
    assert_eq!(amazon[1].price, 649.0);

    // A failed fetch serves the fallback catalog verbatim, apart from the source tag
    let bestbuy = batch.get(Retailer::BestBuy).unwrap();
    let mut expected = mock::catalog(Retailer::BestBuy, Category::Laptop);
    for record in &mut expected {
        record.source = Some(Retailer::BestBuy);
    }
    assert_eq!(bestbuy, expected.as_slice());

    let newegg = batch.get(Retailer::Newegg).unwrap();
    assert_eq!(newegg.len(), 1);
    assert_eq!(newegg[0].name, "ASUS TUF Gaming F15 Intel Core i5 RTX 3050");

    for retailer in [Retailer::Amazon, Retailer::BestBuy, Retailer::Newegg] {
        let records = batch.get(retailer).unwrap();
        assert!(records.iter().all(|r| r.source == Some(retailer)));
        assert!(records.iter().all(|r| r.price > 0.0 && !r.name.is_empty()));
    }
}

#[tokio::test]
async fn test_unreachable_network_still_returns_three_lists() {
    let config = Config { timeout_ms: 500, ..Config::default() };
    let fetcher: Arc<dyn PageFetcher> = Arc::new(FetchClient::new(&config).unwrap());
    let sources: Vec<Arc<dyn Source>> = vec![
        Arc::new(AmazonSource::new(AmazonParser::new(), fetcher.clone()).with_base_url("http://127.0.0.1:1")),
        Arc::new(BestBuySource::new(BestBuyParser::new(), fetcher.clone()).with_base_url("http://127.0.0.1:1")),
        Arc::new(NeweggSource::new(NeweggParser::new(), fetcher).with_base_url("http://127.0.0.1:1")),
    ];

    let batch = Orchestrator::new(sources).run(Category::Headphone, "").await.unwrap();
    assert_eq!(batch.total(), 9);
    for retailer in Retailer::save_order() {
        let records = batch.get(*retailer).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.origin == Origin::Mock));
    }
}

#[tokio::test]
async fn test_bestbuy_first_matching_layout_wins() {
    let source = BestBuySource::new(BestBuyParser::new(), Arc::new(OfflineFetcher));
    let records = source.parse(BESTBUY_PAGE, Category::Laptop);

    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Dell XPS 13 13.4\" FHD+ Laptop", "HP Envy x360 2-in-1 Laptop"]);
    assert_eq!(records[0].url, "https://www.bestbuy.com/site/dell-xps-13/6535495.p?skuId=6535495");
    assert_eq!(records[1].price, 849.0);
}

#[tokio::test]
async fn test_scrape_saves_one_product_per_record() {
    let server = start_retailers().await;
    let service = PriceWatch::new(orchestrator_for(&server), MemoryStore::new(), SavePolicy::Create);

    let response = service
        .scrape(ScrapeRequest { category: Category::Laptop, query: Some("laptop".to_string()) })
        .await
        .unwrap();

    // 3 Best Buy fallback + 2 Amazon + 1 Newegg
    assert!(response.success);
    assert_eq!(response.count, 6);
    assert_eq!(service.store().len().await, 6);

    let retailers: Vec<_> = response.products.iter().map(|p| p.product.prices[0].retailer).collect();
    assert_eq!(
        retailers,
        vec![
            Retailer::BestBuy,
            Retailer::BestBuy,
            Retailer::BestBuy,
            Retailer::Amazon,
            Retailer::Amazon,
            Retailer::Newegg
        ]
    );

    for saved in &response.products {
        let product = &saved.product;
        assert_eq!(product.prices.len(), 1);
        assert_eq!(product.price_history.len(), 1);
        assert_eq!(product.price_history[0].price, product.prices[0].price);
        assert_eq!(product.price_history[0].retailer, product.prices[0].retailer);
        assert_eq!(saved.current_price, product.prices[0].price);
    }
}

#[tokio::test]
async fn test_price_text_survives_the_pipeline() {
    let server = start_retailers().await;
    let service = PriceWatch::new(orchestrator_for(&server), MemoryStore::new(), SavePolicy::Create);

    let response = service.scrape(ScrapeRequest { category: Category::Laptop, query: None }).await.unwrap();
    let xps = response
        .products
        .iter()
        .find(|p| p.product.name.starts_with("Dell XPS 15 Laptop"))
        .unwrap();

    assert_eq!(xps.current_price, 1299.99);
    assert_eq!(xps.product.brand, "Dell");
    assert_eq!(xps.product.image_url.as_deref(), Some("https://m.media-amazon.com/images/I/xps.jpg"));
}

#[tokio::test]
async fn test_listing_filters_orders_and_caps() {
    let service = PriceWatch::new(offline_orchestrator(), MemoryStore::new(), SavePolicy::Create);

    for _ in 0..3 {
        service.scrape(ScrapeRequest { category: Category::Laptop, query: None }).await.unwrap();
    }
    service.scrape(ScrapeRequest { category: Category::Monitor, query: None }).await.unwrap();

    let laptops = service.list(ListRequest { category: Some(Category::Laptop) }).await.unwrap().products;
    assert_eq!(laptops.len(), 20);
    assert!(laptops.iter().all(|p| p.category == Category::Laptop));
    assert!(laptops.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let everything = service.list(ListRequest::default()).await.unwrap().products;
    assert_eq!(everything.len(), 20);
    assert_eq!(everything[0].category, Category::Monitor);
}

#[tokio::test]
async fn test_detail_sorts_prices_and_caps_history() {
    let store = MemoryStore::new();
    let service = PriceWatch::new(offline_orchestrator(), store, SavePolicy::Create);

    let response = service.scrape(ScrapeRequest { category: Category::Monitor, query: None }).await.unwrap();
    let product = &response.products[0].product;
    let first = product.prices[0].clone();

    for i in 0..35 {
        let mut quote = first.clone();
        quote.retailer = [Retailer::Amazon, Retailer::Newegg][i % 2];
        quote.price = 400.0 - i as f64;
        quote.updated_at += chrono::Duration::minutes(i as i64 + 1);
        let point = pricewatch::models::PriceHistoryPoint {
            retailer: quote.retailer,
            price: quote.price,
            recorded_at: quote.updated_at,
        };
        service.store().record_price(product.id, quote, point).await.unwrap();
    }

    let detail = service.product(product.id).await.unwrap().unwrap();
    assert_eq!(detail.prices.len(), 3);
    assert!(detail.prices.windows(2).all(|w| w[0].price <= w[1].price));
    assert_eq!(detail.price_history.len(), HISTORY_LIMIT);
    assert!(detail.price_history.windows(2).all(|w| w[0].recorded_at >= w[1].recorded_at));
    assert_eq!(detail.price_history[0].price, 366.0);

    assert!(service.product(uuid::Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_upsert_reuses_products() {
    let service = PriceWatch::new(offline_orchestrator(), MemoryStore::new(), SavePolicy::Upsert);

    let first = service.scrape(ScrapeRequest { category: Category::Headphone, query: None }).await.unwrap();
    let second = service.scrape(ScrapeRequest { category: Category::Headphone, query: None }).await.unwrap();

    assert_eq!(first.count, 9);
    assert_eq!(second.count, 9);
    assert_eq!(service.store().len().await, 9);

    for saved in &second.products {
        assert_eq!(saved.product.prices.len(), 1);
        assert_eq!(saved.product.price_history.len(), 2);
    }
}

#[tokio::test]
async fn test_file_store_reloads_saved_products() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("data").join("products.json");

    let saved = {
        let store = JsonFileStore::open(&store_path).await.unwrap();
        let service = PriceWatch::new(offline_orchestrator(), store, SavePolicy::Create);
        service.scrape(ScrapeRequest { category: Category::Monitor, query: None }).await.unwrap()
    };
    assert!(store_path.exists());

    let reopened = JsonFileStore::open(&store_path).await.unwrap();
    let listed = reopened.list_by_category(Some(Category::Monitor), 20).await.unwrap();
    assert_eq!(listed.len(), saved.count);

    let id = saved.products[0].product.id;
    let product = reopened.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(product.name, saved.products[0].product.name);
    assert_eq!(product.price_history.len(), 1);
}

#[test]
fn test_config_file_then_environment() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pricewatch.toml");
    std::fs::write(
        &path,
        r#"
timeout_ms = 4000
max_per_source = 5
save_policy = "upsert"
format = "csv"
"#,
    )
    .unwrap();

    let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var("PRICEWATCH_MAX_PER_SOURCE", "7");
    let config = Config::load(Some(&path)).unwrap().with_env().validate();
    std::env::remove_var("PRICEWATCH_MAX_PER_SOURCE");
    let config = config.unwrap();

    assert_eq!(config.timeout_ms, 4000);
    assert_eq!(config.max_per_source, 7);
    assert_eq!(config.save_policy, SavePolicy::Upsert);
    assert_eq!(config.format, pricewatch::config::OutputFormat::Csv);
    assert!(!config.offline);
}

#[test]
fn test_zero_max_from_environment_is_rejected() {
    let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var("PRICEWATCH_MAX_PER_SOURCE", "0");
    let result = Config::new().with_env().validate();
    std::env::remove_var("PRICEWATCH_MAX_PER_SOURCE");

    assert!(result.is_err());
}
