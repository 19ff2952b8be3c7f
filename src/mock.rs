//! Fixed fallback catalogs served when a retailer cannot be scraped.
//!
//! Output is fully deterministic: no timestamps, no randomness. The same
//! retailer and category always produce an identical list.

use crate::models::{Category, Origin, Retailer, ScrapedRecord};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy)]
enum Spec {
    Text(&'static str),
    Flag(bool),
}

use Spec::{Flag, Text};

struct MockItem {
    name: &'static str,
    brand: &'static str,
    price: f64,
    image: &'static str,
    specs: &'static [(&'static str, Spec)],
}

impl MockItem {
    fn to_record(&self, retailer: Retailer, category: Category) -> ScrapedRecord {
        let specs: Map<String, Value> = self
            .specs
            .iter()
            .map(|(key, spec)| {
                let value = match spec {
                    Text(s) => Value::String(s.to_string()),
                    Flag(b) => Value::Bool(*b),
                };
                (key.to_string(), value)
            })
            .collect();

        ScrapedRecord {
            name: self.name.to_string(),
            brand: self.brand.to_string(),
            model: None,
            price: self.price,
            url: retailer.origin().to_string(),
            image_url: Some(self.image.to_string()),
            in_stock: true,
            category,
            specs,
            source: None,
            origin: Origin::Mock,
        }
    }
}

/// Fallback catalog for a retailer and category.
pub fn catalog(retailer: Retailer, category: Category) -> Vec<ScrapedRecord> {
    items(retailer, category).iter().map(|item| item.to_record(retailer, category)).collect()
}

fn items(retailer: Retailer, category: Category) -> &'static [MockItem] {
    match (retailer, category) {
        (Retailer::Amazon, Category::Laptop) => AMAZON_LAPTOPS,
        (Retailer::Amazon, Category::Headphone) => AMAZON_HEADPHONES,
        (Retailer::Amazon, Category::Monitor) => AMAZON_MONITORS,
        (Retailer::BestBuy, Category::Laptop) => BESTBUY_LAPTOPS,
        (Retailer::BestBuy, Category::Headphone) => BESTBUY_HEADPHONES,
        (Retailer::BestBuy, Category::Monitor) => BESTBUY_MONITORS,
        (Retailer::Newegg, Category::Laptop) => NEWEGG_LAPTOPS,
        (Retailer::Newegg, Category::Headphone) => NEWEGG_HEADPHONES,
        (Retailer::Newegg, Category::Monitor) => NEWEGG_MONITORS,
    }
}

const OVER_EAR_ANC: &[(&str, Spec)] =
    &[("type", Text("over-ear")), ("wireless", Flag(true)), ("noiseCancellation", Flag(true))];

const OVER_EAR_WIRED: &[(&str, Spec)] =
    &[("type", Text("over-ear")), ("wireless", Flag(false)), ("noiseCancellation", Flag(false))];

const AMAZON_LAPTOPS: &[MockItem] = &[
    MockItem {
        name: "Acer Aspire 5 A515-57-53T1 Slim Laptop - 15.6\" Full HD IPS Display - 12th Gen Intel i5-1235U - 8GB DDR4 - 512GB NVMe SSD",
        brand: "Acer",
        price: 499.99,
        image: "https://m.media-amazon.com/images/I/71czGb00k5L._AC_SL1500_.jpg",
        specs: &[("processor", Text("Intel i5")), ("ram", Text("8GB")), ("storage", Text("512GB SSD"))],
    },
    MockItem {
        name: "Lenovo IdeaPad 3 Laptop, 15.6\" FHD Touchscreen Display, Intel Core i5-1135G7, 20GB RAM, 1TB PCIe SSD",
        brand: "Lenovo",
        price: 629.99,
        image: "https://m.media-amazon.com/images/I/61z40AcpiEL._AC_SL1280_.jpg",
        specs: &[("processor", Text("Intel i5")), ("ram", Text("20GB")), ("storage", Text("1TB SSD"))],
    },
    MockItem {
        name: "MSI GF63 Thin Gaming Laptop - Intel Core i5-11400H - NVIDIA GeForce GTX 1650 - 15.6\" 144Hz Display - 8GB RAM - 256GB NVMe SSD",
        brand: "MSI",
        price: 699.99,
        image: "https://m.media-amazon.com/images/I/81xrUB3EQML._AC_SL1500_.jpg",
        specs: &[("processor", Text("Intel i5")), ("ram", Text("8GB")), ("gpu", Text("GTX 1650"))],
    },
];

const AMAZON_HEADPHONES: &[MockItem] = &[
    MockItem {
        name: "Sony WH-1000XM4 Wireless Premium Noise Canceling Overhead Headphones with Mic - Black",
        brand: "Sony",
        price: 279.99,
        image: "https://m.media-amazon.com/images/I/71o8Q5XJS5L._AC_SL1500_.jpg",
        specs: OVER_EAR_ANC,
    },
    MockItem {
        name: "Bose QuietComfort 45 Bluetooth Wireless Noise Cancelling Headphones - Triple Black",
        brand: "Bose",
        price: 279.00,
        image: "https://m.media-amazon.com/images/I/51JNo76GFOL._AC_SL1200_.jpg",
        specs: OVER_EAR_ANC,
    },
    MockItem {
        name: "Anker Soundcore Life Q30 Hybrid Active Noise Cancelling Headphones with Multiple Modes",
        brand: "Anker",
        price: 79.99,
        image: "https://m.media-amazon.com/images/I/61L1e+1rGVL._AC_SL1500_.jpg",
        specs: OVER_EAR_ANC,
    },
];

const AMAZON_MONITORS: &[MockItem] = &[
    MockItem {
        name: "ASUS VA24EHE 23.8\" Monitor, 1080P Full HD, 75Hz, IPS, Adaptive-Sync/FreeSync, Eye Care",
        brand: "ASUS",
        price: 109.99,
        image: "https://m.media-amazon.com/images/I/81SBIk7YloL._AC_SL1500_.jpg",
        specs: &[("screenSize", Text("23.8\"")), ("resolution", Text("1920x1080")), ("refreshRate", Text("75Hz"))],
    },
    MockItem {
        name: "LG 27GN800-B 27 Inch Ultragear Gaming Monitor with 1 ms Response Time, QHD (2560 x 1440)",
        brand: "LG",
        price: 279.99,
        image: "https://m.media-amazon.com/images/I/81e89YiCDeL._AC_SL1500_.jpg",
        specs: &[("screenSize", Text("27\"")), ("resolution", Text("2560x1440")), ("refreshRate", Text("144Hz"))],
    },
    MockItem {
        name: "Samsung 32\" M8 Smart Monitor & Streaming TV (Warm White) 4K UHD",
        brand: "Samsung",
        price: 449.99,
        image: "https://m.media-amazon.com/images/I/71hZDIvHFbL._AC_SL1500_.jpg",
        specs: &[("screenSize", Text("32\"")), ("resolution", Text("3840x2160")), ("refreshRate", Text("60Hz"))],
    },
];

const BESTBUY_LAPTOPS: &[MockItem] = &[
    MockItem {
        name: "Dell XPS 15 - 15.6\" FHD+ - Intel Core i7 - 16GB Memory - 512GB SSD",
        brand: "Dell",
        price: 1299.99,
        image: "https://pisces.bbystatic.com/image2/BestBuy_US/images/products/6535/6535436_sd.jpg",
        specs: &[("processor", Text("Intel i7")), ("ram", Text("16GB")), ("storage", Text("512GB SSD"))],
    },
    MockItem {
        name: "HP Pavilion 15.6\" Laptop - AMD Ryzen 5 - 8GB Memory - 256GB SSD",
        brand: "HP",
        price: 549.99,
        image: "https://pisces.bbystatic.com/image2/BestBuy_US/images/products/6477/6477887_sd.jpg",
        specs: &[("processor", Text("AMD Ryzen 5")), ("ram", Text("8GB")), ("storage", Text("256GB SSD"))],
    },
    MockItem {
        name: "ASUS ROG Strix G16 Gaming Laptop - 16\" 165Hz - Intel Core i7 - 16GB - RTX 4060",
        brand: "ASUS",
        price: 1399.99,
        image: "https://pisces.bbystatic.com/image2/BestBuy_US/images/products/6570/6570270_sd.jpg",
        specs: &[("processor", Text("Intel i7")), ("ram", Text("16GB")), ("gpu", Text("RTX 4060"))],
    },
];

const BESTBUY_HEADPHONES: &[MockItem] = &[
    MockItem {
        name: "Sony WH-1000XM5 Wireless Noise-Cancelling Over-the-Ear Headphones - Black",
        brand: "Sony",
        price: 349.99,
        image: "https://pisces.bbystatic.com/image2/BestBuy_US/images/products/6505/6505727_sd.jpg",
        specs: OVER_EAR_ANC,
    },
    MockItem {
        name: "Apple AirPods Pro (2nd generation) with MagSafe Case (USB-C)",
        brand: "Apple",
        price: 249.99,
        image: "https://pisces.bbystatic.com/image2/BestBuy_US/images/products/6447/6447936_sd.jpg",
        specs: &[("type", Text("in-ear")), ("wireless", Flag(true)), ("noiseCancellation", Flag(true))],
    },
    MockItem {
        name: "Bose QuietComfort Wireless Noise Cancelling Headphones - White Smoke",
        brand: "Bose",
        price: 299.99,
        image: "https://pisces.bbystatic.com/image2/BestBuy_US/images/products/6554/6554461_sd.jpg",
        specs: OVER_EAR_ANC,
    },
];

const BESTBUY_MONITORS: &[MockItem] = &[
    MockItem {
        name: "LG 27\" UltraGear QHD 165Hz Gaming Monitor with HDR10 - Black",
        brand: "LG",
        price: 299.99,
        image: "https://pisces.bbystatic.com/image2/BestBuy_US/images/products/6451/6451080_sd.jpg",
        specs: &[("screenSize", Text("27\"")), ("resolution", Text("2560x1440")), ("refreshRate", Text("165Hz"))],
    },
    MockItem {
        name: "Samsung 34\" Odyssey G5 Ultra-Wide Gaming Monitor - Black",
        brand: "Samsung",
        price: 379.99,
        image: "https://pisces.bbystatic.com/image2/BestBuy_US/images/products/6501/6501894_sd.jpg",
        specs: &[("screenSize", Text("34\"")), ("resolution", Text("3440x1440")), ("refreshRate", Text("165Hz"))],
    },
    MockItem {
        name: "Dell 24\" FHD Monitor with ComfortView Plus - Black",
        brand: "Dell",
        price: 149.99,
        image: "https://pisces.bbystatic.com/image2/BestBuy_US/images/products/6516/6516127_sd.jpg",
        specs: &[("screenSize", Text("24\"")), ("resolution", Text("1920x1080")), ("refreshRate", Text("75Hz"))],
    },
];

const NEWEGG_LAPTOPS: &[MockItem] = &[
    MockItem {
        name: "ASUS TUF Gaming F15 FX507ZC4-ES51 15.6\" 144 Hz Intel Core i5 12th Gen 12500H 2.50 GHz NVIDIA GeForce RTX 3050",
        brand: "ASUS",
        price: 799.99,
        image: "https://c1.neweggimages.com/ProductImageCompressAll1280/34-235-286-V01.jpg",
        specs: &[("processor", Text("Intel i5")), ("ram", Text("8GB")), ("gpu", Text("RTX 3050"))],
    },
    MockItem {
        name: "MSI Thin GF63 15.6\" FHD 144Hz Gaming Laptop: Intel Core i5-12450H RTX 4050 16GB 512GB NVMe SSD",
        brand: "MSI",
        price: 799.00,
        image: "https://c1.neweggimages.com/ProductImageCompressAll1280/34-156-092-V01.jpg",
        specs: &[("processor", Text("Intel i5")), ("ram", Text("16GB")), ("gpu", Text("RTX 4050"))],
    },
    MockItem {
        name: "Acer Nitro 5 AN515-58-57Y8 Gaming Laptop Intel Core i5 12th Gen 12500H NVIDIA GeForce RTX 3050 Ti",
        brand: "Acer",
        price: 849.99,
        image: "https://c1.neweggimages.com/ProductImageCompressAll1280/34-316-952-V01.jpg",
        specs: &[("processor", Text("Intel i5")), ("ram", Text("16GB")), ("gpu", Text("RTX 3050 Ti"))],
    },
];

const NEWEGG_HEADPHONES: &[MockItem] = &[
    MockItem {
        name: "Sony WH-1000XM5 Wireless Industry Leading Noise Canceling Bluetooth Headphones - Black",
        brand: "Sony",
        price: 329.99,
        image: "https://c1.neweggimages.com/ProductImageCompressAll1280/26-159-675-V01.jpg",
        specs: OVER_EAR_ANC,
    },
    MockItem {
        name: "HyperX Cloud II Gaming Headset - 7.1 Surround Sound - Memory Foam Ear Pads",
        brand: "HyperX",
        price: 69.99,
        image: "https://c1.neweggimages.com/ProductImageCompressAll1280/26-738-003-V05.jpg",
        specs: OVER_EAR_WIRED,
    },
    MockItem {
        name: "Logitech G Pro X Gaming Headset with Blue VO!CE Mic Technology - Black",
        brand: "Logitech",
        price: 89.99,
        image: "https://c1.neweggimages.com/ProductImageCompressAll1280/26-197-417-V03.jpg",
        specs: OVER_EAR_WIRED,
    },
];

const NEWEGG_MONITORS: &[MockItem] = &[
    MockItem {
        name: "ASUS TUF Gaming VG27AQ 27\" WQHD (2560 x 1440) 165Hz G-SYNC Compatible IPS Gaming Monitor",
        brand: "ASUS",
        price: 279.99,
        image: "https://c1.neweggimages.com/ProductImageCompressAll1280/24-281-035-V01.jpg",
        specs: &[("screenSize", Text("27\"")), ("resolution", Text("2560x1440")), ("refreshRate", Text("165Hz"))],
    },
    MockItem {
        name: "AOC C24G1 24\" Curved Frameless Gaming Monitor, FHD 1920x1080, 1ms, 144Hz, FreeSync",
        brand: "AOC",
        price: 159.99,
        image: "https://c1.neweggimages.com/ProductImageCompressAll1280/24-160-375-V01.jpg",
        specs: &[("screenSize", Text("24\"")), ("resolution", Text("1920x1080")), ("refreshRate", Text("144Hz"))],
    },
    MockItem {
        name: "MSI Optix G273QPF 27\" WQHD 2560 x 1440 (2K) 165Hz 1ms Rapid IPS Gaming Monitor",
        brand: "MSI",
        price: 269.99,
        image: "https://c1.neweggimages.com/ProductImageCompressAll1280/24-475-113-V01.jpg",
        specs: &[("screenSize", Text("27\"")), ("resolution", Text("2560x1440")), ("refreshRate", Text("165Hz"))],
    },
];
