//! Conversion from free-form scraped records to typed, persistable products.
//!
//! This is the validation boundary: anything that leaves here as a
//! [`NewProduct`] has a name, a positive price, an absolute URL, a source
//! retailer and category-typed specs with an extraction timestamp.

use crate::error::NormalizeError;
use crate::models::{
    brand_from_name, Category, HeadphoneSpecs, LaptopSpecs, MonitorSpecs, NewProduct, PriceHistoryPoint,
    PriceQuote, ProductSpecs, ScrapedRecord, SCRAPED_AT,
};
use crate::sources::extract::is_absolute;
use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::LazyLock;

mod patterns {
    use super::*;

    pub static STORAGE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)\b(\d+)\s?(GB|TB)\s*(?:(?:PCIe|NVMe|M\.2)\s*)*SSD\b").unwrap()
    });

    pub static MEMORY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,3})\s?GB\b").unwrap());

    pub static SCREEN: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"(?i)\b(\d{2}(?:\.\d)?)\s?(?:"|''|-inch\b|\s?inch\b|\s?in\b)"#).unwrap()
    });

    pub static REFRESH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(\d{2,3})\s?Hz\b").unwrap());

    pub static RESOLUTION: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\b(\d{3,4})\s?[xX×]\s?(\d{3,4})\b").unwrap());

    pub static UHD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(?:4K|UHD|2160p)\b").unwrap());

    pub static QHD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(?:W?QHD|1440p)\b").unwrap());

    pub static FHD: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)\b(?:FHD|Full HD|1080p)").unwrap());

    pub static INTEL: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)\b(?:intel\s+)?(?:core\s+)?i([3579])\b").unwrap());

    pub static RYZEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bryzen\s+([3579])\b").unwrap());

    pub static GPU: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)\b(RTX|GTX)\s?(\d{4})(\s?Ti)?\b").unwrap());

    pub static PANEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(IPS|VA|TN|OLED)\b").unwrap());
}

/// Normalizes a record, stamping missing timestamps with the current time.
pub fn normalize(record: ScrapedRecord) -> Result<NewProduct, NormalizeError> {
    normalize_at(record, Utc::now())
}

/// Normalizes a record using `now` for missing extraction time and the quote timestamps.
pub fn normalize_at(record: ScrapedRecord, now: DateTime<Utc>) -> Result<NewProduct, NormalizeError> {
    let name = record.name.trim().to_string();
    if name.is_empty() {
        return Err(NormalizeError::EmptyName);
    }
    if !record.price.is_finite() || record.price <= 0.0 {
        return Err(NormalizeError::InvalidPrice(record.price));
    }
    if !is_absolute(&record.url) {
        return Err(NormalizeError::RelativeUrl(record.url));
    }
    let retailer = record.source.ok_or(NormalizeError::MissingSource)?;

    let brand = match record.brand.trim() {
        "" => brand_from_name(&name),
        b => b.to_string(),
    };

    let mut specs = typed_specs(record.category, record.specs)?;
    fill_from_name(&mut specs, &name);
    stamp_if_missing(&mut specs, now);

    Ok(NewProduct {
        name,
        brand,
        model: record.model.filter(|m| !m.trim().is_empty()),
        category: record.category,
        specs,
        image_url: record.image_url.filter(|u| !u.trim().is_empty()),
        quote: PriceQuote {
            retailer,
            price: record.price,
            url: record.url,
            in_stock: record.in_stock,
            updated_at: now,
        },
        history: PriceHistoryPoint { retailer, price: record.price, recorded_at: now },
    })
}

/// Converts free-form specs into the category's typed specs.
///
/// Keys may be camelCase or snake_case; unknown keys are kept in `extra`.
pub fn typed_specs(category: Category, raw: Map<String, Value>) -> Result<ProductSpecs, NormalizeError> {
    let map: Map<String, Value> = raw.into_iter().map(|(k, v)| (camel_key(&k), v)).collect();

    Ok(match category {
        Category::Laptop => ProductSpecs::Laptop(from_map::<LaptopSpecs>(map)?),
        Category::Headphone => ProductSpecs::Headphone(from_map::<HeadphoneSpecs>(map)?),
        Category::Monitor => ProductSpecs::Monitor(from_map::<MonitorSpecs>(map)?),
    })
}

fn from_map<T: DeserializeOwned>(map: Map<String, Value>) -> Result<T, NormalizeError> {
    serde_json::from_value(Value::Object(map)).map_err(|e| NormalizeError::Specs(e.to_string()))
}

fn camel_key(key: &str) -> String {
    if key == SCRAPED_AT || !key.contains('_') {
        return key.to_string();
    }

    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn stamp_if_missing(specs: &mut ProductSpecs, now: DateTime<Utc>) {
    let slot = match specs {
        ProductSpecs::Laptop(s) => &mut s.scraped_at,
        ProductSpecs::Headphone(s) => &mut s.scraped_at,
        ProductSpecs::Monitor(s) => &mut s.scraped_at,
    };
    if slot.is_none() {
        *slot = Some(now);
    }
}

/// Fills typed fields the retailer left empty from patterns in the product name.
pub fn fill_from_name(specs: &mut ProductSpecs, name: &str) {
    match specs {
        ProductSpecs::Laptop(s) => {
            fill(&mut s.processor, || processor(name));
            fill(&mut s.storage, || storage(name));
            fill(&mut s.ram, || memory(name));
            fill(&mut s.screen_size, || screen_size(name));
            fill(&mut s.gpu, || gpu(name));
        }
        ProductSpecs::Headphone(s) => {
            fill(&mut s.form_factor, || form_factor(name));
            let lower = name.to_lowercase();
            if s.wireless.is_none() && (lower.contains("wireless") || lower.contains("bluetooth")) {
                s.wireless = Some(true);
            }
            if s.noise_cancellation.is_none()
                && (lower.contains("noise cancel")
                    || lower.contains("noise-cancel")
                    || name.split_whitespace().any(|w| w == "ANC"))
            {
                s.noise_cancellation = Some(true);
            }
        }
        ProductSpecs::Monitor(s) => {
            fill(&mut s.screen_size, || screen_size(name));
            fill(&mut s.resolution, || resolution(name));
            fill(&mut s.refresh_rate, || refresh_rate(name));
            fill(&mut s.panel_type, || patterns::PANEL.captures(name).map(|c| c[1].to_string()));
        }
    }
}

fn fill(slot: &mut Option<String>, guess: impl FnOnce() -> Option<String>) {
    if slot.as_deref().map_or(true, |s| s.trim().is_empty()) {
        *slot = guess();
    }
}

fn storage(name: &str) -> Option<String> {
    let caps = patterns::STORAGE.captures(name)?;
    Some(format!("{}{} SSD", &caps[1], caps[2].to_uppercase()))
}

fn memory(name: &str) -> Option<String> {
    let storage_at = patterns::STORAGE.find(name).map(|m| m.start());

    patterns::MEMORY.captures_iter(name).find_map(|caps| {
        let whole = caps.get(0)?;
        if Some(whole.start()) == storage_at {
            return None;
        }
        let gb: u32 = caps[1].parse().ok()?;
        (gb <= 128).then(|| format!("{}GB", gb))
    })
}

fn screen_size(name: &str) -> Option<String> {
    patterns::SCREEN.captures(name).map(|caps| format!("{}\"", &caps[1]))
}

fn refresh_rate(name: &str) -> Option<String> {
    patterns::REFRESH.captures(name).map(|caps| format!("{}Hz", &caps[1]))
}

fn resolution(name: &str) -> Option<String> {
    if let Some(caps) = patterns::RESOLUTION.captures(name) {
        return Some(format!("{}x{}", &caps[1], &caps[2]));
    }
    if patterns::UHD.is_match(name) {
        Some("3840x2160".to_string())
    } else if patterns::QHD.is_match(name) {
        Some("2560x1440".to_string())
    } else if patterns::FHD.is_match(name) {
        Some("1920x1080".to_string())
    } else {
        None
    }
}

fn processor(name: &str) -> Option<String> {
    if let Some(caps) = patterns::INTEL.captures(name) {
        return Some(format!("Intel i{}", &caps[1]));
    }
    patterns::RYZEN.captures(name).map(|caps| format!("AMD Ryzen {}", &caps[1]))
}

fn gpu(name: &str) -> Option<String> {
    let caps = patterns::GPU.captures(name)?;
    let ti = if caps.get(3).is_some() { " Ti" } else { "" };
    Some(format!("{} {}{}", caps[1].to_uppercase(), &caps[2], ti))
}

fn form_factor(name: &str) -> Option<String> {
    let lower = name.to_lowercase();
    let kind = if ["in-ear", "earbuds", "earphones", "airpods"].iter().any(|k| lower.contains(k)) {
        "in-ear"
    } else if lower.contains("on-ear") {
        "on-ear"
    } else if ["over-ear", "over-the-ear", "overhead", "headset"].iter().any(|k| lower.contains(k)) {
        "over-ear"
    } else {
        return None;
    };
    Some(kind.to_string())
}
