//! Field extraction helpers shared by the retailer parsers.

use crate::error::ExtractError;
use regex_lite::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

/// Visible text of an element with whitespace collapsed.
pub fn text_of(element: ElementRef) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

/// Text of the first candidate selector that yields non-empty text.
pub fn first_text(scope: ElementRef, candidates: &[Selector]) -> Option<String> {
    candidates.iter().find_map(|selector| {
        let text = text_of(scope.select(selector).next()?);
        (!text.is_empty()).then_some(text)
    })
}

/// Attribute value of the first candidate selector that yields a non-empty value.
pub fn first_attr(scope: ElementRef, candidates: &[Selector], attr: &str) -> Option<String> {
    candidates.iter().find_map(|selector| {
        let value = scope.select(selector).next()?.value().attr(attr)?.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// First number in a price text, thousands separators allowed.
static PRICE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap());

/// Parses a price such as `$1,299.99` into a positive number.
///
/// Only the first numeric token counts, so trailing text like `Save $150` or
/// `Was $1,199.99` is ignored and a range like `$10 - $20` yields the lower bound.
pub fn parse_price(text: &str) -> Option<f64> {
    let token = PRICE_TOKEN.find(text)?;

    // A leading minus sign means a negative amount
    if text[..token.start()].trim_end().ends_with('-') {
        return None;
    }
    // `1.2.3` is not a price
    let mut rest = text[token.end()..].chars();
    if rest.next() == Some('.') && rest.next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }

    let value: f64 = token.as_str().replace(',', "").parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Joins a split price (`1,299.` + `99`) and parses it. Missing cents mean `.00`.
pub fn compose_price(whole: &str, fraction: Option<&str>) -> Option<f64> {
    let whole: String = whole.chars().filter(|c| c.is_ascii_digit() || *c == ',').collect();
    if whole.is_empty() {
        return None;
    }

    let cents: String =
        fraction.unwrap_or_default().chars().filter(|c| c.is_ascii_digit()).collect();
    let cents = if cents.is_empty() { "00".to_string() } else { cents };

    parse_price(&format!("{}.{}", whole, cents))
}

/// Parses optional price text; present but unparsable text is an error.
pub fn price_from(text: Option<String>) -> Result<Option<f64>, ExtractError> {
    match text {
        None => Ok(None),
        Some(text) => parse_price(&text).map(Some).ok_or(ExtractError::Price(text)),
    }
}

/// Returns true if the URL carries a scheme and host.
pub fn is_absolute(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Qualifies a link against the retailer origin.
pub fn qualify(href: &str, origin: &str) -> Result<String, ExtractError> {
    let href = href.trim();
    let origin = origin.trim_end_matches('/');

    if href.is_empty() {
        return Ok(origin.to_string());
    }
    if is_absolute(href) {
        return Ok(href.to_string());
    }
    if let Some(rest) = href.strip_prefix("//") {
        return Ok(format!("https://{}", rest));
    }
    if href.contains(':') && !href.starts_with('/') {
        // javascript:, data:, mailto: and friends
        return Err(ExtractError::Link(href.to_string()));
    }
    if href.starts_with('/') {
        Ok(format!("{}{}", origin, href))
    } else {
        Ok(format!("{}/{}", origin, href))
    }
}

/// Qualified listing link. A missing or unusable href falls back to the origin.
pub fn listing_url(href: Option<&str>, origin: &str) -> String {
    href.and_then(|href| qualify(href, origin).ok())
        .unwrap_or_else(|| origin.trim_end_matches('/').to_string())
}

/// True if the text contains any of the markers.
pub fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}
