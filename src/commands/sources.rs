//! Sources command implementation.

use crate::config::Config;
use crate::models::{Category, Retailer};
use crate::sources::{AmazonParser, BestBuyParser, NeweggParser, PageParser};

/// Describes the configured retailers and the searches they run.
pub struct SourcesCommand {
    config: Config,
}

impl SourcesCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn execute(&self, category: Option<Category>) -> String {
        let query = category.unwrap_or(Category::Laptop).default_query();
        let parsers: [&dyn PageParser; 3] = [&AmazonParser::new(), &BestBuyParser::new(), &NeweggParser::new()];

        let mut lines = Vec::new();
        for parser in parsers {
            let retailer: Retailer = parser.retailer();
            lines.push(format!(
                "{:<10} {}",
                retailer.display_name(),
                parser.search_url(retailer.origin(), query)
            ));
        }

        lines.push(String::new());
        if self.config.offline {
            lines.push("Offline: every source serves its fallback catalog.".to_string());
        } else {
            lines.push(format!(
                "Timeout {} ms, up to {} products per source.",
                self.config.timeout_ms, self.config.max_per_source
            ));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_command() {
        let output = SourcesCommand::new(Config::default()).execute(Some(Category::Headphone));
        assert!(output.contains("https://www.amazon.com/s?k=headphones"));
        assert!(output.contains("https://www.bestbuy.com/site/searchpage.jsp?st=headphones"));
        assert!(output.contains("https://www.newegg.com/p/pl?d=headphones"));
        assert!(output.contains("Timeout 10000 ms"));
    }

    #[test]
    fn test_sources_command_offline() {
        let config = Config { offline: true, ..Config::default() };
        let output = SourcesCommand::new(config).execute(None);
        assert!(output.contains("fallback catalog"));
        assert!(output.contains("s?k=laptop"));
    }
}
