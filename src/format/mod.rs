//! Output formatting for products (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::models::Product;

/// Formats products for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product with its quotes and price history.
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => self.json(product, "{}"),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json(products, "[]"),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    fn json<T: serde::Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
    }

    // Table formatting

    fn table_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ID:       {}", product.id));
        lines.push(format!("Name:     {}", product.name));
        lines.push(format!("Brand:    {}", product.brand));
        if let Some(model) = &product.model {
            lines.push(format!("Model:    {}", model));
        }
        lines.push(format!("Category: {}", product.category));

        let summary = product.specs.summary();
        if !summary.is_empty() {
            lines.push(format!("Specs:    {}", summary));
        }
        if let Some(image) = &product.image_url {
            lines.push(format!("Image:    {}", image));
        }
        lines.push(format!("Added:    {}", product.created_at.format("%Y-%m-%d %H:%M UTC")));

        lines.push(String::new());
        lines.push("Prices:".to_string());
        for quote in &product.prices {
            lines.push(format!(
                "  {:<10} {:>10}  {:<12}  {}",
                quote.retailer.display_name(),
                format!("${:.2}", quote.price),
                stock_label(quote.in_stock),
                quote.url
            ));
        }

        if !product.price_history.is_empty() {
            lines.push(String::new());
            lines.push("History:".to_string());
            for point in &product.price_history {
                lines.push(format!(
                    "  {}  {:<10} {:>10}",
                    point.recorded_at.format("%Y-%m-%d %H:%M"),
                    point.retailer.display_name(),
                    format!("${:.2}", point.price)
                ));
            }
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[Product]) -> String {
        let id_width = 8;
        let category_width = 9;
        let price_width = 10;
        let retailers_width = 26;
        let name_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$}  {:<category_width$}  {:<price_width$}  {:<retailers_width$}  {}",
            "ID", "Category", "Lowest", "Retailers", "Name"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<category_width$}  {:-<price_width$}  {:-<retailers_width$}  {:-<name_width$}",
            "", "", "", "", ""
        ));

        for product in products {
            let id = product.id.to_string();
            lines.push(format!(
                "{:<id_width$}  {:<category_width$}  {:>price_width$}  {:<retailers_width$}  {}",
                &id[..id_width],
                product.category.to_string(),
                lowest_label(product),
                retailer_list(product),
                truncate(&product.name, name_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.name));
        lines.push(String::new());
        lines.push(format!("- **ID:** `{}`", product.id));
        lines.push(format!("- **Brand:** {}", product.brand));
        lines.push(format!("- **Category:** {}", product.category));

        let summary = product.specs.summary();
        if !summary.is_empty() {
            lines.push(format!("- **Specs:** {}", summary));
        }

        if let (Some(low), Some(high)) = (product.lowest_price(), product.highest_price()) {
            if (high - low).abs() < f64::EPSILON {
                lines.push(format!("- **Price:** ${:.2}", low));
            } else {
                lines.push(format!("- **Price:** ${:.2} to ${:.2}", low, high));
            }
        }

        lines.push(String::new());
        lines.push("| Retailer | Price | Stock |".to_string());
        lines.push("|----------|-------|-------|".to_string());
        for quote in &product.prices {
            lines.push(format!(
                "| [{}]({}) | ${:.2} | {} |",
                quote.retailer.display_name(),
                quote.url,
                quote.price,
                stock_label(quote.in_stock)
            ));
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();

        lines.push("| Category | Lowest | Retailers | Name |".to_string());
        lines.push("|----------|--------|-----------|------|".to_string());

        for product in products {
            let name = truncate(&product.name, 40);
            let link = product.prices.first().map(|q| q.url.as_str()).unwrap_or_default();

            lines.push(format!(
                "| {} | {} | {} | [{}]({}) |",
                product.category,
                lowest_label(product),
                retailer_list(product),
                name,
                link
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", products.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "id,name,brand,category,lowest_price,highest_price,retailers,in_stock,created_at,url".to_string()
    }

    fn csv_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for product in products {
            let lowest = product.lowest_price().map(|p| p.to_string()).unwrap_or_default();
            let highest = product.highest_price().map(|p| p.to_string()).unwrap_or_default();
            let in_stock = product.prices.iter().any(|q| q.in_stock);
            let url = product.prices.first().map(|q| q.url.as_str()).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{}",
                product.id,
                Self::csv_escape(&product.name),
                Self::csv_escape(&product.brand),
                product.category,
                lowest,
                highest,
                Self::csv_escape(&retailer_list(product)),
                in_stock,
                product.created_at.to_rfc3339(),
                url
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

fn stock_label(in_stock: bool) -> &'static str {
    if in_stock {
        "In Stock"
    } else {
        "Out of Stock"
    }
}

fn lowest_label(product: &Product) -> String {
    product.lowest_price().map(|p| format!("${:.2}", p)).unwrap_or_else(|| "N/A".to_string())
}

fn retailer_list(product: &Product) -> String {
    product.prices.iter().map(|q| q.retailer.display_name()).collect::<Vec<_>>().join(", ")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}
