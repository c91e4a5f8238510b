use chrono::{DateTime, Local, Utc};
use console::style;
use rust_decimal::Decimal;
use tabled::{
    settings::{Alignment, Style},
    Table, Tabled,
};

use crate::models::{
    cart::{CartLine, CartSummary},
    product::Product,
};
use crate::services::pricing::round_currency;

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Icon")]
    image: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Icon")]
    image: String,
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Total")]
    total: String,
}

/// Always two decimals, e.g. `$349.98`.
pub fn format_currency(amount: Decimal) -> String {
    format!("${}", round_currency(amount))
}

pub fn format_product_table(products: &[Product]) -> String {
    if products.is_empty() {
        return String::new();
    }

    let rows: Vec<ProductTableRow> = products
        .iter()
        .map(|product| ProductTableRow {
            id: product.id,
            image: product.image.clone(),
            name: truncate(&product.name, 30),
            price: format_currency(product.price),
            description: truncate(&product.description, 40),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

pub fn format_cart_table(lines: &[CartLine]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = lines
        .iter()
        .map(|line| CartTableRow {
            id: line.id(),
            image: line.product.image.clone(),
            name: truncate(&line.product.name, 30),
            price: format_currency(line.product.price),
            quantity: line.quantity,
            total: format_currency(line.line_total()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

pub fn format_summary(summary: &CartSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} ({}): {}\n",
        style("Items").bold(),
        summary.total_items,
        format_currency(summary.subtotal)
    ));

    let shipping = format_currency(summary.shipping);
    let shipping = if summary.is_free_shipping() {
        style(shipping).green()
    } else {
        style(shipping).yellow()
    };
    output.push_str(&format!("{}: {}\n", style("Shipping").bold(), shipping));

    output.push_str(&format!(
        "{}: {}\n",
        style("Total").bold(),
        style(format_currency(summary.grand_total)).cyan().bold()
    ));

    output
}

pub fn format_empty_cart() -> String {
    format!(
        "🛒 {}\n{}\n",
        style("Your cart is empty").bold(),
        style("Add some products to get started!").dim()
    )
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
