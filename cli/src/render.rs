//! Plain-text rendering for CLI output.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use client::net::types::{Product, ValidationErrors};
use client::state::catalog::CatalogState;
use client::state::form::{FormField, ProductForm, StatusMessage};
use client::util::format::format_currency;

const HEADERS: [&str; 5] = ["ID", "NAME", "CATEGORY", "PRICE", "QTY"];

/// Fixed-width table of products, one row per product.
pub fn product_table(products: &[&Product]) -> String {
    let rows: Vec<[String; 5]> = products
        .iter()
        .map(|p| {
            [
                p.id.to_string(),
                p.name.clone(),
                p.category.clone(),
                format_currency(p.price),
                p.quantity.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_owned), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Page indicator with hints for the neighbouring pages.
pub fn page_footer(catalog: &CatalogState) -> String {
    let mut footer = format!("Page {}", catalog.page);
    if let Some(prev) = catalog.previous_page() {
        footer.push_str(&format!("  (previous: --page {prev})"));
    }
    if let Some(next) = catalog.next_page() {
        footer.push_str(&format!("  (next: --page {next})"));
    }
    footer
}

/// One `field: message` line per message, sorted by field.
pub fn field_error_lines(errors: &ValidationErrors) -> Vec<String> {
    errors
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("  {field}: {m}")))
        .collect()
}

/// Status banner plus the first error for each rejected form field.
pub fn form_report(form: &ProductForm) -> Vec<String> {
    let mut lines = Vec::new();
    match &form.status {
        Some(StatusMessage::Success(message) | StatusMessage::Error(message)) => lines.push(message.clone()),
        None => {}
    }
    for field in FormField::ALL {
        if let Some(message) = form.first_error(field) {
            lines.push(format!("  {}: {message}", field.as_str()));
        }
    }
    lines
}
