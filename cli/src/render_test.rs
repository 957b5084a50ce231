use super::*;
use client::net::error::ApiError;

fn product(id: i64, name: &str, price: f64) -> Product {
    Product {
        id,
        name: name.to_owned(),
        description: String::new(),
        price,
        category: "Office".to_owned(),
        quantity: 2,
        user_id: None,
        deleted_at: None,
    }
}

#[test]
fn product_table_aligns_columns() {
    let a = product(1, "Pen", 1.5);
    let b = product(12, "Standing Desk", 1299.0);
    let table = product_table(&[&a, &b]);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("ID  NAME"));
    assert!(lines[1].contains("$1.50"));
    assert!(lines[2].contains("$1,299.00"));
    assert_eq!(lines[1].find("Office"), lines[2].find("Office"));
}

#[test]
fn product_table_empty_has_header_only() {
    assert_eq!(product_table(&[]).lines().count(), 1);
}

#[test]
fn page_footer_shows_neighbours() {
    let mut catalog = CatalogState::new(2);
    let req = catalog.begin_load(2);
    catalog.finish_load(req, Ok(vec![product(3, "a", 1.0), product(4, "b", 1.0)]));
    assert_eq!(page_footer(&catalog), "Page 2  (previous: --page 1)  (next: --page 3)");
}

#[test]
fn page_footer_first_short_page() {
    let mut catalog = CatalogState::default();
    let req = catalog.begin_load(1);
    catalog.finish_load(req, Ok(vec![product(1, "a", 1.0)]));
    assert_eq!(page_footer(&catalog), "Page 1");
}

#[test]
fn field_error_lines_flatten_messages() {
    let mut errors = ValidationErrors::new();
    errors.insert("price".to_owned(), vec!["must be a number".to_owned()]);
    errors.insert("name".to_owned(), vec!["required".to_owned(), "too short".to_owned()]);
    assert_eq!(
        field_error_lines(&errors),
        vec!["  name: required", "  name: too short", "  price: must be a number"]
    );
}

#[test]
fn form_report_lists_banner_then_first_errors() {
    let mut errors = ValidationErrors::new();
    errors.insert("quantity".to_owned(), vec!["must be at least 0".to_owned()]);
    let mut form = ProductForm::create();
    form.begin_submit();
    form.finish_submit(Err(&ApiError::Validation { message: "invalid".to_owned(), errors }));
    assert_eq!(
        form_report(&form),
        vec!["Please check the form for errors".to_owned(), "  quantity: must be at least 0".to_owned()]
    );
}
