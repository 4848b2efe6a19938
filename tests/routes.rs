use actix_web_flash_messages::Level;
use online_test_admin::domain::book::{BOOK_COLUMNS, Book};
use online_test_admin::domain::page::ListPage;
use online_test_admin::routes::{FieldKind, FieldSpec, alert_level_to_str, form_fields};
use online_test_admin::table::{
    PaginationState, ServerPageInfo, TableConfig, TableController, TableMode, TableView,
};
use tera::{Context, Tera};

fn templates() -> Tera {
    Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap()
}

fn page_context(current_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &Vec::<(String, String)>::new());
    context.insert("current_page", current_page);
    context
}

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

/// Renders `list.html` for a table with no rows.
#[test]
fn empty_list_page_renders_the_empty_state() {
    let page: ListPage<Book> = ListPage::empty(1);
    let mut controller = TableController::new(
        TableConfig::new(TableMode::Server, &BOOK_COLUMNS)
            .initial_state(PaginationState::default())
            .empty_message("No books found."),
    )
    .with_server_page(ServerPageInfo::from(&page));
    let table = TableView::build(&mut controller, &page.data, "/books", &[]);

    let mut context = page_context("books");
    context.insert("title", "Books");
    context.insert("table", &table);
    context.insert("new_url", "/books/new");

    let html = templates().render("list.html", &context).unwrap();

    assert!(html.contains("No books found."));
    assert!(html.contains("Showing 0 to 0 of 0 results"));
    assert!(html.contains("Page 1 of 1"));
}

#[test]
fn form_renders_field_errors_next_to_inputs() {
    let specs = [
        FieldSpec::new("PRICE", "Price", FieldKind::Decimal),
        FieldSpec::new("ACTIVE", "Active", FieldKind::Checkbox),
    ];
    let mut errors = online_test_admin::forms::FieldErrors::new();
    errors.insert("PRICE".into(), vec!["Price must be at least 0".into()]);
    let values = serde_json::json!({ "PRICE": -5, "ACTIVE": "Y" });

    let mut context = page_context("books");
    context.insert("title", "New book");
    context.insert("action", "/books/new");
    context.insert("cancel_url", "/books");
    context.insert("fields", &form_fields(&specs, Some(&values), Some(&errors)));
    context.insert("error", "Validation failed");

    let html = templates().render("form.html", &context).unwrap();

    assert!(html.contains("Price must be at least 0"));
    assert!(html.contains("is-invalid"));
    assert!(html.contains("checked"));
    assert!(html.contains("Validation failed"));
}
