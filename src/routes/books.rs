use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::cache::PageCache;
use crate::domain::book::{BOOK_COLUMNS, Book};
use crate::forms::ToggleForm;
use crate::forms::books::{BookForm, StockForm};
use crate::paths::{self, BOOKS};
use crate::repository::{BOOK_FILTERS, HttpRepository, ListQuery};
use crate::routes::{
    FieldKind, FieldSpec, FormPage, base_context, detail_rows, filter_pairs, form_fields,
    redirect, render_form, render_template,
};
use crate::services::books as service;
use crate::services::{ActionResult, ServiceError};
use crate::table::{
    DEFAULT_PAGE_SIZE, PaginationState, ServerPageInfo, TableConfig, TableController, TableMode,
    TableQuery, TableView,
};

const BOOK_FIELDS: [FieldSpec; 9] = [
    FieldSpec::new("BOOK_TITLE", "Title", FieldKind::Text),
    FieldSpec::new("AUTHOR", "Author", FieldKind::Text),
    FieldSpec::new("CATEGORY", "Category", FieldKind::Text),
    FieldSpec::new("DESCRIPTION", "Description", FieldKind::Textarea),
    FieldSpec::new("ISBN", "ISBN", FieldKind::Text),
    FieldSpec::new("PAGES_COUNT", "Pages", FieldKind::Number),
    FieldSpec::new("PRICE", "Price", FieldKind::Decimal),
    FieldSpec::new("STOCK_QUANTITY", "Stock quantity", FieldKind::Number),
    FieldSpec::new("ACTIVE", "Active", FieldKind::Checkbox),
];

#[get("/books")]
pub async fn show_books(
    table_query: web::Query<TableQuery>,
    filters: web::Query<HashMap<String, String>>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let state = PaginationState::from_query(&table_query, &BOOK_COLUMNS, DEFAULT_PAGE_SIZE);
    let extra = filter_pairs(&filters, &BOOK_FILTERS);

    let mut query = ListQuery::from_state(state.clone());
    for (key, value) in &extra {
        query = query.filter(*key, value.clone());
    }
    let page = service::list_books(repo.get_ref(), &cache, query).await;

    let mut controller = TableController::new(
        TableConfig::new(TableMode::Server, &BOOK_COLUMNS)
            .initial_state(state)
            .empty_message("No books found.")
            .search_placeholder("Search books..."),
    )
    .with_server_page(ServerPageInfo::from(&page));
    let table = TableView::build(&mut controller, &page.data, BOOKS, &extra);

    let categories = service::book_categories(repo.get_ref())
        .await
        .unwrap_or_default();
    let authors = service::book_authors(repo.get_ref())
        .await
        .unwrap_or_default();

    let mut context = base_context(&flash_messages, "books");
    context.insert("title", "Books");
    context.insert("table", &table);
    context.insert("new_url", &paths::new(BOOKS));
    context.insert("filters", &extra);
    context.insert("categories", &categories);
    context.insert("authors", &authors);

    render_template(&tera, "list.html", &context)
}

#[get("/books/new")]
pub async fn new_book(flash_messages: IncomingFlashMessages, tera: web::Data<Tera>) -> impl Responder {
    let defaults = serde_json::json!({ "ACTIVE": "Y" });
    render_form(
        &tera,
        &flash_messages,
        FormPage {
            current_page: "books",
            title: "New book",
            action: &paths::new(BOOKS),
            cancel_url: BOOKS,
            fields: form_fields(&BOOK_FIELDS, Some(&defaults), None),
            error: None,
        },
    )
}

#[post("/books/new")]
pub async fn create_book(
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<BookForm>,
) -> impl Responder {
    let submitted = form.clone();
    let result: ActionResult<Book> = service::create_book(repo.get_ref(), &cache, form).await.into();

    match result.data {
        Some(book) => {
            FlashMessage::success("Book created successfully.").send();
            redirect(&paths::details(BOOKS, &book.book_id))
        }
        None => render_form(
            &tera,
            &flash_messages,
            FormPage {
                current_page: "books",
                title: "New book",
                action: &paths::new(BOOKS),
                cancel_url: BOOKS,
                fields: form_fields(&BOOK_FIELDS, Some(&submitted), result.field_errors.as_ref()),
                error: result.error,
            },
        ),
    }
}

#[get("/books/{book_id}")]
pub async fn show_book(
    book_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let book = match service::get_book(repo.get_ref(), &cache, &book_id).await {
        Ok(book) => book,
        Err(err) => return back_to_list(err),
    };

    let mut context = base_context(&flash_messages, "books");
    context.insert("title", &book.book_title);
    context.insert("rows", &detail_rows(&BOOK_FIELDS, &book));
    context.insert("base_url", &paths::details(BOOKS, &book.book_id));
    context.insert("list_url", BOOKS);
    context.insert("active", book.active.as_str());
    context.insert("stock", &book.stock_quantity);
    context.insert("show_stock", &true);

    render_template(&tera, "details.html", &context)
}

#[get("/books/{book_id}/edit")]
pub async fn edit_book(
    book_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let book = match service::get_book(repo.get_ref(), &cache, &book_id).await {
        Ok(book) => book,
        Err(err) => return back_to_list(err),
    };

    render_form(
        &tera,
        &flash_messages,
        FormPage {
            current_page: "books",
            title: "Edit book",
            action: &paths::edit(BOOKS, &book.book_id),
            cancel_url: &paths::details(BOOKS, &book.book_id),
            fields: form_fields(&BOOK_FIELDS, Some(&book), None),
            error: None,
        },
    )
}

#[post("/books/{book_id}/edit")]
pub async fn update_book(
    book_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<BookForm>,
) -> impl Responder {
    let submitted = form.clone();
    let result: ActionResult<Book> = service::update_book(repo.get_ref(), &cache, &book_id, form)
        .await
        .into();

    match result.data {
        Some(book) => {
            FlashMessage::success("Book updated successfully.").send();
            redirect(&paths::details(BOOKS, &book.book_id))
        }
        None => render_form(
            &tera,
            &flash_messages,
            FormPage {
                current_page: "books",
                title: "Edit book",
                action: &paths::edit(BOOKS, &book_id),
                cancel_url: &paths::details(BOOKS, &book_id),
                fields: form_fields(&BOOK_FIELDS, Some(&submitted), result.field_errors.as_ref()),
                error: result.error,
            },
        ),
    }
}

#[post("/books/{book_id}/delete")]
pub async fn delete_book(
    book_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    match service::delete_book(repo.get_ref(), &cache, &book_id).await {
        Ok(outcome) => {
            FlashMessage::success(outcome.message).send();
            redirect(BOOKS)
        }
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            redirect(&paths::details(BOOKS, &book_id))
        }
    }
}

#[post("/books/{book_id}/toggle")]
pub async fn toggle_book(
    book_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    web::Form(form): web::Form<ToggleForm>,
) -> impl Responder {
    match service::toggle_book_status(repo.get_ref(), &cache, &book_id, form.current).await {
        Ok(_) => FlashMessage::success("Book status updated.").send(),
        Err(err) => FlashMessage::error(err.to_string()).send(),
    }
    redirect(&paths::details(BOOKS, &book_id))
}

#[post("/books/{book_id}/stock")]
pub async fn update_book_stock(
    book_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    web::Form(form): web::Form<StockForm>,
) -> impl Responder {
    match service::update_book_stock(repo.get_ref(), &cache, &book_id, form).await {
        Ok(_) => FlashMessage::success("Stock updated.").send(),
        Err(ServiceError::Validation(errors)) => {
            let message = errors
                .into_values()
                .flatten()
                .next()
                .unwrap_or_else(|| "Validation failed".to_string());
            FlashMessage::error(message).send();
        }
        Err(err) => FlashMessage::error(err.to_string()).send(),
    }
    redirect(&paths::details(BOOKS, &book_id))
}

fn back_to_list(err: ServiceError) -> HttpResponse {
    FlashMessage::error(err.to_string()).send();
    redirect(BOOKS)
}
