//! Q&A pages. The list endpoint is not paginated, so the table runs in local
//! mode: search, sort and paging happen over the full fetched set.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::cache::PageCache;
use crate::domain::qanda::{QANDA_COLUMNS, QandA};
use crate::forms::ToggleForm;
use crate::forms::qanda::{QandAFilterQuery, QandAForm};
use crate::paths::{self, QANDA};
use crate::repository::HttpRepository;
use crate::routes::{
    FieldKind, FieldSpec, FormPage, base_context, detail_rows, form_fields, redirect,
    render_form, render_template,
};
use crate::services::qanda as service;
use crate::services::{ActionResult, ServiceError};
use crate::table::{
    DEFAULT_PAGE_SIZE, PaginationState, TableConfig, TableController, TableMode, TableQuery,
    TableView,
};

const QANDA_FIELDS: [FieldSpec; 8] = [
    FieldSpec::new("TOPIC_ID", "Topic ID", FieldKind::Text),
    FieldSpec::new("QUERY", "Question", FieldKind::Textarea),
    FieldSpec::new("QUERY_TYPE", "Query type", FieldKind::Text),
    FieldSpec::new("MARKS_PER_QUERY", "Marks", FieldKind::Number),
    FieldSpec::new("MINUS_MARKS_PERC", "Negative marks %", FieldKind::Number),
    FieldSpec::new("LOOKUP_VALUES", "Lookup values", FieldKind::Text),
    FieldSpec::new("MULTI_CHOICE", "Multiple choice", FieldKind::Checkbox),
    FieldSpec::new("ACTIVE", "Active", FieldKind::Checkbox),
];

#[get("/qanda")]
pub async fn show_qanda(
    table_query: web::Query<TableQuery>,
    filter_query: web::Query<QandAFilterQuery>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let state = PaginationState::from_query(&table_query, &QANDA_COLUMNS, DEFAULT_PAGE_SIZE);
    let extra = filter_query.link_params();

    let (items, load_error) =
        match service::list_qanda(repo.get_ref(), &cache, &filter_query.to_filter()).await {
            Ok(items) => (items, None),
            Err(err) => (Vec::new(), Some(err.to_string())),
        };

    let mut controller = TableController::new(
        TableConfig::new(TableMode::Local, &QANDA_COLUMNS)
            .initial_state(state)
            .empty_message("No questions found.")
            .search_placeholder("Search questions..."),
    );
    let table = TableView::build(&mut controller, &items, QANDA, &extra);

    let mut context = base_context(&flash_messages, "qanda");
    context.insert("title", "Q&A");
    context.insert("table", &table);
    context.insert("new_url", &paths::new(QANDA));
    context.insert("filters", &extra);
    context.insert("load_error", &load_error);

    render_template(&tera, "list.html", &context)
}

#[get("/qanda/new")]
pub async fn new_qanda(
    filter_query: web::Query<QandAFilterQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let defaults = serde_json::json!({
        "ACTIVE": "Y",
        "MULTI_CHOICE": "N",
        "MINUS_MARKS_PERC": 0,
        "TOPIC_ID": filter_query.topic_id.clone().unwrap_or_default(),
    });
    render_form(
        &tera,
        &flash_messages,
        FormPage {
            current_page: "qanda",
            title: "New question",
            action: &paths::new(QANDA),
            cancel_url: QANDA,
            fields: form_fields(&QANDA_FIELDS, Some(&defaults), None),
            error: None,
        },
    )
}

#[post("/qanda/new")]
pub async fn create_qanda(
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<QandAForm>,
) -> impl Responder {
    let submitted = form.clone();
    let result: ActionResult<QandA> = service::create_qanda(repo.get_ref(), &cache, form)
        .await
        .into();

    match result.data {
        Some(item) => {
            FlashMessage::success("Q&A question created successfully").send();
            redirect(&paths::details(QANDA, &item.query_id))
        }
        None => render_form(
            &tera,
            &flash_messages,
            FormPage {
                current_page: "qanda",
                title: "New question",
                action: &paths::new(QANDA),
                cancel_url: QANDA,
                fields: form_fields(&QANDA_FIELDS, Some(&submitted), result.field_errors.as_ref()),
                error: result.error,
            },
        ),
    }
}

#[get("/qanda/{query_id}")]
pub async fn show_question(
    query_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let item = match service::get_qanda(repo.get_ref(), &cache, &query_id).await {
        Ok(item) => item,
        Err(err) => return back_to_list(err),
    };

    let mut context = base_context(&flash_messages, "qanda");
    context.insert("title", "Question");
    context.insert("rows", &detail_rows(&QANDA_FIELDS, &item));
    context.insert("base_url", &paths::details(QANDA, &item.query_id));
    context.insert("list_url", QANDA);
    context.insert("active", item.active.as_str());
    context.insert(
        "related_url",
        &paths::details(paths::TOPICS, &item.topic_id),
    );
    context.insert("related_label", "View topic");

    render_template(&tera, "details.html", &context)
}

#[get("/qanda/{query_id}/edit")]
pub async fn edit_question(
    query_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let item = match service::get_qanda(repo.get_ref(), &cache, &query_id).await {
        Ok(item) => item,
        Err(err) => return back_to_list(err),
    };

    render_form(
        &tera,
        &flash_messages,
        FormPage {
            current_page: "qanda",
            title: "Edit question",
            action: &paths::edit(QANDA, &item.query_id),
            cancel_url: &paths::details(QANDA, &item.query_id),
            fields: form_fields(&QANDA_FIELDS, Some(&item), None),
            error: None,
        },
    )
}

#[post("/qanda/{query_id}/edit")]
pub async fn update_question(
    query_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<QandAForm>,
) -> impl Responder {
    let submitted = form.clone();
    let result: ActionResult<QandA> =
        service::update_qanda(repo.get_ref(), &cache, &query_id, form)
            .await
            .into();

    match result.data {
        Some(item) => {
            FlashMessage::success("Q&A question updated successfully").send();
            redirect(&paths::details(QANDA, &item.query_id))
        }
        None => render_form(
            &tera,
            &flash_messages,
            FormPage {
                current_page: "qanda",
                title: "Edit question",
                action: &paths::edit(QANDA, &query_id),
                cancel_url: &paths::details(QANDA, &query_id),
                fields: form_fields(&QANDA_FIELDS, Some(&submitted), result.field_errors.as_ref()),
                error: result.error,
            },
        ),
    }
}

#[post("/qanda/{query_id}/delete")]
pub async fn delete_question(
    query_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    match service::delete_qanda(repo.get_ref(), &cache, &query_id).await {
        Ok(outcome) => {
            FlashMessage::success(outcome.message).send();
            redirect(QANDA)
        }
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            redirect(&paths::details(QANDA, &query_id))
        }
    }
}

#[post("/qanda/{query_id}/toggle")]
pub async fn toggle_question(
    query_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    web::Form(form): web::Form<ToggleForm>,
) -> impl Responder {
    match service::toggle_qanda_status(repo.get_ref(), &cache, &query_id, form.current).await {
        Ok(_) => FlashMessage::success("Q&A status updated").send(),
        Err(err) => FlashMessage::error(err.to_string()).send(),
    }
    redirect(&paths::details(QANDA, &query_id))
}

fn back_to_list(err: ServiceError) -> HttpResponse {
    FlashMessage::error(err.to_string()).send();
    redirect(QANDA)
}
