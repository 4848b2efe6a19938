use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::cache::PageCache;
use crate::domain::topic::{TOPIC_COLUMNS, Topic};
use crate::forms::ToggleForm;
use crate::forms::topics::TopicForm;
use crate::paths::{self, QANDA, TOPICS};
use crate::repository::{HttpRepository, ListQuery, TOPIC_FILTERS};
use crate::routes::{
    FieldKind, FieldSpec, FormPage, base_context, detail_rows, filter_pairs, form_fields,
    redirect, render_form, render_template,
};
use crate::services::topics as service;
use crate::services::{ActionResult, ServiceError};
use crate::table::{
    DEFAULT_PAGE_SIZE, PaginationState, ServerPageInfo, TableConfig, TableController, TableMode,
    TableQuery, TableView,
};

const TOPIC_FIELDS: [FieldSpec; 4] = [
    FieldSpec::new("TOPIC_NAME", "Topic name", FieldKind::Text),
    FieldSpec::new("STREAM", "Stream", FieldKind::Text),
    FieldSpec::new("DESCRIPTION", "Description", FieldKind::Textarea),
    FieldSpec::new("ACTIVE", "Active", FieldKind::Checkbox),
];

#[get("/topics")]
pub async fn show_topics(
    table_query: web::Query<TableQuery>,
    filters: web::Query<HashMap<String, String>>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let state = PaginationState::from_query(&table_query, &TOPIC_COLUMNS, DEFAULT_PAGE_SIZE);
    let extra = filter_pairs(&filters, &TOPIC_FILTERS);

    let mut query = ListQuery::from_state(state.clone());
    for (key, value) in &extra {
        query = query.filter(*key, value.clone());
    }
    let page = service::list_topics(repo.get_ref(), &cache, query).await;

    let mut controller = TableController::new(
        TableConfig::new(TableMode::Server, &TOPIC_COLUMNS)
            .initial_state(state)
            .empty_message("No topics found.")
            .search_placeholder("Search topics..."),
    )
    .with_server_page(ServerPageInfo::from(&page));
    let table = TableView::build(&mut controller, &page.data, TOPICS, &extra);

    let mut context = base_context(&flash_messages, "topics");
    context.insert("title", "Topics");
    context.insert("table", &table);
    context.insert("new_url", &paths::new(TOPICS));
    context.insert("filters", &extra);

    render_template(&tera, "list.html", &context)
}

#[get("/topics/new")]
pub async fn new_topic(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let defaults = serde_json::json!({ "ACTIVE": "Y" });
    render_form(
        &tera,
        &flash_messages,
        FormPage {
            current_page: "topics",
            title: "New topic",
            action: &paths::new(TOPICS),
            cancel_url: TOPICS,
            fields: form_fields(&TOPIC_FIELDS, Some(&defaults), None),
            error: None,
        },
    )
}

#[post("/topics/new")]
pub async fn create_topic(
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<TopicForm>,
) -> impl Responder {
    let submitted = form.clone();
    let result: ActionResult<Topic> = service::create_topic(repo.get_ref(), &cache, form)
        .await
        .into();

    match result.data {
        Some(topic) => {
            FlashMessage::success("Topic created successfully.").send();
            redirect(&paths::details(TOPICS, &topic.topic_id))
        }
        None => render_form(
            &tera,
            &flash_messages,
            FormPage {
                current_page: "topics",
                title: "New topic",
                action: &paths::new(TOPICS),
                cancel_url: TOPICS,
                fields: form_fields(&TOPIC_FIELDS, Some(&submitted), result.field_errors.as_ref()),
                error: result.error,
            },
        ),
    }
}

#[get("/topics/{topic_id}")]
pub async fn show_topic(
    topic_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let topic = match service::get_topic(repo.get_ref(), &cache, &topic_id).await {
        Ok(topic) => topic,
        Err(err) => return back_to_list(err),
    };

    let mut context = base_context(&flash_messages, "topics");
    context.insert("title", &topic.topic_name);
    context.insert("rows", &detail_rows(&TOPIC_FIELDS, &topic));
    context.insert("base_url", &paths::details(TOPICS, &topic.topic_id));
    context.insert("list_url", TOPICS);
    context.insert("active", topic.active.as_str());
    context.insert(
        "related_url",
        &format!("{QANDA}?topicId={}", topic.topic_id),
    );
    context.insert("related_label", "View questions");

    render_template(&tera, "details.html", &context)
}

#[get("/topics/{topic_id}/edit")]
pub async fn edit_topic(
    topic_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let topic = match service::get_topic(repo.get_ref(), &cache, &topic_id).await {
        Ok(topic) => topic,
        Err(err) => return back_to_list(err),
    };

    render_form(
        &tera,
        &flash_messages,
        FormPage {
            current_page: "topics",
            title: "Edit topic",
            action: &paths::edit(TOPICS, &topic.topic_id),
            cancel_url: &paths::details(TOPICS, &topic.topic_id),
            fields: form_fields(&TOPIC_FIELDS, Some(&topic), None),
            error: None,
        },
    )
}

#[post("/topics/{topic_id}/edit")]
pub async fn update_topic(
    topic_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<TopicForm>,
) -> impl Responder {
    let submitted = form.clone();
    let result: ActionResult<Topic> =
        service::update_topic(repo.get_ref(), &cache, &topic_id, form)
            .await
            .into();

    match result.data {
        Some(topic) => {
            FlashMessage::success("Topic updated successfully.").send();
            redirect(&paths::details(TOPICS, &topic.topic_id))
        }
        None => render_form(
            &tera,
            &flash_messages,
            FormPage {
                current_page: "topics",
                title: "Edit topic",
                action: &paths::edit(TOPICS, &topic_id),
                cancel_url: &paths::details(TOPICS, &topic_id),
                fields: form_fields(&TOPIC_FIELDS, Some(&submitted), result.field_errors.as_ref()),
                error: result.error,
            },
        ),
    }
}

#[post("/topics/{topic_id}/delete")]
pub async fn delete_topic(
    topic_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    match service::delete_topic(repo.get_ref(), &cache, &topic_id).await {
        Ok(outcome) => {
            FlashMessage::success(outcome.message).send();
            redirect(TOPICS)
        }
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            redirect(&paths::details(TOPICS, &topic_id))
        }
    }
}

#[post("/topics/{topic_id}/toggle")]
pub async fn toggle_topic(
    topic_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    web::Form(form): web::Form<ToggleForm>,
) -> impl Responder {
    match service::toggle_topic_status(repo.get_ref(), &cache, &topic_id, form.current).await {
        Ok(_) => FlashMessage::success("Topic status updated.").send(),
        Err(err) => FlashMessage::error(err.to_string()).send(),
    }
    redirect(&paths::details(TOPICS, &topic_id))
}

fn back_to_list(err: ServiceError) -> HttpResponse {
    FlashMessage::error(err.to_string()).send();
    redirect(TOPICS)
}
