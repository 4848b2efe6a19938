use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::cache::PageCache;
use crate::domain::user::{USER_COLUMNS, User};
use crate::forms::ToggleForm;
use crate::forms::users::UserForm;
use crate::paths::{self, USERS};
use crate::repository::{HttpRepository, ListQuery, USER_FILTERS};
use crate::routes::{
    FieldKind, FieldSpec, FormPage, base_context, detail_rows, filter_pairs, form_fields,
    redirect, render_form, render_template,
};
use crate::services::users as service;
use crate::services::{ActionResult, ServiceError};
use crate::table::{
    DEFAULT_PAGE_SIZE, PaginationState, ServerPageInfo, TableConfig, TableController, TableMode,
    TableQuery, TableView,
};

const USER_FIELDS: [FieldSpec; 8] = [
    FieldSpec::new("NAME", "Name", FieldKind::Text),
    FieldSpec::new("USER_NAME", "Email", FieldKind::Email),
    FieldSpec::new("PASSWORD", "Password", FieldKind::Password),
    FieldSpec::new("USER_ROLE", "Role", FieldKind::Text),
    FieldSpec::new("DEPARTMENT", "Department", FieldKind::Text),
    FieldSpec::new("BATCH_NAME", "Batch", FieldKind::Text),
    FieldSpec::new("LOOKUP_VALUES", "Lookup values", FieldKind::Text),
    FieldSpec::new("ACTIVE", "Active", FieldKind::Checkbox),
];

#[get("/users")]
pub async fn show_users(
    table_query: web::Query<TableQuery>,
    filters: web::Query<HashMap<String, String>>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let state = PaginationState::from_query(&table_query, &USER_COLUMNS, DEFAULT_PAGE_SIZE);
    let extra = filter_pairs(&filters, &USER_FILTERS);

    let mut query = ListQuery::from_state(state.clone());
    for (key, value) in &extra {
        query = query.filter(*key, value.clone());
    }
    let page = service::list_users(repo.get_ref(), &cache, query).await;

    let mut controller = TableController::new(
        TableConfig::new(TableMode::Server, &USER_COLUMNS)
            .initial_state(state)
            .empty_message("No users found.")
            .search_placeholder("Search users..."),
    )
    .with_server_page(ServerPageInfo::from(&page));
    let table = TableView::build(&mut controller, &page.data, USERS, &extra);

    let mut context = base_context(&flash_messages, "users");
    context.insert("title", "Users");
    context.insert("table", &table);
    context.insert("new_url", &paths::new(USERS));
    context.insert("filters", &extra);

    render_template(&tera, "list.html", &context)
}

#[get("/users/new")]
pub async fn new_user(flash_messages: IncomingFlashMessages, tera: web::Data<Tera>) -> impl Responder {
    let defaults = serde_json::json!({ "ACTIVE": "Y" });
    render_form(
        &tera,
        &flash_messages,
        FormPage {
            current_page: "users",
            title: "New user",
            action: &paths::new(USERS),
            cancel_url: USERS,
            fields: form_fields(&USER_FIELDS, Some(&defaults), None),
            error: None,
        },
    )
}

#[post("/users/new")]
pub async fn create_user(
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<UserForm>,
) -> impl Responder {
    let submitted = form.clone();
    let result: ActionResult<User> = service::create_user(repo.get_ref(), &cache, form)
        .await
        .into();

    match result.data {
        Some(user) => {
            FlashMessage::success("User created successfully").send();
            redirect(&paths::details(USERS, &user.user_id))
        }
        None => render_form(
            &tera,
            &flash_messages,
            FormPage {
                current_page: "users",
                title: "New user",
                action: &paths::new(USERS),
                cancel_url: USERS,
                fields: form_fields(&USER_FIELDS, Some(&submitted), result.field_errors.as_ref()),
                error: result.error,
            },
        ),
    }
}

#[get("/users/{user_id}")]
pub async fn show_user(
    user_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let user = match service::get_user(repo.get_ref(), &cache, &user_id).await {
        Ok(user) => user,
        Err(err) => return back_to_list(err),
    };

    let mut context = base_context(&flash_messages, "users");
    context.insert("title", &user.name);
    context.insert("rows", &detail_rows(&USER_FIELDS, &user));
    context.insert("base_url", &paths::details(USERS, &user.user_id));
    context.insert("list_url", USERS);
    context.insert("active", user.active.as_str());

    render_template(&tera, "details.html", &context)
}

#[get("/users/{user_id}/edit")]
pub async fn edit_user(
    user_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let user = match service::get_user(repo.get_ref(), &cache, &user_id).await {
        Ok(user) => user,
        Err(err) => return back_to_list(err),
    };

    render_form(
        &tera,
        &flash_messages,
        FormPage {
            current_page: "users",
            title: "Edit user",
            action: &paths::edit(USERS, &user.user_id),
            cancel_url: &paths::details(USERS, &user.user_id),
            fields: form_fields(&USER_FIELDS, Some(&user), None),
            error: None,
        },
    )
}

#[post("/users/{user_id}/edit")]
pub async fn update_user(
    user_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<UserForm>,
) -> impl Responder {
    let submitted = form.clone();
    let result: ActionResult<User> = service::update_user(repo.get_ref(), &cache, &user_id, form)
        .await
        .into();

    match result.data {
        Some(user) => {
            FlashMessage::success("User updated successfully").send();
            redirect(&paths::details(USERS, &user.user_id))
        }
        None => render_form(
            &tera,
            &flash_messages,
            FormPage {
                current_page: "users",
                title: "Edit user",
                action: &paths::edit(USERS, &user_id),
                cancel_url: &paths::details(USERS, &user_id),
                fields: form_fields(&USER_FIELDS, Some(&submitted), result.field_errors.as_ref()),
                error: result.error,
            },
        ),
    }
}

#[post("/users/{user_id}/delete")]
pub async fn delete_user(
    user_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
) -> impl Responder {
    match service::delete_user(repo.get_ref(), &cache, &user_id).await {
        Ok(outcome) => {
            FlashMessage::success(outcome.message).send();
            redirect(USERS)
        }
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            redirect(&paths::details(USERS, &user_id))
        }
    }
}

#[post("/users/{user_id}/toggle")]
pub async fn toggle_user(
    user_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    cache: web::Data<PageCache>,
    web::Form(form): web::Form<ToggleForm>,
) -> impl Responder {
    match service::toggle_user_status(repo.get_ref(), &cache, &user_id, form.current).await {
        Ok(_) => FlashMessage::success("User status updated").send(),
        Err(err) => FlashMessage::error(err.to_string()).send(),
    }
    redirect(&paths::details(USERS, &user_id))
}

fn back_to_list(err: ServiceError) -> HttpResponse {
    FlashMessage::error(err.to_string()).send();
    redirect(USERS)
}
