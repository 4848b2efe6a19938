//! Admin dashboard for the online test platform.
//!
//! The `data` feature compiles the reusable layer: domain types, the table
//! controller, forms, the REST client and the services built on them. The
//! `server` feature adds the Actix-web application that renders the pages.

#[cfg(feature = "data")]
pub mod api;
#[cfg(feature = "data")]
pub mod cache;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "data")]
pub mod paths;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod services;
#[cfg(feature = "data")]
pub mod table;

#[cfg(feature = "server")]
mod server {
    use actix_files::Files;
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::api::ApiClient;
    use crate::cache::PageCache;
    use crate::models::config::ServerConfig;
    use crate::repository::HttpRepository;
    use crate::routes::books::{
        create_book, delete_book, edit_book, new_book, show_book, show_books, toggle_book,
        update_book, update_book_stock,
    };
    use crate::routes::main::{health, index};
    use crate::routes::qanda::{
        create_qanda, delete_question, edit_question, new_qanda, show_qanda, show_question,
        toggle_question, update_question,
    };
    use crate::routes::topics::{
        create_topic, delete_topic, edit_topic, new_topic, show_topic, show_topics, toggle_topic,
        update_topic,
    };
    use crate::routes::users::{
        create_user, delete_user, edit_user, new_user, show_user, show_users, toggle_user,
        update_user,
    };

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let api = ApiClient::new(&server_config.api_base_url, server_config.api_timeout())
            .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;
        let repo = HttpRepository::new(api, server_config.qanda_collection_id.clone());

        // Shared by every worker so invalidation is seen everywhere.
        let cache = web::Data::new(
            PageCache::new(server_config.page_cache_ttl())
                .with_max_entries(server_config.page_cache_max_entries),
        );

        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;
        let message_store = CookieMessageStore::builder(secret_key).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Serving dashboard on {}:{} against {}",
            bind_address.0,
            bind_address.1,
            server_config.api_base_url
        );

        HttpServer::new(move || {
            App::new()
                .wrap(message_framework.clone())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(index)
                .service(health)
                // `/new` must be registered before the `/{id}` routes.
                .service(new_book)
                .service(create_book)
                .service(show_books)
                .service(show_book)
                .service(edit_book)
                .service(update_book)
                .service(delete_book)
                .service(toggle_book)
                .service(update_book_stock)
                .service(new_topic)
                .service(create_topic)
                .service(show_topics)
                .service(show_topic)
                .service(edit_topic)
                .service(update_topic)
                .service(delete_topic)
                .service(toggle_topic)
                .service(new_qanda)
                .service(create_qanda)
                .service(show_qanda)
                .service(show_question)
                .service(edit_question)
                .service(update_question)
                .service(delete_question)
                .service(toggle_question)
                .service(new_user)
                .service(create_user)
                .service(show_users)
                .service(show_user)
                .service(edit_user)
                .service(update_user)
                .service(delete_user)
                .service(toggle_user)
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(cache.clone())
        })
        .bind(bind_address)?
        .run()
        .await
    }
}

#[cfg(feature = "server")]
pub use server::run;
