//! Services behind the books pages.

use std::collections::BTreeSet;

use validator::Validate;

use crate::api::paths::build_query_string;
use crate::cache::PageCache;
use crate::domain::book::{Book, NewBook, UpdateBook};
use crate::domain::page::{DeleteOutcome, ListPage};
use crate::domain::types::{BookId, YesNo};
use crate::forms::books::{BookForm, StockForm};
use crate::paths;
use crate::repository::{BookReader, BookWriter, ListQuery};
use crate::services::{OPTIONS_FETCH_LIMIT, ServiceError, ServiceResult, require_id};

/// Fetches one page of books. Failures degrade to an empty page so the list
/// still renders its empty state.
pub async fn list_books<R>(repo: &R, cache: &PageCache, query: ListQuery) -> ListPage<Book>
where
    R: BookReader + ?Sized,
{
    let key = format!("{}{}", paths::BOOKS, build_query_string(&query.query_pairs()));
    if let Some(page) = cache.get(&key) {
        return page;
    }

    let page_number = query.state.page;
    match repo.list_books(query).await {
        Ok(page) => {
            cache.insert(&key, &page);
            page
        }
        Err(err) => {
            log::error!("Failed to fetch books list: {err}");
            ListPage::empty(page_number)
        }
    }
}

pub async fn get_book<R>(repo: &R, cache: &PageCache, id: &str) -> ServiceResult<Book>
where
    R: BookReader + ?Sized,
{
    let book_id: BookId = require_id(id, "Book")?;
    let key = paths::details(paths::BOOKS, &book_id);
    if let Some(book) = cache.get(&key) {
        return Ok(book);
    }

    let book = repo
        .get_book_by_id(&book_id)
        .await
        .map_err(|err| ServiceError::upstream(err, "Failed to fetch book."))?
        .ok_or_else(|| ServiceError::NotFound("Book not found".to_string()))?;
    cache.insert(&key, &book);
    Ok(book)
}

pub async fn create_book<R>(repo: &R, cache: &PageCache, form: BookForm) -> ServiceResult<Book>
where
    R: BookWriter + ?Sized,
{
    let form = form.normalized();
    form.validate()?;

    let book = repo
        .create_book(&NewBook::from(form))
        .await
        .map_err(|err| ServiceError::upstream(err, "Failed to create book. Please try again."))?;

    cache.invalidate(paths::BOOKS);
    Ok(book)
}

pub async fn update_book<R>(
    repo: &R,
    cache: &PageCache,
    id: &str,
    form: BookForm,
) -> ServiceResult<Book>
where
    R: BookWriter + ?Sized,
{
    let book_id: BookId = require_id(id, "Book")?;
    let form = form.normalized();
    form.validate()?;

    apply_update(
        repo,
        cache,
        &book_id,
        &UpdateBook::from(form),
        "Failed to update book. Please try again.",
    )
    .await
}

pub async fn delete_book<R>(repo: &R, cache: &PageCache, id: &str) -> ServiceResult<DeleteOutcome>
where
    R: BookWriter + ?Sized,
{
    let book_id: BookId = require_id(id, "Book")?;

    let outcome = repo
        .delete_book(&book_id)
        .await
        .map_err(|err| ServiceError::upstream(err, "Failed to delete book. Please try again."))?;
    if !outcome.success {
        return Err(ServiceError::Upstream(outcome.message));
    }

    cache.invalidate(paths::BOOKS);
    Ok(outcome)
}

/// Flips the `ACTIVE` flag of a book whose current value is `current`.
pub async fn toggle_book_status<R>(
    repo: &R,
    cache: &PageCache,
    id: &str,
    current: YesNo,
) -> ServiceResult<Book>
where
    R: BookWriter + ?Sized,
{
    let book_id: BookId = require_id(id, "Book")?;
    apply_update(
        repo,
        cache,
        &book_id,
        &UpdateBook::active(current.toggled()),
        "Failed to update book status. Please try again.",
    )
    .await
}

pub async fn update_book_stock<R>(
    repo: &R,
    cache: &PageCache,
    id: &str,
    form: StockForm,
) -> ServiceResult<Book>
where
    R: BookWriter + ?Sized,
{
    let book_id: BookId = require_id(id, "Book")?;
    form.validate()?;
    let quantity = form.quantity.unwrap_or_default();
    if quantity < 0 {
        return Err(ServiceError::Form(
            "Stock quantity cannot be negative.".to_string(),
        ));
    }

    apply_update(
        repo,
        cache,
        &book_id,
        &UpdateBook::stock(quantity),
        "Failed to update book stock. Please try again.",
    )
    .await
}

/// Distinct categories across all books, sorted, for the filter bar.
pub async fn book_categories<R>(repo: &R) -> ServiceResult<Vec<String>>
where
    R: BookReader + ?Sized,
{
    let books = fetch_for_options(repo, "Failed to fetch book categories").await?;
    Ok(distinct(books.iter().map(|book| book.category.as_str())))
}

/// Distinct authors across all books, sorted, for the filter bar.
pub async fn book_authors<R>(repo: &R) -> ServiceResult<Vec<String>>
where
    R: BookReader + ?Sized,
{
    let books = fetch_for_options(repo, "Failed to fetch book authors").await?;
    Ok(distinct(books.iter().map(|book| book.author.as_str())))
}

async fn fetch_for_options<R>(repo: &R, message: &str) -> ServiceResult<Vec<Book>>
where
    R: BookReader + ?Sized,
{
    let page = repo
        .list_books(ListQuery::new().paginate(1, OPTIONS_FETCH_LIMIT))
        .await
        .map_err(|err| ServiceError::upstream(err, message))?;
    Ok(page.data)
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

async fn apply_update<R>(
    repo: &R,
    cache: &PageCache,
    book_id: &BookId,
    updates: &UpdateBook,
    message: &str,
) -> ServiceResult<Book>
where
    R: BookWriter + ?Sized,
{
    let book = repo
        .update_book(book_id, updates)
        .await
        .map_err(|err| ServiceError::upstream(err, message))?;

    cache.invalidate(paths::BOOKS);
    cache.invalidate(&paths::details(paths::BOOKS, book_id));
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::books::tests::valid_form;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn book(id: &str, category: &str, author: &str) -> Book {
        Book {
            book_id: BookId::new(id).unwrap(),
            book_title: format!("Title {id}"),
            category: category.to_string(),
            description: "desc".to_string(),
            active: YesNo::Yes,
            creation_date: "2024-01-01T00:00:00Z".to_string(),
            pages_count: 100,
            author: author.to_string(),
            isbn: "0441013597".to_string(),
            price: 10.0,
            stock_quantity: 1,
        }
    }

    /// Ensures an invalid price is reported without calling the API.
    #[tokio::test]
    async fn negative_price_fails_before_any_network_call() {
        let mut repo = MockRepository::new();
        repo.expect_create_book().times(0);
        let form = BookForm {
            price: Some(-5.0),
            ..valid_form()
        };

        let err = create_book(&repo, &PageCache::default(), form)
            .await
            .unwrap_err();

        let errors = err.field_errors().expect("field errors");
        assert!(errors.contains_key("PRICE"));
        assert_eq!(err.to_string(), "Validation failed");
    }

    /// Confirms a 404 on delete reports the message the API sent.
    #[tokio::test]
    async fn delete_of_missing_book_surfaces_server_message() {
        let mut repo = MockRepository::new();
        repo.expect_delete_book().times(1).returning(|_| {
            Err(RepositoryError::NotFound(Some(
                "Book with id b9 not found".to_string(),
            )))
        });

        let err = delete_book(&repo, &PageCache::default(), "b9")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "Book with id b9 not found");
    }

    #[tokio::test]
    async fn blank_id_is_rejected_locally() {
        let mut repo = MockRepository::new();
        repo.expect_delete_book().times(0);

        let err = delete_book(&repo, &PageCache::default(), "  ")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Book ID is required");
    }

    /// Verifies a failing list call renders as an empty page.
    #[tokio::test]
    async fn list_failure_degrades_to_empty_page() {
        let mut repo = MockRepository::new();
        repo.expect_list_books()
            .returning(|_| Err(RepositoryError::ConnectionError("refused".into())));

        let page = list_books(&repo, &PageCache::default(), ListQuery::new().paginate(3, 10)).await;

        assert!(page.is_empty());
        assert_eq!(page.current_page, 3);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_count, 0);
    }

    /// Checks that a mutation invalidates the cached list.
    #[tokio::test]
    async fn list_is_served_from_cache_until_a_mutation() {
        let cache = PageCache::default();
        let mut repo = MockRepository::new();
        repo.expect_list_books().times(2).returning(|_| {
            Ok(ListPage {
                data: vec![book("b1", "Fiction", "Herbert")],
                current_page: 1,
                total_pages: 1,
                total_count: 1,
            })
        });
        repo.expect_create_book()
            .times(1)
            .returning(|_| Ok(book("b2", "Fiction", "Le Guin")));

        list_books(&repo, &cache, ListQuery::new()).await;
        list_books(&repo, &cache, ListQuery::new()).await;
        create_book(&repo, &cache, valid_form()).await.unwrap();
        list_books(&repo, &cache, ListQuery::new()).await;
    }

    #[tokio::test]
    async fn toggle_sends_flipped_flag_only() {
        let mut repo = MockRepository::new();
        repo.expect_update_book()
            .withf(|id, updates| id.as_str() == "b1" && updates == &UpdateBook::active(YesNo::No))
            .times(1)
            .returning(|_, _| Ok(book("b1", "Fiction", "Herbert")));

        toggle_book_status(&repo, &PageCache::default(), "b1", YesNo::Yes)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn negative_stock_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_update_book().times(0);

        let err = update_book_stock(
            &repo,
            &PageCache::default(),
            "b1",
            StockForm { quantity: Some(-1) },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Stock quantity cannot be negative.");
    }

    /// Verifies category options are deduplicated and sorted.
    #[tokio::test]
    async fn categories_are_distinct_and_sorted() {
        let mut repo = MockRepository::new();
        repo.expect_list_books()
            .withf(|query| query.state.limit == OPTIONS_FETCH_LIMIT)
            .returning(|_| {
                Ok(ListPage {
                    data: vec![
                        book("1", "Science", "B"),
                        book("2", "Fiction", "A"),
                        book("3", "Science", "A"),
                    ],
                    current_page: 1,
                    total_pages: 1,
                    total_count: 3,
                })
            });

        assert_eq!(
            book_categories(&repo).await.unwrap(),
            vec!["Fiction".to_string(), "Science".to_string()]
        );
        assert_eq!(book_authors(&repo).await.unwrap(), vec!["A", "B"]);
    }
}
