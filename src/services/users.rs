//! Services behind the users pages.

use validator::Validate;

use crate::api::paths::build_query_string;
use crate::cache::PageCache;
use crate::domain::page::{DeleteOutcome, ListPage};
use crate::domain::types::{UserId, YesNo};
use crate::domain::user::{UpdateUser, User};
use crate::forms::users::UserForm;
use crate::paths;
use crate::repository::{ListQuery, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, require_id};

pub async fn list_users<R>(repo: &R, cache: &PageCache, query: ListQuery) -> ListPage<User>
where
    R: UserReader + ?Sized,
{
    let key = format!("{}{}", paths::USERS, build_query_string(&query.query_pairs()));
    if let Some(page) = cache.get(&key) {
        return page;
    }

    let page_number = query.state.page;
    match repo.list_users(query).await {
        Ok(page) => {
            cache.insert(&key, &page);
            page
        }
        Err(err) => {
            log::error!("Failed to fetch users list: {err}");
            ListPage::empty(page_number)
        }
    }
}

pub async fn get_user<R>(repo: &R, cache: &PageCache, id: &str) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let user_id: UserId = require_id(id, "User")?;
    let key = paths::details(paths::USERS, &user_id);
    if let Some(user) = cache.get(&key) {
        return Ok(user);
    }

    let user = repo
        .get_user_by_id(&user_id)
        .await
        .map_err(|err| ServiceError::upstream(err, "Failed to fetch user."))?
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;
    cache.insert(&key, &user);
    Ok(user)
}

pub async fn create_user<R>(repo: &R, cache: &PageCache, form: UserForm) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let form = form.normalized();
    form.validate_for_create()?;
    let new_user = form
        .into_new_user()
        .ok_or_else(|| ServiceError::Form("Password is required".to_string()))?;

    let user = repo
        .create_user(&new_user)
        .await
        .map_err(|err| ServiceError::upstream(err, "Failed to create user. Please try again."))?;

    cache.invalidate(paths::USERS);
    Ok(user)
}

pub async fn update_user<R>(
    repo: &R,
    cache: &PageCache,
    id: &str,
    form: UserForm,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let user_id: UserId = require_id(id, "User")?;
    let form = form.normalized();
    form.validate()?;

    apply_update(
        repo,
        cache,
        &user_id,
        &UpdateUser::from(form),
        "Failed to update user. Please try again.",
    )
    .await
}

pub async fn toggle_user_status<R>(
    repo: &R,
    cache: &PageCache,
    id: &str,
    current: YesNo,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let user_id: UserId = require_id(id, "User")?;
    apply_update(
        repo,
        cache,
        &user_id,
        &UpdateUser::active(current.toggled()),
        "Failed to update user status. Please try again.",
    )
    .await
}

/// The users endpoint answers delete with an arbitrary body; success is
/// reported locally.
pub async fn delete_user<R>(repo: &R, cache: &PageCache, id: &str) -> ServiceResult<DeleteOutcome>
where
    R: UserWriter + ?Sized,
{
    let user_id: UserId = require_id(id, "User")?;

    repo.delete_user(&user_id)
        .await
        .map_err(|err| ServiceError::upstream(err, "Failed to delete user. Please try again."))?;

    cache.invalidate(paths::USERS);
    cache.invalidate(&paths::details(paths::USERS, &user_id));
    Ok(DeleteOutcome::deleted("User deleted successfully"))
}

async fn apply_update<R>(
    repo: &R,
    cache: &PageCache,
    user_id: &UserId,
    updates: &UpdateUser,
    message: &str,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let user = repo
        .update_user(user_id, updates)
        .await
        .map_err(|err| ServiceError::upstream(err, message))?;

    cache.invalidate(paths::USERS);
    cache.invalidate(&paths::details(paths::USERS, user_id));
    Ok(user)
}
