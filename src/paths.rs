//! Dashboard route paths. Also used as page-cache keys.

pub const BOOKS: &str = "/books";
pub const TOPICS: &str = "/topics";
pub const QANDA: &str = "/qanda";
pub const USERS: &str = "/users";

pub fn details(root: &str, id: &str) -> String {
    format!("{root}/{id}")
}

pub fn edit(root: &str, id: &str) -> String {
    format!("{root}/{id}/edit")
}

pub fn new(root: &str) -> String {
    format!("{root}/new")
}
