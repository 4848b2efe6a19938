//! Upstream endpoint paths and query-string helpers.

const BOOKS: &str = "books";
const TOPICS: &str = "topics";
const USERS: &str = "users";
const QANDA: &str = "qna";

/// Endpoint path relative to the API base URL, kept as raw segments.
///
/// Segments are percent-encoded one by one when joined onto the base URL, so
/// an identifier can never add query parameters or path levels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiPath {
    segments: Vec<String>,
}

impl ApiPath {
    fn root(root: &str) -> Self {
        Self {
            segments: vec![root.to_string()],
        }
    }

    fn push(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

pub fn books() -> ApiPath {
    ApiPath::root(BOOKS)
}

pub fn book(id: &str) -> ApiPath {
    books().push(id)
}

pub fn topics() -> ApiPath {
    ApiPath::root(TOPICS)
}

pub fn topic(id: &str) -> ApiPath {
    topics().push(id)
}

pub fn users() -> ApiPath {
    ApiPath::root(USERS)
}

pub fn user(id: &str) -> ApiPath {
    users().push(id)
}

/// Q&A create endpoint; listing goes through [`qanda_collection`].
pub fn qanda_root() -> ApiPath {
    ApiPath::root(QANDA)
}

pub fn qanda(id: &str) -> ApiPath {
    qanda_root().push(id)
}

/// Q&A questions are listed per collection.
pub fn qanda_collection(collection_id: &str) -> ApiPath {
    qanda_root().push(collection_id)
}

/// Encodes `pairs` as `key=value&...`, skipping blank values. Returns `None`
/// when nothing is left.
pub fn encode_query(pairs: &[(&str, String)]) -> Option<String> {
    let kept: Vec<(&str, &str)> = pairs
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    if kept.is_empty() {
        return None;
    }
    match serde_html_form::to_string(&kept) {
        Ok(query) => Some(query),
        Err(err) => {
            log::error!("Failed to encode query string: {err}");
            None
        }
    }
}

/// Like [`encode_query`] but with the leading `?`, or empty.
pub fn build_query_string(pairs: &[(&str, String)]) -> String {
    encode_query(pairs)
        .map(|query| format!("?{query}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_omits_empty_values() {
        let query = build_query_string(&[
            ("page", "2".to_string()),
            ("search", "".to_string()),
            ("CATEGORY", "Sci Fi".to_string()),
        ]);
        assert_eq!(query, "?page=2&CATEGORY=Sci+Fi");
        assert_eq!(build_query_string(&[("search", " ".to_string())]), "");
    }

    #[test]
    fn item_paths_keep_the_id_as_one_segment() {
        assert_eq!(book("42").segments(), ["books", "42"]);
        assert_eq!(qanda_collection("abc").segments(), ["qna", "abc"]);
        assert_eq!(user("a/../b").segments(), ["users", "a/../b"]);
    }
}
