//! HTTP handlers and the helpers they share.

use std::collections::HashMap;

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use serde_json::Value;
use tera::{Context, Tera};

use crate::forms::FieldErrors;

pub mod books;
pub mod main;
pub mod qanda;
pub mod topics;
pub mod users;

/// Maps a flash message level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info | Level::Debug => "info",
    }
}

/// Context every page starts from: pending alerts and the active menu entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Picks the non-blank values of `keys` out of a raw query string map.
pub fn filter_pairs(
    query: &HashMap<String, String>,
    keys: &[&'static str],
) -> Vec<(&'static str, String)> {
    keys.iter()
        .filter_map(|key| {
            query
                .get(*key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(|value| (*key, value.to_string()))
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Decimal,
    Textarea,
    Checkbox,
}

/// Static description of one form input / detail row.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    /// Wire name, also the HTML input name.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

#[derive(Debug, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

fn value_checked(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag == "Y",
        _ => false,
    }
}

/// Builds the inputs of a form from `values` (an entity or a submitted form,
/// serialized with wire names). Passwords are never pre-filled.
pub fn form_fields<T: Serialize>(
    specs: &[FieldSpec],
    values: Option<&T>,
    errors: Option<&FieldErrors>,
) -> Vec<FormField> {
    let values = values
        .and_then(|v| serde_json::to_value(v).ok())
        .unwrap_or(Value::Null);

    specs
        .iter()
        .map(|spec| {
            let value = values.get(spec.name);
            FormField {
                name: spec.name,
                label: spec.label,
                kind: spec.kind,
                value: if spec.kind == FieldKind::Password {
                    String::new()
                } else {
                    value_text(value)
                },
                checked: value_checked(value),
                errors: errors
                    .and_then(|e| e.get(spec.name))
                    .cloned()
                    .unwrap_or_default(),
            }
        })
        .collect()
}

/// Read-only rows for a details page.
pub fn detail_rows<T: Serialize>(specs: &[FieldSpec], entity: &T) -> Vec<DetailRow> {
    let values = serde_json::to_value(entity).unwrap_or(Value::Null);
    specs
        .iter()
        .filter(|spec| spec.kind != FieldKind::Password)
        .map(|spec| {
            let value = values.get(spec.name);
            DetailRow {
                label: spec.label,
                value: match spec.kind {
                    FieldKind::Checkbox if value_checked(value) => "Yes".to_string(),
                    FieldKind::Checkbox => "No".to_string(),
                    _ => value_text(value),
                },
            }
        })
        .collect()
}

/// Everything `form.html` needs besides the base context.
pub struct FormPage<'a> {
    pub current_page: &'a str,
    pub title: &'a str,
    pub action: &'a str,
    pub cancel_url: &'a str,
    pub fields: Vec<FormField>,
    /// Top-level error shown above the form.
    pub error: Option<String>,
}

pub fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    page: FormPage<'_>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, page.current_page);
    context.insert("title", page.title);
    context.insert("action", page.action);
    context.insert("cancel_url", page.cancel_url);
    context.insert("fields", &page.fields);
    context.insert("error", &page.error);
    render_template(tera, "form.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: [FieldSpec; 3] = [
        FieldSpec::new("NAME", "Name", FieldKind::Text),
        FieldSpec::new("PASSWORD", "Password", FieldKind::Password),
        FieldSpec::new("ACTIVE", "Active", FieldKind::Checkbox),
    ];

    #[test]
    fn form_fields_fill_values_and_errors() {
        let values = serde_json::json!({ "NAME": "Ann", "PASSWORD": "secret", "ACTIVE": "N" });
        let mut errors = FieldErrors::new();
        errors.insert("NAME".into(), vec!["Name is required".into()]);

        let fields = form_fields(&SPECS, Some(&values), Some(&errors));

        assert_eq!(fields[0].value, "Ann");
        assert_eq!(fields[0].errors, vec!["Name is required".to_string()]);
        assert_eq!(fields[1].value, "");
        assert!(!fields[2].checked);
    }

    #[test]
    fn submitted_checkbox_state_is_kept() {
        let values = serde_json::json!({ "NAME": "Ann", "ACTIVE": true });
        let fields = form_fields(&SPECS, Some(&values), None);
        assert!(fields[2].checked);
    }

    #[test]
    fn filter_pairs_keep_known_non_blank_keys() {
        let mut query = HashMap::new();
        query.insert("category".to_string(), " Fiction ".to_string());
        query.insert("author".to_string(), "  ".to_string());
        query.insert("page".to_string(), "2".to_string());

        let pairs = filter_pairs(&query, &["category", "author", "active"]);
        assert_eq!(pairs, vec![("category", "Fiction".to_string())]);
    }

    #[test]
    fn detail_rows_hide_passwords() {
        let rows = detail_rows(&SPECS, &serde_json::json!({ "NAME": "Ann", "ACTIVE": "Y" }));
        let labels: Vec<_> = rows.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Name", "Active"]);
        assert_eq!(rows[1].value, "Yes");
    }
}
