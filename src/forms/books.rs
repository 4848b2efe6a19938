use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::book::{NewBook, UpdateBook};
use crate::domain::types::YesNo;
use crate::forms::{checkbox, optional_number, sanitize};

/// ISBN-10 or ISBN-13, digits only.
pub fn validate_isbn(isbn: &str) -> Result<(), ValidationError> {
    let isbn = isbn.trim();
    let digits_only = isbn.chars().all(|c| c.is_ascii_digit());
    if digits_only && (isbn.len() == 10 || isbn.len() == 13) {
        Ok(())
    } else {
        Err(ValidationError::new("isbn").with_message("ISBN must be 10 or 13 digits".into()))
    }
}

/// `NaN` and infinities parse as `f64` but are not prices.
pub fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite").with_message("Price must be a number".into()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Create/edit form for a book. Field names match the API's.
pub struct BookForm {
    #[validate(length(min = 1, message = "Book title is required"))]
    pub book_title: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub active: bool,
    #[serde(default, deserialize_with = "optional_number")]
    #[validate(
        required(message = "Pages count is required"),
        range(min = 1, message = "Pages count must be at least 1")
    )]
    pub pages_count: Option<i64>,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(
        length(min = 1, message = "ISBN is required"),
        custom(function = "validate_isbn")
    )]
    pub isbn: String,
    #[serde(default, deserialize_with = "optional_number")]
    #[validate(
        required(message = "Price is required"),
        range(min = 0.0, message = "Price must be non-negative"),
        custom(function = "validate_finite")
    )]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    #[validate(
        required(message = "Stock quantity is required"),
        range(min = 0, message = "Stock quantity must be non-negative")
    )]
    pub stock_quantity: Option<i64>,
}

impl BookForm {
    /// Trims text fields so whitespace-only input fails the length rules.
    pub fn normalized(mut self) -> Self {
        self.book_title = self.book_title.trim().to_string();
        self.category = self.category.trim().to_string();
        self.description = sanitize(&self.description);
        self.author = self.author.trim().to_string();
        self.isbn = self.isbn.trim().to_string();
        self
    }
}

impl From<BookForm> for NewBook {
    fn from(form: BookForm) -> Self {
        Self {
            book_title: form.book_title,
            category: form.category,
            description: form.description,
            active: YesNo::from(form.active),
            pages_count: form.pages_count.unwrap_or_default(),
            author: form.author,
            isbn: form.isbn,
            price: form.price.unwrap_or_default(),
            stock_quantity: form.stock_quantity.unwrap_or_default(),
        }
    }
}

impl From<BookForm> for UpdateBook {
    fn from(form: BookForm) -> Self {
        Self {
            book_title: Some(form.book_title),
            category: Some(form.category),
            description: Some(form.description),
            active: Some(YesNo::from(form.active)),
            pages_count: form.pages_count,
            author: Some(form.author),
            isbn: Some(form.isbn),
            price: form.price,
            stock_quantity: form.stock_quantity,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
/// Quick stock adjustment from the book details page.
pub struct StockForm {
    #[serde(default, deserialize_with = "optional_number")]
    #[validate(required(message = "Stock quantity is required"))]
    pub quantity: Option<i64>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::forms::field_errors;

    pub(crate) fn valid_form() -> BookForm {
        BookForm {
            book_title: "Dune".into(),
            category: "Fiction".into(),
            description: "Sand".into(),
            active: true,
            pages_count: Some(412),
            author: "Frank Herbert".into(),
            isbn: "9780441013593".into(),
            price: Some(9.99),
            stock_quantity: Some(3),
        }
    }

    #[test]
    fn negative_price_is_reported_on_price() {
        let form = BookForm {
            price: Some(-5.0),
            ..valid_form()
        };
        let errors = field_errors(&form.validate().unwrap_err());
        assert_eq!(
            errors.get("PRICE"),
            Some(&vec!["Price must be non-negative".to_string()])
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn isbn_must_have_ten_or_thirteen_digits() {
        assert!(validate_isbn("0441013597").is_ok());
        assert!(validate_isbn("978044101359").is_err());
        assert!(validate_isbn("978-0441013593").is_err());
    }

    #[test]
    fn form_body_decodes_with_wire_names() {
        let form: BookForm = serde_html_form::from_str(
            "BOOK_TITLE=Dune&CATEGORY=Fiction&DESCRIPTION=Sand&PAGES_COUNT=412\
             &AUTHOR=Herbert&ISBN=0441013597&PRICE=&STOCK_QUANTITY=2",
        )
        .unwrap();
        assert!(!form.active);
        let errors = field_errors(&form.validate().unwrap_err());
        assert!(errors.contains_key("PRICE"));
    }

    /// `NaN` and `inf` parse as floats and must still be refused.
    #[test]
    fn non_finite_price_is_reported_on_price() {
        for raw in ["NaN", "inf", "infinity"] {
            let body = format!(
                "BOOK_TITLE=Dune&CATEGORY=Fiction&DESCRIPTION=Sand&PAGES_COUNT=412\
                 &AUTHOR=Herbert&ISBN=0441013597&PRICE={raw}&STOCK_QUANTITY=2"
            );
            let form: BookForm = serde_html_form::from_str(&body).unwrap();
            assert!(form.price.is_some_and(|price| !price.is_finite()), "{raw}");

            let errors = field_errors(&form.validate().unwrap_err());
            assert_eq!(
                errors.get("PRICE"),
                Some(&vec!["Price must be a number".to_string()]),
                "{raw}"
            );
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn unchecked_active_becomes_no() {
        let book = NewBook::from(BookForm {
            active: false,
            ..valid_form()
        });
        assert_eq!(book.active, YesNo::No);
    }
}
