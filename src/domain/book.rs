use serde::{Deserialize, Serialize};

use crate::domain::types::{BookId, YesNo};
use crate::table::{CellValue, ColumnDef, TableRow};

/// Columns of the books table. Only the first six can drive a server sort.
pub const BOOK_COLUMNS: [ColumnDef; 8] = [
    ColumnDef::sortable("BOOK_TITLE", "Title"),
    ColumnDef::sortable("AUTHOR", "Author"),
    ColumnDef::sortable("CATEGORY", "Category"),
    ColumnDef::sortable("PRICE", "Price"),
    ColumnDef::sortable("STOCK_QUANTITY", "Stock"),
    ColumnDef::sortable("CREATION_DATE", "Created"),
    ColumnDef::plain("ISBN", "ISBN"),
    ColumnDef::plain("ACTIVE", "Active"),
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Book {
    pub book_id: BookId,
    pub book_title: String,
    pub category: String,
    pub description: String,
    pub active: YesNo,
    pub creation_date: String,
    pub pages_count: i64,
    pub author: String,
    pub isbn: String,
    pub price: f64,
    pub stock_quantity: i64,
}

impl TableRow for Book {
    fn row_id(&self) -> String {
        self.book_id.to_string()
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "BOOK_TITLE" => CellValue::from(&self.book_title),
            "AUTHOR" => CellValue::from(&self.author),
            "CATEGORY" => CellValue::from(&self.category),
            "PRICE" => CellValue::from(self.price),
            "STOCK_QUANTITY" => CellValue::from(self.stock_quantity),
            "CREATION_DATE" => CellValue::from(super::display_date(&self.creation_date).as_str()),
            "ISBN" => CellValue::from(&self.isbn),
            "ACTIVE" => CellValue::from(self.active.as_str()),
            "PAGES_COUNT" => CellValue::from(self.pages_count),
            "DESCRIPTION" => CellValue::from(&self.description),
            _ => CellValue::Empty,
        }
    }
}

/// Payload of `POST /books`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewBook {
    pub book_title: String,
    pub category: String,
    pub description: String,
    pub active: YesNo,
    pub pages_count: i64,
    pub author: String,
    pub isbn: String,
    pub price: f64,
    pub stock_quantity: i64,
}

/// Partial patch for `PUT /books/{id}`; absent fields are left untouched
/// upstream.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct UpdateBook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
}

impl UpdateBook {
    pub fn active(active: YesNo) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }

    pub fn stock(quantity: i64) -> Self {
        Self {
            stock_quantity: Some(quantity),
            ..Self::default()
        }
    }
}
