use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, YesNo};
use crate::table::{CellValue, ColumnDef, TableRow};

pub const USER_COLUMNS: [ColumnDef; 6] = [
    ColumnDef::sortable("NAME", "Name"),
    ColumnDef::sortable("USER_NAME", "Email"),
    ColumnDef::sortable("USER_ROLE", "Role"),
    ColumnDef::sortable("DEPARTMENT", "Department"),
    ColumnDef::plain("BATCH_NAME", "Batch"),
    ColumnDef::plain("ACTIVE", "Active"),
];

/// User account as returned by the API. The password is write-only and never
/// kept after decoding.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub name: String,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    pub user_role: String,
    #[serde(default)]
    pub active: YesNo,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub lookup_values: String,
    #[serde(default)]
    pub batch_name: Option<String>,
}

impl TableRow for User {
    fn row_id(&self) -> String {
        self.user_id.to_string()
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "NAME" => CellValue::from(&self.name),
            "USER_NAME" => CellValue::from(&self.user_name),
            "USER_ROLE" => CellValue::from(&self.user_role),
            "DEPARTMENT" => CellValue::from(self.department.as_deref().unwrap_or_default()),
            "BATCH_NAME" => CellValue::from(self.batch_name.as_deref().unwrap_or_default()),
            "ACTIVE" => CellValue::from(self.active.as_str()),
            "LOOKUP_VALUES" => CellValue::from(&self.lookup_values),
            _ => CellValue::Empty,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewUser {
    pub user_name: String,
    pub name: String,
    pub password: String,
    pub user_role: String,
    pub active: YesNo,
    pub lookup_values: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_name: Option<String>,
}

/// Partial patch for `PUT /users/{id}`. A `None` password keeps the current
/// one.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_values: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_name: Option<String>,
}

impl UpdateUser {
    pub fn active(active: YesNo) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_never_serialized_back() {
        let user: User = serde_json::from_str(
            r#"{"USER_ID":"u1","USER_NAME":"a@b.c","NAME":"Ann","PASSWORD":"secret",
                "USER_ROLE":"admin","ACTIVE":"Y","LOOKUP_VALUES":""}"#,
        )
        .unwrap();

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("PASSWORD").is_none());
        assert_eq!(user.cell("DEPARTMENT"), CellValue::Empty);
    }
}
