//! Book row and create payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of `books`. The author is spelled `auther` in both the schema and the JSON key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[sqlx(rename = "auther")]
    #[serde(rename = "auther", alias = "author")]
    pub author: String,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/books`. Missing fields take their zero value; `id`, `code` and timestamps are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewBook {
    pub name: String,
    #[serde(rename = "auther", alias = "author")]
    pub author: String,
    pub is_archived: bool,
}
