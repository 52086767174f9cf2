use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// The canonical identity record stored in the `users` table. Email is the
/// unique login identifier; there is no separate username. The flag triple
/// (`is_active`, `is_staff`, `is_superuser`) drives every authorization
/// decision in the admin shell.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct User {
    pub id: i64,
    // Unique authentication key.
    pub email: String,
    // Display name shown in listings.
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
    // Never set until the first successful login.
    pub last_login: Option<DateTime<Utc>>,
}

/// PublicUser
///
/// The projection of a user exposed to the outside world: exactly
/// `{id, email, name}` and nothing else. Both the JSON API and the HTML
/// listing are built from this shape, so neither can leak flags or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Car
///
/// A catalog item from the `cars` table. The public listing only ever sees
/// rows with `is_available = true`; the admin surface sees everything.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct Car {
    pub id: i64,
    pub name: String,
    // Categorical: "manual" or "automatic".
    pub transmission: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DemoCategory
///
/// A minimal category entity. Exists to exercise foreign-key handling in the
/// admin surface; no behavior of its own.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct DemoCategory {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// DemoItem
///
/// Demonstration record covering the full spread of field types the admin
/// surface must be able to display: text, choice, boolean, numeric, date and
/// time variants, a file reference, a tag list, a JSON blob, a nullable
/// foreign key, and a geocoordinate pair. Purely illustrative; standard field
/// constraints only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct DemoItem {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub content: String,
    // One of "draft", "review", "published".
    pub status: String,
    pub is_active: bool,
    pub rating: f64,
    pub published_on: Option<NaiveDate>,
    pub publish_time: Option<NaiveTime>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    // Object key of the uploaded attachment, if any.
    pub attachment: Option<String>,
    pub tags: Vec<String>,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub category_id: Option<i64>,
    pub address: String,
    // Stored as "lat,lng", mirroring the map widget's plain format.
    pub location: Option<String>,
}

// --- Request Payloads (Input Schemas) ---

/// CreateCarRequest
///
/// Input payload for creating a catalog entry (POST /admin/cars).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct CreateCarRequest {
    pub name: String,
    pub transmission: String,
    // New entries default to available unless stated otherwise.
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

/// UpdateCarRequest
///
/// Partial update payload for a catalog entry (PUT /admin/cars/{id}).
/// Uses `Option<T>` for all fields so only the provided fields are changed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateCarRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}
