//! # Permis Model
//!
//! The driving-license record, the create payload, and the partial-update
//! patch. Wire and column names are the French identifiers of the `permis`
//! table; Rust field names describe the data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::errors::{PermisError, PermisResult};

/// Status assigned when a create payload leaves `statut` unset or empty
pub const DEFAULT_STATUS: &str = "active";

/// A stored driving-license record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Permis {
    pub id: i32,

    #[serde(rename = "nom")]
    #[sqlx(rename = "nom")]
    pub holder_name: String,

    #[serde(rename = "prenom")]
    #[sqlx(rename = "prenom")]
    pub first_name: String,

    #[serde(rename = "datenaissance")]
    #[sqlx(rename = "datenaissance")]
    pub birth_date: NaiveDate,

    #[serde(rename = "lieunaissance")]
    #[sqlx(rename = "lieunaissance")]
    pub birth_place: Option<String>,

    #[serde(rename = "numeropermis")]
    #[sqlx(rename = "numeropermis")]
    pub license_number: String,

    pub residence: Option<String>,
    pub mention: Option<String>,
    pub restriction: Option<String>,

    #[serde(rename = "dateobtention")]
    #[sqlx(rename = "dateobtention")]
    pub issued_on: NaiveDate,

    #[serde(rename = "dateexpiration")]
    #[sqlx(rename = "dateexpiration")]
    pub expires_on: NaiveDate,

    #[serde(rename = "categorie")]
    #[sqlx(rename = "categorie")]
    pub category: String,

    #[serde(rename = "statut")]
    #[sqlx(rename = "statut")]
    pub status: String,

    pub image: Option<String>,
}

impl Permis {
    /// Apply a partial update.
    ///
    /// Every field present in `patch` replaces the stored value; absent
    /// fields keep what is already stored. This is the in-process form of
    /// the `COALESCE($n, column)` update statement.
    pub fn merge(self, patch: PermisPatch) -> Permis {
        Permis {
            id: self.id,
            holder_name: patch.holder_name.unwrap_or(self.holder_name),
            first_name: patch.first_name.unwrap_or(self.first_name),
            birth_date: patch.birth_date.unwrap_or(self.birth_date),
            birth_place: patch.birth_place.or(self.birth_place),
            license_number: patch.license_number.unwrap_or(self.license_number),
            residence: patch.residence.or(self.residence),
            mention: patch.mention.or(self.mention),
            restriction: patch.restriction.or(self.restriction),
            issued_on: patch.issued_on.unwrap_or(self.issued_on),
            expires_on: patch.expires_on.unwrap_or(self.expires_on),
            category: patch.category.unwrap_or(self.category),
            status: patch.status.unwrap_or(self.status),
            image: patch.image.or(self.image),
        }
    }
}

/// Create payload as received on the wire.
///
/// Every field is optional here so that missing values surface as a
/// validation error listing them, rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPermisRequest {
    #[serde(rename = "nom")]
    pub holder_name: Option<String>,
    #[serde(rename = "prenom")]
    pub first_name: Option<String>,
    #[serde(rename = "datenaissance")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "lieunaissance")]
    pub birth_place: Option<String>,
    #[serde(rename = "numeropermis")]
    pub license_number: Option<String>,
    pub residence: Option<String>,
    pub mention: Option<String>,
    pub restriction: Option<String>,
    #[serde(rename = "dateobtention")]
    pub issued_on: Option<NaiveDate>,
    #[serde(rename = "dateexpiration")]
    pub expires_on: Option<NaiveDate>,
    #[serde(rename = "categorie")]
    pub category: Option<String>,
    #[serde(rename = "statut")]
    pub status: Option<String>,
    pub image: Option<String>,
}

impl NewPermisRequest {
    /// Check required fields and apply defaults.
    ///
    /// Fails with a validation error naming every missing or empty
    /// required field.
    pub fn validate(self) -> PermisResult<NewPermis> {
        let mut missing = Vec::new();

        let holder_name = required_text(self.holder_name, "nom", &mut missing);
        let first_name = required_text(self.first_name, "prenom", &mut missing);
        let birth_date = required_date(self.birth_date, "datenaissance", &mut missing);
        let license_number = required_text(self.license_number, "numeropermis", &mut missing);
        let issued_on = required_date(self.issued_on, "dateobtention", &mut missing);
        let expires_on = required_date(self.expires_on, "dateexpiration", &mut missing);
        let category = required_text(self.category, "categorie", &mut missing);

        match (
            holder_name,
            first_name,
            birth_date,
            license_number,
            issued_on,
            expires_on,
            category,
        ) {
            (
                Some(holder_name),
                Some(first_name),
                Some(birth_date),
                Some(license_number),
                Some(issued_on),
                Some(expires_on),
                Some(category),
            ) => Ok(NewPermis {
                holder_name,
                first_name,
                birth_date,
                birth_place: self.birth_place,
                license_number,
                residence: self.residence,
                mention: non_empty(self.mention),
                restriction: non_empty(self.restriction),
                issued_on,
                expires_on,
                category,
                status: non_empty(self.status).unwrap_or_else(|| DEFAULT_STATUS.to_string()),
                image: non_empty(self.image),
            }),
            _ => Err(PermisError::missing_fields(&missing)),
        }
    }
}

/// A validated record ready for insertion; storage assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPermis {
    pub holder_name: String,
    pub first_name: String,
    pub birth_date: NaiveDate,
    pub birth_place: Option<String>,
    pub license_number: String,
    pub residence: Option<String>,
    pub mention: Option<String>,
    pub restriction: Option<String>,
    pub issued_on: NaiveDate,
    pub expires_on: NaiveDate,
    pub category: String,
    pub status: String,
    pub image: Option<String>,
}

impl NewPermis {
    /// Attach a storage-assigned id
    pub fn with_id(self, id: i32) -> Permis {
        Permis {
            id,
            holder_name: self.holder_name,
            first_name: self.first_name,
            birth_date: self.birth_date,
            birth_place: self.birth_place,
            license_number: self.license_number,
            residence: self.residence,
            mention: self.mention,
            restriction: self.restriction,
            issued_on: self.issued_on,
            expires_on: self.expires_on,
            category: self.category,
            status: self.status,
            image: self.image,
        }
    }
}

/// Partial update payload. `None` (absent or JSON null) keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PermisPatch {
    #[serde(rename = "nom")]
    pub holder_name: Option<String>,
    #[serde(rename = "prenom")]
    pub first_name: Option<String>,
    #[serde(rename = "datenaissance")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "lieunaissance")]
    pub birth_place: Option<String>,
    #[serde(rename = "numeropermis")]
    pub license_number: Option<String>,
    pub residence: Option<String>,
    pub mention: Option<String>,
    pub restriction: Option<String>,
    #[serde(rename = "dateobtention")]
    pub issued_on: Option<NaiveDate>,
    #[serde(rename = "dateexpiration")]
    pub expires_on: Option<NaiveDate>,
    #[serde(rename = "categorie")]
    pub category: Option<String>,
    #[serde(rename = "statut")]
    pub status: Option<String>,
    pub image: Option<String>,
}

impl PermisPatch {
    /// Reject required text fields, and the status, when present but blank.
    pub fn validate(&self) -> PermisResult<()> {
        let blank: Vec<&str> = [
            ("nom", &self.holder_name),
            ("prenom", &self.first_name),
            ("numeropermis", &self.license_number),
            ("categorie", &self.category),
            ("statut", &self.status),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect();

        if blank.is_empty() {
            Ok(())
        } else {
            Err(PermisError::missing_fields(&blank))
        }
    }

    /// True when the patch carries no field at all
    pub fn is_empty(&self) -> bool {
        *self == PermisPatch::default()
    }
}

/// Parse a path identifier. Only positive integers are accepted.
pub fn parse_id(raw: &str) -> PermisResult<i32> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(PermisError::invalid_id()),
    }
}

fn required_text(
    value: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    let value = non_empty(value);
    if value.is_none() {
        missing.push(name);
    }
    value
}

fn required_date(
    value: Option<NaiveDate>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<NaiveDate> {
    if value.is_none() {
        missing.push(name);
    }
    value
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
