//! Typed documents and request DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` + `Deserialize` entity struct as returned to clients
//! - A `Create*` DTO for inserts
//! - An `Update*` DTO (all `Option` fields) for patches
//! - A [`Document`] impl binding them to a collection

use kindred_core::error::CoreError;
use kindred_core::types::Timestamp;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::store::{expect_object, StoreError, StoredDocument};

pub mod blog_post;
pub mod campaign;
pub mod contact;
pub mod donation;
pub mod event;
pub mod gallery;
pub mod program;
pub mod subscriber;
pub mod volunteer;

/// Keys owned by the store; never written into a document body.
const RESERVED_KEYS: &[&str] = &["id", "createdAt", "updatedAt"];

/// A typed view over one collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name in the store.
    const COLLECTION: &'static str;
    /// Human-readable entity name for errors and logs.
    const ENTITY: &'static str;

    type Create: DeserializeOwned + Send + 'static;
    type Update: DeserializeOwned + Send + 'static;

    /// Validate a create payload and build the initial document body.
    fn prepare_create(input: Self::Create) -> Result<Value, CoreError>;

    /// Validate an update payload against the current document and build
    /// the patch to merge.
    fn prepare_update(input: Self::Update, current: &Self) -> Result<Value, CoreError>;

    fn id(&self) -> &str;

    fn created_at(&self) -> Timestamp;
}

/// Rebuild a typed document from its stored form.
pub fn from_stored<T: Document>(doc: StoredDocument) -> Result<T, StoreError> {
    let mut map = expect_object(doc.data, T::ENTITY)?;
    map.insert("id".to_string(), Value::String(doc.id));
    map.insert("createdAt".to_string(), serde_json::to_value(doc.created_at)?);
    map.insert("updatedAt".to_string(), serde_json::to_value(doc.updated_at)?);
    Ok(serde_json::from_value(Value::Object(map))?)
}

/// Serialize a create DTO into a document body.
pub(crate) fn to_body<S: Serialize>(value: &S) -> Result<Value, CoreError> {
    let map = serialize_map(value)?;
    Ok(Value::Object(map))
}

/// Serialize an update DTO into a patch, dropping unset (`null`) fields.
///
/// Rejects patches with nothing to change.
pub(crate) fn to_patch<S: Serialize>(value: &S) -> Result<Value, CoreError> {
    let mut map = serialize_map(value)?;
    map.retain(|_, v| !v.is_null());
    if map.is_empty() {
        return Err(CoreError::Validation("No fields to update".to_string()));
    }
    Ok(Value::Object(map))
}

fn serialize_map<S: Serialize>(value: &S) -> Result<Map<String, Value>, CoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(mut map)) => {
            for key in RESERVED_KEYS {
                map.remove(*key);
            }
            Ok(map)
        }
        Ok(_) => Err(CoreError::Internal(
            "Document payload did not serialize to an object".to_string(),
        )),
        Err(e) => Err(CoreError::Internal(format!(
            "Failed to serialize document payload: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::models::gallery::GalleryItem;

    #[derive(Serialize)]
    struct Patch {
        title: Option<String>,
        description: Option<String>,
    }

    #[test]
    fn patch_drops_unset_fields() {
        let patch = to_patch(&Patch {
            title: Some("New".into()),
            description: None,
        })
        .unwrap();
        assert_eq!(patch, json!({"title": "New"}));
    }

    #[test]
    fn empty_patch_is_rejected() {
        let err = to_patch(&Patch {
            title: None,
            description: None,
        })
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn body_strips_reserved_keys() {
        let body = to_body(&json!({"id": "x", "createdAt": "y", "title": "t"})).unwrap();
        assert_eq!(body, json!({"title": "t"}));
    }

    #[test]
    fn from_stored_injects_metadata() {
        let now = Utc::now();
        let doc = StoredDocument {
            collection: "gallery".into(),
            id: "abc".into(),
            data: json!({"title": "Harvest day", "imageUrl": "https://img/1.jpg"}),
            created_at: now,
            updated_at: now,
        };
        let item: GalleryItem = from_stored(doc).unwrap();
        assert_eq!(item.id, "abc");
        assert_eq!(item.created_at, now);
        assert_eq!(item.title, "Harvest day");
    }
}
