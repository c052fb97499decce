mod link;
pub(crate) mod todo;
mod widget;

pub(crate) use link::{default_links, Link, LinkDraft};
pub(crate) use todo::TodoItem;
pub(crate) use widget::{default_widgets, Widget, WidgetBody, WidgetDraft, WidgetKind};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a collection item (or a todo entry).
///
/// Generated once at creation and never reused; the text form is a UUID for
/// everything created at runtime, built-in defaults use short fixed ids.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub(crate) struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Shared base shape of everything an ordered collection can hold.
///
/// The collection controller only ever looks at `id`; payload fields are
/// passed through untouched.
pub(crate) trait CollectionItem:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Item content without an identity, as produced by an "add" form.
    type Draft;

    fn id(&self) -> &ItemId;

    fn title(&self) -> &str;

    fn from_draft(id: ItemId, draft: Self::Draft) -> Self;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

pub(crate) fn require_non_empty(
    field: &'static str,
    label: &str,
    value: &str,
) -> Result<String, ValidationError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ValidationError {
            field,
            message: format!("{label} cannot be empty"),
        });
    }
    Ok(v.to_string())
}

pub(crate) fn validate_title(title: &str) -> Result<String, ValidationError> {
    require_non_empty("title", "Title", title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_serializes_as_plain_string() {
        let id = ItemId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        let back: ItemId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: std::collections::HashSet<ItemId> = (0..64).map(|_| ItemId::generate()).collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn test_generated_id_is_hyphenated_uuid_v4() {
        let id = ItemId::generate().to_string();
        let parsed = uuid::Uuid::parse_str(&id).expect("generated id should parse as a uuid");
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(parsed.hyphenated().to_string(), id);
    }

    #[test]
    fn test_validate_title_trims_and_rejects_blank() {
        assert_eq!(validate_title("  Inbox ").unwrap(), "Inbox");
        let err = validate_title("   ").unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.to_string(), "Title cannot be empty");
    }
}
