use super::{require_non_empty, validate_title, CollectionItem, ItemId, TodoItem, ValidationError};
use crate::util::capitalize;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Closed set of widget variants. The string form is the persisted `type` tag.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum WidgetKind {
    Notes,
    Website,
    Todo,
}

impl WidgetKind {
    pub fn label(self) -> String {
        capitalize(self.as_ref())
    }
}

/// Variant payload. Serialized flat next to `id`/`title`, tagged by `type`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum WidgetBody {
    Notes {
        #[serde(default)]
        content: String,
    },
    Website {
        #[serde(default)]
        url: String,
    },
    Todo {
        #[serde(default)]
        items: Vec<TodoItem>,
    },
}

impl WidgetBody {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetBody::Notes { .. } => WidgetKind::Notes,
            WidgetBody::Website { .. } => WidgetKind::Website,
            WidgetBody::Todo { .. } => WidgetKind::Todo,
        }
    }

    /// Payload of a freshly added widget.
    pub fn empty(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Notes => WidgetBody::Notes {
                content: String::new(),
            },
            WidgetKind::Website => WidgetBody::Website {
                url: "https://".to_string(),
            },
            WidgetKind::Todo => WidgetBody::Todo { items: vec![] },
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Widget {
    pub id: ItemId,
    pub title: String,
    #[serde(flatten)]
    pub body: WidgetBody,
}

impl Widget {
    pub fn kind(&self) -> WidgetKind {
        self.body.kind()
    }

    /// Same widget with a new title and payload. Blank titles and blank
    /// website URLs are rejected; the id never changes.
    pub fn revised(&self, title: &str, body: WidgetBody) -> Result<Widget, ValidationError> {
        let title = validate_title(title)?;
        let body = match body {
            WidgetBody::Website { url } => WidgetBody::Website {
                url: require_non_empty("url", "URL", &url)?,
            },
            other => other,
        };
        Ok(Widget {
            id: self.id.clone(),
            title,
            body,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WidgetDraft {
    pub title: String,
    pub body: WidgetBody,
}

impl WidgetDraft {
    pub fn of_kind(kind: WidgetKind) -> Self {
        Self {
            title: kind.label(),
            body: WidgetBody::empty(kind),
        }
    }
}

impl CollectionItem for Widget {
    type Draft = WidgetDraft;

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn from_draft(id: ItemId, draft: WidgetDraft) -> Self {
        Widget {
            id,
            title: draft.title,
            body: draft.body,
        }
    }
}

pub(crate) fn default_widgets() -> Vec<Widget> {
    vec![
        Widget {
            id: ItemId::from("1"),
            title: "Quick Notes".to_string(),
            body: WidgetBody::Notes {
                content: String::new(),
            },
        },
        Widget {
            id: ItemId::from("2"),
            title: "Google".to_string(),
            body: WidgetBody::Website {
                url: "https://www.google.com".to_string(),
            },
        },
        Widget {
            id: ItemId::from("3"),
            title: "Tasks".to_string(),
            body: WidgetBody::Todo { items: vec![] },
        },
    ]
}
