use super::{require_non_empty, validate_title, CollectionItem, ItemId, ValidationError};
use serde::{Deserialize, Serialize};

/// Shortcut tile.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Link {
    pub id: ItemId,
    pub title: String,
    pub href: String,
}

/// Form contents of the add/edit link modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LinkDraft {
    pub title: String,
    pub href: String,
}

impl LinkDraft {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }

    /// Both fields are required; values come back trimmed.
    pub fn validate(&self) -> Result<LinkDraft, ValidationError> {
        Ok(LinkDraft {
            title: validate_title(&self.title)?,
            href: require_non_empty("href", "URL", &self.href)?,
        })
    }
}

impl Link {
    /// Full replacement for an edit: same id, new fields.
    pub fn replaced_with(&self, draft: LinkDraft) -> Link {
        Link {
            id: self.id.clone(),
            title: draft.title,
            href: draft.href,
        }
    }

    pub fn to_draft(&self) -> LinkDraft {
        LinkDraft::new(self.title.clone(), self.href.clone())
    }
}

impl CollectionItem for Link {
    type Draft = LinkDraft;

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn from_draft(id: ItemId, draft: LinkDraft) -> Self {
        Link {
            id,
            title: draft.title,
            href: draft.href,
        }
    }
}

pub(crate) fn default_links() -> Vec<Link> {
    [
        ("link-1", "GitHub", "https://github.com"),
        ("link-2", "Hacker News", "https://news.ycombinator.com"),
        ("link-3", "YouTube", "https://www.youtube.com"),
        ("link-4", "Wikipedia", "https://en.wikipedia.org"),
    ]
    .into_iter()
    .map(|(id, title, href)| Link {
        id: ItemId::from(id),
        title: title.to_string(),
        href: href.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_draft_requires_title_and_href() {
        assert_eq!(
            LinkDraft::new("", "https://a").validate().unwrap_err().field,
            "title"
        );
        assert_eq!(LinkDraft::new("A", " ").validate().unwrap_err().field, "href");
        assert_eq!(
            LinkDraft::new(" A ", "https://a ").validate().unwrap(),
            LinkDraft::new("A", "https://a")
        );
    }

    #[test]
    fn test_replaced_with_keeps_id() {
        let link = Link::from_draft(ItemId::from("x"), LinkDraft::new("Old", "https://old"));
        let edited = link.replaced_with(LinkDraft::new("New", "https://new"));
        assert_eq!(edited.id, link.id);
        assert_eq!(edited.title, "New");
        assert_eq!(edited.href, "https://new");
    }

    #[test]
    fn test_link_json_shape() {
        let link = Link::from_draft(ItemId::from("1"), LinkDraft::new("A", "https://a"));
        let v = serde_json::to_value(&link).unwrap();
        assert_eq!(v, serde_json::json!({"id": "1", "title": "A", "href": "https://a"}));
    }

    #[test]
    fn test_default_links_have_unique_ids() {
        let links = default_links();
        let mut ids: Vec<_> = links.iter().map(|l| l.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), links.len());
    }
}
