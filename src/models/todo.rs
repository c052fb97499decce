use super::ItemId;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct TodoItem {
    pub id: ItemId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Appends a new unchecked entry. Blank text is rejected.
pub(crate) fn add(items: &mut Vec<TodoItem>, text: &str) -> Option<ItemId> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let id = ItemId::generate();
    items.push(TodoItem {
        id: id.clone(),
        text: text.to_string(),
        completed: false,
    });
    Some(id)
}

pub(crate) fn toggle(items: &mut [TodoItem], id: &ItemId) -> bool {
    match items.iter_mut().find(|item| &item.id == id) {
        Some(item) => {
            item.completed = !item.completed;
            true
        }
        None => false,
    }
}

pub(crate) fn remove(items: &mut Vec<TodoItem>, id: &ItemId) -> bool {
    let before = items.len();
    items.retain(|item| &item.id != id);
    items.len() != before
}

pub(crate) fn completed_count(items: &[TodoItem]) -> usize {
    items.iter().filter(|item| item.completed).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_rejects_blank() {
        let mut items = vec![];
        assert!(add(&mut items, "   ").is_none());
        let id = add(&mut items, "  buy milk ").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].text, "buy milk");
        assert!(!items[0].completed);
    }

    #[test]
    fn test_ids_unique_within_list() {
        let mut items = vec![];
        let a = add(&mut items, "a").unwrap();
        let b = add(&mut items, "b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_toggle_and_remove_unknown_id_are_noops() {
        let mut items = vec![];
        add(&mut items, "a");
        let missing = ItemId::from("missing");
        assert!(!toggle(&mut items, &missing));
        assert!(!remove(&mut items, &missing));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_completed_count() {
        let mut items = vec![];
        let a = add(&mut items, "a").unwrap();
        add(&mut items, "b");
        toggle(&mut items, &a);
        assert_eq!(completed_count(&items), 1);
        toggle(&mut items, &a);
        assert_eq!(completed_count(&items), 0);
    }
}
