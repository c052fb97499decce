mod app;
mod collection;
mod components;
mod config;
mod drag;
mod models;
mod pages;
mod scheduler;
mod state;
mod storage;
mod theme;
mod util;
mod widgets;

#[cfg(test)]
mod testing;

use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::models::{default_links, Link};
    use crate::storage::{load_json, save_json, KvStore, LocalStore, Namespace};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_store_roundtrip_links() {
        assert!(LocalStore::is_available());
        let store = LocalStore::new("startpage-test");

        let links = default_links();
        save_json(&store, Namespace::Links, "links", &links).expect("should save links");
        let loaded: Vec<Link> = load_json(&store, Namespace::Links, "links")
            .expect("should read links")
            .expect("links should be present");
        assert_eq!(loaded, links);
    }

    #[wasm_bindgen_test]
    fn test_local_store_key_layout() {
        let store = LocalStore::new("startpage-test");
        store
            .set_item(Namespace::Theme, "theme", "{}")
            .expect("should write");

        let raw = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item("startpage-test::theme::theme").ok().flatten());
        assert_eq!(raw.as_deref(), Some("{}"));
        assert!(store
            .get_item(Namespace::Widgets, "theme")
            .expect("should read")
            .is_none());
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}

#[cfg(test)]
mod tests {
    use crate::collection::CollectionController;
    use crate::config::DashboardConfig;
    use crate::models::todo;
    use crate::models::{default_widgets, ItemId, Link, LinkDraft, Widget, WidgetBody};
    use crate::scheduler::DebouncedWriter;
    use crate::state::AppState;
    use crate::storage::{load_json, Namespace};
    use crate::testing::{FlakyStore, ManualTimers};
    use std::sync::Arc;

    fn link(id: &str, title: &str) -> Link {
        Link {
            id: ItemId::from(id),
            title: title.to_string(),
            href: format!("https://{}.example", id),
        }
    }

    fn links_controller(
        store: &Arc<FlakyStore>,
        timers: &Arc<ManualTimers>,
        defaults: Vec<Link>,
    ) -> CollectionController<Link> {
        let writer = DebouncedWriter::new(Namespace::Links, store.clone(), timers.clone(), 1000);
        CollectionController::new(Namespace::Links, store.clone(), writer, defaults)
    }

    fn titles(items: &[Link]) -> Vec<&str> {
        items.iter().map(|l| l.title.as_str()).collect()
    }

    #[test]
    fn test_links_session_end_to_end() {
        let store = Arc::new(FlakyStore::new());
        let timers = Arc::new(ManualTimers::new());
        let defaults = vec![link("a", "A"), link("b", "B"), link("c", "C")];

        let links = links_controller(&store, &timers, defaults.clone());
        links.load();

        assert!(links.reorder(&ItemId::from("a"), &ItemId::from("c")));
        assert_eq!(titles(&links.items()), vec!["B", "C", "A"]);

        let d = links.add(LinkDraft::new("D", "https://d.example"));
        assert_eq!(titles(&links.items()), vec!["B", "C", "A", "D"]);

        assert!(links.remove(&ItemId::from("c")));
        assert_eq!(titles(&links.items()), vec!["B", "A", "D"]);

        let renamed = d.replaced_with(LinkDraft::new("D2", "https://d.example"));
        assert!(links.edit(&d.id, renamed));
        assert_eq!(titles(&links.items()), vec!["B", "A", "D2"]);

        // Whole burst lands in one write.
        assert_eq!(store.write_count(), 0);
        timers.advance(1000);
        assert_eq!(store.write_count(), 1);

        let stored: Vec<Link> = load_json(store.as_ref(), Namespace::Links, "links")
            .unwrap()
            .unwrap();
        assert_eq!(titles(&stored), vec!["B", "A", "D2"]);

        // Next session picks the stored order up.
        let reloaded = links_controller(&store, &timers, defaults);
        reloaded.load();
        assert_eq!(reloaded.items(), links.items());
    }

    #[test]
    fn test_todo_widget_session() {
        let store = Arc::new(FlakyStore::new());
        let timers = Arc::new(ManualTimers::new());
        let writer = DebouncedWriter::new(Namespace::Widgets, store.clone(), timers.clone(), 1000);
        let widgets: CollectionController<Widget> =
            CollectionController::new(Namespace::Widgets, store.clone(), writer, default_widgets());
        widgets.load();

        let tasks_id = ItemId::from("3");
        let save_items = |f: &dyn Fn(&mut Vec<todo::TodoItem>)| {
            let current = widgets.get(&tasks_id).unwrap();
            let WidgetBody::Todo { mut items } = current.body.clone() else {
                panic!("widget 3 should be a todo widget");
            };
            f(&mut items);
            assert!(widgets.edit(
                &tasks_id,
                Widget {
                    body: WidgetBody::Todo { items },
                    ..current
                }
            ));
        };
        let items = || match widgets.get(&tasks_id).unwrap().body {
            WidgetBody::Todo { items } => items,
            _ => unreachable!(),
        };

        save_items(&|items: &mut Vec<todo::TodoItem>| {
            todo::add(items, "  milk ");
            todo::add(items, "eggs");
            assert!(todo::add(items, "   ").is_none());
        });
        assert_eq!(items().len(), 2);
        assert_eq!(items()[0].text, "milk");

        let milk = items()[0].id.clone();
        save_items(&|items: &mut Vec<todo::TodoItem>| {
            assert!(todo::toggle(items, &milk));
        });
        assert_eq!(todo::completed_count(&items()), 1);

        save_items(&|items: &mut Vec<todo::TodoItem>| {
            assert!(todo::remove(items, &milk));
        });
        assert_eq!(items().len(), 1);
        assert_eq!(todo::completed_count(&items()), 0);

        timers.advance(1000);
        assert_eq!(store.write_count(), 1);
        let raw: serde_json::Value = load_json(store.as_ref(), Namespace::Widgets, "widgets")
            .unwrap()
            .unwrap();
        assert_eq!(raw[2]["type"], "todo");
        assert_eq!(raw[2]["title"], "Tasks");
        assert_eq!(raw[2]["items"][0]["text"], "eggs");
        assert_eq!(raw[2]["items"][0]["completed"], false);
    }

    #[test]
    fn test_flush_all_writes_every_pending_namespace() {
        let store = Arc::new(FlakyStore::new());
        let timers = Arc::new(ManualTimers::new());
        let state = AppState::with_backend(DashboardConfig::default(), store.clone(), timers.clone());
        state.load();

        state.links.add(LinkDraft::new("Docs", "https://docs.rs"));
        state.widgets.remove(&ItemId::from("2"));
        state.theme.set_color("primary", "#000000");
        assert_eq!(store.write_count(), 0);

        state.flush_all();
        assert_eq!(store.write_count(), 3);
        assert_eq!(timers.armed(), 0);

        // Nothing left for the timers to do.
        timers.advance(5000);
        assert_eq!(store.write_count(), 3);
    }

    #[test]
    fn test_write_failure_reaches_storage_notice() {
        use leptos::prelude::*;

        let store = Arc::new(FlakyStore::new());
        let timers = Arc::new(ManualTimers::new());
        let state = AppState::with_backend(DashboardConfig::default(), store.clone(), timers.clone());
        state.load();

        store.fail_writes(true);
        state.links.remove(&ItemId::from("link-1"));
        timers.advance(1000);

        let notice = state.storage_notice.get_untracked();
        assert!(notice.is_some_and(|n| n.contains("QuotaExceededError")));
        // Memory keeps the change.
        assert_eq!(state.link_items.get_untracked().len(), 3);
        assert_eq!(state.links.len(), 3);
    }
}
