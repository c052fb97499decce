use crate::collection::CollectionController;
use crate::config::DashboardConfig;
use crate::models::{default_links, default_widgets, Link, Widget};
use crate::scheduler::{DebouncedWriter, SharedTimers, WindowTimers};
use crate::storage::{LocalStore, MemoryStore, Namespace, SharedStore, StorageError, StorageErrorKind};
use crate::theme::{apply_to_document, Theme, ThemeController};
use leptos::ev;
use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use std::sync::Arc;

/// Controllers plus the signals the views read.
///
/// Controllers own the canonical data; the signals are mirrors fed by
/// subscriptions.
#[derive(Clone)]
pub(crate) struct AppState {
    pub config: DashboardConfig,

    pub links: CollectionController<Link>,
    pub widgets: CollectionController<Widget>,
    pub theme: ThemeController,

    pub link_items: RwSignal<Vec<Link>>,
    pub widget_items: RwSignal<Vec<Widget>>,
    pub theme_value: RwSignal<Theme>,

    /// Links panel edit mode.
    pub links_editing: RwSignal<bool>,

    /// Non-blocking message for the last failed save.
    pub storage_notice: RwSignal<Option<String>>,
}

impl AppState {
    /// Browser wiring: localStorage when usable, window timers.
    pub fn new() -> Self {
        let config = DashboardConfig::from_env();

        let (store, notice): (SharedStore, Option<String>) = if LocalStore::is_available() {
            (Arc::new(LocalStore::new(config.storage_name.clone())), None)
        } else {
            let e = StorageError::unavailable("localStorage");
            warn!("{e}; changes will not survive a reload");
            (Arc::new(MemoryStore::new()), Some(notice_text(&e)))
        };

        let state = Self::with_backend(config, store, Arc::new(WindowTimers));
        if notice.is_some() {
            state.storage_notice.set(notice);
        }
        state.load();
        state
    }

    pub fn with_backend(config: DashboardConfig, store: SharedStore, timers: SharedTimers) -> Self {
        let links_writer = DebouncedWriter::new(
            Namespace::Links,
            store.clone(),
            timers.clone(),
            config.save_debounce_ms,
        );
        let widgets_writer = DebouncedWriter::new(
            Namespace::Widgets,
            store.clone(),
            timers.clone(),
            config.save_debounce_ms,
        );
        let theme_writer = DebouncedWriter::new(
            Namespace::Theme,
            store.clone(),
            timers,
            config.theme_save_debounce_ms,
        );

        let storage_notice: RwSignal<Option<String>> = RwSignal::new(None);
        let report = move |e: &StorageError| storage_notice.set(Some(notice_text(e)));
        links_writer.set_error_hook(Arc::new(report));
        widgets_writer.set_error_hook(Arc::new(report));
        theme_writer.set_error_hook(Arc::new(report));

        let links = CollectionController::new(
            Namespace::Links,
            store.clone(),
            links_writer,
            default_links(),
        );
        let widgets = CollectionController::new(
            Namespace::Widgets,
            store.clone(),
            widgets_writer,
            default_widgets(),
        );
        let theme = ThemeController::new(store, theme_writer);

        let link_items = RwSignal::new(links.items());
        let widget_items = RwSignal::new(widgets.items());
        let theme_value = RwSignal::new(theme.get());

        links.subscribe(Arc::new(move |items: &[Link]| link_items.set(items.to_vec())));
        widgets.subscribe(Arc::new(move |items: &[Widget]| {
            widget_items.set(items.to_vec())
        }));
        theme.subscribe(Arc::new(move |t: &Theme| theme_value.set(t.clone())));

        Self {
            config,
            links,
            widgets,
            theme,
            link_items,
            widget_items,
            theme_value,
            links_editing: RwSignal::new(false),
            storage_notice,
        }
    }

    /// Initial read of every namespace.
    pub fn load(&self) {
        self.links.load();
        self.widgets.load();
        self.theme.load();
        log!(
            "dashboard {:?} loaded: {} links, {} widgets",
            self.config.storage_name,
            self.links.len(),
            self.widgets.len()
        );
    }

    /// Writes whatever is still waiting on a debounce timer.
    pub fn flush_all(&self) {
        let flushed = [self.links.flush(), self.widgets.flush(), self.theme.flush()];
        if flushed.iter().any(|f| *f) {
            log!("flushed pending saves");
        }
    }

    /// Theme variables on `<html>`, kept in sync with every theme change.
    pub fn start_theme_sync(&self) {
        let theme_value = self.theme_value;
        Effect::new(move |_| theme_value.with(apply_to_document));
    }

    /// Flushes pending writes when the page goes away.
    pub fn start_unload_flush(&self) {
        let s = self.clone();
        let handle = window_event_listener(
            ev::pagehide,
            move |_ev: web_sys::PageTransitionEvent| s.flush_all(),
        );
        on_cleanup(move || handle.remove());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

/// Message for the dismissible storage notice.
fn notice_text(e: &StorageError) -> String {
    match e.kind {
        StorageErrorKind::Unavailable => {
            "Storage is unavailable. Changes will be lost on reload.".to_string()
        }
        _ => format!("Couldn't save your changes ({e})."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_text_by_error_kind() {
        let unavailable = StorageError::unavailable("localStorage");
        assert_eq!(
            notice_text(&unavailable),
            "Storage is unavailable. Changes will be lost on reload."
        );

        let failed = StorageError::write(Namespace::Links, "QuotaExceededError");
        let text = notice_text(&failed);
        assert!(text.starts_with("Couldn't save your changes"));
        assert!(text.contains("QuotaExceededError"));
    }
}
