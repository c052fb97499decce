//! Widget variant registry.
//!
//! The collection controller only ever sees whole `Widget` values; everything
//! that depends on the payload shape lives behind [`VariantView`].

mod notes;
mod todo;
mod website;

use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::models::{ItemId, Widget, WidgetKind};
use icons::{Globe, ListTodo, Pencil, Save, StickyNote, Trash2};
use leptos::prelude::*;
use strum::IntoEnumIterator;

pub(crate) use notes::NotesWidget;
pub(crate) use todo::TodoWidget;
pub(crate) use website::WebsiteWidget;

/// Rendering strategy for one widget kind.
pub(crate) trait VariantView: Send + Sync {
    fn kind(&self) -> WidgetKind;

    /// Icon shown in the "Add Widget" chooser.
    fn icon(&self) -> AnyView;

    /// `widget` tracks the live item; `on_save` receives full replacements.
    fn render(
        &self,
        widget: Signal<Widget>,
        on_save: Callback<Widget>,
        on_delete: Callback<ItemId>,
    ) -> AnyView;
}

pub(crate) struct NotesView;
pub(crate) struct WebsiteView;
pub(crate) struct TodoView;

impl VariantView for NotesView {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Notes
    }

    fn icon(&self) -> AnyView {
        view! { <StickyNote /> }.into_any()
    }

    fn render(
        &self,
        widget: Signal<Widget>,
        on_save: Callback<Widget>,
        on_delete: Callback<ItemId>,
    ) -> AnyView {
        view! { <NotesWidget widget=widget on_save=on_save on_delete=on_delete /> }.into_any()
    }
}

impl VariantView for WebsiteView {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Website
    }

    fn icon(&self) -> AnyView {
        view! { <Globe /> }.into_any()
    }

    fn render(
        &self,
        widget: Signal<Widget>,
        on_save: Callback<Widget>,
        on_delete: Callback<ItemId>,
    ) -> AnyView {
        view! { <WebsiteWidget widget=widget on_save=on_save on_delete=on_delete /> }.into_any()
    }
}

impl VariantView for TodoView {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Todo
    }

    fn icon(&self) -> AnyView {
        view! { <ListTodo /> }.into_any()
    }

    fn render(
        &self,
        widget: Signal<Widget>,
        on_save: Callback<Widget>,
        on_delete: Callback<ItemId>,
    ) -> AnyView {
        view! { <TodoWidget widget=widget on_save=on_save on_delete=on_delete /> }.into_any()
    }
}

pub(crate) fn view_for(kind: WidgetKind) -> &'static dyn VariantView {
    match kind {
        WidgetKind::Notes => &NotesView,
        WidgetKind::Website => &WebsiteView,
        WidgetKind::Todo => &TodoView,
    }
}

/// Every registered variant, in chooser order.
pub(crate) fn all_views() -> impl Iterator<Item = &'static dyn VariantView> {
    WidgetKind::iter().map(view_for)
}

/// Edit/save toggle plus delete, shared by every variant's header.
#[component]
pub(crate) fn WidgetActions(
    #[prop(into)] editing: Signal<bool>,
    on_toggle: Callback<()>,
    on_delete: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="flex shrink-0 items-center gap-1">
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:title=move || if editing.get() { "Save" } else { "Edit" }
                on:click=move |_| on_toggle.run(())
            >
                {move || {
                    if editing.get() {
                        view! { <Save /> }.into_any()
                    } else {
                        view! { <Pencil /> }.into_any()
                    }
                }}
            </Button>
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:title="Delete"
                on:click=move |_| on_delete.run(())
            >
                <Trash2 class="text-destructive" />
            </Button>
        </div>
    }
}
