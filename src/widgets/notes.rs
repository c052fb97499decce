use super::WidgetActions;
use crate::components::ui::{Input, Textarea};
use crate::models::{ItemId, Widget, WidgetBody};
use leptos::logging::warn;
use leptos::prelude::*;

fn content_of(widget: &Widget) -> String {
    match &widget.body {
        WidgetBody::Notes { content } => content.clone(),
        _ => String::new(),
    }
}

#[component]
pub(crate) fn NotesWidget(
    widget: Signal<Widget>,
    on_save: Callback<Widget>,
    on_delete: Callback<ItemId>,
) -> impl IntoView {
    let initial = widget.get_untracked();
    let editing = RwSignal::new(false);
    let title = RwSignal::new(initial.title.clone());
    let content = RwSignal::new(content_of(&initial));

    // Follow the stored widget.
    Effect::new(move |_| {
        let w = widget.get();
        title.set(w.title.clone());
        content.set(content_of(&w));
    });

    // Blank titles never reach the controller; the widget stays in edit mode.
    let persist = move || -> bool {
        let current = widget.get_untracked();
        let body = WidgetBody::Notes {
            content: content.get_untracked(),
        };
        match current.revised(&title.get_untracked(), body) {
            Ok(next) => {
                on_save.run(next);
                true
            }
            Err(e) => {
                warn!("notes widget {} not saved: {e}", current.id);
                false
            }
        }
    };

    let on_toggle = Callback::new(move |_| {
        if !editing.get_untracked() {
            editing.set(true);
        } else if persist() {
            editing.set(false);
        }
    });

    view! {
        <div class="w-full p-4">
            <div class="mb-2 flex items-center justify-between gap-2">
                <Show
                    when=move || editing.get()
                    fallback=move || view! { <h3 class="truncate text-lg font-semibold">{move || widget.get().title}</h3> }
                >
                    <Input bind_value=title placeholder="Title" class="h-8 text-sm" />
                </Show>
                <WidgetActions
                    editing=editing
                    on_toggle=on_toggle
                    on_delete=Callback::new(move |_| on_delete.run(widget.get_untracked().id))
                />
            </div>

            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <div class="whitespace-pre-wrap text-sm">{move || content_of(&widget.get())}</div>
                }
            >
                <Textarea
                    bind_value=content
                    class="h-48 resize-none"
                    autofocus=true
                    on_blur=Callback::new(move |_| {
                        persist();
                    })
                />
            </Show>
        </div>
    }
}
