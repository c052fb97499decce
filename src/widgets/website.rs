use super::WidgetActions;
use crate::components::ui::{Input, Spinner};
use crate::models::{ItemId, Widget, WidgetBody};
use leptos::logging::warn;
use leptos::prelude::*;

fn url_of(widget: &Widget) -> String {
    match &widget.body {
        WidgetBody::Website { url } => url.clone(),
        _ => String::new(),
    }
}

/// Embeds a page in a sandboxed iframe.
#[component]
pub(crate) fn WebsiteWidget(
    widget: Signal<Widget>,
    on_save: Callback<Widget>,
    on_delete: Callback<ItemId>,
) -> impl IntoView {
    let initial = widget.get_untracked();
    let editing = RwSignal::new(false);
    let title = RwSignal::new(initial.title.clone());
    let url = RwSignal::new(url_of(&initial));
    let loaded = RwSignal::new(false);

    let stored_url = Memo::new(move |_| url_of(&widget.get()));

    Effect::new(move |_| {
        let w = widget.get();
        title.set(w.title.clone());
        url.set(url_of(&w));
    });

    // New address: show the loading state until the frame reports back.
    Effect::new(move |_| {
        stored_url.track();
        loaded.set(false);
    });

    let on_toggle = Callback::new(move |_| {
        if !editing.get_untracked() {
            editing.set(true);
            return;
        }

        let current = widget.get_untracked();
        let body = WidgetBody::Website {
            url: url.get_untracked(),
        };
        match current.revised(&title.get_untracked(), body) {
            Ok(next) => {
                on_save.run(next);
                editing.set(false);
            }
            Err(e) => warn!("website widget {} not saved: {e}", current.id),
        }
    });

    view! {
        <div class="w-full p-4">
            <div class="mb-2 flex items-center justify-between gap-2">
                <Show
                    when=move || editing.get()
                    fallback=move || view! { <h3 class="truncate text-lg font-semibold">{move || widget.get().title}</h3> }
                >
                    <div class="mr-2 flex w-full flex-col gap-2">
                        <Input bind_value=title placeholder="Title" class="h-8 text-sm" />
                        <Input bind_value=url r#type="url" placeholder="URL" class="h-8 text-sm" />
                    </div>
                </Show>
                <WidgetActions
                    editing=editing
                    on_toggle=on_toggle
                    on_delete=Callback::new(move |_| on_delete.run(widget.get_untracked().id))
                />
            </div>

            <Show when=move || !editing.get() fallback=|| ().into_view()>
                <div class="relative h-96 w-full overflow-hidden rounded-md bg-white">
                    <Show when=move || !loaded.get() fallback=|| ().into_view()>
                        <div class="absolute inset-0 flex items-center justify-center gap-2 bg-surface text-sm text-muted-foreground">
                            <Spinner />
                            "Loading..."
                        </div>
                    </Show>
                    <iframe
                        src=move || stored_url.get()
                        title=move || widget.get().title
                        class=move || {
                            if loaded.get() {
                                "h-full w-full border-0 opacity-100"
                            } else {
                                "h-full w-full border-0 opacity-0"
                            }
                        }
                        sandbox="allow-scripts allow-same-origin allow-popups"
                        on:load=move |_| loaded.set(true)
                    ></iframe>
                </div>
            </Show>
        </div>
    }
}
