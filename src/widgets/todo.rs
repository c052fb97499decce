use super::WidgetActions;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input};
use crate::models::todo::{self, TodoItem};
use crate::models::{ItemId, Widget, WidgetBody};
use icons::X;
use leptos::logging::warn;
use leptos::prelude::*;

fn items_of(widget: &Widget) -> Vec<TodoItem> {
    match &widget.body {
        WidgetBody::Todo { items } => items.clone(),
        _ => vec![],
    }
}

#[component]
pub(crate) fn TodoWidget(
    widget: Signal<Widget>,
    on_save: Callback<Widget>,
    on_delete: Callback<ItemId>,
) -> impl IntoView {
    let editing = RwSignal::new(false);
    let title = RwSignal::new(widget.get_untracked().title);
    let new_item = RwSignal::new(String::new());

    let items = Memo::new(move |_| items_of(&widget.get()));

    Effect::new(move |_| title.set(widget.get().title));

    // Every item change is saved right away as a full replacement.
    let update_items = move |f: &dyn Fn(&mut Vec<TodoItem>) -> bool| {
        let current = widget.get_untracked();
        let mut next = items_of(&current);
        if f(&mut next) {
            on_save.run(Widget {
                body: WidgetBody::Todo { items: next },
                ..current
            });
        }
    };

    let on_toggle = Callback::new(move |_| {
        if !editing.get_untracked() {
            editing.set(true);
            return;
        }

        let current = widget.get_untracked();
        match current.revised(&title.get_untracked(), current.body.clone()) {
            Ok(next) => {
                on_save.run(next);
                editing.set(false);
            }
            Err(e) => warn!("todo widget {} not saved: {e}", current.id),
        }
    });

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_item.get_untracked();
        update_items(&|items: &mut Vec<TodoItem>| todo::add(items, &text).is_some());
        new_item.set(String::new());
    };

    view! {
        <div class="w-full p-4">
            <div class="mb-2 flex items-center justify-between gap-2">
                <Show
                    when=move || editing.get()
                    fallback=move || view! {
                        <div class="flex min-w-0 items-center gap-2">
                            <h3 class="truncate text-lg font-semibold">{move || widget.get().title}</h3>
                            <span class="text-sm text-muted-foreground">
                                {move || items.with(|items| format!("({}/{})", todo::completed_count(items), items.len()))}
                            </span>
                        </div>
                    }
                >
                    <Input bind_value=title placeholder="Title" class="h-8 text-sm" />
                </Show>
                <WidgetActions
                    editing=editing
                    on_toggle=on_toggle
                    on_delete=Callback::new(move |_| on_delete.run(widget.get_untracked().id))
                />
            </div>

            <form class="mb-4 flex gap-2" on:submit=on_add>
                <Input bind_value=new_item placeholder="Add new item" class="h-8 flex-1 text-sm" />
                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm>
                    "Add"
                </Button>
            </form>

            <div class="space-y-2">
                {move || {
                    items
                        .get()
                        .into_iter()
                        .map(|item| {
                            let toggle_id = item.id.clone();
                            let remove_id = item.id.clone();
                            let text_class = if item.completed {
                                "flex-1 text-sm line-through text-muted-foreground"
                            } else {
                                "flex-1 text-sm"
                            };
                            view! {
                                <div class="flex items-center gap-2">
                                    <input
                                        type="checkbox"
                                        class="size-4 accent-primary"
                                        prop:checked=item.completed
                                        on:change=move |_| update_items(&|items: &mut Vec<TodoItem>| todo::toggle(items, &toggle_id))
                                    />
                                    <span class=text_class>{item.text}</span>
                                    <Button
                                        variant=ButtonVariant::Ghost
                                        size=ButtonSize::Icon
                                        attr:title="Remove item"
                                        on:click=move |_| update_items(&|items: &mut Vec<TodoItem>| todo::remove(items, &remove_id))
                                    >
                                        <X />
                                    </Button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
