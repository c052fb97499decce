use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Input, Label,
};
use crate::drag::{ArrangePolicy, DragOrigin, DragReorder};
use crate::models::{ItemId, Link, LinkDraft};
use crate::state::AppContext;
use crate::util::initials;
use icons::{Check, Pencil, Plus, Trash2};
use leptos::prelude::*;

fn tile_class(glass: bool, editing: bool, dragged: bool, drop_target: bool) -> String {
    let mut class = vec![
        "group relative flex h-16 w-32 items-center justify-center rounded-lg text-base shadow-md transition-all duration-200",
        if glass { "glass-effect hover-glass" } else { "no-glass hover-no-glass" },
        if editing { "cursor-grab ring-1 ring-warning/50" } else { "cursor-pointer" },
    ];
    if dragged {
        class.push("opacity-50");
    }
    if drop_target {
        class.push("ring-2 ring-warning");
    }
    class.join(" ")
}

/// Shortcut tiles. Rearranging, editing and deleting only happen in edit mode.
#[component]
pub fn LinksPanel() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let links = StoredValue::new(app_state.0.links.clone());
    let items = app_state.0.link_items;
    let editing = app_state.0.links_editing;
    let theme = app_state.0.theme_value;

    let drag = RwSignal::new(DragReorder::new(ArrangePolicy::WhileEditing));

    let modal_open: RwSignal<bool> = RwSignal::new(false);
    let modal_target: RwSignal<Option<ItemId>> = RwSignal::new(None);
    let form_title: RwSignal<String> = RwSignal::new(String::new());
    let form_href: RwSignal<String> = RwSignal::new(String::new());
    let form_error: RwSignal<Option<String>> = RwSignal::new(None);

    let open_modal = move |link: Option<Link>| {
        let draft = link.as_ref().map(Link::to_draft).unwrap_or_default();
        modal_target.set(link.map(|l| l.id));
        form_title.set(draft.title);
        form_href.set(draft.href);
        form_error.set(None);
        modal_open.set(true);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let draft = match LinkDraft::new(form_title.get_untracked(), form_href.get_untracked()).validate() {
            Ok(d) => d,
            Err(e) => {
                form_error.set(Some(e.to_string()));
                return;
            }
        };

        links.with_value(|c| match modal_target.get_untracked() {
            Some(id) => {
                if let Some(existing) = c.get(&id) {
                    c.edit(&id, existing.replaced_with(draft));
                }
            }
            None => {
                c.add(draft);
            }
        });
        modal_open.set(false);
    };

    let toggle_editing = move |_| {
        editing.update(|e| *e = !*e);
        drag.update(|d| d.drag_end());
    };

    view! {
        <section class="space-y-4">
            <div class="mb-4 flex items-center justify-between">
                <h1 class="text-xl font-semibold">"Links"</h1>
                <div class="flex gap-2">
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=toggle_editing
                    >
                        {move || {
                            if editing.get() {
                                view! { <Check /> "Done" }.into_any()
                            } else {
                                view! { <Pencil /> "Edit" }.into_any()
                            }
                        }}
                    </Button>
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| open_modal(None)>
                        <Plus />
                        "Add Link"
                    </Button>
                </div>
            </div>

            <div class="grid gap-4 sm:grid-cols-1 md:grid-cols-2 lg:grid-cols-4">
                {move || {
                    items
                        .get()
                        .into_iter()
                        .map(|link| {
                            let id = link.id.clone();
                            let id_start = id.clone();
                            let id_over = id.clone();
                            let id_drop = id.clone();
                            let id_delete = id.clone();
                            let link_for_edit = link.clone();
                            let href = link.href.clone();

                            view! {
                                <div
                                    class=move || {
                                        let (dragged, target) =
                                            drag.with(|d| (d.is_dragged(&id), d.is_drop_target(&id)));
                                        tile_class(theme.with(|t| t.glass()), editing.get(), dragged, target)
                                    }
                                    title=link.title.clone()
                                    draggable=move || if editing.get() { "true" } else { "false" }
                                    on:dragstart=move |ev: web_sys::DragEvent| {
                                        let origin = DragOrigin::from_event(&ev);
                                        let started = drag
                                            .try_update(|d| d.drag_start(id_start.clone(), origin, editing.get_untracked()))
                                            .unwrap_or(false);
                                        if !started {
                                            ev.prevent_default();
                                            return;
                                        }
                                        if let Some(dt) = ev.data_transfer() {
                                            dt.set_effect_allowed("move");
                                        }
                                    }
                                    on:dragover=move |ev: web_sys::DragEvent| {
                                        ev.prevent_default();
                                        drag.update(|d| d.drag_over(&id_over));
                                    }
                                    on:drop=move |ev: web_sys::DragEvent| {
                                        ev.prevent_default();
                                        if let Some(req) = drag.try_update(|d| d.drop_on(&id_drop)).flatten() {
                                            links.with_value(|c| c.reorder(&req.moved, &req.target));
                                        }
                                    }
                                    on:dragend=move |_| drag.update(|d| d.drag_end())
                                    on:click=move |_| {
                                        if !editing.get_untracked() && drag.with_untracked(DragReorder::is_idle) {
                                            let _ = window().location().set_href(&href);
                                        }
                                    }
                                >
                                    <span class="relative z-10 font-semibold">{initials(&link.title)}</span>

                                    <Show
                                        when=move || editing.get()
                                        fallback={
                                            let title = link.title.clone();
                                            move || view! {
                                                <div class="absolute inset-x-0 bottom-0 rounded-b-lg p-1 text-center text-xs opacity-0 transition-opacity duration-200 group-hover:opacity-100">
                                                    {title.clone()}
                                                </div>
                                            }
                                        }
                                    >
                                        {
                                            let link_for_edit = link_for_edit.clone();
                                            let id_delete = id_delete.clone();
                                            view! {
                                                <div class="absolute right-0 top-0 z-20 flex gap-1 p-1">
                                                    <Button
                                                        variant=ButtonVariant::Ghost
                                                        size=ButtonSize::Icon
                                                        class="size-6"
                                                        attr:title="Edit link"
                                                        on:click=move |ev: web_sys::MouseEvent| {
                                                            ev.stop_propagation();
                                                            open_modal(Some(link_for_edit.clone()));
                                                        }
                                                    >
                                                        <Pencil />
                                                    </Button>
                                                    <Button
                                                        variant=ButtonVariant::Ghost
                                                        size=ButtonSize::Icon
                                                        class="size-6"
                                                        attr:title="Delete link"
                                                        on:click=move |ev: web_sys::MouseEvent| {
                                                            ev.stop_propagation();
                                                            links.with_value(|c| c.remove(&id_delete));
                                                        }
                                                    >
                                                        <Trash2 class="text-destructive" />
                                                    </Button>
                                                </div>
                                            }
                                        }
                                    </Show>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>

            <Show when=move || modal_open.get() fallback=|| ().into_view()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                    <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                        <div class="mb-3 space-y-1">
                            <div class="text-sm font-medium">
                                {move || if modal_target.get().is_some() { "Edit Link" } else { "Add Link" }}
                            </div>
                        </div>

                        <form class="space-y-2" on:submit=on_submit>
                            <div class="space-y-1">
                                <Label class="text-xs" html_for="link-title">"Title"</Label>
                                <Input id="link-title" bind_value=form_title class="h-8 text-sm" />
                            </div>
                            <div class="space-y-1">
                                <Label class="text-xs" html_for="link-href">"URL"</Label>
                                <Input id="link-href" r#type="url" bind_value=form_href class="h-8 text-sm" />
                            </div>

                            <Show when=move || form_error.get().is_some() fallback=|| ().into_view()>
                                {move || form_error.get().map(|e| view! {
                                    <Alert class="border-destructive/30">
                                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                    </Alert>
                                })}
                            </Show>

                            <div class="flex items-center justify-end gap-2 pt-2">
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    on:click=move |ev: web_sys::MouseEvent| {
                                        ev.prevent_default();
                                        modal_open.set(false);
                                    }
                                >
                                    "Cancel"
                                </Button>
                                <Button size=ButtonSize::Sm>"Save"</Button>
                            </div>
                        </form>
                    </div>
                </div>
            </Show>
        </section>
    }
}
