use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::drag::{ArrangePolicy, DragOrigin, DragReorder};
use crate::models::{ItemId, Widget, WidgetDraft, WidgetKind};
use crate::state::AppContext;
use crate::widgets::{all_views, view_for};
use icons::Plus;
use leptos::prelude::*;

#[component]
pub fn WidgetsPanel() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let widgets = StoredValue::new(app_state.0.widgets.clone());
    let items = app_state.0.widget_items;
    let theme = app_state.0.theme_value;

    let drag = RwSignal::new(DragReorder::new(ArrangePolicy::Always));
    let chooser_open: RwSignal<bool> = RwSignal::new(false);

    let on_save = Callback::new(move |w: Widget| {
        let id = w.id.clone();
        widgets.with_value(|c| c.edit(&id, w));
    });
    let on_delete = Callback::new(move |id: ItemId| {
        widgets.with_value(|c| c.remove(&id));
    });

    let add_widget = move |kind: WidgetKind| {
        widgets.with_value(|c| c.add(WidgetDraft::of_kind(kind)));
        chooser_open.set(false);
    };

    view! {
        <section class="space-y-4">
            <div class="mb-4 flex items-center justify-between gap-8">
                <h2 class="text-xl font-semibold">"Widgets"</h2>
                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| chooser_open.update(|o| *o = !*o)>
                    <Plus />
                    "Add Widget"
                </Button>
            </div>

            <div class="grid gap-4">
                <For
                    each=move || items.get()
                    key=|w: &Widget| w.id.clone()
                    children=move |w: Widget| {
                        let id = w.id.clone();
                        let kind = w.kind();

                        // The row follows later edits of the same item.
                        let live = Memo::new({
                            let id = id.clone();
                            move |_| {
                                items.with(|ws| ws.iter().find(|x| x.id == id).cloned())
                                    .unwrap_or_else(|| w.clone())
                            }
                        });

                        let id_class = id.clone();
                        let id_start = id.clone();
                        let id_over = id.clone();
                        let id_drop = id;

                        view! {
                            <div
                                class=move || {
                                    let mut class = theme.with(|t| t.surface_class()).to_string();
                                    drag.with(|d| {
                                        if d.is_dragged(&id_class) {
                                            class.push_str(" opacity-50");
                                        }
                                        if d.is_drop_target(&id_class) {
                                            class.push_str(" ring-2 ring-primary");
                                        }
                                    });
                                    class
                                }
                                draggable="true"
                                on:dragstart=move |ev: web_sys::DragEvent| {
                                    let origin = DragOrigin::from_event(&ev);
                                    let started = drag
                                        .try_update(|d| d.drag_start(id_start.clone(), origin, false))
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
                                        widgets.with_value(|c| c.reorder(&req.moved, &req.target));
                                    }
                                }
                                on:dragend=move |_| drag.update(|d| d.drag_end())
                            >
                                {view_for(kind).render(live.into(), on_save, on_delete)}
                            </div>
                        }
                    }
                />
            </div>

            <Show when=move || chooser_open.get() fallback=|| ().into_view()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                    <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                        <div class="mb-3 space-y-1">
                            <div class="text-sm font-medium">"Add Widget"</div>
                        </div>

                        <div class="space-y-2">
                            {all_views()
                                .map(|variant| {
                                    let kind = variant.kind();
                                    view! {
                                        <Button
                                            variant=ButtonVariant::Outline
                                            size=ButtonSize::Sm
                                            class="w-full justify-start"
                                            on:click=move |_| add_widget(kind)
                                        >
                                            {variant.icon()}
                                            {kind.label()}
                                        </Button>
                                    }
                                })
                                .collect_view()}

                            <div class="flex items-center justify-end gap-2 pt-2">
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    on:click=move |_| chooser_open.set(false)
                                >
                                    "Cancel"
                                </Button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>
        </section>
    }
}
