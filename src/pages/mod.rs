mod links;
mod theme;
mod widgets;

pub use links::LinksPanel;
pub use theme::ThemePanel;
pub use widgets::WidgetsPanel;

use crate::components::ui::{Alert, AlertDescription, Button, ButtonSize, ButtonVariant};
use crate::state::AppContext;
use icons::{Palette, X};
use leptos::prelude::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let notice = app_state.0.storage_notice;
    let theme_open: RwSignal<bool> = RwSignal::new(false);

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <div class="dashboard-backdrop"></div>
            <main class="relative mx-auto flex w-full max-w-6xl flex-col gap-8 px-4 py-8">
                <div class="flex items-center justify-end">
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=move |_| theme_open.set(true)
                    >
                        <Palette />
                        "Theme"
                    </Button>
                </div>

                <Show when=move || notice.get().is_some() fallback=|| ().into_view()>
                    {move || notice.get().map(|msg| view! {
                        <Alert class="flex items-center justify-between gap-2 border-destructive/30">
                            <AlertDescription class="text-destructive text-xs">{msg}</AlertDescription>
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Icon
                                attr:title="Dismiss"
                                on:click=move |_| notice.set(None)
                            >
                                <X />
                            </Button>
                        </Alert>
                    })}
                </Show>

                <div class="grid gap-8 lg:grid-cols-[2fr_1fr]">
                    <LinksPanel />
                    <WidgetsPanel />
                </div>
            </main>

            <Show when=move || theme_open.get() fallback=|| ().into_view()>
                <ThemePanel on_close=Callback::new(move |_| theme_open.set(false)) />
            </Show>
        </div>
    }
}
