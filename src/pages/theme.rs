use crate::components::ui::{Button, ButtonSize, ButtonVariant, Label};
use crate::state::AppContext;
use crate::theme::Theme;
use icons::X;
use leptos::prelude::*;

/// (group, [(color key, label)])
const COLOR_GROUPS: &[(&str, &[(&str, &str)])] = &[
    ("Brand", &[("primary", "Primary"), ("secondary", "Secondary"), ("accent", "Accent")]),
    (
        "Status",
        &[("success", "Success"), ("warning", "Warning"), ("error", "Error"), ("info", "Info")],
    ),
    (
        "Surfaces",
        &[
            ("background", "Background"),
            ("surface", "Surface"),
            ("surfaceHover", "Surface Hover"),
            ("surfaceActive", "Surface Active"),
        ],
    ),
    (
        "Text",
        &[("text", "Text"), ("textSecondary", "Secondary Text"), ("textDisabled", "Disabled Text")],
    ),
    ("Borders", &[("border", "Border"), ("borderHover", "Border Hover")]),
    ("Links", &[("link", "Link"), ("linkHover", "Link Hover")]),
];

/// Slider input clamped to `0..=max`.
fn parse_slider(raw: &str, max: u8) -> Option<u8> {
    raw.trim().parse::<u8>().ok().map(|n| n.min(max))
}

#[component]
fn ThemeSlider(
    label: &'static str,
    max: u8,
    #[prop(into)] value: Signal<u8>,
    on_change: Callback<u8>,
) -> impl IntoView {
    view! {
        <div class="space-y-1">
            <Label class="text-xs">{move || format!("{label}: {}", value.get())}</Label>
            <input
                type="range"
                class="w-full accent-primary"
                min="0"
                max=max.to_string()
                prop:value=move || value.get().to_string()
                on:input=move |ev| {
                    if let Some(n) = parse_slider(&event_target_value(&ev), max) {
                        on_change.run(n);
                    }
                }
            />
        </div>
    }
}

/// Colors, background and effects. Every change applies immediately.
#[component]
pub fn ThemePanel(on_close: Callback<()>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let controller = StoredValue::new(app_state.0.theme.clone());
    let theme = app_state.0.theme_value;

    let update = move |f: Box<dyn FnOnce(&mut Theme)>| controller.with_value(|c| c.update(f));

    view! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
            <div class="max-h-[85vh] w-full max-w-2xl overflow-y-auto rounded-md border border-border bg-background p-4 shadow-lg">
                <div class="mb-3 flex items-center justify-between">
                    <div class="text-sm font-medium">"Theme"</div>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:title="Close"
                        on:click=move |_| on_close.run(())
                    >
                        <X />
                    </Button>
                </div>

                <div class="space-y-4">
                    <div class="space-y-2">
                        <div class="text-sm font-medium">"Colors"</div>
                        <div class="grid gap-3 md:grid-cols-2">
                            {COLOR_GROUPS
                                .iter()
                                .map(|(group, colors)| {
                                    view! {
                                        <div class="space-y-2 rounded-md border border-border p-3">
                                            <div class="text-xs font-medium text-muted-foreground">{*group}</div>
                                            {colors
                                                .iter()
                                                .map(|(key, label)| {
                                                    let key: &'static str = key;
                                                    view! {
                                                        <label class="flex items-center gap-2 text-sm">
                                                            <input
                                                                type="color"
                                                                class="h-6 w-8 cursor-pointer rounded border border-border bg-transparent"
                                                                prop:value=move || {
                                                                    theme.with(|t| t.colors.get(key).unwrap_or_default().to_string())
                                                                }
                                                                on:input=move |ev| {
                                                                    let value = event_target_value(&ev);
                                                                    controller.with_value(|c| c.set_color(key, &value));
                                                                }
                                                            />
                                                            {*label}
                                                        </label>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>

                    <div class="space-y-2">
                        <div class="text-sm font-medium">"Background"</div>
                        <div class="space-y-1">
                            <Label class="text-xs" html_for="theme-bg-image">"Image URL"</Label>
                            <input
                                id="theme-bg-image"
                                type="url"
                                placeholder="https://..."
                                class="border-input flex h-8 w-full rounded-md border bg-transparent px-3 py-1 text-sm shadow-xs outline-none focus-visible:ring-2 focus-visible:ring-ring/50"
                                prop:value=move || theme.with(|t| t.background_image.clone().unwrap_or_default())
                                on:change=move |ev| {
                                    let raw = event_target_value(&ev);
                                    let image = Some(raw.trim().to_string()).filter(|s| !s.is_empty());
                                    update(Box::new(move |t: &mut Theme| t.background_image = image));
                                }
                            />
                        </div>
                        <ThemeSlider
                            label="Overlay"
                            max=100
                            value=Signal::derive(move || theme.with(Theme::overlay))
                            on_change=Callback::new(move |n: u8| update(Box::new(move |t: &mut Theme| t.background_overlay = Some(n))))
                        />
                    </div>

                    <div class="space-y-2">
                        <div class="text-sm font-medium">"Effects"</div>
                        <ThemeSlider
                            label="Blur"
                            max=20
                            value=Signal::derive(move || theme.with(Theme::blur_level))
                            on_change=Callback::new(move |n: u8| update(Box::new(move |t: &mut Theme| t.blur = Some(n))))
                        />
                        <ThemeSlider
                            label="Border radius"
                            max=20
                            value=Signal::derive(move || theme.with(Theme::radius))
                            on_change=Callback::new(move |n: u8| update(Box::new(move |t: &mut Theme| t.border_radius = Some(n))))
                        />
                        <label class="flex items-center gap-2 text-sm">
                            <input
                                type="checkbox"
                                class="size-4 accent-primary"
                                prop:checked=move || theme.with(|t| t.glass())
                                on:change=move |ev| {
                                    let on = event_target_checked(&ev);
                                    update(Box::new(move |t: &mut Theme| t.glass_effect = Some(on)));
                                }
                            />
                            "Glass effect"
                        </label>
                    </div>

                    <div class="flex items-center justify-end gap-2 pt-2">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| controller.with_value(|c| c.reset())
                        >
                            "Reset"
                        </Button>
                        <Button size=ButtonSize::Sm on:click=move |_| on_close.run(())>"Done"</Button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeColors;

    #[test]
    fn test_every_color_is_editable() {
        let mut keys: Vec<&str> = COLOR_GROUPS
            .iter()
            .flat_map(|(_, colors)| colors.iter().map(|(key, _)| *key))
            .collect();
        keys.sort_unstable();
        let mut expected = ThemeColors::KEYS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_parse_slider_clamps() {
        assert_eq!(parse_slider("15", 20), Some(15));
        assert_eq!(parse_slider("40", 20), Some(20));
        assert_eq!(parse_slider("x", 20), None);
    }
}
