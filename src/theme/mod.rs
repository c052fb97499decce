use crate::scheduler::DebouncedWriter;
use crate::storage::{load_json, Namespace, SharedStore};
use leptos::logging::{error, warn};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub info: String,
    pub background: String,
    pub surface: String,
    pub surface_hover: String,
    pub surface_active: String,
    pub border: String,
    pub border_hover: String,
    pub text: String,
    pub text_secondary: String,
    pub text_disabled: String,
    pub link: String,
    pub link_hover: String,
}

macro_rules! color_fields {
    ($($field:ident => $key:literal),* $(,)?) => {
        impl ThemeColors {
            /// Color names as they appear in storage and in `--color-*` variables.
            pub const KEYS: &'static [&'static str] = &[$($key),*];

            pub fn entries(&self) -> Vec<(&'static str, &str)> {
                vec![$(($key, self.$field.as_str())),*]
            }

            pub fn get(&self, key: &str) -> Option<&str> {
                match key {
                    $($key => Some(self.$field.as_str()),)*
                    _ => None,
                }
            }

            /// Returns `false` for unknown keys.
            pub fn set(&mut self, key: &str, value: &str) -> bool {
                match key {
                    $($key => self.$field = value.to_string(),)*
                    _ => return false,
                }
                true
            }
        }
    };
}

color_fields! {
    primary => "primary",
    secondary => "secondary",
    accent => "accent",
    success => "success",
    warning => "warning",
    error => "error",
    info => "info",
    background => "background",
    surface => "surface",
    surface_hover => "surfaceHover",
    surface_active => "surfaceActive",
    border => "border",
    border_hover => "borderHover",
    text => "text",
    text_secondary => "textSecondary",
    text_disabled => "textDisabled",
    link => "link",
    link_hover => "linkHover",
}

const DEFAULT_OVERLAY: u8 = 40;
const DEFAULT_BLUR: u8 = 0;
const DEFAULT_RADIUS: u8 = 8;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Theme {
    pub id: String,
    pub name: String,
    pub colors: ThemeColors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// 0-100
    #[serde(default)]
    pub background_overlay: Option<u8>,
    /// 0-20
    #[serde(default)]
    pub blur: Option<u8>,
    /// 0-20
    #[serde(default)]
    pub border_radius: Option<u8>,
    #[serde(default)]
    pub glass_effect: Option<bool>,
}

impl Default for Theme {
    fn default() -> Self {
        let c = |s: &str| s.to_string();
        Self {
            id: c("default"),
            name: c("Default Dark"),
            colors: ThemeColors {
                primary: c("#3B82F6"),
                secondary: c("#4B5563"),
                accent: c("#10B981"),
                success: c("#059669"),
                warning: c("#D97706"),
                error: c("#DC2626"),
                info: c("#0EA5E9"),
                background: c("#111827"),
                surface: c("#1F2937"),
                surface_hover: c("#374151"),
                surface_active: c("#4B5563"),
                border: c("#374151"),
                border_hover: c("#4B5563"),
                text: c("#F9FAFB"),
                text_secondary: c("#9CA3AF"),
                text_disabled: c("#6B7280"),
                link: c("#60A5FA"),
                link_hover: c("#93C5FD"),
            },
            background_image: None,
            background_overlay: Some(DEFAULT_OVERLAY),
            blur: Some(DEFAULT_BLUR),
            border_radius: Some(DEFAULT_RADIUS),
            glass_effect: Some(true),
        }
    }
}

impl Theme {
    pub fn glass(&self) -> bool {
        self.glass_effect.unwrap_or(false)
    }

    pub fn overlay(&self) -> u8 {
        self.background_overlay.unwrap_or(DEFAULT_OVERLAY).min(100)
    }

    pub fn blur_level(&self) -> u8 {
        self.blur.unwrap_or(DEFAULT_BLUR)
    }

    pub fn radius(&self) -> u8 {
        self.border_radius.unwrap_or(DEFAULT_RADIUS)
    }

    /// Tile/panel surface class.
    pub fn surface_class(&self) -> &'static str {
        if self.glass() {
            "glass-effect"
        } else {
            "no-glass"
        }
    }

    /// CSS custom properties derived from the theme, in application order.
    pub fn css_variables(&self) -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = self
            .colors
            .entries()
            .into_iter()
            .map(|(key, value)| (format!("--color-{key}"), value.to_string()))
            .collect();

        let overlay = self.overlay();
        match self.background_image.as_deref().map(str::trim) {
            Some(image) if !image.is_empty() => {
                let value = if image.starts_with("data:") {
                    image.to_string()
                } else {
                    format!("url('{image}')")
                };
                vars.push(("--background-image".to_string(), value));
                let opacity = 1.0 - f64::from(overlay) / 100.0;
                vars.push(("--background-opacity".to_string(), format!("{opacity}")));
            }
            _ => {
                vars.push(("--background-image".to_string(), "none".to_string()));
                vars.push(("--background-opacity".to_string(), "0".to_string()));
            }
        }

        vars.push(("--background-overlay".to_string(), format!("{overlay}%")));
        vars.push((
            "--blur".to_string(),
            self.blur_level().to_string(),
        ));
        vars.push((
            "--border-radius".to_string(),
            format!("{}px", self.radius()),
        ));
        vars
    }
}

/// Writes the theme's variables onto `document.documentElement`.
pub(crate) fn apply_to_document(theme: &Theme) {
    let Some(root) = leptos_dom::helpers::document()
        .document_element()
        .and_then(|el| wasm_bindgen::JsCast::dyn_into::<web_sys::HtmlElement>(el).ok())
    else {
        return;
    };

    let style = root.style();
    for (name, value) in theme.css_variables() {
        let _ = style.set_property(&name, &value);
    }
}

pub(crate) type ThemeListener = Arc<dyn Fn(&Theme) + Send + Sync>;

struct ThemeInner {
    store: SharedStore,
    current: Mutex<Theme>,
    writer: DebouncedWriter<Theme>,
    listeners: Mutex<Vec<ThemeListener>>,
}

/// Flat key-value theme document with its own debounced writer.
#[derive(Clone)]
pub(crate) struct ThemeController {
    inner: Arc<ThemeInner>,
}

impl ThemeController {
    pub fn new(store: SharedStore, writer: DebouncedWriter<Theme>) -> Self {
        Self {
            inner: Arc::new(ThemeInner {
                store,
                current: Mutex::new(Theme::default()),
                writer,
                listeners: Mutex::new(vec![]),
            }),
        }
    }

    fn current(&self) -> MutexGuard<'_, Theme> {
        self.inner.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self, listener: ThemeListener) {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    fn notify(&self, theme: &Theme) {
        let listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener(theme);
        }
    }

    /// Stored theme, or the default one. Listeners always fire so the
    /// initial variables get applied.
    pub fn load(&self) {
        let ns = Namespace::Theme;
        let theme = match load_json::<Theme>(self.inner.store.as_ref(), ns, ns.key()) {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::default(),
            Err(e) => {
                error!("Error loading theme: {e}");
                Theme::default()
            }
        };
        *self.current() = theme.clone();
        self.notify(&theme);
    }

    pub fn get(&self) -> Theme {
        self.current().clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut Theme)) {
        let theme = {
            let mut current = self.current();
            f(&mut current);
            current.clone()
        };
        self.inner.writer.schedule(theme.clone());
        self.notify(&theme);
    }

    /// Unknown keys are rejected without touching the theme.
    pub fn set_color(&self, key: &str, value: &str) -> bool {
        if !ThemeColors::KEYS.contains(&key) {
            warn!("unknown theme color {key:?}, ignoring");
            return false;
        }
        self.update(|t| {
            t.colors.set(key, value);
        });
        true
    }

    pub fn reset(&self) {
        self.update(|t| *t = Theme::default());
    }

    pub fn flush(&self) -> bool {
        self.inner.writer.flush()
    }
}
