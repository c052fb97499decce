use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_STORAGE_NAME: &str = "startpage-db";
pub(crate) const DEFAULT_SAVE_DEBOUNCE_MS: u32 = 1000;
pub(crate) const DEFAULT_THEME_SAVE_DEBOUNCE_MS: u32 = 250;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Prefix of every localStorage key.
    pub storage_name: String,
    /// Links / widgets write-back delay.
    pub save_debounce_ms: u32,
    pub theme_save_debounce_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            storage_name: DEFAULT_STORAGE_NAME.to_string(),
            save_debounce_ms: DEFAULT_SAVE_DEBOUNCE_MS,
            theme_save_debounce_ms: DEFAULT_THEME_SAVE_DEBOUNCE_MS,
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by `window.ENV`, when the host page defines it.
    ///
    /// Both `STORAGE_NAME` and `storage_name` spellings are accepted (same for
    /// the delays).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        let Some(env) = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object())
        else {
            return config;
        };

        let read = |upper: &str, lower: &str| -> Option<wasm_bindgen::JsValue> {
            [upper, lower].into_iter().find_map(|key| {
                js_sys::Reflect::get(&env, &key.into())
                    .ok()
                    .filter(|v| !v.is_undefined() && !v.is_null())
            })
        };

        if let Some(name) = read("STORAGE_NAME", "storage_name").and_then(|v| v.as_string()) {
            config = config.with_storage_name(&name);
        }
        if let Some(ms) = read("SAVE_DEBOUNCE_MS", "save_debounce_ms").and_then(|v| parse_ms(&v)) {
            config.save_debounce_ms = ms;
        }
        if let Some(ms) =
            read("THEME_SAVE_DEBOUNCE_MS", "theme_save_debounce_ms").and_then(|v| parse_ms(&v))
        {
            config.theme_save_debounce_ms = ms;
        }

        config
    }

    /// Blank names keep the current one.
    pub fn with_storage_name(mut self, name: &str) -> Self {
        let name = name.trim();
        if !name.is_empty() {
            self.storage_name = name.to_string();
        }
        self
    }
}

/// Numbers or numeric strings; negatives and garbage are ignored.
fn parse_ms(value: &wasm_bindgen::JsValue) -> Option<u32> {
    if let Some(n) = value.as_f64() {
        return ms_from_f64(n);
    }
    value.as_string().and_then(|s| parse_ms_str(&s))
}

fn ms_from_f64(n: f64) -> Option<u32> {
    (n.is_finite() && n >= 0.0 && n <= f64::from(u32::MAX)).then(|| n as u32)
}

fn parse_ms_str(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = DashboardConfig::default();
        assert_eq!(c.storage_name, "startpage-db");
        assert_eq!(c.save_debounce_ms, 1000);
        assert_eq!(c.theme_save_debounce_ms, 250);
    }

    #[test]
    fn test_blank_storage_name_is_ignored() {
        let c = DashboardConfig::default().with_storage_name("   ");
        assert_eq!(c.storage_name, "startpage-db");
        let c = c.with_storage_name(" mine ");
        assert_eq!(c.storage_name, "mine");
    }

    #[test]
    fn test_ms_parsing() {
        assert_eq!(ms_from_f64(500.0), Some(500));
        assert_eq!(ms_from_f64(-1.0), None);
        assert_eq!(ms_from_f64(f64::NAN), None);
        assert_eq!(parse_ms_str(" 750 "), Some(750));
        assert_eq!(parse_ms_str("soon"), None);
    }
}
