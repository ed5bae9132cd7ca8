use std::collections::HashMap;

use tabula_format::{DistanceUnit, Locale, PressureUnit, SpeedUnit, Timezone};

/// Translation lookup for label keys. Missing keys translate to themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }

    pub fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Per-request user preferences read (never written) by formatters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserContext {
    pub locale: Locale,
    pub distance_unit: DistanceUnit,
    pub speed_unit: SpeedUnit,
    pub pressure_unit: PressureUnit,
    pub timezone: Timezone,
    pub catalog: Catalog,
}

impl UserContext {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn translate(&self, key: &str) -> String {
        self.catalog.translate(key)
    }
}
