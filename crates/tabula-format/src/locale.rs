use serde::{Deserialize, Serialize};

/// Display locales supported by the table formatters.
///
/// A locale only carries what the formatters need: decimal/thousands separators and a date
/// pattern. Anything richer (plural rules, currency) belongs to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "de-CH")]
    DeCh,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "fr-CH")]
    FrCh,
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "es-MX")]
    EsMx,
    #[serde(rename = "it-IT")]
    ItIt,
    #[serde(rename = "nl-NL")]
    NlNl,
}

impl Locale {
    pub const ALL: [Locale; 10] = [
        Locale::EnUs,
        Locale::EnGb,
        Locale::DeDe,
        Locale::DeCh,
        Locale::FrFr,
        Locale::FrCh,
        Locale::EsEs,
        Locale::EsMx,
        Locale::ItIt,
        Locale::NlNl,
    ];

    /// Canonical BCP-47 tag.
    pub const fn id(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::DeDe => "de-DE",
            Locale::DeCh => "de-CH",
            Locale::FrFr => "fr-FR",
            Locale::FrCh => "fr-CH",
            Locale::EsEs => "es-ES",
            Locale::EsMx => "es-MX",
            Locale::ItIt => "it-IT",
            Locale::NlNl => "nl-NL",
        }
    }

    pub const fn decimal_separator(self) -> char {
        match self {
            Locale::EnUs | Locale::EnGb | Locale::EsMx | Locale::DeCh | Locale::FrCh => '.',
            Locale::DeDe | Locale::FrFr | Locale::EsEs | Locale::ItIt | Locale::NlNl => ',',
        }
    }

    /// Thousands separator.
    ///
    /// French uses U+00A0 NO-BREAK SPACE so grouped numbers never wrap inside a table cell.
    pub const fn thousands_separator(self) -> char {
        match self {
            Locale::EnUs | Locale::EnGb | Locale::EsMx => ',',
            Locale::DeDe | Locale::EsEs | Locale::ItIt | Locale::NlNl => '.',
            Locale::DeCh | Locale::FrCh => '\'',
            Locale::FrFr => '\u{00A0}',
        }
    }

    /// `chrono` strftime pattern for a calendar date.
    pub const fn date_pattern(self) -> &'static str {
        match self {
            Locale::EnUs => "%m/%d/%Y",
            Locale::EnGb | Locale::FrFr | Locale::EsEs | Locale::EsMx | Locale::ItIt => "%d/%m/%Y",
            Locale::DeDe | Locale::DeCh | Locale::FrCh => "%d.%m.%Y",
            Locale::NlNl => "%d-%m-%Y",
        }
    }

    /// Resolve a locale tag leniently.
    ///
    /// Accepts `-` or `_`, any casing, POSIX suffixes (`de_DE.UTF-8`, `de_DE@euro`) and BCP-47
    /// extensions. Region variants we do not ship fall back to the language (`de-AT` -> `de-DE`).
    pub fn parse(id: &str) -> Option<Locale> {
        let key = normalize_locale_id(id)?;
        let found = match key.as_str() {
            "en-us" | "en" => Locale::EnUs,
            "en-gb" | "en-uk" => Locale::EnGb,
            "de-de" | "de" => Locale::DeDe,
            "de-ch" => Locale::DeCh,
            "fr-fr" | "fr" => Locale::FrFr,
            "fr-ch" => Locale::FrCh,
            "es-es" | "es" => Locale::EsEs,
            "es-mx" => Locale::EsMx,
            "it-it" | "it" | "it-ch" => Locale::ItIt,
            "nl-nl" | "nl" | "nl-be" => Locale::NlNl,
            _ => match key.split('-').next().unwrap_or("") {
                "en" => Locale::EnUs,
                "de" => Locale::DeDe,
                "fr" => Locale::FrFr,
                "es" => Locale::EsEs,
                "it" => Locale::ItIt,
                "nl" => Locale::NlNl,
                _ => return None,
            },
        };
        Some(found)
    }
}

fn normalize_locale_id(id: &str) -> Option<String> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut key: String = trimmed
        .chars()
        .map(|ch| if ch == '_' { '-' } else { ch.to_ascii_lowercase() })
        .collect();

    // POSIX encoding / modifier suffixes.
    if let Some(idx) = key.find('.') {
        key.truncate(idx);
    }
    if let Some(idx) = key.find('@') {
        key.truncate(idx);
    }
    // BCP-47 extensions (`en-US-u-nu-latn`, `fr-FR-x-private`).
    if let Some(idx) = key.find("-u-") {
        key.truncate(idx);
    }
    if let Some(idx) = key.find("-x-") {
        key.truncate(idx);
    }

    Some(key)
}

/// Format `value` with exactly `decimals` fraction digits using the locale's separators.
///
/// Non-finite values render as an empty string.
pub fn format_number(value: f64, decimals: usize, locale: Locale) -> String {
    let plain = format_plain(value, decimals);
    localize_plain(&plain, locale)
}

/// Format an integer with locale grouping and no fraction digits.
pub fn format_integer(value: i64, locale: Locale) -> String {
    localize_plain(&value.to_string(), locale)
}

/// Format `value` as a parseable fixed-decimal string: `.` as decimal separator, no grouping.
///
/// This is the rendering export consumers expect. Negative zero is normalized to `0`.
pub fn format_plain(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let s = format!("{value:.decimals$}");
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}

fn localize_plain(plain: &str, locale: Locale) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if !int_part.chars().all(|c| c.is_ascii_digit()) {
        return plain.to_string();
    }

    let grouped = group_thousands(int_part, locale.thousands_separator());
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{}{frac_part}", locale.decimal_separator())
    }
}

fn group_thousands(int_part: &str, sep: char) -> String {
    let len = int_part.len();
    if len <= 3 {
        return int_part.to_string();
    }

    let mut out = String::with_capacity(len + len / 3 * sep.len_utf8());
    let mut first_group = len % 3;
    if first_group == 0 {
        first_group = 3;
    }

    out.push_str(&int_part[..first_group]);
    let mut idx = first_group;
    while idx < len {
        out.push(sep);
        out.push_str(&int_part[idx..idx + 3]);
        idx += 3;
    }

    out
}
