//! Field type registry: type hint -> structural type, layout defaults and formatter constructor.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::formatters;
use crate::{FormatterConfig, SharedFormatter};

use Alignment::{Center, Left, Right};
use StructuralType as S;

/// Semantic type hint of a field. Selects the default formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Id,
    Integer,
    Float,
    Percent,
    Bool,
    Date,
    DateTime,
    /// Seconds.
    Duration,
    /// Kilometers.
    Distance,
    /// km/h.
    Speed,
    /// Bar.
    Pressure,
    Link,
    Icon,
    Buttons,
    Html,
    Input,
    Header,
    /// Two text lines.
    Text2,
    /// Text line plus an integer line.
    Text2Int,
    /// Two integer lines.
    Int2,
    /// Any number of text lines.
    TextN,
}

impl FieldKind {
    pub const ALL: [FieldKind; 22] = [
        FieldKind::Text,
        FieldKind::Id,
        FieldKind::Integer,
        FieldKind::Float,
        FieldKind::Percent,
        FieldKind::Bool,
        FieldKind::Date,
        FieldKind::DateTime,
        FieldKind::Duration,
        FieldKind::Distance,
        FieldKind::Speed,
        FieldKind::Pressure,
        FieldKind::Link,
        FieldKind::Icon,
        FieldKind::Buttons,
        FieldKind::Html,
        FieldKind::Input,
        FieldKind::Header,
        FieldKind::Text2,
        FieldKind::Text2Int,
        FieldKind::Int2,
        FieldKind::TextN,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Id => "id",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Percent => "percent",
            FieldKind::Bool => "bool",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
            FieldKind::Duration => "duration",
            FieldKind::Distance => "distance",
            FieldKind::Speed => "speed",
            FieldKind::Pressure => "pressure",
            FieldKind::Link => "link",
            FieldKind::Icon => "icon",
            FieldKind::Buttons => "buttons",
            FieldKind::Html => "html",
            FieldKind::Input => "input",
            FieldKind::Header => "header",
            FieldKind::Text2 => "text2",
            FieldKind::Text2Int => "text2int",
            FieldKind::Int2 => "int2",
            FieldKind::TextN => "textn",
        }
    }

    /// Exact tag lookup (case-insensitive, a few legacy aliases).
    pub fn from_tag(tag: &str) -> Option<FieldKind> {
        let tag = tag.trim().to_ascii_lowercase();
        let alias = match tag.as_str() {
            "int" => Some(FieldKind::Integer),
            "number" | "double" => Some(FieldKind::Float),
            "boolean" => Some(FieldKind::Bool),
            "texttext" => Some(FieldKind::Text2),
            "intint" => Some(FieldKind::Int2),
            "textlist" | "textarray" => Some(FieldKind::TextN),
            _ => None,
        };
        alias.or_else(|| FieldKind::ALL.into_iter().find(|kind| kind.tag() == tag))
    }

    /// Total tag lookup: unknown tags resolve to [`FieldKind::Text`].
    pub fn parse(tag: &str) -> FieldKind {
        FieldKind::from_tag(tag).unwrap_or_else(|| {
            log::debug!("unknown field type hint {tag:?}; using text defaults");
            FieldKind::Text
        })
    }
}

/// Coarse rendering category consumed by the UI schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructuralType {
    Text,
    Number,
    Id,
    Buttons,
    Icon,
    Html,
    Link,
    Input,
    #[serde(rename = "text2")]
    TwoLineText,
    Header,
}

impl StructuralType {
    pub const fn as_str(self) -> &'static str {
        match self {
            StructuralType::Text => "text",
            StructuralType::Number => "number",
            StructuralType::Id => "id",
            StructuralType::Buttons => "buttons",
            StructuralType::Icon => "icon",
            StructuralType::Html => "html",
            StructuralType::Link => "link",
            StructuralType::Input => "input",
            StructuralType::TwoLineText => "text2",
            StructuralType::Header => "header",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Constructs the default formatter of a type hint from the field's settings.
pub type FormatterFactory = fn(&FormatterConfig) -> SharedFormatter;

/// Everything a type hint decides about a field before configuration.
#[derive(Clone, Copy)]
pub struct FieldDefaults {
    pub structural: StructuralType,
    pub align: Alignment,
    pub decimals: usize,
    pub searchable: bool,
    pub sortable: bool,
    pub exportable: bool,
    /// Seeded `(true, false)` label keys; only boolean hints have them.
    pub bool_labels: Option<(&'static str, &'static str)>,
    pub formatter: FormatterFactory,
}

impl fmt::Debug for FieldDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefaults")
            .field("structural", &self.structural)
            .field("align", &self.align)
            .field("decimals", &self.decimals)
            .field("searchable", &self.searchable)
            .field("sortable", &self.sortable)
            .field("exportable", &self.exportable)
            .field("bool_labels", &self.bool_labels)
            .finish_non_exhaustive()
    }
}

const fn defaults(
    structural: StructuralType,
    align: Alignment,
    decimals: usize,
    flags: (bool, bool, bool),
    formatter: FormatterFactory,
) -> FieldDefaults {
    FieldDefaults {
        structural,
        align,
        decimals,
        searchable: flags.0,
        sortable: flags.1,
        exportable: flags.2,
        bool_labels: None,
        formatter,
    }
}

/// Permissive default for anything the registry does not know.
const TEXT_DEFAULTS: FieldDefaults =
    defaults(S::Text, Left, 0, (true, true, true), formatters::text);

// (searchable, sortable, exportable)
const REGISTRY: &[(FieldKind, FieldDefaults)] = &[
    (FieldKind::Text, TEXT_DEFAULTS),
    (FieldKind::Id, defaults(S::Id, Right, 0, (false, true, true), formatters::id)),
    (FieldKind::Integer, defaults(S::Number, Right, 0, (true, true, true), formatters::integer)),
    (FieldKind::Float, defaults(S::Number, Right, 2, (true, true, true), formatters::float)),
    (FieldKind::Percent, defaults(S::Number, Right, 1, (true, true, true), formatters::percent)),
    (
        FieldKind::Bool,
        FieldDefaults {
            bool_labels: Some(("true", "false")),
            ..defaults(S::Text, Center, 0, (false, true, true), formatters::boolean)
        },
    ),
    (FieldKind::Date, defaults(S::Text, Left, 0, (true, true, true), formatters::date)),
    (FieldKind::DateTime, defaults(S::Text, Left, 0, (true, true, true), formatters::date_time)),
    (FieldKind::Duration, defaults(S::Number, Right, 0, (false, true, true), formatters::duration)),
    (FieldKind::Distance, defaults(S::Number, Right, 1, (false, true, true), formatters::distance)),
    (FieldKind::Speed, defaults(S::Number, Right, 1, (false, true, true), formatters::speed)),
    (FieldKind::Pressure, defaults(S::Number, Right, 2, (false, true, true), formatters::pressure)),
    (FieldKind::Link, defaults(S::Link, Left, 0, (true, true, true), formatters::link)),
    (FieldKind::Icon, defaults(S::Icon, Center, 0, (false, false, true), formatters::icon)),
    (
        FieldKind::Buttons,
        defaults(S::Buttons, Right, 0, (false, false, false), formatters::buttons),
    ),
    (FieldKind::Html, defaults(S::Html, Left, 0, (true, true, true), formatters::html)),
    (FieldKind::Input, defaults(S::Input, Left, 0, (false, false, false), formatters::input)),
    (FieldKind::Header, defaults(S::Header, Left, 0, (false, false, false), formatters::header)),
    (FieldKind::Text2, defaults(S::TwoLineText, Left, 0, (true, true, true), formatters::text2)),
    (
        FieldKind::Text2Int,
        defaults(S::TwoLineText, Left, 0, (true, true, true), formatters::text2_int),
    ),
    (FieldKind::Int2, defaults(S::TwoLineText, Right, 0, (true, true, true), formatters::int2)),
    (FieldKind::TextN, defaults(S::TwoLineText, Left, 0, (true, false, true), formatters::text_n)),
];

/// Defaults for a type hint. Total: hints missing from the table get the text defaults.
pub fn resolve_defaults(kind: FieldKind) -> FieldDefaults {
    REGISTRY
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(TEXT_DEFAULTS, |(_, d)| *d)
}

/// Defaults for a string tag, see [`FieldKind::parse`].
pub fn resolve_tag(tag: &str) -> FieldDefaults {
    resolve_defaults(FieldKind::parse(tag))
}
