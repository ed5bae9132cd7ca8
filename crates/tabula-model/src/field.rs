use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    resolve_defaults, Accessor, Alignment, FieldKind, FieldLookup, FormatterConfig, OutputChannel,
    SharedFormatter, StructuralType, Value,
};

/// Per-row text derived from a record (icon hints).
pub type TextAccessor<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Per-row menu items for one button slot.
pub type MenuAccessor<R> = Arc<dyn Fn(&R) -> Vec<String> + Send + Sync>;

/// Footer aggregation policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    None,
    /// Lenient numeric sum over all records.
    Sum,
    /// Number of non-blank values.
    Count,
}

/// How one icon value is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSpec {
    pub icon: String,
    pub color: Option<String>,
    /// Translation key.
    pub label: Option<String>,
}

impl IconSpec {
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn label(mut self, key: impl Into<String>) -> Self {
        self.label = Some(key.into());
        self
    }
}

/// One button of a buttons field, addressed by its slot index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSlot {
    pub id: String,
    pub icon: String,
    /// Translation key.
    pub label: String,
    pub link: Option<String>,
    pub hidden: bool,
}

impl ButtonSlot {
    pub fn new(id: impl Into<String>, icon: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            icon: icon.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Editable cell settings of an input field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    pub input_type: String,
    /// Translation key.
    pub placeholder: Option<String>,
}

/// One logical column of a [`Table`](crate::Table).
///
/// Immutable once built, except for the visibility flag.
pub struct Field<R> {
    id: String,
    title: String,
    kind: FieldKind,
    structural: StructuralType,
    align: Alignment,
    decimals: usize,
    searchable: bool,
    sortable: bool,
    exportable: bool,
    visible: AtomicBool,
    width: Option<u32>,
    header_span: Option<u32>,
    aggregation: Aggregation,
    accessor: Accessor<R>,
    formatter: SharedFormatter,
    channel_formatters: HashMap<OutputChannel, SharedFormatter>,
    hint: Option<TextAccessor<R>>,
    icons: BTreeMap<String, IconSpec>,
    buttons: Vec<ButtonSlot>,
    menus: BTreeMap<usize, MenuAccessor<R>>,
    input: Option<InputSpec>,
}

impl<R> Field<R> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Translation key of the column title.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn structural(&self) -> StructuralType {
        self.structural
    }

    pub fn align(&self) -> Alignment {
        self.align
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_exportable(&self) -> bool {
        self.exportable
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }

    /// Toggle visibility after the table is built (e.g. per-request permissions).
    ///
    /// Single writer, many readers: set it before starting a formatting pass.
    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Relaxed);
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn header_span(&self) -> Option<u32> {
        self.header_span
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    pub fn icons(&self) -> &BTreeMap<String, IconSpec> {
        &self.icons
    }

    pub fn buttons(&self) -> &[ButtonSlot] {
        &self.buttons
    }

    pub fn input(&self) -> Option<&InputSpec> {
        self.input.as_ref()
    }

    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }

    pub fn has_menus(&self) -> bool {
        !self.menus.is_empty()
    }

    /// Whether the button at `slot` has a per-row menu.
    pub fn has_menu(&self, slot: usize) -> bool {
        self.menus.contains_key(&slot)
    }

    /// Raw value of this field for `record`.
    pub fn raw(&self, record: &R) -> Value {
        (self.accessor)(record)
    }

    pub fn accessor(&self) -> &Accessor<R> {
        &self.accessor
    }

    /// Channel override if one is registered, the default formatter otherwise.
    pub fn formatter_for(&self, channel: OutputChannel) -> &SharedFormatter {
        self.channel_formatters
            .get(&channel)
            .unwrap_or(&self.formatter)
    }

    /// Per-row hint text, empty when the field has no hint accessor.
    pub fn hint_for(&self, record: &R) -> String {
        self.hint
            .as_ref()
            .map(|hint| hint(record))
            .unwrap_or_default()
    }

    pub(crate) fn menus(&self) -> &BTreeMap<usize, MenuAccessor<R>> {
        &self.menus
    }

    /// Whether this field produces output on `channel`.
    pub fn emits_on(&self, channel: OutputChannel) -> bool {
        self.is_visible() && !(channel.is_export() && !self.exportable)
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("structural", &self.structural)
            .field("align", &self.align)
            .field("decimals", &self.decimals)
            .field("searchable", &self.searchable)
            .field("sortable", &self.sortable)
            .field("exportable", &self.exportable)
            .field("visible", &self.is_visible())
            .field("aggregation", &self.aggregation)
            .finish_non_exhaustive()
    }
}

/// Configures a [`Field`]. Each setter replaces the previous value.
pub struct FieldBuilder<R> {
    id: String,
    title: String,
    kind: FieldKind,
    align: Alignment,
    searchable: bool,
    sortable: bool,
    exportable: bool,
    visible: bool,
    width: Option<u32>,
    header_span: Option<u32>,
    aggregation: Aggregation,
    accessor: Accessor<R>,
    formatter: Option<SharedFormatter>,
    channel_formatters: HashMap<OutputChannel, SharedFormatter>,
    config: FormatterConfig,
    hint: Option<TextAccessor<R>>,
    icons: BTreeMap<String, IconSpec>,
    buttons: Vec<ButtonSlot>,
    menus: BTreeMap<usize, MenuAccessor<R>>,
    input: Option<InputSpec>,
}

impl<R> FieldBuilder<R> {
    /// Start a field with the registry defaults of `kind`. The title key defaults to the id.
    pub fn new<F>(id: impl Into<String>, kind: FieldKind, accessor: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        let id = id.into();
        let defaults = resolve_defaults(kind);
        let (true_label, false_label) = defaults.bool_labels.unwrap_or_default();
        Self {
            title: id.clone(),
            id,
            kind,
            align: defaults.align,
            searchable: defaults.searchable,
            sortable: defaults.sortable,
            exportable: defaults.exportable,
            visible: true,
            width: None,
            header_span: None,
            aggregation: Aggregation::None,
            accessor: Arc::new(accessor),
            formatter: None,
            channel_formatters: HashMap::new(),
            config: FormatterConfig {
                decimals: defaults.decimals,
                true_label: true_label.to_string(),
                false_label: false_label.to_string(),
                ..FormatterConfig::default()
            },
            hint: None,
            icons: BTreeMap::new(),
            buttons: Vec::new(),
            menus: BTreeMap::new(),
            input: None,
        }
    }

    #[must_use]
    pub fn title(mut self, key: impl Into<String>) -> Self {
        self.title = key.into();
        self
    }

    #[must_use]
    pub fn decimals(mut self, decimals: usize) -> Self {
        self.config.decimals = decimals;
        self
    }

    #[must_use]
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    #[must_use]
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    #[must_use]
    pub fn exportable(mut self, exportable: bool) -> Self {
        self.exportable = exportable;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn header_span(mut self, span: u32) -> Self {
        self.header_span = Some(span);
        self
    }

    #[must_use]
    pub fn footer(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Replace the default formatter. See [`formatter_fn`](crate::formatter_fn) for closures.
    #[must_use]
    pub fn formatter(mut self, formatter: SharedFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Use `formatter` instead of the default one on `channel` only.
    #[must_use]
    pub fn channel_formatter(mut self, channel: OutputChannel, formatter: SharedFormatter) -> Self {
        self.channel_formatters.insert(channel, formatter);
        self
    }

    /// Translation keys for boolean values.
    #[must_use]
    pub fn bool_labels(
        mut self,
        true_key: impl Into<String>,
        false_key: impl Into<String>,
    ) -> Self {
        self.config.true_label = true_key.into();
        self.config.false_label = false_key.into();
        self
    }

    /// Field of the same record holding a per-row distance unit override.
    #[must_use]
    pub fn unit_field(mut self, field_id: impl Into<String>) -> Self {
        self.config.unit_field = Some(field_id.into());
        self
    }

    /// Per-row hint text (tooltips for icon fields).
    #[must_use]
    pub fn hint<F>(mut self, hint: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.hint = Some(Arc::new(hint));
        self
    }

    #[must_use]
    pub fn icon(mut self, value: impl Into<String>, spec: IconSpec) -> Self {
        let value = value.into();
        match &spec.label {
            Some(label) => {
                self.config.icon_labels.insert(value.clone(), label.clone());
            }
            None => {
                self.config.icon_labels.remove(&value);
            }
        }
        self.icons.insert(value, spec);
        self
    }

    #[must_use]
    pub fn button(mut self, slot: ButtonSlot) -> Self {
        self.buttons.push(slot);
        self
    }

    /// Per-row menu items for the button at `slot`.
    #[must_use]
    pub fn menu<F>(mut self, slot: usize, items: F) -> Self
    where
        F: Fn(&R) -> Vec<String> + Send + Sync + 'static,
    {
        self.menus.insert(slot, Arc::new(items));
        self
    }

    #[must_use]
    pub fn input(mut self, spec: InputSpec) -> Self {
        self.input = Some(spec);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Freeze the configuration. The default formatter is constructed from the final settings
    /// unless one was supplied.
    pub fn build(self) -> Field<R> {
        let defaults = resolve_defaults(self.kind);
        let formatter = self
            .formatter
            .unwrap_or_else(|| (defaults.formatter)(&self.config));
        Field {
            id: self.id,
            title: self.title,
            kind: self.kind,
            structural: defaults.structural,
            align: self.align,
            decimals: self.config.decimals,
            searchable: self.searchable,
            sortable: self.sortable,
            exportable: self.exportable,
            visible: AtomicBool::new(self.visible),
            width: self.width,
            header_span: self.header_span,
            aggregation: self.aggregation,
            accessor: self.accessor,
            formatter,
            channel_formatters: self.channel_formatters,
            hint: self.hint,
            icons: self.icons,
            buttons: self.buttons,
            menus: self.menus,
            input: self.input,
        }
    }
}

impl<R: FieldLookup + 'static> FieldBuilder<R> {
    /// A field of a dynamically keyed record, read by its own id.
    pub fn keyed(id: impl Into<String>, kind: FieldKind) -> Self {
        let id = id.into();
        let key = id.clone();
        Self::new(id, kind, move |record: &R| {
            record.lookup(&key).unwrap_or_default()
        })
    }
}

impl<R> fmt::Debug for FieldBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBuilder")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
