//! Field descriptors: the per-column schema the interactive table is built from.
//!
//! Optional attributes are present only when set. `search`, `sort` and `visible` default to
//! true on the client and are emitted only when false.

use std::collections::BTreeMap;

use serde::Serialize;
use tabula_model::{Aggregation, Alignment, Field, StructuralType, Table, UserContext};

use crate::ExportError;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub field: String,
    /// Translated title.
    pub title: String,
    #[serde(rename = "type")]
    pub structural: StructuralType,
    pub align: Alignment,
    /// Numeric fields only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Rows carry an `<id>Hint` key.
    #[serde(skip_serializing_if = "is_false")]
    pub hint: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_span: Option<u32>,
    #[serde(skip_serializing_if = "is_true")]
    pub search: bool,
    #[serde(skip_serializing_if = "is_true")]
    pub sort: bool,
    #[serde(skip_serializing_if = "is_true")]
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Aggregation>,
    /// Indexed by button slot.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ButtonDescriptor>,
    /// Keyed by icon value.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub icons: BTreeMap<String, IconDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<InputDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ButtonDescriptor {
    pub icon: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// Rows carry per-row menu items for this slot.
    #[serde(skip_serializing_if = "is_false")]
    pub menu: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IconDescriptor {
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InputDescriptor {
    #[serde(rename = "type")]
    pub input_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_true(value: &bool) -> bool {
    *value
}

pub fn describe_field<R>(field: &Field<R>, ctx: &UserContext) -> FieldDescriptor {
    let buttons = field
        .buttons()
        .iter()
        .enumerate()
        .map(|(slot, button)| ButtonDescriptor {
            icon: button.icon.clone(),
            label: ctx.translate(&button.label),
            link: button.link.clone(),
            hidden: button.hidden,
            menu: field.has_menu(slot),
        })
        .collect();

    let icons = field
        .icons()
        .iter()
        .map(|(value, spec)| {
            let descriptor = IconDescriptor {
                icon: spec.icon.clone(),
                color: spec.color.clone(),
                label: spec.label.as_deref().map(|key| ctx.translate(key)),
            };
            (value.clone(), descriptor)
        })
        .collect();

    let input = field.input().map(|spec| InputDescriptor {
        input_type: spec.input_type.clone(),
        placeholder: spec.placeholder.as_deref().map(|key| ctx.translate(key)),
    });

    FieldDescriptor {
        field: field.id().to_string(),
        title: ctx.translate(field.title()),
        structural: field.structural(),
        align: field.align(),
        decimals: (field.structural() == StructuralType::Number).then(|| field.decimals()),
        width: field.width(),
        hint: field.has_hint(),
        header_span: field.header_span(),
        search: field.is_searchable(),
        sort: field.is_sortable(),
        visible: field.is_visible(),
        footer: match field.aggregation() {
            Aggregation::None => None,
            other => Some(other),
        },
        buttons,
        icons,
        input,
    }
}

/// Descriptors for every field of `table`, hidden ones included, in declaration order.
pub fn describe_fields<R>(table: &Table<R>, ctx: &UserContext) -> Vec<FieldDescriptor> {
    table
        .fields()
        .iter()
        .map(|field| describe_field(field, ctx))
        .collect()
}

pub fn descriptors_to_json(descriptors: &[FieldDescriptor]) -> Result<String, ExportError> {
    Ok(serde_json::to_string(descriptors)?)
}
