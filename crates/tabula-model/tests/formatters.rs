use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use tabula_format::{DistanceUnit, Locale, PressureUnit, SpeedUnit, Timezone};
use tabula_model::{
    resolve_defaults, Catalog, Cell, FieldKind, FormatterConfig, OutputChannel, Record, Row,
    UserContext, Value,
};

use OutputChannel::{DelimitedText, Interactive, Print, Spreadsheet};

fn config_for(kind: FieldKind) -> FormatterConfig {
    let defaults = resolve_defaults(kind);
    let (true_label, false_label) = defaults.bool_labels.unwrap_or_default();
    FormatterConfig {
        decimals: defaults.decimals,
        true_label: true_label.to_string(),
        false_label: false_label.to_string(),
        ..FormatterConfig::default()
    }
}

fn render_with(
    kind: FieldKind,
    config: &FormatterConfig,
    value: impl Into<Value>,
    channel: OutputChannel,
    ctx: &UserContext,
) -> Cell {
    let formatter = (resolve_defaults(kind).formatter)(config);
    formatter.format(&value.into(), &Row::empty(), channel, ctx)
}

fn render(
    kind: FieldKind,
    value: impl Into<Value>,
    channel: OutputChannel,
    ctx: &UserContext,
) -> Cell {
    render_with(kind, &config_for(kind), value, channel, ctx)
}

fn text(s: &str) -> Cell {
    Cell::text(s)
}

#[test]
fn numbers_are_grouped_for_display_and_plain_for_export() {
    let ctx = UserContext::default();
    assert_eq!(render(FieldKind::Integer, 1_234_567, Interactive, &ctx), text("1,234,567"));
    assert_eq!(render(FieldKind::Integer, 1_234_567, DelimitedText, &ctx), text("1234567"));
    assert_eq!(render(FieldKind::Float, 1234.5, Print, &ctx), text("1,234.50"));
    assert_eq!(render(FieldKind::Float, 1234.5, Spreadsheet, &ctx), text("1234.50"));
    assert_eq!(render(FieldKind::Percent, 12.5, Interactive, &ctx), text("12.5 %"));
    assert_eq!(render(FieldKind::Percent, 12.5, DelimitedText, &ctx), text("12.5"));
    assert_eq!(render(FieldKind::Id, 42, Interactive, &ctx), text("42"));
}

#[test]
fn unparseable_numbers_degrade_to_zero() {
    let ctx = UserContext::default();
    assert_eq!(render(FieldKind::Float, "bad", Interactive, &ctx), text("0.00"));
    assert_eq!(render(FieldKind::Integer, "12.9", DelimitedText, &ctx), text("12"));
    assert_eq!(render(FieldKind::Integer, " 7 ", DelimitedText, &ctx), text("7"));
}

#[test]
fn german_locale_swaps_separators() {
    let ctx = UserContext::new(Locale::DeDe);
    assert_eq!(render(FieldKind::Distance, 1234.56, Interactive, &ctx), text("1.234,6 km"));
    assert_eq!(render(FieldKind::Integer, 1_000_000, Print, &ctx), text("1.000.000"));
    // Export output stays parseable regardless of locale.
    assert_eq!(render(FieldKind::Distance, 1234.56, DelimitedText, &ctx), text("1234.6"));
}

#[test]
fn units_are_converted_on_every_channel_but_suffixed_only_for_display() {
    let mut ctx = UserContext::default();
    assert_eq!(render(FieldKind::Distance, 12.345, Interactive, &ctx), text("12.3 km"));

    ctx.distance_unit = DistanceUnit::Miles;
    ctx.speed_unit = SpeedUnit::MetersPerSecond;
    ctx.pressure_unit = PressureUnit::Psi;
    assert_eq!(render(FieldKind::Distance, 16.093_44, Interactive, &ctx), text("10.0 mi"));
    assert_eq!(render(FieldKind::Distance, 16.093_44, DelimitedText, &ctx), text("10.0"));
    assert_eq!(render(FieldKind::Speed, 36.0, Print, &ctx), text("10.0 m/s"));
    assert_eq!(render(FieldKind::Speed, 36.0, Spreadsheet, &ctx), text("10.0"));
    assert_eq!(render(FieldKind::Pressure, 1.0, Interactive, &ctx), text("14.50 psi"));
    assert_eq!(render(FieldKind::Pressure, 1.0, DelimitedText, &ctx), text("14.50"));
}

#[test]
fn distance_unit_field_overrides_the_user_preference() {
    let ctx = UserContext::default();
    let config = FormatterConfig {
        unit_field: Some("unit".to_string()),
        ..config_for(FieldKind::Distance)
    };
    let formatter = (resolve_defaults(FieldKind::Distance).formatter)(&config);

    let mut record = Record::new();
    record.insert("unit".to_string(), Value::from("mi"));
    let row = Row::new(&record);
    let cell = formatter.format(&Value::Float(16.093_44), &row, Interactive, &ctx);
    assert_eq!(cell, text("10.0 mi"));

    // An unknown unit keeps the user's preference.
    record.insert("unit".to_string(), Value::from("furlongs"));
    let row = Row::new(&record);
    let cell = formatter.format(&Value::Float(16.093_44), &row, Interactive, &ctx);
    assert_eq!(cell, text("16.1 km"));
}

#[test]
fn durations_render_as_clock_time_or_minutes() {
    let ctx = UserContext::default();
    assert_eq!(render(FieldKind::Duration, 0, Interactive, &ctx), text("00:00"));
    assert_eq!(render(FieldKind::Duration, 3665, Interactive, &ctx), text("01:01"));
    assert_eq!(render(FieldKind::Duration, 90_000, Print, &ctx), text("1d 01:00"));
    assert_eq!(render(FieldKind::Duration, -5, Interactive, &ctx), text(""));
    assert_eq!(render(FieldKind::Duration, 3665, DelimitedText, &ctx), text("61"));
    assert_eq!(render(FieldKind::Duration, 59, Spreadsheet, &ctx), text("0"));
    assert_eq!(render(FieldKind::Duration, -5, Spreadsheet, &ctx), text(""));
}

#[test]
fn dates_follow_locale_for_display_and_iso_for_export() {
    let us = UserContext::default();
    let de = UserContext::new(Locale::DeDe);
    assert_eq!(render(FieldKind::Date, "2024-03-05", Interactive, &us), text("03/05/2024"));
    assert_eq!(render(FieldKind::Date, "2024-03-05", Print, &de), text("05.03.2024"));
    assert_eq!(render(FieldKind::Date, "2024-03-05", DelimitedText, &de), text("2024-03-05"));
    assert_eq!(render(FieldKind::Date, "not a date", Interactive, &us), text(""));
}

#[test]
fn timestamps_are_shifted_into_the_user_timezone() {
    let ctx = UserContext {
        timezone: Timezone::EuropeBerlin,
        ..UserContext::new(Locale::DeDe)
    };
    assert_eq!(
        render(FieldKind::DateTime, "2024-07-01T10:30:00Z", Interactive, &ctx),
        text("01.07.2024 12:30")
    );
    assert_eq!(
        render(FieldKind::DateTime, "2024-07-01T10:30:00Z", DelimitedText, &ctx),
        text("2024-07-01 12:30:00")
    );
    assert_eq!(
        render(FieldKind::DateTime, "2024-01-15T10:30:00Z", Spreadsheet, &ctx),
        text("2024-01-15 11:30:00")
    );
}

#[test]
fn booleans_use_translated_labels() {
    let mut ctx = UserContext::default();
    assert_eq!(render(FieldKind::Bool, true, Interactive, &ctx), text("true"));
    assert_eq!(render(FieldKind::Bool, "no", DelimitedText, &ctx), text("false"));

    ctx.catalog = Catalog::new().with("true", "Yes").with("state.off", "Off");
    assert_eq!(render(FieldKind::Bool, 1, Print, &ctx), text("Yes"));

    let config = FormatterConfig {
        true_label: "state.on".to_string(),
        false_label: "state.off".to_string(),
        ..FormatterConfig::default()
    };
    assert_eq!(render_with(FieldKind::Bool, &config, false, Print, &ctx), text("Off"));
    assert_eq!(render_with(FieldKind::Bool, &config, true, Print, &ctx), text("state.on"));
}

#[test]
fn links_are_pairs_only_on_the_interactive_channel() {
    let ctx = UserContext::default();
    let acme = Value::pair("Acme", "/acme");
    assert_eq!(
        render(FieldKind::Link, acme.clone(), Interactive, &ctx),
        Cell::Pair("Acme".into(), "/acme".into())
    );
    for channel in [DelimitedText, Print, Spreadsheet] {
        assert_eq!(render(FieldKind::Link, acme.clone(), channel, &ctx), text("Acme"));
    }
    assert_eq!(
        render(FieldKind::Link, "https://example.org", Interactive, &ctx),
        Cell::Pair("https://example.org".into(), "https://example.org".into())
    );
}

#[test]
fn icons_show_keys_interactively_and_labels_elsewhere() {
    let ctx = UserContext {
        catalog: Catalog::new().with("status.ok", "Fine"),
        ..UserContext::default()
    };
    let config = FormatterConfig {
        icon_labels: BTreeMap::from([("ok".to_string(), "status.ok".to_string())]),
        ..FormatterConfig::default()
    };
    assert_eq!(render_with(FieldKind::Icon, &config, "ok", Interactive, &ctx), text("ok"));
    assert_eq!(render_with(FieldKind::Icon, &config, "ok", DelimitedText, &ctx), text("Fine"));
    assert_eq!(render_with(FieldKind::Icon, &config, "warn", Print, &ctx), text("warn"));
}

#[test]
fn html_is_stripped_for_export_only() {
    let ctx = UserContext::default();
    let markup = "<b>Bold</b> move";
    assert_eq!(render(FieldKind::Html, markup, Interactive, &ctx), text(markup));
    assert_eq!(render(FieldKind::Html, markup, DelimitedText, &ctx), text("Bold move"));
    assert_eq!(render(FieldKind::Header, "ignored", Print, &ctx), text(""));
}

#[test]
fn two_line_fields_collapse_with_a_separator_on_export() {
    let ctx = UserContext::default();
    let city = Value::pair("Berlin", "Germany");
    assert_eq!(
        render(FieldKind::Text2, city.clone(), Interactive, &ctx),
        Cell::Pair("Berlin".into(), "Germany".into())
    );
    assert_eq!(render(FieldKind::Text2, city, DelimitedText, &ctx), text("Berlin - Germany"));
    assert_eq!(
        render(FieldKind::Text2, Value::pair("Berlin", ""), Spreadsheet, &ctx),
        text("Berlin")
    );
}

#[test]
fn integer_secondary_of_zero_is_dropped_on_export() {
    let ctx = UserContext::default();
    assert_eq!(
        render(FieldKind::Text2Int, Value::pair("Orders", 1234), Interactive, &ctx),
        Cell::Pair("Orders".into(), "1,234".into())
    );
    assert_eq!(
        render(FieldKind::Text2Int, Value::pair("Orders", 1234), DelimitedText, &ctx),
        text("Orders - 1234")
    );
    assert_eq!(
        render(FieldKind::Text2Int, Value::pair("Orders", 0), DelimitedText, &ctx),
        text("Orders")
    );
    assert_eq!(render(FieldKind::Int2, Value::pair(5, 0), Spreadsheet, &ctx), text("5"));
    assert_eq!(
        render(FieldKind::Int2, Value::pair(1200, 3), Print, &ctx),
        Cell::Pair("1,200".into(), "3".into())
    );
}

#[test]
fn shape_mismatches_yield_the_empty_equivalent() {
    let ctx = UserContext::default();
    for kind in [FieldKind::Text2, FieldKind::Text2Int, FieldKind::Int2] {
        assert_eq!(render(kind, "flat", Interactive, &ctx), Cell::empty_pair(), "{kind:?}");
        assert_eq!(render(kind, "flat", DelimitedText, &ctx), text(""), "{kind:?}");
    }
    assert_eq!(render(FieldKind::TextN, 3, Interactive, &ctx), Cell::Lines(Vec::new()));
}

#[test]
fn n_line_fields_keep_every_line() {
    let ctx = UserContext::default();
    let stops = Value::from(vec!["Hamburg", "Hanover", "Kassel"]);
    let expected = Cell::Lines(vec!["Hamburg".into(), "Hanover".into(), "Kassel".into()]);
    assert_eq!(render(FieldKind::TextN, stops.clone(), Interactive, &ctx), expected);
    assert_eq!(render(FieldKind::TextN, stops, DelimitedText, &ctx), expected);
    assert_eq!(
        render(FieldKind::TextN, "single", Print, &ctx),
        Cell::Lines(vec!["single".into()])
    );
}

#[test]
fn null_values_render_empty_for_every_hint_and_channel() {
    let ctx = UserContext::default();
    for kind in FieldKind::ALL {
        for channel in OutputChannel::ALL {
            let cell = render(kind, Value::Null, channel, &ctx);
            assert!(cell.is_empty(), "{kind:?} on {channel:?} gave {cell:?}");
        }
    }
}

fn any_value() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_000_000_000_i64..1_000_000_000_000).prop_map(Value::Int),
        (-1.0e9..1.0e9_f64).prop_map(Value::Float),
        "[a-z0-9 .<>/-]{0,12}".prop_map(Value::Text),
    ];
    scalar.prop_recursive(2, 8, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Value::pair(a, b)),
            prop::collection::vec(inner, 0..4).prop_map(Value::List),
        ]
    })
}

fn any_channel() -> impl Strategy<Value = OutputChannel> {
    prop::sample::select(OutputChannel::ALL.to_vec())
}

fn any_kind() -> impl Strategy<Value = FieldKind> {
    prop::sample::select(FieldKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn formatting_is_idempotent(
        kind in any_kind(),
        value in any_value(),
        channel in any_channel()
    ) {
        let ctx = UserContext::new(Locale::FrFr);
        let formatter = (resolve_defaults(kind).formatter)(&config_for(kind));
        let first = formatter.format(&value, &Row::empty(), channel, &ctx);
        let second = formatter.format(&value, &Row::empty(), channel, &ctx);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn two_line_export_splits_back_into_its_parts(
        primary in "[A-Za-z0-9]{1,12}",
        secondary in "[A-Za-z0-9]{1,12}"
    ) {
        let ctx = UserContext::default();
        let cell = render(
            FieldKind::Text2,
            Value::pair(primary.as_str(), secondary.as_str()),
            DelimitedText,
            &ctx,
        );
        let joined = cell.display_text();
        prop_assert_eq!(joined.split_once(" - "), Some((primary.as_str(), secondary.as_str())));
    }

    #[test]
    fn nulls_never_render_content_for_numeric_hints(
        channel in any_channel(),
        decimals in 0_usize..6
    ) {
        let ctx = UserContext::default();
        for kind in [
            FieldKind::Integer,
            FieldKind::Float,
            FieldKind::Percent,
            FieldKind::Duration,
            FieldKind::Distance,
            FieldKind::Speed,
            FieldKind::Pressure,
        ] {
            let config = FormatterConfig { decimals, ..config_for(kind) };
            prop_assert_eq!(render_with(kind, &config, Value::Null, channel, &ctx), Cell::empty());
        }
    }
}
