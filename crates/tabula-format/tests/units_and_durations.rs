use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use tabula_format::{
    convert_distance, convert_pressure, convert_speed, duration_minutes, format_duration,
    DistanceUnit, PressureUnit, SpeedUnit, Timezone,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn converts_canonical_units() {
    assert!(close(convert_distance(1.609344, DistanceUnit::Miles), 1.0));
    assert!(close(convert_distance(1.852, DistanceUnit::NauticalMiles), 1.0));
    assert!(close(convert_distance(2.5, DistanceUnit::Meters), 2500.0));
    assert!(close(convert_speed(36.0, SpeedUnit::MetersPerSecond), 10.0));
    assert!(close(convert_speed(1.852, SpeedUnit::Knots), 1.0));
    assert!(close(convert_pressure(2.0, PressureUnit::Kilopascal), 200.0));
    assert!(close(convert_pressure(1.0, PressureUnit::Psi), 14.503773773));
}

#[test]
fn parses_unit_names_and_suffixes() {
    assert_eq!(DistanceUnit::parse("MI"), Some(DistanceUnit::Miles));
    assert_eq!(
        DistanceUnit::parse(DistanceUnit::NauticalMiles.suffix()),
        Some(DistanceUnit::NauticalMiles)
    );
    assert_eq!(SpeedUnit::parse("km/h"), Some(SpeedUnit::KilometersPerHour));
    assert_eq!(PressureUnit::parse("kPa"), Some(PressureUnit::Kilopascal));
    assert_eq!(DistanceUnit::parse("furlong"), None);
}

#[test]
fn durations_render_hours_minutes_and_days() {
    assert_eq!(format_duration(0), "00:00");
    assert_eq!(format_duration(59), "00:00");
    assert_eq!(format_duration(3_665), "01:01");
    assert_eq!(format_duration(86_399), "23:59");
    assert_eq!(format_duration(86_400), "1d 00:00");
    assert_eq!(format_duration(90_000), "1d 01:00");
    assert_eq!(format_duration(-5), "");
}

#[test]
fn duration_minutes_truncate() {
    assert_eq!(duration_minutes(3_665), Some(61));
    assert_eq!(duration_minutes(59), Some(0));
    assert_eq!(duration_minutes(-1), None);
}

#[test]
fn timezone_names_resolve_with_utc_fallback() {
    assert_eq!(Timezone::from_iana("europe/berlin"), Timezone::EuropeBerlin);
    assert_eq!(Timezone::from_iana("Mars/Olympus_Mons"), Timezone::Utc);
    for tz in Timezone::ALL {
        assert_eq!(Timezone::parse(tz.iana_name()), Some(tz));
    }
}

#[test]
fn european_offsets_follow_daylight_saving() {
    let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
    assert_eq!(Timezone::EuropeBerlin.offset_at(winter).local_minus_utc(), 3600);
    assert_eq!(Timezone::EuropeBerlin.offset_at(summer).local_minus_utc(), 7200);
    assert_eq!(Timezone::EuropeLondon.offset_at(summer).local_minus_utc(), 3600);

    // 2024-03-31 01:00 UTC is the switch.
    let before = Utc.with_ymd_and_hms(2024, 3, 31, 0, 59, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2024, 3, 31, 1, 0, 0).unwrap();
    assert_eq!(Timezone::EuropeParis.offset_at(before).local_minus_utc(), 3600);
    assert_eq!(Timezone::EuropeParis.offset_at(after).local_minus_utc(), 7200);
}

#[test]
fn north_american_offsets_follow_daylight_saving() {
    // 2024-03-10 02:00 EST == 07:00 UTC.
    let before = Utc.with_ymd_and_hms(2024, 3, 10, 6, 59, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2024, 3, 10, 7, 0, 0).unwrap();
    assert_eq!(Timezone::AmericaNewYork.offset_at(before).local_minus_utc(), -5 * 3600);
    assert_eq!(Timezone::AmericaNewYork.offset_at(after).local_minus_utc(), -4 * 3600);

    let utc = Utc.with_ymd_and_hms(2024, 12, 1, 20, 0, 0).unwrap();
    let local = Timezone::AmericaLosAngeles.localize(utc);
    assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    assert_eq!(local.format("%H:%M").to_string(), "12:00");
    assert_eq!(Timezone::AsiaTokyo.offset_at(after).local_minus_utc(), 9 * 3600);
}
