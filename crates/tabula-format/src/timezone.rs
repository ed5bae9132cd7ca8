//! A closed set of user timezones.
//!
//! Offsets are computed from each zone's standard offset plus its daylight-saving rule (EU or
//! North American), which covers every zone in the set without a tz database.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timezone {
    #[default]
    #[serde(rename = "UTC")]
    Utc,
    #[serde(rename = "Europe/London")]
    EuropeLondon,
    #[serde(rename = "Europe/Berlin")]
    EuropeBerlin,
    #[serde(rename = "Europe/Paris")]
    EuropeParis,
    #[serde(rename = "Europe/Zurich")]
    EuropeZurich,
    #[serde(rename = "Europe/Helsinki")]
    EuropeHelsinki,
    #[serde(rename = "America/New_York")]
    AmericaNewYork,
    #[serde(rename = "America/Chicago")]
    AmericaChicago,
    #[serde(rename = "America/Denver")]
    AmericaDenver,
    #[serde(rename = "America/Los_Angeles")]
    AmericaLosAngeles,
    #[serde(rename = "Asia/Tokyo")]
    AsiaTokyo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DstRule {
    None,
    European,
    NorthAmerican,
}

impl Timezone {
    pub const ALL: [Timezone; 11] = [
        Timezone::Utc,
        Timezone::EuropeLondon,
        Timezone::EuropeBerlin,
        Timezone::EuropeParis,
        Timezone::EuropeZurich,
        Timezone::EuropeHelsinki,
        Timezone::AmericaNewYork,
        Timezone::AmericaChicago,
        Timezone::AmericaDenver,
        Timezone::AmericaLosAngeles,
        Timezone::AsiaTokyo,
    ];

    pub const fn iana_name(self) -> &'static str {
        match self {
            Timezone::Utc => "UTC",
            Timezone::EuropeLondon => "Europe/London",
            Timezone::EuropeBerlin => "Europe/Berlin",
            Timezone::EuropeParis => "Europe/Paris",
            Timezone::EuropeZurich => "Europe/Zurich",
            Timezone::EuropeHelsinki => "Europe/Helsinki",
            Timezone::AmericaNewYork => "America/New_York",
            Timezone::AmericaChicago => "America/Chicago",
            Timezone::AmericaDenver => "America/Denver",
            Timezone::AmericaLosAngeles => "America/Los_Angeles",
            Timezone::AsiaTokyo => "Asia/Tokyo",
        }
    }

    /// Exact (case-insensitive) IANA name lookup.
    pub fn parse(name: &str) -> Option<Timezone> {
        let name = name.trim();
        Timezone::ALL
            .into_iter()
            .find(|tz| tz.iana_name().eq_ignore_ascii_case(name))
    }

    /// Like [`Timezone::parse`] but resolves unknown names to UTC.
    pub fn from_iana(name: &str) -> Timezone {
        Timezone::parse(name).unwrap_or_else(|| {
            log::debug!("unknown timezone {name:?}; falling back to UTC");
            Timezone::Utc
        })
    }

    const fn standard_offset_minutes(self) -> i32 {
        match self {
            Timezone::Utc | Timezone::EuropeLondon => 0,
            Timezone::EuropeBerlin | Timezone::EuropeParis | Timezone::EuropeZurich => 60,
            Timezone::EuropeHelsinki => 120,
            Timezone::AmericaNewYork => -300,
            Timezone::AmericaChicago => -360,
            Timezone::AmericaDenver => -420,
            Timezone::AmericaLosAngeles => -480,
            Timezone::AsiaTokyo => 540,
        }
    }

    const fn dst_rule(self) -> DstRule {
        match self {
            Timezone::Utc | Timezone::AsiaTokyo => DstRule::None,
            Timezone::EuropeLondon
            | Timezone::EuropeBerlin
            | Timezone::EuropeParis
            | Timezone::EuropeZurich
            | Timezone::EuropeHelsinki => DstRule::European,
            Timezone::AmericaNewYork
            | Timezone::AmericaChicago
            | Timezone::AmericaDenver
            | Timezone::AmericaLosAngeles => DstRule::NorthAmerican,
        }
    }

    /// UTC offset in effect at `instant`.
    pub fn offset_at(self, instant: DateTime<Utc>) -> FixedOffset {
        let standard = self.standard_offset_minutes();
        let minutes = if self.observes_dst_at(instant, standard) {
            standard + 60
        } else {
            standard
        };
        FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Shift `instant` into this zone's wall-clock time.
    pub fn localize(self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset_at(instant))
    }

    fn observes_dst_at(self, instant: DateTime<Utc>, standard_minutes: i32) -> bool {
        let year = instant.year();
        let window = match self.dst_rule() {
            DstRule::None => None,
            // Last Sunday of March to last Sunday of October, both at 01:00 UTC.
            DstRule::European => last_weekday(year, 3, Weekday::Sun)
                .zip(last_weekday(year, 10, Weekday::Sun))
                .and_then(|(start, end)| Some((at_utc(start, 1, 0)?, at_utc(end, 1, 0)?))),
            // Second Sunday of March to first Sunday of November, both at 02:00 local time.
            DstRule::NorthAmerican => nth_weekday(year, 3, Weekday::Sun, 2)
                .zip(nth_weekday(year, 11, Weekday::Sun, 1))
                .and_then(|(start, end)| {
                    Some((
                        at_utc(start, 2, standard_minutes)?,
                        at_utc(end, 2, standard_minutes + 60)?,
                    ))
                }),
        };
        window.is_some_and(|(start, end)| instant >= start && instant < end)
    }
}

fn at_utc(date: NaiveDate, hour: u32, offset_minutes: i32) -> Option<DateTime<Utc>> {
    let local = date.and_hms_opt(hour, 0, 0)?.and_utc();
    Some(local - Duration::minutes(i64::from(offset_minutes)))
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let shift = (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
    NaiveDate::from_ymd_opt(year, month, 1 + shift + 7 * (n - 1))
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    let back = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    Some(last - Duration::days(i64::from(back)))
}
