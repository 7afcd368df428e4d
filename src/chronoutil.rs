use {
    crate::constants::HTTP_DATE_FORMAT,
    chrono::{
        format::{ParseError, ParseResult},
        naive::{NaiveDate, NaiveDateTime, NaiveTime},
        offset::FixedOffset,
        DateTime, TimeZone, Utc,
    },
    lazy_static::lazy_static,
    regex::Regex,
    std::str::FromStr,
};

lazy_static! {
    /// ISO 8601 timestamp format
    static ref ISO_8601_REGEX: Regex = Regex::new(
        r"(?x)^
        (?P<year>\d{4})-?
        (?P<month>0[1-9]|1[0-2])-?
        (?P<day>0[1-9]|[12][0-9]|3[01])
        T
        (?P<hour>[01][0-9]|2[0-3]):?
        (?P<minute>[0-5][0-9]):?
        (?P<second>[0-5][0-9]|6[0-1])
        (?P<offset>[-+][01][0-9]:?[0-5][0-9]|Z)$").unwrap();

    static ref INVALID: ParseError = DateTime::<FixedOffset>::from_str("").unwrap_err();
}

/// Format a timestamp as an HTTP-date for the `Date` header, e.g. `Tue, 27 Mar 2007 19:36:42 GMT`.
pub fn http_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(HTTP_DATE_FORMAT).to_string()
}

/// The current time as an HTTP-date.
pub fn current_http_date() -> String {
    http_date(&Utc::now())
}

/// Parse ISO 8601 timestamps in the basic (`20150830T123600Z`) or extended
/// (`2015-08-30T12:36:00+00:00`) forms.
pub trait ParseISO8601<T> {
    /// Parse `s`, returning a [`ParseError`] if it is not a valid ISO 8601 timestamp.
    fn parse_from_iso8601(s: &str) -> ParseResult<T>;
}

impl ParseISO8601<DateTime<FixedOffset>> for DateTime<FixedOffset> {
    fn parse_from_iso8601(s: &str) -> ParseResult<DateTime<FixedOffset>> {
        let cap = ISO_8601_REGEX.captures(s).ok_or(*INVALID)?;
        // Every group is a fixed-width run of digits, so integer parsing only fails on an impossible
        // regex match.
        let field = |name: &str| -> ParseResult<u32> {
            cap.name(name).and_then(|m| u32::from_str(m.as_str()).ok()).ok_or(*INVALID)
        };

        let year = field("year")? as i32;
        let naive_date = NaiveDate::from_ymd_opt(year, field("month")?, field("day")?).ok_or(*INVALID)?;

        // A leap second (60 or 61) is folded into the last second of the minute.
        let second = field("second")?;
        let (second, nano) = if second >= 60 {
            (59, 1_000_000_000)
        } else {
            (second, 0)
        };
        let naive_time =
            NaiveTime::from_hms_nano_opt(field("hour")?, field("minute")?, second, nano).ok_or(*INVALID)?;
        let naive_dt = NaiveDateTime::new(naive_date, naive_time);

        let offset_str = cap.name("offset").map(|m| m.as_str()).ok_or(*INVALID)?;
        let offset_secs = if offset_str == "Z" {
            0
        } else {
            let offset_condensed = offset_str.replace(':', "");
            // Must be [+-]HHMM at this point
            let (sign_str, hm) = offset_condensed.split_at(1);
            let (hour_off_str, minute_off_str) = hm.split_at(2);

            let sign = if sign_str == "-" {
                -1
            } else {
                1
            };

            let hour = i32::from_str(hour_off_str).map_err(|_| *INVALID)?;
            let min = i32::from_str(minute_off_str).map_err(|_| *INVALID)?;
            sign * (hour * 3600 + min * 60)
        };

        let offset = FixedOffset::east_opt(offset_secs).ok_or(*INVALID)?;
        offset.from_local_datetime(&naive_dt).single().ok_or(*INVALID)
    }
}

impl ParseISO8601<DateTime<Utc>> for DateTime<Utc> {
    fn parse_from_iso8601(s: &str) -> ParseResult<DateTime<Utc>> {
        DateTime::<FixedOffset>::parse_from_iso8601(s).map(|dt| dt.with_timezone(&Utc))
    }
}
