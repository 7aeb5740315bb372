use serde::{Serialize, Serializer};
use time::Date;
use time::Month;
use time::macros::format_description;

use super::reader::text_field;

/// Manufacturing date code: `YYMMDD` followed by an optional vendor lot code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCode {
    /// Parsed calendar date; `None` when the digits are not a valid date.
    #[serde(serialize_with = "serialize_date")]
    pub date: Option<Date>,
    /// Trimmed text as stored in the image.
    pub raw: String,
    /// Vendor lot code (last two characters).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lot: String,
}

impl DateCode {
    pub fn parse(bytes: &[u8]) -> Self {
        let raw = text_field(bytes);
        let date = bytes.get(..6).and_then(parse_yymmdd);
        let lot = bytes.get(6..).map(text_field).unwrap_or_default();
        Self { date, raw, lot }
    }
}

fn parse_yymmdd(digits: &[u8]) -> Option<Date> {
    let pair = |at: usize| -> Option<u8> {
        let tens = char::from(*digits.get(at)?).to_digit(10)?;
        let ones = char::from(*digits.get(at + 1)?).to_digit(10)?;
        u8::try_from(tens * 10 + ones).ok()
    };
    let year = 2000 + i32::from(pair(0)?);
    let month = Month::try_from(pair(2)?).ok()?;
    Date::from_calendar_date(year, month, pair(4)?).ok()
}

fn serialize_date<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => {
            let text = date
                .format(format_description!("[year]-[month]-[day]"))
                .map_err(<S::Error as serde::ser::Error>::custom)?;
            serializer.serialize_str(&text)
        }
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::DateCode;
    use time::{Date, Month};

    #[test]
    fn parses_date_and_lot() {
        let code = DateCode::parse(b"19121801");
        assert_eq!(
            code.date,
            Some(Date::from_calendar_date(2019, Month::December, 18).unwrap())
        );
        assert_eq!(code.lot, "01");
        let value = serde_json::to_value(&code).unwrap();
        assert_eq!(value["date"], "2019-12-18");
    }

    #[test]
    fn invalid_date_keeps_raw_text() {
        let code = DateCode::parse(b"191399  ");
        assert!(code.date.is_none());
        assert_eq!(code.raw, "191399");
        let value = serde_json::to_value(&code).unwrap();
        assert!(value["date"].is_null());
    }
}
