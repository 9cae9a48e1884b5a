use alloc::string::String;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use crate::codec::{Codec, CodecError};
use crate::info::{TypeIdent, Typed};
use crate::{FromValue, Mappable, Value, View};

/// Ancestor name shared by the `chrono` date-time types.
pub const DATE_TIME_INTERFACE: &str = "DateTimeInterface";

// -----------------------------------------------------------------------------
// Types

impl Typed for DateTime<FixedOffset> {
    #[inline]
    fn type_ident() -> TypeIdent {
        TypeIdent::new("DateTime").with_ancestors(&[DATE_TIME_INTERFACE])
    }
}

impl Typed for DateTime<Utc> {
    #[inline]
    fn type_ident() -> TypeIdent {
        TypeIdent::new("DateTime<Utc>").with_ancestors(&[DATE_TIME_INTERFACE])
    }
}

macro_rules! impl_date_time {
    ($($ty:ty),*) => {$(
        impl Mappable for $ty {
            #[inline]
            fn type_ident(&self) -> TypeIdent {
                <Self as Typed>::type_ident()
            }

            #[inline]
            fn view(&self) -> View<'_> {
                View::Object
            }

            #[inline]
            fn as_display(&self) -> Option<&dyn core::fmt::Display> {
                Some(self)
            }
        }
    )*};
}

impl_date_time!(DateTime<FixedOffset>, DateTime<Utc>);

impl FromValue for DateTime<FixedOffset> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(object) => match object.take::<Self>() {
                Ok(date) => Some(date),
                Err(object) => object.take::<DateTime<Utc>>().ok().map(|date| date.fixed_offset()),
            },
            Value::String(text) => parse(&text).ok(),
            _ => None,
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> Option<Self> {
        DateTime::<FixedOffset>::from_value(value).map(|date| date.with_timezone(&Utc))
    }
}

fn parse(text: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).or_else(|_| DateTime::parse_from_rfc2822(text))
}

// -----------------------------------------------------------------------------
// DateTimeCodec

/// Reads RFC 3339 (or RFC 2822) text into `chrono` date-times and writes
/// RFC 3339 text, with fractional seconds only when present.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateTimeCodec;

impl Codec for DateTimeCodec {
    fn encode(&self, value: &dyn Mappable, _: &str) -> String {
        let value = value.unwrapped();
        if let Some(date) = value.downcast_ref::<DateTime<FixedOffset>>() {
            date.to_rfc3339_opts(SecondsFormat::AutoSi, false)
        } else if let Some(date) = value.downcast_ref::<DateTime<Utc>>() {
            date.to_rfc3339_opts(SecondsFormat::AutoSi, false)
        } else {
            String::new()
        }
    }

    fn decode(&self, raw: &serde_json::Value, type_name: &str) -> Result<Value, CodecError> {
        let text = raw
            .as_str()
            .ok_or_else(|| CodecError::unexpected(type_name, raw))?;
        let date = parse(text).map_err(CodecError::custom)?;

        if type_name == <DateTime<Utc> as Typed>::type_ident().name() {
            Ok(Value::object(date.with_timezone(&Utc)))
        } else {
            Ok(Value::object(date))
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_by_requested_name() {
        let codec = DateTimeCodec;
        let raw = json!("2020-12-02T07:19:16+07:00");

        let local = codec.decode(&raw, "DateTime").unwrap();
        let local = local.downcast_ref::<DateTime<FixedOffset>>().unwrap();
        assert_eq!(local.offset().local_minus_utc(), 7 * 3600);

        let utc = codec.decode(&raw, "DateTime<Utc>").unwrap();
        let utc = utc.downcast_ref::<DateTime<Utc>>().unwrap();
        assert_eq!(utc.to_rfc3339(), "2020-12-02T00:19:16+00:00");

        assert!(codec.decode(&json!(12), "DateTime").is_err());
        assert!(codec.decode(&json!("yesterday"), "DateTime").is_err());
    }

    #[test]
    fn encode_round_trips() {
        let codec = DateTimeCodec;
        let date = DateTime::parse_from_rfc3339("2020-12-02T07:19:16+07:00").unwrap();
        assert_eq!(codec.encode(&date, "DateTime"), "2020-12-02T07:19:16+07:00");

        let date = DateTime::parse_from_rfc3339("2020-12-02T07:19:16.250Z").unwrap();
        assert_eq!(codec.encode(&date, "DateTime"), "2020-12-02T07:19:16.250+00:00");
    }
}
