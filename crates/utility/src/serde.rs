pub mod date_time {
    use core::fmt;

    use chrono::{NaiveDate, NaiveDateTime, ParseResult};
    use schemars::gen::SchemaGenerator;
    use schemars::schema::{InstanceType, Schema, SchemaObject};
    use serde::{
        de::{self, Unexpected, Visitor},
        Deserializer, Serializer,
    };

    pub const DATE_FORMAT: &str = "%Y-%m-%d";
    pub const TIME_FORMAT: &str = "%H:%M:%S";
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Trip logs carry fractional seconds in some years (`2018-01-01 00:16:33.1660`)
    /// and whole seconds in others; `%.f` accepts both.
    const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn parse_timestamp(value: &str) -> ParseResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_PARSE_FORMAT)
    }

    /// Parses a calendar date in the `YYYY-MM-DD` format. Looser spellings such as
    /// `2017-7-4` or `+2017-7-04` are rejected, even though chrono would accept them.
    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        let is_strict = value.len() == 10
            && value.bytes().enumerate().all(|(index, byte)| match index {
                4 | 7 => byte == b'-',
                _ => byte.is_ascii_digit(),
            });
        if !is_strict {
            return None;
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
    }

    pub fn deserialize_timestamp<'de, D>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TimestampVisitor;

        impl<'de> Visitor<'de> for TimestampVisitor {
            type Value = NaiveDateTime;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string in the format YYYY-MM-DD HH:MM:SS")
            }

            fn visit_str<E>(self, value: &str) -> Result<NaiveDateTime, E>
            where
                E: de::Error,
            {
                parse_timestamp(value).map_err(|_| {
                    de::Error::invalid_value(Unexpected::Str(value), &self)
                })
            }
        }

        deserializer.deserialize_str(TimestampVisitor)
    }

    pub fn serialize_timestamp<S>(
        timestamp: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn timestamp_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            format: Some("YYYY-MM-DD HH:MM:SS".to_owned()),
            ..Default::default()
        }
        .into()
    }

    pub fn date_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            format: Some("YYYY-MM-DD".to_owned()),
            ..Default::default()
        }
        .into()
    }
}

/// `Yes`/`No` flags as found in station registries.
pub mod yes_no {
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(flag) if flag.eq_ignore_ascii_case("yes") => Ok(Some(true)),
            Some(flag) if flag.eq_ignore_ascii_case("no") => Ok(Some(false)),
            Some(other) => Err(Error::custom(format!(
                "expected `Yes` or `No`, found `{}`",
                other
            ))),
        }
    }
}
