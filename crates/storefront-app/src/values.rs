// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Parsing and formatting for the loosely typed values the shop API and the
//! form inputs carry: money, dates and integers.

use time::Date;
use time::macros::format_description;

/// Parses a money amount into cents.
///
/// Accepts `10`, `10.5`, `10,50`, `1.500,00` and an optional `R$` prefix.
/// A comma is always the decimal separator; a lone dot followed by at most
/// two digits is a decimal point, otherwise dots group thousands.
pub fn parse_money(raw: &str) -> Option<i64> {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("R$") {
        text = rest.trim_start();
    }
    if text.is_empty() || text.starts_with('-') {
        return None;
    }

    let normalized: String = if text.contains(',') {
        text.chars().filter(|ch| *ch != '.').collect()
    } else if let Some(dot) = text.rfind('.') {
        let decimals = text.len() - dot - 1;
        if text.matches('.').count() == 1 && decimals <= 2 {
            text.replacen('.', ",", 1)
        } else {
            text.chars().filter(|ch| *ch != '.').collect()
        }
    } else {
        text.to_owned()
    };

    let (whole, fraction) = match normalized.split_once(',') {
        Some((whole, fraction)) => (whole, fraction),
        None => (normalized.as_str(), ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.len() > 2
        || !whole.chars().all(|ch| ch.is_ascii_digit())
        || !fraction.chars().all(|ch| ch.is_ascii_digit())
    {
        return None;
    }

    let units: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };
    units.checked_mul(100)?.checked_add(cents)
}

/// Formats cents the way the shop displays prices: `R$ 1.500,00`.
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let units = (abs / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (index, ch) in units.chars().enumerate() {
        if index > 0 && (units.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}R$ {grouped},{:02}", abs % 100)
}

/// Formats cents as a plain decimal (`1500.00`), the form the API stores.
pub fn format_decimal(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Parses `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(raw: &str) -> Option<Date> {
    let text = raw.trim();
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .or_else(|_| Date::parse(text, format_description!("[day]/[month]/[year]")))
        .ok()
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub fn format_date_br(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

pub mod integer {
    use serde::Deserializer;
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IntegerVisitor;

    impl Visitor<'_> for IntegerVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value).map_err(|_| E::custom(format!("integer {value} is out of range")))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<i64, E> {
            super::parse_integer(value)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        deserializer.deserialize_any(IntegerVisitor)
    }
}

pub mod money {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    struct MoneyVisitor;

    impl Visitor<'_> for MoneyVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative amount as a number or decimal string")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            if value < 0 {
                return Err(E::invalid_value(de::Unexpected::Signed(value), &self));
            }
            value
                .checked_mul(100)
                .ok_or_else(|| E::custom(format!("amount {value} is out of range")))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value)
                .ok()
                .and_then(|units| units.checked_mul(100))
                .ok_or_else(|| E::custom(format!("amount {value} is out of range")))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
            if !value.is_finite() || value < 0.0 || value > (i64::MAX / 100) as f64 {
                return Err(E::invalid_value(de::Unexpected::Float(value), &self));
            }
            Ok((value * 100.0).round() as i64)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<i64, E> {
            super::parse_money(value)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_decimal(*cents))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

pub mod date {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use time::Date;

    pub(super) struct DateVisitor;

    impl Visitor<'_> for DateVisitor {
        type Value = Date;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a date formatted as YYYY-MM-DD")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Date, E> {
            super::parse_date(value)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        deserializer.deserialize_str(DateVisitor)
    }
}

/// Optional dates; `null` and `""` both mean "no date".
pub mod optional_date {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use time::Date;

    struct OptionalDateVisitor;

    impl<'de> Visitor<'de> for OptionalDateVisitor {
        type Value = Option<Date>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a date formatted as YYYY-MM-DD, an empty string, or null")
        }

        fn visit_none<E: de::Error>(self) -> Result<Option<Date>, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Option<Date>, E> {
            Ok(None)
        }

        fn visit_some<D: serde::Deserializer<'de>>(
            self,
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Option<Date>, E> {
            if value.trim().is_empty() {
                return Ok(None);
            }
            super::date::DateVisitor.visit_str(value).map(Some)
        }
    }

    pub fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&super::format_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        deserializer.deserialize_any(OptionalDateVisitor)
    }
}
