//! Values a slot can hold.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A candidate value for a slot.
///
/// Human-readable formats (JSON) encode the value as a bare scalar: `null`, a number,
/// or a string. Binary formats use an explicit tag because they are not self-describing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChoiceValue {
    /// Explicitly unselected.
    None,
    Number(i64),
    Text(String),
}

impl ChoiceValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ChoiceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Parses user input: `none` is the sentinel, integers are numbers, anything else is text.
impl FromStr for ChoiceValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("null") {
            return Ok(Self::None);
        }
        Ok(s.parse::<i64>().map_or_else(|_| Self::Text(s.to_owned()), Self::Number))
    }
}

impl From<i64> for ChoiceValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ChoiceValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ChoiceValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Serialize, Deserialize)]
enum Tagged {
    None,
    Number(i64),
    Text(String),
}

impl Serialize for ChoiceValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            return match self {
                Self::None => serializer.serialize_none(),
                Self::Number(n) => serializer.serialize_i64(*n),
                Self::Text(s) => serializer.serialize_str(s),
            };
        }

        match self {
            Self::None => Tagged::None,
            Self::Number(n) => Tagged::Number(*n),
            Self::Text(s) => Tagged::Text(s.clone()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChoiceValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if !deserializer.is_human_readable() {
            return Ok(match Tagged::deserialize(deserializer)? {
                Tagged::None => Self::None,
                Tagged::Number(n) => Self::Number(n),
                Tagged::Text(s) => Self::Text(s),
            });
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = ChoiceValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, an integer or a string")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ChoiceValue::None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ChoiceValue::None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ChoiceValue::Number(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(ChoiceValue::Number)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        let whole = v.trunc();
        if whole == v && whole.abs() < 9.0e15 {
            Ok(ChoiceValue::Number(whole as i64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ChoiceValue::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ChoiceValue::Text(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_input() {
        assert_eq!("none".parse::<ChoiceValue>().unwrap(), ChoiceValue::None);
        assert_eq!("46".parse::<ChoiceValue>().unwrap(), ChoiceValue::Number(46));
        assert_eq!(
            "insert-basin".parse::<ChoiceValue>().unwrap(),
            ChoiceValue::text("insert-basin")
        );
    }

    #[test]
    fn display_is_the_stringified_form() {
        assert_eq!(ChoiceValue::Number(80).to_string(), "80");
        assert_eq!(ChoiceValue::None.to_string(), "none");
        assert_eq!(ChoiceValue::text("TAP-8202-CHROME").to_string(), "TAP-8202-CHROME");
    }
}
