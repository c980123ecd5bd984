//! Lexical spaces of the XML Schema built-in types used by FES 2.0

use crate::error::{Error, Result, ValidationError};
use crate::model::Value;
use crate::names;
use crate::namespaces::QName;
use crate::registry::XmlType;
use chrono::{FixedOffset, NaiveDateTime};
use std::fmt;

// ============================================================================
// xs:dateTime
// ============================================================================

/// An `xs:dateTime` value; the timezone is optional in XSD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlDateTime {
    /// Local date and time
    pub value: NaiveDateTime,
    /// Timezone offset, if one was given
    pub offset: Option<FixedOffset>,
}

impl XmlDateTime {
    /// Parse the XSD lexical form `YYYY-MM-DDThh:mm:ss[.s+][Z|(+|-)hh:mm]`
    pub fn parse(lexical: &str) -> Result<Self> {
        let lexical = lexical.trim();
        let invalid = || Error::Value(format!("'{}' is not a valid dateTime value", lexical));

        let (local, offset) = if let Some(rest) = lexical.strip_suffix('Z') {
            (rest, FixedOffset::east_opt(0))
        } else if let Some(tz) = timezone_suffix(lexical) {
            let rest = &lexical[..lexical.len() - tz.len()];
            let sign = if tz.starts_with('-') { -1 } else { 1 };
            let hours: i32 = tz[1..3].parse().map_err(|_| invalid())?;
            let minutes: i32 = tz[4..6].parse().map_err(|_| invalid())?;
            if hours > 14 || minutes > 59 || (hours == 14 && minutes != 0) {
                return Err(invalid());
            }
            let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)?;
            (rest, Some(offset))
        } else {
            (lexical, None)
        };

        let value = NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.f").map_err(|_| invalid())?;
        Ok(Self { value, offset })
    }

    /// Canonical lexical form
    pub fn to_lexical(&self) -> String {
        let local = self.value.format("%Y-%m-%dT%H:%M:%S%.f").to_string();
        match self.offset {
            Some(offset) if offset.local_minus_utc() == 0 => format!("{}Z", local),
            Some(offset) => format!("{}{}", local, offset),
            None => local,
        }
    }
}

fn timezone_suffix(lexical: &str) -> Option<&str> {
    if lexical.len() <= 6 {
        return None;
    }
    lexical.get(lexical.len() - 6..).filter(|tz| is_offset_suffix(tz))
}

fn is_offset_suffix(tz: &str) -> bool {
    let bytes = tz.as_bytes();
    bytes.len() == 6
        && (bytes[0] == b'+' || bytes[0] == b'-')
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_digit()
        && bytes[3] == b':'
        && bytes[4].is_ascii_digit()
        && bytes[5].is_ascii_digit()
}

impl fmt::Display for XmlDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_lexical())
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Convert an XSD boolean string to bool
pub fn boolean_to_rust(value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::Value(format!("'{}' is not a valid boolean value", other))),
    }
}

/// Convert an XSD double string to f64
pub fn double_to_rust(value: &str) -> Result<f64> {
    match value.trim() {
        "NaN" => Ok(f64::NAN),
        "INF" | "+INF" => Ok(f64::INFINITY),
        "-INF" => Ok(f64::NEG_INFINITY),
        // Rust accepts "inf" and "infinity", XSD does not
        other if other.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => {
            Err(Error::Value(format!("'{}' is not a valid double value", other)))
        }
        other => other
            .parse::<f64>()
            .map_err(|_| Error::Value(format!("'{}' is not a valid double value", other))),
    }
}

/// Convert an f64 to its XSD double string
pub fn rust_to_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        value.to_string()
    }
}

fn any_uri_to_rust(value: &str) -> Result<String> {
    let value = value.trim();
    if value.contains(['\n', '\r', '\t']) {
        return Err(Error::Validation(ValidationError::new(
            "anyURI cannot contain newline or tab characters",
        )));
    }
    // Absolute references must parse as URLs; relative ones are taken as is.
    let scheme_end = value.find(':');
    let path_start = value.find(['/', '#', '?']);
    if let Some(colon) = scheme_end {
        if path_start.map_or(true, |p| colon < p) {
            url::Url::parse(value)?;
        }
    }
    Ok(value.to_string())
}

/// Parse a lexical value of a built-in type.
///
/// Only the lexical space is checked here; value-space facets such as the
/// lower bound of `positiveInteger` are checked by [`validate`].
pub fn parse(xml_type: XmlType, lexical: &str) -> Result<Value> {
    Ok(match xml_type {
        XmlType::String => Value::String(lexical.to_string()),
        XmlType::Boolean => Value::Boolean(boolean_to_rust(lexical)?),
        XmlType::Double => Value::Double(double_to_rust(lexical)?),
        XmlType::QName => Value::QName(QName::parse_lexical(lexical)?),
        XmlType::DateTime => Value::DateTime(XmlDateTime::parse(lexical)?),
        XmlType::AnyUri => Value::String(any_uri_to_rust(lexical)?),
        XmlType::PositiveInteger => {
            let trimmed = lexical.trim();
            let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                // xs:positiveInteger is unbounded, the model stores it as u64
                let value = digits.parse::<u64>().map_err(|_| {
                    Error::Value(format!("positiveInteger '{}' exceeds the supported maximum {}", lexical, u64::MAX))
                })?;
                Value::Integer(value)
            } else {
                return Err(Error::Value(format!("'{}' is not a valid positiveInteger value", lexical)));
            }
        }
        XmlType::NcName => {
            let trimmed = lexical.trim();
            names::validate_ncname(trimmed)?;
            Value::String(trimmed.to_string())
        }
    })
}

/// Check value-space constraints of a built-in type
pub fn validate(xml_type: XmlType, value: &Value) -> Result<()> {
    match (xml_type, value) {
        (XmlType::PositiveInteger, Value::Integer(0)) => Err(Error::Validation(
            ValidationError::new("The value '0' must be greater than or equal to 1")
                .with_component("positiveInteger"),
        )),
        (XmlType::NcName, Value::String(s)) => names::validate_ncname(s),
        (XmlType::QName, Value::QName(q)) => names::validate_ncname(&q.local_name),
        (XmlType::AnyUri, Value::String(s)) => any_uri_to_rust(s).map(|_| ()),
        _ if accepts(xml_type, value) => Ok(()),
        _ => Err(Error::Type(format!(
            "expected {}, found {}",
            xml_type.name(),
            value.kind()
        ))),
    }
}

/// True when the value has the Rust representation of the built-in type
pub fn accepts(xml_type: XmlType, value: &Value) -> bool {
    matches!(
        (xml_type, value),
        (XmlType::String | XmlType::AnyUri | XmlType::NcName, Value::String(_))
            | (XmlType::Boolean, Value::Boolean(_))
            | (XmlType::Double, Value::Double(_))
            | (XmlType::QName, Value::QName(_))
            | (XmlType::DateTime, Value::DateTime(_))
            | (XmlType::PositiveInteger, Value::Integer(_))
    )
}

/// Lexical form of a built-in value
pub fn to_lexical(xml_type: XmlType, value: &Value) -> Result<String> {
    match (xml_type, value) {
        (XmlType::String | XmlType::AnyUri | XmlType::NcName, Value::String(s)) => Ok(s.clone()),
        (XmlType::Boolean, Value::Boolean(b)) => Ok(b.to_string()),
        (XmlType::Double, Value::Double(d)) => Ok(rust_to_double(*d)),
        (XmlType::QName, Value::QName(q)) => Ok(q.to_lexical()),
        (XmlType::DateTime, Value::DateTime(dt)) => Ok(dt.to_lexical()),
        (XmlType::PositiveInteger, Value::Integer(i)) => Ok(i.to_string()),
        _ => Err(Error::Type(format!(
            "expected {}, found {}",
            xml_type.name(),
            value.kind()
        ))),
    }
}
