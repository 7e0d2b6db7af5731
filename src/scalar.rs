//! Scalar value wrapper with proper escaping and style support.

use crate::lex::split_properties;
use std::fmt;

/// Style of scalar representation in YAML
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    /// Plain scalar (no quotes)
    Plain,
    /// Single-quoted scalar
    SingleQuoted,
    /// Double-quoted scalar
    DoubleQuoted,
}

impl ScalarStyle {
    /// The style an existing value is written in.
    pub fn of(text: &str) -> ScalarStyle {
        if text.starts_with('"') {
            ScalarStyle::DoubleQuoted
        } else if text.starts_with('\'') {
            ScalarStyle::SingleQuoted
        } else {
            ScalarStyle::Plain
        }
    }
}

/// Type of a scalar value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    /// String value
    String,
    /// Integer value
    Integer,
    /// Float value
    Float,
    /// Boolean value
    Boolean,
    /// Null value
    Null,
}

/// A scalar value with metadata about its style and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarValue {
    /// The actual value
    value: String,
    /// The style to use when rendering
    style: ScalarStyle,
    /// The type of the scalar
    scalar_type: ScalarType,
}

impl ScalarValue {
    /// Create a new string scalar with automatic style detection
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let style = Self::detect_style(&value);
        Self {
            value,
            style,
            scalar_type: ScalarType::String,
        }
    }

    /// Create a single-quoted scalar
    pub fn single_quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            style: ScalarStyle::SingleQuoted,
            scalar_type: ScalarType::String,
        }
    }

    /// Create a double-quoted scalar
    pub fn double_quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            style: ScalarStyle::DoubleQuoted,
            scalar_type: ScalarType::String,
        }
    }

    /// Create a null scalar
    pub fn null() -> Self {
        Self {
            value: "null".to_string(),
            style: ScalarStyle::Plain,
            scalar_type: ScalarType::Null,
        }
    }

    /// Interpret text the way YAML reads a plain scalar: booleans, null
    /// (`null`, `~` or `nil`) and numbers get their type, anything else is a
    /// string.
    pub fn parse_plain(text: &str) -> Self {
        let typed = |value: &str, scalar_type| Self {
            value: value.to_string(),
            style: ScalarStyle::Plain,
            scalar_type,
        };
        match text {
            "true" | "True" | "TRUE" => return typed("true", ScalarType::Boolean),
            "false" | "False" | "FALSE" => return typed("false", ScalarType::Boolean),
            "null" | "Null" | "NULL" | "~" | "nil" => return Self::null(),
            _ => {}
        }
        if text.parse::<i64>().is_ok() {
            typed(text, ScalarType::Integer)
        } else if text.parse::<f64>().is_ok() && text.chars().any(|c| c.is_ascii_digit()) {
            typed(text, ScalarType::Float)
        } else {
            Self::new(text)
        }
    }

    /// Get the raw value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the style
    pub fn style(&self) -> ScalarStyle {
        self.style
    }

    /// Get the type
    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    /// Detect the appropriate style for a value
    fn detect_style(value: &str) -> ScalarStyle {
        if value.contains(['\n', '\t']) || value.chars().any(char::is_control) {
            ScalarStyle::DoubleQuoted
        } else if Self::needs_quoting(value) {
            // Prefer single quotes if no single quotes in value
            if !value.contains('\'') {
                ScalarStyle::SingleQuoted
            } else {
                ScalarStyle::DoubleQuoted
            }
        } else {
            ScalarStyle::Plain
        }
    }

    /// Check if a value needs quoting when treated as a string
    pub(crate) fn needs_quoting(value: &str) -> bool {
        if value.is_empty() {
            return true;
        }

        // YAML keywords that would be read as another type
        let lowercase = value.to_lowercase();
        if matches!(
            lowercase.as_str(),
            "true" | "false" | "yes" | "no" | "on" | "off" | "null" | "~"
        ) {
            return true;
        }

        if value.parse::<f64>().is_ok() || value.parse::<i64>().is_ok() {
            return true;
        }

        for ch in value.chars() {
            match ch {
                ':' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@' | '`' => {
                    return true
                }
                _ => {}
            }
        }

        if let Some(first) = value.chars().next() {
            if matches!(first, '-' | '?' | '[' | ']' | '{' | '}' | ',') {
                return true;
            }
        }

        // Leading/trailing whitespace needs quotes
        value != value.trim()
    }

    /// Render the scalar as a YAML string with proper escaping
    pub fn to_yaml_string(&self) -> String {
        match self.scalar_type {
            ScalarType::String => match self.style {
                ScalarStyle::Plain if Self::needs_quoting(&self.value) => self.to_single_quoted(),
                ScalarStyle::Plain => self.value.clone(),
                ScalarStyle::SingleQuoted => self.to_single_quoted(),
                ScalarStyle::DoubleQuoted => self.to_double_quoted(),
            },
            ScalarType::Integer | ScalarType::Float | ScalarType::Boolean | ScalarType::Null => {
                self.value.clone()
            }
        }
    }

    /// Render the scalar to take the place of `old`, an existing value.
    ///
    /// Anchor and tag properties of `old` are kept. Strings keep the quote
    /// style of `old` when it was quoted; otherwise they are written plain
    /// unless that would change their meaning.
    pub fn render_replacing(&self, old: &str) -> String {
        let (properties, old_content) = split_properties(old);
        let rendered = match (self.scalar_type, ScalarStyle::of(old_content)) {
            (ScalarType::String, ScalarStyle::DoubleQuoted) => self.to_double_quoted(),
            (ScalarType::String, ScalarStyle::SingleQuoted) if !self.value.contains('\n') => {
                self.to_single_quoted()
            }
            _ => self.to_yaml_string(),
        };
        // `&default` alone has no separator before the new content
        let separator = if properties.is_empty() || properties.ends_with([' ', '\t']) {
            ""
        } else {
            " "
        };
        format!("{}{}{}", properties, separator, rendered)
    }

    /// Convert to single-quoted string
    fn to_single_quoted(&self) -> String {
        // Escape single quotes by doubling them
        let escaped = self.value.replace('\'', "''");
        format!("'{}'", escaped)
    }

    /// Convert to double-quoted string
    fn to_double_quoted(&self) -> String {
        let mut result = String::from("\"");
        for ch in self.value.chars() {
            match ch {
                '"' => result.push_str("\\\""),
                '\\' => result.push_str("\\\\"),
                '\n' => result.push_str("\\n"),
                '\r' => result.push_str("\\r"),
                '\t' => result.push_str("\\t"),
                '\x08' => result.push_str("\\b"),
                '\x0C' => result.push_str("\\f"),
                c if c.is_control() => {
                    result.push_str(&format!("\\x{:02x}", c as u32));
                }
                c => result.push(c),
            }
        }
        result.push('"');
        result
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_yaml_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&String> for ScalarValue {
    fn from(value: &String) -> Self {
        Self::new(value.as_str())
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        Self {
            value: value.to_string(),
            style: ScalarStyle::Plain,
            scalar_type: ScalarType::Integer,
        }
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self {
            value: value.to_string(),
            style: ScalarStyle::Plain,
            scalar_type: ScalarType::Integer,
        }
    }
}

impl From<u64> for ScalarValue {
    fn from(value: u64) -> Self {
        Self {
            value: value.to_string(),
            style: ScalarStyle::Plain,
            scalar_type: ScalarType::Integer,
        }
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self {
            value: value.to_string(),
            style: ScalarStyle::Plain,
            scalar_type: ScalarType::Float,
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self {
            value: if value { "true" } else { "false" }.to_string(),
            style: ScalarStyle::Plain,
            scalar_type: ScalarType::Boolean,
        }
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::null, Into::into)
    }
}
