//! Values of the style-sheet script language.
//!
//! Numbers remember the text they were written as (`12px/30px` in a
//! `font` shorthand, `1e3`, `.5em`) so that a value copied straight from
//! the source renders the way the author wrote it. A number read through a
//! variable loses that text: see [`Value::into_canonical`].

use std::fmt;

/// Fractional digits kept when rendering a number.
pub const PRECISION: usize = 5;

/// A number with an optional unit and the text it was parsed from.
#[derive(Clone, Debug, PartialEq)]
pub struct Number {
    pub amount: f64,
    pub unit: Option<String>,
    /// Source text; rendered verbatim while present.
    pub original: Option<String>,
}

impl Number {
    pub fn new(amount: f64) -> Self {
        Number {
            amount,
            unit: None,
            original: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = Some(original.into());
        self
    }

    /// True when a non-empty original text is attached.
    #[inline]
    pub fn has_original(&self) -> bool {
        self.original.as_deref().is_some_and(|text| !text.is_empty())
    }

    fn write_amount(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = format!("{:.*}", PRECISION, self.amount);
        let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
        match trimmed {
            "-0" | "" => f.write_str("0"),
            text => f.write_str(text),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(original) = self.original.as_deref().filter(|text| !text.is_empty()) {
            return f.write_str(original);
        }
        self.write_amount(f)?;
        if let Some(unit) = &self.unit {
            f.write_str(unit)?;
        }
        Ok(())
    }
}

/// Separator between list items.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListSeparator {
    Space,
    Comma,
}

impl ListSeparator {
    pub const fn as_str(self) -> &'static str {
        match self {
            ListSeparator::Space => " ",
            ListSeparator::Comma => ", ",
        }
    }
}

/// Script value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    /// String value; `quoted` strings render with double quotes.
    Str { text: String, quoted: bool },
    List {
        items: Vec<Value>,
        separator: ListSeparator,
    },
}

impl Value {
    /// Unitless number.
    pub fn number(amount: f64) -> Self {
        Value::Number(Number::new(amount))
    }

    /// Number with a unit.
    pub fn dimension(amount: f64, unit: impl Into<String>) -> Self {
        Value::Number(Number::new(amount).with_unit(unit))
    }

    /// Unquoted string (identifiers, keywords, plain CSS function calls).
    pub fn ident(text: impl Into<String>) -> Self {
        Value::Str {
            text: text.into(),
            quoted: false,
        }
    }

    /// Quoted string.
    pub fn quoted(text: impl Into<String>) -> Self {
        Value::Str {
            text: text.into(),
            quoted: true,
        }
    }

    pub fn list(items: Vec<Value>, separator: ListSeparator) -> Self {
        Value::List { items, separator }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The value as produced by a variable read.
    ///
    /// A number carrying original text loses it; anything else is returned
    /// unchanged. Callers hold a copy, so the stored binding keeps its text.
    #[must_use]
    pub fn into_canonical(self) -> Value {
        match self {
            Value::Number(mut number) if number.has_original() => {
                number.original = None;
                Value::Number(number)
            }
            other => other,
        }
    }

    /// CSS text of the value.
    pub fn to_css_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(number) => fmt::Display::fmt(number, f),
            Value::Str {
                text,
                quoted: false,
            } => f.write_str(text),
            Value::Str { text, quoted: true } => {
                write!(f, "\"{}\"", text.replace('"', "\\\""))
            }
            Value::List { items, separator } => {
                let mut first = true;
                for item in items.iter().filter(|item| !item.is_null()) {
                    if !first {
                        f.write_str(separator.as_str())?;
                    }
                    first = false;
                    fmt::Display::fmt(item, f)?;
                }
                Ok(())
            }
        }
    }
}
