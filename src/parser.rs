//! Value parsing: external representations into a column domain.
//!
//! [`ValueParser`] is the single entry point every column operation uses to turn a
//! [`CellInput`] into a stored value. It is pure: it holds only its [`ParserOptions`].

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::domain::ColumnType;
use crate::error::{ColumnError, ColumnResult};
use crate::missing::DEFAULT_MISSING_VALUE_STRINGS;
use crate::types::CellInput;

/// Options controlling text parsing.
///
/// Use [`Default`] for common cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Text tokens that parse to the missing indicator (compared after trimming).
    pub missing_value_strings: Vec<String>,
    /// Trim surrounding whitespace before parsing.
    pub trim_whitespace: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            missing_value_strings: DEFAULT_MISSING_VALUE_STRINGS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            trim_whitespace: true,
        }
    }
}

impl ParserOptions {
    /// Load options from a JSON document; absent fields keep their defaults.
    ///
    /// ```rust
    /// use rust_data_columns::parser::ParserOptions;
    ///
    /// let opts = ParserOptions::from_json_str(r#"{ "missing_value_strings": ["-"] }"#).unwrap();
    /// assert_eq!(opts.missing_value_strings, vec!["-".to_string()]);
    /// assert!(opts.trim_whitespace);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns `true` if `text` is one of the configured missing tokens.
    pub fn is_missing_token(&self, text: &str) -> bool {
        self.missing_value_strings.iter().any(|m| m == text)
    }
}

/// Parser for domain `T`.
pub struct ValueParser<T: ColumnType> {
    options: ParserOptions,
    _domain: PhantomData<T>,
}

impl<T: ColumnType> ValueParser<T> {
    /// Create a parser with explicit options.
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            _domain: PhantomData,
        }
    }

    /// The options this parser was built with.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse one input into the domain.
    ///
    /// - Text equal to a missing token yields the missing indicator.
    /// - Anything else that does not fit the domain is a [`ColumnError::Parse`].
    pub fn parse(&self, input: CellInput<'_>) -> ColumnResult<T::Value> {
        let input = match input {
            CellInput::Text(raw) => {
                let text = if self.options.trim_whitespace {
                    raw.trim()
                } else {
                    raw
                };
                if self.options.is_missing_token(text) {
                    return Ok(T::missing_value_indicator());
                }
                CellInput::Text(text)
            }
            other => other,
        };
        T::coerce(&input).map_err(|message| ColumnError::parse(T::KIND, input.raw(), message))
    }

    /// Parse a string.
    pub fn parse_str(&self, text: &str) -> ColumnResult<T::Value> {
        self.parse(CellInput::Text(text))
    }

    /// Returns `true` if `text` would parse into the domain.
    pub fn can_parse(&self, text: &str) -> bool {
        self.parse_str(text).is_ok()
    }
}

impl<T: ColumnType> Default for ValueParser<T> {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl<T: ColumnType> Clone for ValueParser<T> {
    fn clone(&self) -> Self {
        Self::new(self.options.clone())
    }
}

impl<T: ColumnType> fmt::Debug for ValueParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueParser")
            .field("kind", &T::KIND)
            .field("options", &self.options)
            .finish()
    }
}
