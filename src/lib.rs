//! # Cron schedule describer
//!
//! This crate parses a classic *five-field* cron schedule expression and
//! renders it as one plain-English sentence. The expression is a single
//! string of **exactly six** space-separated tokens:
//!
//! 1. **Minute**: `0..59`
//! 2. **Hour**: `0..23`
//! 3. **Day of month**: `1..31`
//! 4. **Month**: `1..12`, or a three-letter name (`jan`..`dec`)
//! 5. **Day of week**: `0..6` (Sunday first), or a three-letter name (`sun`..`sat`)
//! 6. **Command**: carried into the output verbatim, never validated
//!
//! Each schedule field takes one of four shapes:
//! - `*` — every value (the literal asterisk alone)
//! - `N` — a single value
//! - `N,N,...` — a list, rendered in input order (duplicates allowed)
//! - `N-N` — an inclusive range whose start must be strictly below its end
//!
//! Name tokens are matched case-insensitively against the first three
//! letters of the canonical month/weekday names, and always render as the
//! full canonical name — so do in-range numeric values on those fields
//! (`1` in the month field renders "January").
//!
//! Shape detection is lexical with a fixed precedence: asterisk, then
//! comma, then hyphen. Two consequences of that grammar are kept as
//! documented limitations rather than extensions:
//! - `1-3,5` is read as a *list* whose first element `1-3` is not a valid
//!   value, and is rejected;
//! - the split on single spaces is strict (consecutive spaces count as
//!   extra empty tokens), so a command containing spaces changes the
//!   token count and the expression is rejected.
//!
//! Step values (`*/N`), combined list-of-ranges, and macros such as
//! `@daily` are not part of this grammar.
//!
//! ## Output
//! [`describe`] returns the assembled sentence, or a [`ParseError`]
//! categorising the failure with the offending token and the expected
//! bounds where applicable.
//!
//! ## Example
//! ```rust
//! use cron_describe::describe;
//! let out = describe("30 2 1 1 0 backup.sh").expect("valid expression");
//! assert_eq!(
//!     out,
//!     "Run 'backup.sh' at minute 30 of hour 2 on day 1 in January on Sunday"
//! );
//! ```

use core::fmt;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, trace};

/// Number of space-separated tokens a full expression must contain
/// (five schedule fields plus the command).
const FIELD_COUNT: usize = 6;

/// Canonical month names, January first. Month values are 1-based.
const MONTHS_OF_YEAR: &[&str] = &[
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Canonical weekday names, Sunday first. Weekday values are 0-based.
const DAYS_OF_WEEK: &[&str] = &[
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

// Precomputed abbreviation maps for O(1) lookups. Keys are the lowercased
// first three letters of each table entry; values index into the table.
static MONTH_ABBREVS: Lazy<HashMap<String, usize>> = Lazy::new(|| abbrev_index(MONTHS_OF_YEAR));
static DAY_ABBREVS: Lazy<HashMap<String, usize>> = Lazy::new(|| abbrev_index(DAYS_OF_WEEK));

fn abbrev_index(entries: &'static [&'static str]) -> HashMap<String, usize> {
    entries
        .iter()
        .enumerate()
        .map(|(i, name)| (name[..3].to_ascii_lowercase(), i))
        .collect()
}

/// Top-level entry point: parse a full cron expression and assemble the
/// English sentence describing it.
pub fn describe(input: &str) -> ParseResult<String> {
    // The split is strict: consecutive spaces yield empty tokens that
    // still count toward the total.
    let tokens: Vec<&str> = input.split(' ').collect();
    if tokens.len() != FIELD_COUNT {
        return Err(ParseError::FieldCount {
            found: tokens.len(),
        });
    }

    debug!(expression = %input, "describing cron expression");

    let mut phrases = Vec::with_capacity(SCHEDULE_FIELDS.len());
    for (renderer, raw) in SCHEDULE_FIELDS.iter().zip(&tokens) {
        let phrase = renderer.render(raw)?;
        trace!(field = renderer.spec.name, phrase = %phrase, "rendered field");
        phrases.push(phrase);
    }

    // The command token is never validated.
    let command = tokens[FIELD_COUNT - 1];
    Ok(format!("Run '{command}' {}", phrases.join(" ")))
}

/// An ordered display-name table for a named field, with the offset that
/// maps a field's numeric value onto a zero-based table index.
pub struct NameTable {
    entries: &'static [&'static str],
    abbrevs: &'static Lazy<HashMap<String, usize>>,
    offset: i32, // value + offset = table index
}

impl NameTable {
    /// Resolve a three-letter abbreviation, case-insensitively.
    fn resolve(&self, token: &str) -> Option<FieldValue> {
        if token.len() != 3 {
            return None;
        }

        let index = *self.abbrevs.get(&token.to_ascii_lowercase())?;
        Some(FieldValue::Named {
            name: self.entries[index],
            index,
        })
    }

    /// Map an in-range numeric value onto its canonical name.
    fn by_value(&self, value: u32) -> FieldValue {
        let index = (value as i32 + self.offset) as usize;
        FieldValue::Named {
            name: self.entries[index],
            index,
        }
    }
}

/// Static configuration for one schedule field: its diagnostic name, its
/// inclusive numeric bounds, and the name table if the field has one.
pub struct FieldSpec {
    name: &'static str,
    min: u32,
    max: u32,
    names: Option<&'static NameTable>,
}

impl FieldSpec {
    /// Parse one atomic token against this field.
    ///
    /// An all-digit token is a numeric value checked against the field
    /// bounds; anything else must be a three-letter name on a field that
    /// has a name table.
    fn parse_value(&self, token: &str) -> ParseResult<FieldValue> {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            // Unparseably long digit strings are out of range by definition.
            let value: u64 = token.parse().map_err(|_| self.out_of_range(token))?;
            if value < u64::from(self.min) || value > u64::from(self.max) {
                return Err(self.out_of_range(token));
            }

            let value = value as u32;
            return Ok(match self.names {
                Some(table) => table.by_value(value),
                None => FieldValue::Numeric(value),
            });
        }

        self.names
            .and_then(|table| table.resolve(token))
            .ok_or_else(|| ParseError::InvalidToken {
                field: self.name,
                token: token.to_string(),
            })
    }

    /// Classify one field's raw text into its shape and parse its values.
    ///
    /// Precedence is lexical: exact `*`, then comma, then hyphen, then a
    /// single value. The comma check runs first, so a field mixing both
    /// (`1-3,5`) is read as a list and fails on its malformed element.
    fn parse_shape(&self, raw: &str) -> ParseResult<FieldShape> {
        if raw == "*" {
            return Ok(FieldShape::Wildcard);
        }

        if raw.contains(',') {
            let mut values = Vec::new();
            for part in raw.split(',').filter(|part| !part.is_empty()) {
                values.push(self.parse_value(part)?);
            }

            // A list must carry at least one value.
            if values.is_empty() {
                return Err(ParseError::InvalidToken {
                    field: self.name,
                    token: raw.to_string(),
                });
            }

            return Ok(FieldShape::List(values));
        }

        if let Some((lhs, rhs)) = raw.split_once('-') {
            let from = self.parse_value(lhs)?;
            let to = self.parse_value(rhs)?;

            // Strictly ascending; an exact range such as 5-5 is rejected.
            if from.rank() >= to.rank() {
                return Err(ParseError::InvalidRange {
                    field: self.name,
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }

            return Ok(FieldShape::Range { from, to });
        }

        Ok(FieldShape::Single(self.parse_value(raw)?))
    }

    fn out_of_range(&self, token: &str) -> ParseError {
        ParseError::OutOfRange {
            field: self.name,
            value: token.to_string(),
            min: self.min,
            max: self.max,
        }
    }
}

/// One validated atomic value within a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Numeric(u32),
    Named {
        name: &'static str,
        index: usize, // position in the field's name table
    },
}

impl FieldValue {
    /// Ordering key for the range rule: numeric value for plain fields,
    /// table index for named fields.
    fn rank(&self) -> u32 {
        match self {
            FieldValue::Numeric(value) => *value,
            FieldValue::Named { index, .. } => *index as u32,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Numeric(value) => write!(f, "{value}"),
            FieldValue::Named { name, .. } => f.write_str(name),
        }
    }
}

/// The structural category of one field's raw text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldShape {
    Wildcard,
    Single(FieldValue),
    List(Vec<FieldValue>),
    Range { from: FieldValue, to: FieldValue },
}

/// One schedule field's renderer: its spec plus the lead-in phrase for
/// each shape. The wildcard phrase is emitted verbatim; the other three
/// are prefixes completed with the formatted value(s).
pub struct FieldRenderer {
    spec: FieldSpec,
    every: &'static str,
    single: &'static str,
    list: &'static str,
    range: &'static str,
}

impl FieldRenderer {
    /// Parse one field's raw text and produce its English phrase.
    pub fn render(&self, raw: &str) -> ParseResult<String> {
        Ok(match self.spec.parse_shape(raw)? {
            FieldShape::Wildcard => self.every.to_string(),
            FieldShape::Single(value) => format!("{}{value}", self.single),
            FieldShape::List(values) => {
                let joined = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}{joined}", self.list)
            }
            FieldShape::Range { from, to } => format!("{}{from} to {to}", self.range),
        })
    }
}

static MONTH_NAMES: NameTable = NameTable {
    entries: MONTHS_OF_YEAR,
    abbrevs: &MONTH_ABBREVS,
    offset: -1, // months are 1-based
};

static DAY_NAMES: NameTable = NameTable {
    entries: DAYS_OF_WEEK,
    abbrevs: &DAY_ABBREVS,
    offset: 0, // weekdays are 0-based, Sunday first
};

/// Minute field renderer: `0..59`, numeric only.
pub static MINUTE: FieldRenderer = FieldRenderer {
    spec: FieldSpec {
        name: "minute",
        min: 0,
        max: 59,
        names: None,
    },
    every: "every minute",
    single: "at minute ",
    list: "at minutes ",
    range: "from minutes ",
};

/// Hour field renderer: `0..23`, numeric only.
pub static HOUR: FieldRenderer = FieldRenderer {
    spec: FieldSpec {
        name: "hour",
        min: 0,
        max: 23,
        names: None,
    },
    every: "of every hour",
    single: "of hour ",
    list: "of hours ",
    range: "during hours ",
};

/// Day-of-month field renderer: `1..31`, numeric only.
pub static DAY_OF_MONTH: FieldRenderer = FieldRenderer {
    spec: FieldSpec {
        name: "day of month",
        min: 1,
        max: 31,
        names: None,
    },
    every: "of every day",
    single: "on day ",
    list: "on days ",
    range: "on days ",
};

/// Month field renderer: `1..12` or `jan`..`dec`, rendered as names.
pub static MONTH: FieldRenderer = FieldRenderer {
    spec: FieldSpec {
        name: "month",
        min: 1,
        max: 12,
        names: Some(&MONTH_NAMES),
    },
    every: "of every month",
    single: "in ",
    list: "of months ",
    range: "of months ",
};

/// Day-of-week field renderer: `0..6` or `sun`..`sat`, rendered as names.
pub static DAY_OF_WEEK: FieldRenderer = FieldRenderer {
    spec: FieldSpec {
        name: "day of week",
        min: 0,
        max: 6,
        names: Some(&DAY_NAMES),
    },
    every: "on every day",
    single: "on ",
    list: "on days ",
    range: "on days ",
};

/// The five schedule fields in expression order.
static SCHEDULE_FIELDS: [&FieldRenderer; 5] = [&MINUTE, &HOUR, &DAY_OF_MONTH, &MONTH, &DAY_OF_WEEK];

/// Error type with granular categories. `Display` is the user-facing
/// diagnostic line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid field count: {found} (expected 6)")]
    FieldCount { found: usize },

    #[error("Invalid token '{token}' in the {field} field")]
    InvalidToken { field: &'static str, token: String },

    #[error("Value {value} out of range for the {field} field (expected [{min}, {max}])")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: u32,
        max: u32,
    },

    #[error("Invalid range in the {field} field: {from} does not precede {to}")]
    InvalidRange {
        field: &'static str,
        from: String,
        to: String,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;
