//! Formulas over action labels.
//!
//! ```text
//! F ::= '$' name | '~' F | '&' F F | '|' F F | '@' F | 'U' digits F F
//! ```
//!
//! Every operator takes the complete sub-formulas that follow it, in textual order. An atom name
//! runs up to the next reserved character or whitespace, so `$send$try` and `$send $try` are both
//! two atoms. Whitespace between sub-formulas is skipped.

use std::fmt;
use std::str::FromStr;

use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// Default nesting limit for parsed formulas.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Formula {
    /// States offering the action.
    Atom(String),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    /// One probabilistic step.
    Next(Box<Formula>),
    /// Bounded until.
    Until {
        bound: u32,
        lhs: Box<Formula>,
        rhs: Box<Formula>,
    },
}

impl Formula {
    /// Parse `input`, failing with [`Error::TooDeep`] if operators nest deeper than `max_depth`.
    ///
    /// Error positions are byte offsets into `input`.
    pub fn parse(input: &str, max_depth: usize) -> Result<Formula> {
        let mut cursor = Cursor::new(input);
        let formula = parse_formula(&mut cursor, 0, max_depth)?;
        cursor.skip_whitespace();
        if !cursor.is_at_end() {
            return Err(Error::TrailingInput {
                position: cursor.position(),
            });
        }
        Ok(formula)
    }

    /// Number of nested operators, an atom being depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Formula::Atom(_) => 0,
            Formula::Not(f) | Formula::Next(f) => 1 + f.depth(),
            Formula::And(a, b) | Formula::Or(a, b) | Formula::Until { lhs: a, rhs: b, .. } => {
                1 + a.depth().max(b.depth())
            }
        }
    }
}

impl FromStr for Formula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Formula::parse(s, DEFAULT_MAX_DEPTH)
    }
}

fn parse_formula(cursor: &mut Cursor<'_>, depth: usize, max_depth: usize) -> Result<Formula> {
    cursor.skip_whitespace();
    let position = cursor.position();
    let Some(c) = cursor.bump() else {
        return Err(Error::UnexpectedEnd { position });
    };
    if c != '$' && depth >= max_depth {
        return Err(Error::TooDeep { limit: max_depth });
    }

    let sub = |cursor: &mut Cursor<'_>| parse_formula(cursor, depth + 1, max_depth).map(Box::new);

    match c {
        '$' => {
            let name = cursor.take_name(true);
            if name.is_empty() {
                return Err(Error::InvalidName {
                    name: String::new(),
                    reserved: None,
                });
            }
            Ok(Formula::Atom(name.to_string()))
        }
        '~' => Ok(Formula::Not(sub(cursor)?)),
        '&' => {
            let lhs = sub(cursor)?;
            let rhs = sub(cursor)?;
            Ok(Formula::And(lhs, rhs))
        }
        '|' => {
            let lhs = sub(cursor)?;
            let rhs = sub(cursor)?;
            Ok(Formula::Or(lhs, rhs))
        }
        '@' => Ok(Formula::Next(sub(cursor)?)),
        'U' => {
            let digits_at = cursor.position();
            let digits = cursor.take_while(|c| c.is_ascii_digit());
            let bound = digits
                .parse::<u32>()
                .map_err(|_| Error::InvalidBound { position: digits_at })?;
            let lhs = sub(cursor)?;
            let rhs = sub(cursor)?;
            Ok(Formula::Until { bound, lhs, rhs })
        }
        found => Err(Error::Syntax { found, position }),
    }
}

/// Prints the prefix notation the formula was parsed from.
///
/// An atom directly followed by a bounded until (`$a` then `U1...`) prints as one longer atom
/// name, since `U` is not reserved.
impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(name) => write!(f, "${}", name),
            Formula::Not(a) => write!(f, "~{}", a),
            Formula::And(a, b) => write!(f, "&{}{}", a, b),
            Formula::Or(a, b) => write!(f, "|{}{}", a, b),
            Formula::Next(a) => write!(f, "@{}", a),
            Formula::Until { bound, lhs, rhs } => write!(f, "U{}{}{}", bound, lhs, rhs),
        }
    }
}
