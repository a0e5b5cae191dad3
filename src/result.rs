//! Per-state satisfaction tables.
//!
//! A [`ResultSet`] has exactly one row per state of the model, in model order. An empty row
//! means "no satisfying guard recorded", which is how `false` is encoded; a row holding the single
//! certain transition `T/1.0` is `true`.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use log::warn;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::transition::{are_all_zero, Transition};

#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    states: Rc<[String]>,
    rows: Vec<Vec<Transition>>,
}

impl ResultSet {
    /// A result set with an empty row for every state.
    pub fn new(states: Rc<[String]>) -> Self {
        let rows = vec![Vec::new(); states.len()];
        Self { states, rows }
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn rows(&self) -> &[Vec<Transition>] {
        &self.rows
    }

    /// Rows paired with their state names.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Transition])> {
        self.states.iter().map(String::as_str).zip(self.rows.iter().map(Vec::as_slice))
    }

    fn index(&self, state: &str) -> Option<usize> {
        self.states.iter().position(|s| s == state)
    }

    pub fn contains(&self, state: &str) -> bool {
        self.index(state).is_some()
    }

    pub fn get(&self, state: &str) -> Option<&[Transition]> {
        self.index(state).map(|i| self.rows[i].as_slice())
    }

    /// Fails unless this result set is over exactly `states`, in that order.
    pub fn check_states(&self, states: &[String]) -> Result<()> {
        if *self.states == *states {
            return Ok(());
        }
        let culprit = states
            .iter()
            .find(|s| !self.contains(s))
            .or_else(|| self.states.iter().find(|s| !states.contains(s)))
            .or_else(|| states.iter().zip(self.states.iter()).find(|(a, b)| a != b).map(|(a, _)| a));
        Err(Error::UnknownState(culprit.cloned().unwrap_or_default()))
    }

    pub(crate) fn set_row(&mut self, index: usize, row: Vec<Transition>) {
        self.rows[index] = row;
    }

    /// Record that `state` satisfies the formula unconditionally.
    pub fn set_one(&mut self, state: &str) -> Result<()> {
        let i = self.index(state).ok_or_else(|| Error::UnknownState(state.to_string()))?;
        self.rows[i].push(Transition::certain());
        Ok(())
    }

    /// Two-valued complement: empty rows become `[T/1.0]`, every other row is cleared.
    pub fn not(mut self) -> Self {
        for (state, row) in self.states.iter().zip(self.rows.iter_mut()) {
            if row.len() > 1 {
                warn!(
                    "not: state {} has {} transitions, complementing as if it were true",
                    state,
                    row.len()
                );
            }
            if row.is_empty() {
                row.push(Transition::certain());
            } else {
                row.clear();
            }
        }
        self
    }

    /// Two-valued conjunction: a row is kept only when both sides hold exactly one transition.
    ///
    /// Both sides must be over the same states, otherwise [`Error::UnknownState`].
    pub fn and(mut self, other: &ResultSet) -> Result<Self> {
        other.check_states(&self.states)?;
        for ((state, row), other_row) in self.states.iter().zip(self.rows.iter_mut()).zip(&other.rows) {
            if row.len() > 1 || other_row.len() > 1 {
                warn!(
                    "and: state {} has {} and {} transitions, treating it as false",
                    state,
                    row.len(),
                    other_row.len()
                );
            }
            if !(row.len() == 1 && other_row.len() == 1) {
                row.clear();
            }
        }
        Ok(self)
    }

    /// `not(and(not self, not other))`.
    pub fn or(self, other: ResultSet) -> Result<Self> {
        Ok(self.not().and(&other.not())?.not())
    }

    /// Clear every row whose transitions all have probability zero.
    pub fn remove_zeros(mut self) -> Self {
        for row in &mut self.rows {
            if are_all_zero(row) {
                row.clear();
            }
        }
        self
    }

    /// Every `(state, transition)` whose probability compares to `threshold` as `comparator` asks.
    ///
    /// `comparator` is any combination of `<`, `>` and `=`, e.g. `">="`.
    pub fn get_probability(&self, comparator: &str, threshold: f64) -> Result<Vec<(&str, &Transition)>> {
        let comparison: Comparison = comparator.parse()?;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::ProbabilityOutOfRange(threshold));
        }
        Ok(self
            .iter()
            .flat_map(|(state, row)| row.iter().map(move |t| (state, t)))
            .filter(|(_, t)| comparison.holds(t.probability, threshold))
            .collect())
    }

    /// Rows rendered as `<guard>/<probability>` strings.
    pub fn render(&self, engine: &Engine) -> Vec<(&str, Vec<String>)> {
        self.iter()
            .map(|(state, row)| (state, row.iter().map(|t| t.display(engine).to_string()).collect()))
            .collect()
    }

    pub fn display<'a>(&'a self, engine: &'a Engine) -> DisplayResultSet<'a> {
        DisplayResultSet { result: self, engine }
    }
}

pub struct DisplayResultSet<'a> {
    result: &'a ResultSet,
    engine: &'a Engine,
}

impl fmt::Display for DisplayResultSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (state, row) in self.result.iter() {
            writeln!(f, "{}", state)?;
            for t in row {
                writeln!(f, "    {}", t.display(self.engine))?;
            }
        }
        Ok(())
    }
}

/// Which of `<`, `>`, `=` a probability may satisfy against a threshold.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Comparison {
    pub less: bool,
    pub greater: bool,
    pub equal: bool,
}

impl Comparison {
    pub fn holds(&self, p: f64, threshold: f64) -> bool {
        (self.less && p < threshold) || (self.greater && p > threshold) || (self.equal && p == threshold)
    }
}

impl FromStr for Comparison {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidComparator(s.to_string()));
        }
        let mut res = Comparison::default();
        for c in s.chars() {
            match c {
                '<' => res.less = true,
                '>' => res.greater = true,
                '=' => res.equal = true,
                _ => return Err(Error::InvalidComparator(s.to_string())),
            }
        }
        Ok(res)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.less {
            write!(f, "<")?;
        }
        if self.greater {
            write!(f, ">")?;
        }
        if self.equal {
            write!(f, "=")?;
        }
        Ok(())
    }
}
