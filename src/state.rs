//! States of the transition system.
//!
//! A state owns one row of the probabilistic matrix per action: for every known state (in model
//! order) the list of transitions towards it. Rows are positional, so every row has exactly one
//! entry per state name, possibly empty.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::result::ResultSet;
use crate::transition::{minimize, product, sum_all, Transition};

#[derive(Debug, Clone)]
pub struct State {
    name: String,
    names: Rc<[String]>,
    actions: BTreeMap<String, Vec<Vec<Transition>>>,
}

impl State {
    /// Create a state without actions. `names` is the ordered list of every state of the model.
    pub fn new(name: impl Into<String>, names: Rc<[String]>) -> Self {
        Self {
            name: name.into(),
            names,
            actions: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared action labels, in lexicographic order.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.actions.contains_key(action)
    }

    /// The row of `action`: one transition list per state, in model order.
    pub fn row(&self, action: &str) -> Option<&[Vec<Transition>]> {
        self.actions.get(action).map(Vec::as_slice)
    }

    /// Append `transition` towards `destination` under `action`.
    ///
    /// The first transition of an action creates its row with an empty list for every state.
    pub fn add_transition(&mut self, action: &str, transition: Transition, destination: &str) -> Result<()> {
        let index = self
            .names
            .iter()
            .position(|n| n == destination)
            .ok_or_else(|| Error::UnknownState(destination.to_string()))?;
        let num_states = self.names.len();
        let row = self
            .actions
            .entry(action.to_string())
            .or_insert_with(|| vec![Vec::new(); num_states]);
        row[index].push(transition);
        Ok(())
    }

    /// One-step image of `input` through this state.
    ///
    /// For each action, the per-destination products of the row with the input are summed;
    /// the result of each further action is folded into the previous one with [`minimize`].
    /// A state without actions has an empty image. `input` must be over the states of this
    /// state's model, otherwise [`Error::UnknownState`].
    pub fn multiply(&self, input: &ResultSet, engine: &Engine) -> Result<Vec<Transition>> {
        input.check_states(&self.names)?;

        let mut image: Option<Vec<Transition>> = None;
        for (action, row) in &self.actions {
            let partial = row
                .iter()
                .zip(input.rows())
                .fold(Vec::new(), |acc, (own, offered)| sum_all(acc, product(own, offered, engine)));
            debug!("multiply: {} --{}--> {} transitions", self.name, action, partial.len());

            image = Some(match image {
                None => partial,
                Some(previous) => minimize(previous, partial, engine),
            });
        }
        Ok(image.unwrap_or_default())
    }

    /// Prints every action with its per-destination transition lists.
    pub fn display<'a>(&'a self, engine: &'a Engine) -> DisplayState<'a> {
        DisplayState { state: self, engine }
    }
}

pub struct DisplayState<'a> {
    state: &'a State,
    engine: &'a Engine,
}

impl fmt::Display for DisplayState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.state.name)?;
        for (action, row) in &self.state.actions {
            writeln!(f, "  {}", action)?;
            for (destination, transitions) in self.state.names.iter().zip(row) {
                writeln!(f, "    {}", destination)?;
                for t in transitions {
                    writeln!(f, "      {}", t.display(self.engine))?;
                }
            }
        }
        Ok(())
    }
}
