//! Markov Decision Process Families.
//!
//! An [`Mdpf`] is an ordered list of [`State`]s over a shared [`Engine`]. Every transition carries
//! a probability and a guard over the product-line propositions. Models are assembled with
//! [`MdpfBuilder`] and are read-only afterwards; formulas are evaluated with [`Mdpf::evaluate`].
//!
//! ```
//! use mdpf_rs::mdpf::Mdpf;
//!
//! let model = Mdpf::builder()
//!     .propositions(["A", "B"])
//!     .states(["s0", "s1"])
//!     .transition("s0", "s1", "go", 0.8, "$A")
//!     .transition("s1", "s1", "stop", 1.0, "")
//!     .build()
//!     .unwrap();
//!
//! let res = model.evaluate("@$stop").unwrap();
//! assert_eq!(res.render(model.engine())[0].1, vec!["A/0.8".to_string()]);
//! ```

use std::fmt;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::bdd::BddConfig;
use crate::cursor::find_reserved;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::formula::{Formula, DEFAULT_MAX_DEPTH};
use crate::result::ResultSet;
use crate::state::State;
use crate::transition::Transition;

/// How the bounded-until operator is evaluated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum UntilPolicy {
    /// Fail with [`Error::Unsupported`].
    #[default]
    Reject,
    /// Evaluate both operands and return the left one, ignoring the bound.
    Legacy,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EvalConfig {
    /// Nesting limit for formulas.
    pub max_depth: usize,
    pub until: UntilPolicy,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            until: UntilPolicy::default(),
        }
    }
}

impl EvalConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_until(mut self, until: UntilPolicy) -> Self {
        self.until = until;
        self
    }
}

/// One `(source, destination, action, probability, guard)` input record.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRecord {
    pub source: String,
    pub destination: String,
    pub action: String,
    pub probability: f64,
    /// Prefix-notation guard; blank means unguarded.
    pub guard: String,
}

#[derive(Debug, Clone, Default)]
pub struct MdpfBuilder {
    propositions: Vec<String>,
    states: Vec<String>,
    records: Vec<TransitionRecord>,
    engine_config: BddConfig,
    eval_config: EvalConfig,
}

impl MdpfBuilder {
    pub fn propositions<I, S>(mut self, propositions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.propositions = propositions.into_iter().map(Into::into).collect();
        self
    }

    /// State names in model order. The first is conventionally the initial state.
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn transition(
        self,
        source: impl Into<String>,
        destination: impl Into<String>,
        action: impl Into<String>,
        probability: f64,
        guard: impl Into<String>,
    ) -> Self {
        self.record(TransitionRecord {
            source: source.into(),
            destination: destination.into(),
            action: action.into(),
            probability,
            guard: guard.into(),
        })
    }

    pub fn record(mut self, record: TransitionRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn records(mut self, records: impl IntoIterator<Item = TransitionRecord>) -> Self {
        self.records.extend(records);
        self
    }

    pub fn engine_config(mut self, config: BddConfig) -> Self {
        self.engine_config = config;
        self
    }

    pub fn eval_config(mut self, config: EvalConfig) -> Self {
        self.eval_config = config;
        self
    }

    /// Validate every name and record, and assemble the model.
    pub fn build(self) -> Result<Mdpf> {
        let engine = Engine::with_config(self.propositions, self.engine_config)?;

        for (i, name) in self.states.iter().enumerate() {
            check_name(name)?;
            if self.states[..i].contains(name) {
                return Err(Error::DuplicateState(name.clone()));
            }
        }
        let names: Rc<[String]> = self.states.into();
        let mut states: Vec<State> = names.iter().map(|n| State::new(n.as_str(), names.clone())).collect();

        for record in &self.records {
            check_name(&record.action)?;
            let guard = engine.build(&record.guard)?;
            let source = states
                .iter_mut()
                .find(|s| s.name() == record.source)
                .ok_or_else(|| Error::UnknownState(record.source.clone()))?;
            source.add_transition(
                &record.action,
                Transition::new(guard, record.probability),
                &record.destination,
            )?;
        }

        info!(
            "built model: {} propositions, {} states, {} transitions",
            engine.num_variables(),
            states.len(),
            self.records.len()
        );

        Ok(Mdpf {
            engine,
            names,
            states,
            config: self.eval_config,
        })
    }
}

fn check_name(name: &str) -> Result<()> {
    if let Some(c) = find_reserved(name) {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reserved: Some(c),
        });
    }
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reserved: None,
        });
    }
    Ok(())
}

#[derive(Debug)]
pub struct Mdpf {
    engine: Engine,
    names: Rc<[String]>,
    states: Vec<State>,
    config: EvalConfig,
}

impl Mdpf {
    pub fn builder() -> MdpfBuilder {
        MdpfBuilder::default()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name() == name)
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Parse and evaluate a formula.
    pub fn evaluate(&self, input: &str) -> Result<ResultSet> {
        let formula = Formula::parse(input, self.config.max_depth)?;
        self.evaluate_formula(&formula)
    }

    /// Evaluate an already parsed formula.
    pub fn evaluate_formula(&self, formula: &Formula) -> Result<ResultSet> {
        if formula.depth() > self.config.max_depth {
            return Err(Error::TooDeep {
                limit: self.config.max_depth,
            });
        }
        self.eval(formula)
    }

    fn eval(&self, formula: &Formula) -> Result<ResultSet> {
        debug!("eval: {}", formula);
        let res = match formula {
            Formula::Atom(action) => self.satisfying(action),
            Formula::Not(f) => self.eval(f)?.not(),
            Formula::And(f, g) => {
                let lhs = self.eval(f)?;
                let rhs = self.eval(g)?;
                lhs.and(&rhs)?
            }
            Formula::Or(f, g) => {
                let lhs = self.eval(f)?;
                let rhs = self.eval(g)?;
                lhs.or(rhs)?
            }
            Formula::Next(f) => {
                let input = self.eval(f)?;
                self.multiply(&input)?.remove_zeros()
            }
            Formula::Until { bound, lhs, rhs } => match self.config.until {
                UntilPolicy::Reject => return Err(Error::Unsupported("bounded until")),
                UntilPolicy::Legacy => {
                    warn!("bounded until (bound {}) evaluates to its left operand", bound);
                    let lhs = self.eval(lhs)?;
                    self.eval(rhs)?;
                    lhs
                }
            },
        };
        Ok(res)
    }

    /// States offering `action`, each with the certain transition. Unknown actions hold nowhere.
    pub fn satisfying(&self, action: &str) -> ResultSet {
        let mut res = ResultSet::new(self.names.clone());
        for (i, state) in self.states.iter().enumerate() {
            if state.has_action(action) {
                res.set_row(i, vec![Transition::certain()]);
            }
        }
        res
    }

    /// One-step image of `input` for every state.
    ///
    /// Fails with [`Error::UnknownState`] if `input` is not over this model's states.
    pub fn multiply(&self, input: &ResultSet) -> Result<ResultSet> {
        let mut res = ResultSet::new(self.names.clone());
        for (i, state) in self.states.iter().enumerate() {
            res.set_row(i, state.multiply(input, &self.engine)?);
        }
        Ok(res)
    }
}

impl fmt::Display for Mdpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in &self.states {
            write!(f, "{}", state.display(&self.engine))?;
        }
        Ok(())
    }
}
