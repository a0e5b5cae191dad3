//! Guarded-probability transitions and the algebra over lists of them.
//!
//! A list of transitions is one entry of a probabilistic column: "with probability `p`,
//! whenever guard `g` holds". Lists are combined across destinations with [`product`] and
//! [`sum_all`], and across actions with [`minimize`].

use std::fmt;

use log::debug;

use crate::engine::Engine;
use crate::reference::Ref;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transition {
    pub guard: Ref,
    pub probability: f64,
}

impl Transition {
    pub fn new(guard: Ref, probability: f64) -> Self {
        Self { guard, probability }
    }

    /// The unguarded, certain transition `T/1.0`.
    pub fn certain() -> Self {
        Self::new(Ref::ONE, 1.0)
    }

    /// `self` dominates `other` if `other`'s guard is weaker than `self`'s and
    /// `other` is no more likely.
    pub fn dominates(&self, other: &Transition, engine: &Engine) -> bool {
        other.probability <= self.probability && engine.is_weaker(other.guard, self.guard)
    }

    /// Renders as `<guard>/<probability>`, e.g. `(not B) and U/1.0`.
    pub fn display<'a>(&'a self, engine: &'a Engine) -> DisplayTransition<'a> {
        DisplayTransition {
            transition: self,
            engine,
        }
    }
}

pub struct DisplayTransition<'a> {
    transition: &'a Transition,
    engine: &'a Engine,
}

impl fmt::Display for DisplayTransition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{:?}",
            self.engine.render(self.transition.guard),
            self.transition.probability
        )
    }
}

/// Combine the transitions of one destination with the input offered at that destination.
///
/// Both sides non-empty: every pair, guards conjoined and probabilities multiplied.
/// One side empty: every non-trivial guard of the other side survives with probability 0.
pub fn product(left: &[Transition], right: &[Transition], engine: &Engine) -> Vec<Transition> {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => Vec::new(),
        (true, false) => zero_weighted(right, engine),
        (false, true) => zero_weighted(left, engine),
        (false, false) => left
            .iter()
            .flat_map(|l| {
                right
                    .iter()
                    .map(move |r| Transition::new(engine.and(l.guard, r.guard), l.probability * r.probability))
            })
            .collect(),
    }
}

fn zero_weighted(transitions: &[Transition], engine: &Engine) -> Vec<Transition> {
    transitions
        .iter()
        .filter(|t| t.guard != engine.one())
        .map(|t| Transition::new(t.guard, 0.0))
        .collect()
}

/// Merge `transition` into `list`: same guard accumulates probability, a new guard is appended.
pub fn sum(mut list: Vec<Transition>, transition: Transition) -> Vec<Transition> {
    match list.iter_mut().find(|t| t.guard == transition.guard) {
        Some(t) => t.probability += transition.probability,
        None => list.push(transition),
    }
    list
}

/// Fold [`sum`] over every transition of `other`.
pub fn sum_all(list: Vec<Transition>, other: Vec<Transition>) -> Vec<Transition> {
    other.into_iter().fold(list, sum)
}

/// Drop dominated transitions between two action groups and keep the survivors of each.
///
/// Pairs are scanned in order; for each pair of still-alive transitions, `second[j]` is
/// dropped if `first[i]` dominates it, otherwise `first[i]` is dropped if `second[j]` dominates it.
pub fn minimize_pair(
    first: Vec<Transition>,
    second: Vec<Transition>,
    engine: &Engine,
) -> (Vec<Transition>, Vec<Transition>) {
    let mut keep_first = vec![true; first.len()];
    let mut keep_second = vec![true; second.len()];

    for (i, t1) in first.iter().enumerate() {
        for (j, t2) in second.iter().enumerate() {
            if !keep_second[j] {
                continue;
            }
            if t1.dominates(t2, engine) {
                debug!("minimize: drop {} (second)", t2.display(engine));
                keep_second[j] = false;
            } else if t2.dominates(t1, engine) {
                debug!("minimize: drop {} (first)", t1.display(engine));
                keep_first[i] = false;
                break;
            }
        }
    }

    let retain = |list: Vec<Transition>, keep: Vec<bool>| -> Vec<Transition> {
        list.into_iter().zip(keep).filter(|(_, k)| *k).map(|(t, _)| t).collect()
    };
    (retain(first, keep_first), retain(second, keep_second))
}

/// [`minimize_pair`], with the survivors of `second` appended to those of `first`.
pub fn minimize(first: Vec<Transition>, second: Vec<Transition>, engine: &Engine) -> Vec<Transition> {
    let (mut first, second) = minimize_pair(first, second, engine);
    first.extend(second);
    first
}

/// Whether every transition has probability exactly zero (vacuously true for an empty list).
pub fn are_all_zero(list: &[Transition]) -> bool {
    list.iter().all(|t| t.probability == 0.0)
}
