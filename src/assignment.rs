//! Satisfying cubes of a guard and the weaker-than relation between guards.
//!
//! Every accepting root-to-terminal path of a diagram is a cube: variables on the path are fixed,
//! variables the path skips are [`Value::Unconstrained`]. Guard `min` is weaker than guard `max`
//! when every cube of `min` lies inside some cube of `max`.

use std::fmt;

use crate::engine::Engine;
use crate::reference::Ref;

/// Value of one proposition in a cube, ordered `Unconstrained < False < True`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Value {
    Unconstrained = -1,
    False = 0,
    True = 1,
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }
}

/// One satisfying cube, indexed by proposition position.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Assignment {
    values: Vec<Value>,
}

impl Assignment {
    /// The cube with every one of `num_variables` propositions unconstrained.
    pub fn unconstrained(num_variables: usize) -> Self {
        Self {
            values: vec![Value::Unconstrained; num_variables],
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of a diagram variable (1-indexed).
    pub fn get(&self, variable: u32) -> Value {
        self.values[variable as usize - 1]
    }

    pub fn set(&mut self, variable: u32, value: Value) {
        self.values[variable as usize - 1] = value;
    }

    fn with(&self, variable: u32, value: Value) -> Self {
        let mut res = self.clone();
        res.set(variable, value);
        res
    }

    /// `self` is weaker than `other` if, for every proposition, `self`'s value is not below
    /// `other`'s and the two agree unless `other` leaves it unconstrained.
    pub fn is_weaker_than(&self, other: &Assignment) -> bool {
        debug_assert_eq!(self.values.len(), other.values.len());
        self.values
            .iter()
            .zip(&other.values)
            .all(|(&a, &b)| a >= b && (a == b || b == Value::Unconstrained))
    }

    /// Signed literals of the fixed values (`v` for true, `-v` for false).
    pub fn literals(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.iter().enumerate().filter_map(|(i, value)| {
            let v = i as i32 + 1;
            match value {
                Value::True => Some(v),
                Value::False => Some(-v),
                Value::Unconstrained => None,
            }
        })
    }

    /// Pairs each fixed proposition with its value, for display.
    pub fn display<'a>(&'a self, engine: &'a Engine) -> DisplayAssignment<'a> {
        DisplayAssignment {
            assignment: self,
            engine,
        }
    }
}

pub struct DisplayAssignment<'a> {
    assignment: &'a Assignment,
    engine: &'a Engine,
}

impl fmt::Display for DisplayAssignment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (i, value) in self.assignment.values.iter().enumerate() {
            let name = &self.engine.propositions()[i];
            if name.is_empty() {
                continue;
            }
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}={}", name, *value as i8)?;
        }
        write!(f, "}}")
    }
}

impl Engine {
    /// Every accepting path of `f`, depth-first with the high branch before the low one.
    ///
    /// The constant-true guard has a single, fully unconstrained path; constant false has none.
    pub fn enumerate(&self, f: Ref) -> Vec<Assignment> {
        let mut paths = Vec::new();
        let start = Assignment::unconstrained(self.num_variables());
        if self.bdd().is_one(f) {
            paths.push(start);
        } else if !self.bdd().is_zero(f) {
            self.enumerate_(f, &start, &mut paths);
        }
        paths
    }

    fn enumerate_(&self, f: Ref, path: &Assignment, paths: &mut Vec<Assignment>) {
        let bdd = self.bdd();
        let v = bdd.variable(f);
        let high = bdd.high_node(f);
        let low = bdd.low_node(f);

        for (child, value) in [(high, Value::True), (low, Value::False)] {
            if bdd.is_one(child) {
                paths.push(path.with(v, value));
            } else if !bdd.is_zero(child) {
                self.enumerate_(child, &path.with(v, value), paths);
            }
        }
    }

    /// Rebuild a guard as the disjunction of the given cubes.
    pub fn from_assignments<'a>(&self, assignments: impl IntoIterator<Item = &'a Assignment>) -> Ref {
        let bdd = self.bdd();
        bdd.apply_or_many(assignments.into_iter().map(|a| bdd.cube(a.literals())))
    }

    /// Whether guard `min` is weaker than guard `max`: every cube of `min` is weaker than
    /// some cube of `max`.
    pub fn is_weaker(&self, min: Ref, max: Ref) -> bool {
        if min == max {
            return true;
        }
        let max_paths = self.enumerate(max);
        self.enumerate(min)
            .iter()
            .all(|a| max_paths.iter().any(|b| a.is_weaker_than(b)))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn engine() -> Engine {
        Engine::new(["A", "B", "M", "U"]).unwrap()
    }

    /// Every guard over `A`, `B`, `M` built from the literals with at most two connectives.
    fn some_guards(engine: &Engine) -> Vec<Ref> {
        let mut atoms = vec![engine.one(), engine.zero()];
        for name in ["A", "B", "M"] {
            let v = engine.var(name).unwrap();
            atoms.push(v);
            atoms.push(engine.not(v));
        }
        let mut guards = atoms.clone();
        for &f in &atoms {
            for &g in &atoms {
                guards.push(engine.and(f, g));
                guards.push(engine.or(f, g));
            }
        }
        guards.sort();
        guards.dedup();
        guards
    }

    fn paths_to_strings(engine: &Engine, paths: &[Assignment]) -> Vec<String> {
        paths.iter().map(|p| p.display(engine).to_string()).collect()
    }

    #[test]
    fn test_value_order() {
        assert!(Value::Unconstrained < Value::False);
        assert!(Value::False < Value::True);
        assert_eq!(Value::Unconstrained as i8, -1);
        assert_eq!(Value::from(true), Value::True);
    }

    #[test]
    fn test_enumerate_constants() {
        let engine = engine();
        let paths = engine.enumerate(engine.one());
        assert_eq!(paths, vec![Assignment::unconstrained(4)]);
        assert!(engine.enumerate(engine.zero()).is_empty());
    }

    #[test]
    fn test_enumerate_literal() {
        let engine = engine();
        let paths = engine.enumerate(engine.build("$B").unwrap());
        assert_eq!(paths_to_strings(&engine, &paths), vec!["{A=-1, B=1, M=-1, U=-1}"]);
        let paths = engine.enumerate(engine.build("~$B").unwrap());
        assert_eq!(paths_to_strings(&engine, &paths), vec!["{A=-1, B=0, M=-1, U=-1}"]);
    }

    #[test]
    fn test_enumerate_high_before_low() {
        let engine = engine();
        let f = engine.build("|$A$M").unwrap();
        let paths = engine.enumerate(f);
        assert_eq!(
            paths_to_strings(&engine, &paths),
            vec!["{A=1, B=-1, M=-1, U=-1}", "{A=0, B=-1, M=1, U=-1}"]
        );
    }

    #[test]
    fn test_enumerate_xor() {
        let engine = engine();
        let f = engine.build("|&$A~$U&~$A$U").unwrap();
        let paths = engine.enumerate(f);
        assert_eq!(
            paths_to_strings(&engine, &paths),
            vec!["{A=1, B=-1, M=-1, U=0}", "{A=0, B=-1, M=-1, U=1}"]
        );
    }

    #[test]
    fn test_enumeration_round_trip() {
        let engine = engine();
        for f in some_guards(&engine) {
            let paths = engine.enumerate(f);
            let g = engine.from_assignments(&paths);
            println!("{} -> {} paths -> {}", engine.render(f), paths.len(), engine.render(g));
            assert_eq!(f, g);
        }
    }

    #[test]
    fn test_absorption() {
        let engine = engine();
        let guards = some_guards(&engine);
        for &f in &guards {
            for &g in &guards {
                let h = engine.and(f, engine.or(f, g));
                assert_eq!(engine.enumerate(h), engine.enumerate(f));
            }
        }
    }

    #[test]
    fn test_assignment_weaker_than() {
        let engine = engine();
        let paths = |e: &str| engine.enumerate(engine.build(e).unwrap());

        let a_and_b = paths("&$A$B").remove(0);
        let a = paths("$A").remove(0);
        let not_a = paths("~$A").remove(0);
        let top = Assignment::unconstrained(4);

        assert!(a_and_b.is_weaker_than(&a));
        assert!(!a.is_weaker_than(&a_and_b));
        assert!(a.is_weaker_than(&top));
        assert!(!top.is_weaker_than(&a));
        assert!(!a.is_weaker_than(&not_a));
        assert!(!not_a.is_weaker_than(&a));
        assert!(not_a.is_weaker_than(&top));
    }

    #[test]
    fn test_is_weaker_reflexive() {
        let engine = engine();
        for f in some_guards(&engine) {
            assert!(engine.is_weaker(f, f), "{} is not weaker than itself", engine.render(f));
            // Compare path-wise, without the identity shortcut.
            let paths = engine.enumerate(f);
            assert!(paths.iter().all(|a| paths.iter().any(|b| a.is_weaker_than(b))));
        }
    }

    #[test]
    fn test_is_weaker() {
        let engine = engine();
        let g = |e: &str| engine.build(e).unwrap();

        assert!(engine.is_weaker(g("&$A$B"), g("$A")));
        assert!(!engine.is_weaker(g("$A"), g("&$A$B")));
        assert!(engine.is_weaker(g("$M"), engine.one()));
        assert!(!engine.is_weaker(engine.one(), g("$M")));
        assert!(engine.is_weaker(engine.zero(), g("$M")));
        assert!(!engine.is_weaker(g("$M"), engine.zero()));
        assert!(engine.is_weaker(g("$A"), g("|$A$B")));
        assert!(!engine.is_weaker(g("$B"), g("$A")));
    }
}
