//! Boolean functions over named propositions.
//!
//! The [`Engine`] binds every proposition name to one [`Bdd`] variable and is the only way the rest
//! of the crate creates guards. Proposition `i` (0-based, in declaration order) is variable `i + 1`,
//! so earlier propositions sit closer to the root and show up first when a guard is rendered.
//!
//! Guards are written in prefix notation:
//!
//! ```text
//! G ::= '$' name | '~' G | '&' G G | '|' G G
//! ```
//!
//! Each operator consumes the next complete sub-expressions in textual order, so `&$a|$b$c`
//! is `a and (b or c)`.

use std::collections::HashMap;

use log::debug;
use num_bigint::BigUint;

use crate::bdd::{Bdd, BddConfig};
use crate::cursor::{find_reserved, Cursor};
use crate::error::{Error, Result};
use crate::reference::Ref;

/// Nesting limit for guard expressions.
const GUARD_DEPTH_LIMIT: usize = 512;

#[derive(Debug)]
pub struct Engine {
    bdd: Bdd,
    /// Proposition names by position; empty names are placeholders.
    names: Vec<String>,
    variables: HashMap<String, u32>,
}

impl Engine {
    /// Create an engine with one variable per name.
    ///
    /// Empty names reserve a variable without a proposition. Fails if a name contains a
    /// reserved operator character or whitespace, or if a name is declared twice.
    pub fn new<I, S>(propositions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(propositions, BddConfig::default())
    }

    pub fn with_config<I, S>(propositions: I, config: BddConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = propositions.into_iter().map(Into::into).collect();
        let mut variables = HashMap::new();

        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            if let Some(c) = find_reserved(name) {
                return Err(Error::InvalidName {
                    name: name.clone(),
                    reserved: Some(c),
                });
            }
            if name.chars().any(char::is_whitespace) {
                return Err(Error::InvalidName {
                    name: name.clone(),
                    reserved: None,
                });
            }
            if variables.insert(name.clone(), i as u32 + 1).is_some() {
                return Err(Error::DuplicateProposition(name.clone()));
            }
        }

        debug!("engine: {} propositions {:?}", names.len(), names);

        Ok(Self {
            bdd: Bdd::with_config(config),
            names,
            variables,
        })
    }

    pub fn bdd(&self) -> &Bdd {
        &self.bdd
    }

    /// Declared proposition names, placeholders included.
    pub fn propositions(&self) -> &[String] {
        &self.names
    }

    pub fn num_variables(&self) -> usize {
        self.names.len()
    }

    /// Variable bound to the proposition `name`.
    pub fn variable(&self, name: &str) -> Option<u32> {
        self.variables.get(name).copied()
    }

    /// Proposition name of a variable (empty for placeholders).
    pub fn name(&self, variable: u32) -> &str {
        &self.names[variable as usize - 1]
    }

    pub fn one(&self) -> Ref {
        self.bdd.one
    }

    pub fn zero(&self) -> Ref {
        self.bdd.zero
    }

    /// The guard that holds exactly when proposition `name` holds.
    pub fn var(&self, name: &str) -> Result<Ref> {
        match self.variable(name) {
            Some(v) => Ok(self.bdd.mk_var(v)),
            None => Err(Error::UnknownProposition(name.to_string())),
        }
    }

    pub fn and(&self, f: Ref, g: Ref) -> Ref {
        self.bdd.apply_and(f, g)
    }

    pub fn or(&self, f: Ref, g: Ref) -> Ref {
        self.bdd.apply_or(f, g)
    }

    pub fn not(&self, f: Ref) -> Ref {
        self.bdd.apply_not(f)
    }

    /// Build a guard from a prefix-notation expression.
    ///
    /// A blank expression is the constant-true guard.
    ///
    /// ```
    /// use mdpf_rs::engine::Engine;
    ///
    /// let engine = Engine::new(["a", "b"]).unwrap();
    /// let f = engine.build("&$a~$b").unwrap();
    /// assert_eq!(engine.render(f), "a and (not b)");
    /// ```
    pub fn build(&self, expression: &str) -> Result<Ref> {
        let mut cursor = Cursor::new(expression);
        cursor.skip_whitespace();
        if cursor.is_at_end() {
            return Ok(self.one());
        }

        let f = self.parse_guard(&mut cursor, 0)?;

        cursor.skip_whitespace();
        if !cursor.is_at_end() {
            return Err(Error::TrailingInput {
                position: cursor.position(),
            });
        }
        Ok(f)
    }

    fn parse_guard(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Ref> {
        if depth >= GUARD_DEPTH_LIMIT {
            return Err(Error::TooDeep {
                limit: GUARD_DEPTH_LIMIT,
            });
        }

        cursor.skip_whitespace();
        let position = cursor.position();
        match cursor.bump() {
            Some('$') => {
                let name = cursor.take_name(true);
                self.var(name)
            }
            Some('~') => {
                let f = self.parse_guard(cursor, depth + 1)?;
                Ok(self.not(f))
            }
            Some('&') => {
                let f = self.parse_guard(cursor, depth + 1)?;
                let g = self.parse_guard(cursor, depth + 1)?;
                Ok(self.and(f, g))
            }
            Some('|') => {
                let f = self.parse_guard(cursor, depth + 1)?;
                let g = self.parse_guard(cursor, depth + 1)?;
                Ok(self.or(f, g))
            }
            Some(found) => Err(Error::Syntax { found, position }),
            None => Err(Error::UnexpectedEnd { position }),
        }
    }

    /// Human-readable infix form of a guard, by Shannon expansion on its top variable.
    ///
    /// `T` and `F` are the constants; a literal renders as its name or `(not name)`.
    pub fn render(&self, f: Ref) -> String {
        if self.bdd.is_one(f) {
            return "T".to_string();
        }
        if self.bdd.is_zero(f) {
            return "F".to_string();
        }

        let label = self.name(self.bdd.variable(f));
        let low = self.bdd.low_node(f);
        let high = self.bdd.high_node(f);

        if self.bdd.is_one(high) && self.bdd.is_zero(low) {
            label.to_string()
        } else if self.bdd.is_zero(high) && self.bdd.is_one(low) {
            format!("(not {})", label)
        } else if self.bdd.is_one(high) {
            format!("{} or {}", label, self.render(low))
        } else if self.bdd.is_one(low) {
            format!("(not {}) or {}", label, self.render(high))
        } else if self.bdd.is_zero(low) {
            format!("{} and {}", label, self.render(high))
        } else if self.bdd.is_zero(high) {
            format!("(not {}) and {}", label, self.render(low))
        } else {
            format!(
                "({} and {}) or ((not {}) and {})",
                label,
                self.render(high),
                label,
                self.render(low)
            )
        }
    }

    /// Number of configurations (assignments to all declared variables) that enable `f`.
    pub fn count_configurations(&self, f: Ref) -> BigUint {
        self.bdd.sat_count(f, self.num_variables())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn engine() -> Engine {
        Engine::new(["A", "B", "M", "U"]).unwrap()
    }

    #[test]
    fn test_reserved_names_rejected() {
        for name in ["a$", "&b", "c|d", "~e", "f@"] {
            let res = Engine::new(["ok", name]);
            println!("{} -> {:?}", name, res.as_ref().err());
            assert!(matches!(res, Err(Error::InvalidName { reserved: Some(_), .. })));
        }
        assert!(matches!(
            Engine::new(["two words"]),
            Err(Error::InvalidName { reserved: None, .. })
        ));
    }

    #[test]
    fn test_duplicates_rejected() {
        assert_eq!(
            Engine::new(["a", "b", "a"]).unwrap_err(),
            Error::DuplicateProposition("a".to_string())
        );
    }

    #[test]
    fn test_placeholders() {
        let engine = Engine::new(["", "a", ""]).unwrap();
        assert_eq!(engine.num_variables(), 3);
        assert_eq!(engine.variable("a"), Some(2));
        assert_eq!(engine.variable(""), None);
        assert_eq!(engine.build("$").unwrap_err(), Error::UnknownProposition(String::new()));
    }

    #[test]
    fn test_build_literals() {
        let engine = engine();
        let a = engine.build("$A").unwrap();
        assert_eq!(a, engine.var("A").unwrap());
        assert_eq!(engine.build("~$A").unwrap(), engine.not(a));
        assert_eq!(engine.build("  ").unwrap(), engine.one());
        assert_eq!(engine.build(" $A ").unwrap(), a);
    }

    #[test]
    fn test_build_consumes_in_order() {
        let engine = engine();
        let a = engine.var("A").unwrap();
        let b = engine.var("B").unwrap();
        let m = engine.var("M").unwrap();

        // a and (b or m), not (a and b) or m
        let f = engine.build("&$A|$B$M").unwrap();
        assert_eq!(f, engine.and(a, engine.or(b, m)));

        let g = engine.build("|&$A$B$M").unwrap();
        assert_eq!(g, engine.or(engine.and(a, b), m));
        assert_ne!(f, g);
    }

    #[test]
    fn test_build_errors() {
        let engine = engine();
        assert_eq!(engine.build("$X").unwrap_err(), Error::UnknownProposition("X".to_string()));
        assert_eq!(engine.build("&$A").unwrap_err(), Error::UnexpectedEnd { position: 3 });
        assert_eq!(engine.build("#$A").unwrap_err(), Error::Syntax { found: '#', position: 0 });
        assert_eq!(engine.build("$A$B").unwrap_err(), Error::TrailingInput { position: 2 });
        let deep = format!("{}$A", "~".repeat(GUARD_DEPTH_LIMIT + 1));
        assert!(matches!(engine.build(&deep), Err(Error::TooDeep { .. })));
    }

    #[test]
    fn test_render_constants_and_literals() {
        let engine = engine();
        assert_eq!(engine.render(engine.one()), "T");
        assert_eq!(engine.render(engine.zero()), "F");
        assert_eq!(engine.render(engine.build("$B").unwrap()), "B");
        assert_eq!(engine.render(engine.build("~$B").unwrap()), "(not B)");
    }

    #[test]
    fn test_render_expansions() {
        let engine = engine();
        let cases = [
            ("&~$B$U", "(not B) and U"),
            ("&$A$U", "A and U"),
            ("|$A$U", "A or U"),
            ("|~$A$U", "(not A) or U"),
            ("|&$A$B&~$A$M", "(A and B) or ((not A) and M)"),
            ("&$A&$B$M", "A and B and M"),
        ];
        for (expr, expected) in cases {
            let f = engine.build(expr).unwrap();
            println!("{} -> {}", expr, engine.render(f));
            assert_eq!(engine.render(f), expected);
        }
    }

    #[test]
    fn test_count_configurations() {
        let engine = engine();
        assert_eq!(engine.count_configurations(engine.one()), BigUint::from(16u32));
        assert_eq!(engine.count_configurations(engine.build("$A").unwrap()), BigUint::from(8u32));
        assert_eq!(engine.count_configurations(engine.build("&~$B$U").unwrap()), BigUint::from(4u32));
        assert_eq!(engine.count_configurations(engine.build("|$A$B").unwrap()), BigUint::from(12u32));
    }
}
