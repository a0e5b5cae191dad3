//! # mdpf-rs: formulas over Markov Decision Process Families
//!
//! **`mdpf-rs`** evaluates PCTL-style formulas over a **Markov Decision Process Family** (MDPF):
//! a probabilistic, action-labeled transition system in which every transition is also guarded
//! by a boolean condition over product-line features. The answer to a formula is a
//! [`ResultSet`][crate::result::ResultSet]: per state, the guards under which the state satisfies
//! the formula and with which probability.
//!
//! ## Guards
//!
//! Guards are boolean functions over the declared propositions, stored as a shared, reduced,
//! ordered **Binary Decision Diagram** with complement edges. All guard operations go through the
//! [`Engine`][crate::engine::Engine], which owns the [`Bdd`][crate::bdd::Bdd] manager. Since nodes
//! are hash-consed, two guards are equal iff their [`Ref`][crate::reference::Ref] handles are equal.
//!
//! Guards and formulas are both written in prefix notation. `$name` is a literal, `~`, `&`, `|`
//! are the connectives. Formulas add `@` (next step) and `U<bound>` (bounded until).
//!
//! ## Basic Usage
//!
//! ```rust
//! use mdpf_rs::mdpf::Mdpf;
//!
//! let model = Mdpf::builder()
//!     .propositions(["A", "B"])
//!     .states(["idle", "busy", "done"])
//!     .transition("idle", "busy", "try", 0.9, "$A")
//!     .transition("idle", "done", "try", 0.1, "")
//!     .transition("busy", "done", "send", 1.0, "~$B")
//!     .build()
//!     .unwrap();
//!
//! // States that can reach a `send` state in one step.
//! let res = model.evaluate("@$send").unwrap();
//! let rows = res.render(model.engine());
//! assert_eq!(rows[0], ("idle", vec!["A/0.9".to_string()]));
//!
//! let likely = res.get_probability(">", 0.5).unwrap();
//! assert_eq!(likely.len(), 1);
//! ```
//!
//! ## Core Components
//!
//! - **[`engine`]**: Propositions, guard parsing and rendering, on top of the [`bdd`] manager.
//! - **[`assignment`]**: Satisfying cubes and the weaker-than relation between guards.
//! - **[`transition`]**: Guarded probabilities and their product, sum and minimization.
//! - **[`mdpf`]**: The model, its builder and the formula evaluator.
//! - **[`result`]**: Per-state results and threshold queries.

pub mod assignment;
pub mod bdd;
pub mod cache;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod formula;
pub mod mdpf;
pub mod reference;
pub mod result;
pub mod sat;
pub mod state;
pub mod table;
pub mod transition;
pub mod utils;

pub use crate::error::{Error, Result};
