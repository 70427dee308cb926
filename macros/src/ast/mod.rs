//! Grammar description AST for the `node_family!` macro
//!
//! - `family` - top-level batch definition (`FamilyDef`) and its parser
//! - `grammar` - per-family grammar structures and field-clause splitting
//! - `validation` - batch validation run before any code is generated

pub mod family;
pub mod grammar;
pub mod validation;
