//! Node families for the sylva front end
//!
//! `ast` instantiates the expression and statement hierarchies from their
//! declarative grammar; `printer` renders trees in parenthesized prefix
//! form.

pub mod ast;
pub mod printer;
