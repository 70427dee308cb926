//! Code generation for node family definitions
//!
//! This module turns a validated `FamilyDef` into one self-contained unit
//! per base type, in dependency-respecting order:
//! - `types` - node structs, base enums, factory constructors
//! - `visitor` - visitor traits and `accept` dispatch
//! - `writer` - serialization of emitted units to source files

pub mod types;
pub mod visitor;
pub mod writer;


use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use crate::ast::family::FamilyDef;
use crate::ast::validation::GrammarError;

use types::TypeIndex;

/// Everything emitted for a single base type: the node structs, the base
/// enum, the visitor trait, and the dispatch wiring.
pub struct EmittedUnit {
    pub base: Ident,
    pub tokens: TokenStream,
}

/// Compute the order families must be emitted in: every family after the
/// families it requires, caller order preserved among independents.
///
/// `requires` edges to external types impose no ordering. A cycle has no
/// valid order and is rejected.
pub fn emission_order(def: &FamilyDef) -> Result<Vec<usize>, GrammarError> {
    let index_of: std::collections::HashMap<String, usize> = def
        .families
        .iter()
        .enumerate()
        .map(|(i, family)| (family.base.to_string(), i))
        .collect();

    let deps: Vec<Vec<usize>> = def
        .families
        .iter()
        .map(|family| {
            family
                .requires
                .iter()
                .filter_map(|dep| index_of.get(&dep.to_string()).copied())
                .collect()
        })
        .collect();

    let mut order = Vec::with_capacity(def.families.len());
    let mut placed = vec![false; def.families.len()];

    while order.len() < def.families.len() {
        let before = order.len();
        for i in 0..def.families.len() {
            if !placed[i] && deps[i].iter().all(|&d| placed[d]) {
                placed[i] = true;
                order.push(i);
            }
        }
        if order.len() == before {
            // No family became emittable: the remainder wait on one another
            let stuck = placed.iter().position(|&p| !p).unwrap_or(0);
            let family = &def.families[stuck];
            return Err(GrammarError::CircularDependency {
                base: family.base.to_string(),
                span: family.base.span(),
            });
        }
    }

    Ok(order)
}

/// Generate one unit per family, in the given emission order.
pub fn generate_units(def: &FamilyDef, order: &[usize]) -> Vec<EmittedUnit> {
    let index = TypeIndex::build(def);

    order
        .iter()
        .map(|&idx| {
            let family = &def.families[idx];
            let node_types = types::generate_node_types(family, &index);
            let visitor_trait = visitor::generate_visitor(family);
            let dispatch = visitor::generate_accept(family);

            EmittedUnit {
                base: family.base.clone(),
                tokens: quote! {
                    #node_types

                    #visitor_trait

                    #dispatch
                },
            }
        })
        .collect()
}

/// Expand the whole batch in place, dependency families first.
pub fn generate_all(def: &FamilyDef, order: &[usize]) -> TokenStream {
    let units: Vec<TokenStream> = generate_units(def, order)
        .into_iter()
        .map(|unit| unit.tokens)
        .collect();

    quote! {
        #(#units)*
    }
}
