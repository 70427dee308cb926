//! sylva procedural macro for declaring syntax-tree node families
//!
//! This crate provides the `node_family!` macro which expands a declarative
//! grammar description into:
//! - One concrete node struct per variant, fields under shared ownership
//! - One base enum per family (the polymorphic root of the node kinds)
//! - One visitor trait per family with a dispatch method per variant
//! - `accept` wiring for double-dispatch traversal
//!
//! `node_family_files!` performs the same expansion but serializes each
//! family's unit to a Rust source file instead of splicing it in place.

mod ast;
mod gen;

use proc_macro::TokenStream;
use proc_macro_error::{abort, proc_macro_error};
use syn::parse_macro_input;

use ast::family::FamilyDef;
use ast::validation::validate_families;
use gen::writer::write_unit_files;
use gen::{emission_order, generate_all, generate_units};

#[proc_macro]
#[proc_macro_error]
pub fn node_family(input: TokenStream) -> TokenStream {
    let family_def = parse_macro_input!(input as FamilyDef);

    if let Err(e) = validate_families(&family_def) {
        let span = e.span();
        let msg = e.message();
        abort!(span, "{}", msg);
    }

    // Families a hierarchy requires must be emitted before the hierarchy itself
    let order = match emission_order(&family_def) {
        Ok(order) => order,
        Err(e) => abort!(e.span(), "{}", e.message()),
    };

    let code = generate_all(&family_def, &order);
    TokenStream::from(code)
}

/// File-writing expansion: parse and validate the batch, then write one
/// generated source file per base type into the configured output directory.
/// Expands to a placeholder item so the invocation site stays valid. Used
/// when a hierarchy should live as checked-in source rather than be expanded
/// in place on every build.
#[proc_macro]
#[proc_macro_error]
pub fn node_family_files(input: TokenStream) -> TokenStream {
    let family_def = parse_macro_input!(input as FamilyDef);

    if let Err(e) = validate_families(&family_def) {
        abort!(e.span(), "{}", e.message());
    }

    let order = match emission_order(&family_def) {
        Ok(order) => order,
        Err(e) => abort!(e.span(), "{}", e.message()),
    };

    let output = match &family_def.output {
        Some(dir) => dir.clone(),
        None => abort!(
            family_def.name.span(),
            "node_family_files! requires an `output: \"dir\"` entry after `name`"
        ),
    };

    let units = generate_units(&family_def, &order);
    if let Err(e) = write_unit_files(&output.value(), &family_def, &units) {
        abort!(output.span(), "failed to write node family sources: {}", e);
    }

    let name = &family_def.name;
    let const_name = syn::Ident::new(
        &format!("_{}_NODE_FAMILY_GEN", name.to_string().to_uppercase()),
        proc_macro2::Span::call_site(),
    );
    TokenStream::from(quote::quote! {
        #[allow(dead_code)]
        const #const_name: () = ();
    })
}
