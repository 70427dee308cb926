use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use super::types::concrete_ident;
use crate::ast::grammar::{GrammarSpec, VariantDef};

/// `ExprVisitor` for base `Expr`.
pub fn visitor_ident(family: &GrammarSpec) -> Ident {
    Ident::new(&format!("{}Visitor", family.base), family.base.span())
}

/// Deterministic dispatch-method name: variant `Binary` of base `Expr`
/// becomes `visit_binary_expr`.
pub fn dispatch_ident(family: &GrammarSpec, variant: &VariantDef) -> Ident {
    Ident::new(
        &format!(
            "visit_{}_{}",
            variant.name.to_string().to_case(Case::Snake),
            family.base.to_string().to_case(Case::Snake),
        ),
        variant.name.span(),
    )
}

/// Generate the visitor capability trait: one method per variant, in
/// declaration order, each receiving the concrete node as its own shared
/// handle.
pub fn generate_visitor(family: &GrammarSpec) -> TokenStream {
    let visitor = visitor_ident(family);

    let methods: Vec<TokenStream> = family
        .variants
        .iter()
        .map(|variant| {
            let method = dispatch_ident(family, variant);
            let concrete = concrete_ident(family, variant);
            quote! {
                fn #method(&mut self, node: &std::rc::Rc<#concrete>) -> Self::Output;
            }
        })
        .collect();

    quote! {
        pub trait #visitor {
            type Output;

            #(#methods)*
        }
    }
}

/// Generate `accept`: the single match that resolves the node kind and
/// invokes the one visitor method for it, passing the node itself.
pub fn generate_accept(family: &GrammarSpec) -> TokenStream {
    let base = &family.base;
    let visitor = visitor_ident(family);

    let arms: Vec<TokenStream> = family
        .variants
        .iter()
        .map(|variant| {
            let name = &variant.name;
            let method = dispatch_ident(family, variant);
            quote! {
                #base::#name(node) => visitor.#method(node)
            }
        })
        .collect();

    quote! {
        impl #base {
            pub fn accept<V: #visitor>(&self, visitor: &mut V) -> V::Output {
                match self {
                    #(#arms),*
                }
            }
        }
    }
}
