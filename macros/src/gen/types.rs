use std::collections::HashSet;

use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use crate::ast::family::FamilyDef;
use crate::ast::grammar::{GrammarSpec, TypeRef, VariantDef};

/// Names of every concrete node struct the batch generates, so field
/// lowering can tell them apart from base enums and external leaf types.
pub struct TypeIndex {
    concrete: HashSet<String>,
}

impl TypeIndex {
    pub fn build(def: &FamilyDef) -> Self {
        let concrete = def
            .families
            .iter()
            .flat_map(|family| {
                family
                    .variants
                    .iter()
                    .map(move |variant| format!("{}{}", variant.name, family.base))
            })
            .collect();

        TypeIndex { concrete }
    }

    /// Lower a declared field type to its Rust form.
    ///
    /// Base enums already wrap a shared handle and are held by value;
    /// concrete node structs get the sharing made explicit; externally
    /// supplied leaf types are held by value. Sequences lower element-wise
    /// by the same rules.
    pub fn lower(&self, ty: &TypeRef) -> TokenStream {
        match ty {
            TypeRef::Named(ident) => self.lower_element(ident),
            TypeRef::Sequence(element) => {
                let element = self.lower_element(element);
                quote! { Vec<#element> }
            },
        }
    }

    fn lower_element(&self, ident: &Ident) -> TokenStream {
        if self.concrete.contains(&ident.to_string()) {
            quote! { std::rc::Rc<#ident> }
        } else {
            quote! { #ident }
        }
    }
}

/// `Binary` within family `Expr` names the concrete type `BinaryExpr`.
pub fn concrete_ident(family: &GrammarSpec, variant: &VariantDef) -> Ident {
    Ident::new(
        &format!("{}{}", variant.name, family.base),
        variant.name.span(),
    )
}

/// Generate the concrete node structs, their factories, and the base enum
/// for one family.
pub fn generate_node_types(family: &GrammarSpec, index: &TypeIndex) -> TokenStream {
    let base = &family.base;

    let structs: Vec<TokenStream> = family
        .variants
        .iter()
        .map(|variant| generate_node_struct(family, variant, index))
        .collect();

    let arms: Vec<TokenStream> = family
        .variants
        .iter()
        .map(|variant| {
            let name = &variant.name;
            let concrete = concrete_ident(family, variant);
            quote! { #name(std::rc::Rc<#concrete>) }
        })
        .collect();

    let factories: Vec<TokenStream> = family
        .variants
        .iter()
        .map(|variant| generate_base_factory(family, variant, index))
        .collect();

    quote! {
        #(#structs)*

        #[derive(Debug, Clone, PartialEq)]
        pub enum #base {
            #(#arms),*
        }

        impl #base {
            #(#factories)*
        }
    }
}

/// One node struct plus its `new` factory. The factory is the only intended
/// construction path: the node is wrapped for shared ownership before the
/// caller ever sees it.
fn generate_node_struct(
    family: &GrammarSpec,
    variant: &VariantDef,
    index: &TypeIndex,
) -> TokenStream {
    let concrete = concrete_ident(family, variant);

    let fields: Vec<TokenStream> = variant
        .fields
        .iter()
        .map(|field| {
            let name = &field.name;
            let ty = index.lower(&field.ty);
            quote! { pub #name: #ty }
        })
        .collect();

    let params: Vec<TokenStream> = factory_params(variant, index);
    let names: Vec<&Ident> = variant.fields.iter().map(|field| &field.name).collect();

    quote! {
        #[derive(Debug, Clone, PartialEq)]
        pub struct #concrete {
            #(#fields),*
        }

        impl #concrete {
            pub fn new(#(#params),*) -> std::rc::Rc<Self> {
                std::rc::Rc::new(#concrete { #(#names),* })
            }
        }
    }
}

/// Base-level factory: `Expr::binary(..)` builds the node through
/// `BinaryExpr::new` and returns it already wrapped in the base enum.
fn generate_base_factory(
    family: &GrammarSpec,
    variant: &VariantDef,
    index: &TypeIndex,
) -> TokenStream {
    let base = &family.base;
    let name = &variant.name;
    let concrete = concrete_ident(family, variant);
    let method = Ident::new(
        &variant.name.to_string().to_case(Case::Snake),
        variant.name.span(),
    );

    let params: Vec<TokenStream> = factory_params(variant, index);
    let names: Vec<&Ident> = variant.fields.iter().map(|field| &field.name).collect();

    quote! {
        pub fn #method(#(#params),*) -> #base {
            #base::#name(#concrete::new(#(#names),*))
        }
    }
}

fn factory_params(variant: &VariantDef, index: &TypeIndex) -> Vec<TokenStream> {
    variant
        .fields
        .iter()
        .map(|field| {
            let name = &field.name;
            let ty = index.lower(&field.ty);
            quote! { #name: #ty }
        })
        .collect()
}
