// Helper module for writing emitted units to source files.
// Used by node_family_files! when a hierarchy should live as checked-in
// source rather than be expanded in place on every build.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::quote;

use super::EmittedUnit;
use crate::ast::family::FamilyDef;

/// Write one `<base_snake>.rs` file per emitted unit into `output_dir`,
/// resolved against the invoking crate's manifest directory.
///
/// Units arrive in dependency order. Each file imports its required
/// families' modules plus the parent module (which supplies the external
/// leaf types), so every declaration is visible before use.
pub fn write_unit_files(
    output_dir: &str,
    def: &FamilyDef,
    units: &[EmittedUnit],
) -> io::Result<()> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let out = Path::new(&manifest_dir).join(output_dir);
    fs::create_dir_all(&out)?;

    let bases: HashSet<String> = def
        .families
        .iter()
        .map(|family| family.base.to_string())
        .collect();

    for unit in units {
        let file_name = format!("{}.rs", unit.base.to_string().to_case(Case::Snake));
        let file_path = out.join(&file_name);

        let header = unit_header(def, &bases, unit);
        let source = render_unit(&header, unit)?;

        fs::write(&file_path, source)?;
        eprintln!("Generated node family unit: {}", file_path.display());
    }

    Ok(())
}

/// Imports for one unit file: the parent module for external leaf types,
/// plus one module per required family.
fn unit_header(def: &FamilyDef, bases: &HashSet<String>, unit: &EmittedUnit) -> TokenStream {
    let base_name = unit.base.to_string();

    let dep_imports: Vec<TokenStream> = def
        .families
        .iter()
        .filter(|family| family.base == base_name)
        .flat_map(|family| family.requires.iter())
        .filter(|dep| bases.contains(&dep.to_string()))
        .map(|dep| {
            let dep_mod = syn::Ident::new(
                &dep.to_string().to_case(Case::Snake),
                proc_macro2::Span::call_site(),
            );
            quote! { use super::#dep_mod::*; }
        })
        .collect();

    quote! {
        use super::*;

        #(#dep_imports)*
    }
}

fn render_unit(header: &TokenStream, unit: &EmittedUnit) -> io::Result<String> {
    let tokens = &unit.tokens;
    let combined = quote! {
        #header

        #tokens
    };

    let file = syn::parse2::<syn::File>(combined)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    Ok(format!(
        "// @generated by sylva-macros. Do not edit.\n\n{}",
        prettyplease::unparse(&file)
    ))
}
