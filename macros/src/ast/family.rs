use syn::{
    parse::{Parse, ParseStream},
    Ident, LitStr, Result as SynResult, Token,
};

use super::grammar::{parse_family, GrammarSpec};

/// Top-level batch definition
/// node_family! { name: Foo, external { ... }, family Bar { ... }, ... }
pub struct FamilyDef {
    pub name: Ident,
    /// Output directory for `node_family_files!`, relative to the invoking
    /// crate's manifest directory. `None` for in-place expansion.
    pub output: Option<LitStr>,
    /// Externally supplied leaf types generated code may reference by name.
    pub externals: Vec<Ident>,
    /// Families in declaration order.
    pub families: Vec<GrammarSpec>,
}

impl Parse for FamilyDef {
    fn parse(input: ParseStream) -> SynResult<Self> {
        // Parse: name: Identifier
        let name_kw = input.parse::<Ident>()?;
        if name_kw != "name" {
            return Err(syn::Error::new(name_kw.span(), "expected 'name'"));
        }
        let _ = input.parse::<Token![:]>()?;
        let name = input.parse::<Ident>()?;
        let _ = input.parse::<Token![,]>()?;

        // Parse: output: "dir", (optional)
        let output = if input.peek(Ident) {
            let lookahead = input.fork().parse::<Ident>()?;
            if lookahead == "output" {
                Some(parse_output(input)?)
            } else {
                None
            }
        } else {
            None
        };

        // Parse: external { ... } (optional)
        let externals = if input.peek(Ident) {
            let lookahead = input.fork().parse::<Ident>()?;
            if lookahead == "external" {
                parse_externals(input)?
            } else {
                Vec::new()
            }
        } else {
            Vec::new()
        };

        // Parse: family ... { ... } blocks until the input runs out
        let mut families = Vec::new();
        while input.peek(Ident) {
            families.push(parse_family(input)?);
        }

        if !input.is_empty() {
            return Err(input.error("expected 'family' block"));
        }

        Ok(FamilyDef { name, output, externals, families })
    }
}

fn parse_output(input: ParseStream) -> SynResult<LitStr> {
    let output_ident = input.parse::<Ident>()?;
    if output_ident != "output" {
        return Err(syn::Error::new(output_ident.span(), "expected 'output'"));
    }
    let _ = input.parse::<Token![:]>()?;
    let dir = input.parse::<LitStr>()?;
    let _ = input.parse::<Token![,]>()?;

    if dir.value().is_empty() {
        return Err(syn::Error::new(dir.span(), "output directory cannot be empty"));
    }

    Ok(dir)
}

fn parse_externals(input: ParseStream) -> SynResult<Vec<Ident>> {
    let external_ident = input.parse::<Ident>()?;
    if external_ident != "external" {
        return Err(syn::Error::new(external_ident.span(), "expected 'external'"));
    }

    let content;
    syn::braced!(content in input);

    let mut externals = Vec::new();
    while !content.is_empty() {
        externals.push(content.parse::<Ident>()?);
        if content.peek(Token![;]) {
            let _ = content.parse::<Token![;]>()?;
        }
    }

    // Optional comma after closing brace
    if input.peek(Token![,]) {
        let _ = input.parse::<Token![,]>()?;
    }

    Ok(externals)
}
