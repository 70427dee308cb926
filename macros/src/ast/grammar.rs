use proc_macro2::Span;
use syn::{
    parse::ParseStream,
    Ident, LitStr, Result as SynResult, Token,
};

/// A field's declared type, as written in a specification clause
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// Single node or external type: `Expr`, `Token`, `BinaryExpr`
    Named(Ident),
    /// Ordered sequence: `Vec<Stmt>` (one whitespace token in the clause)
    Sequence(Ident),
}

impl TypeRef {
    /// The name validation must resolve; for sequences, the element type.
    pub fn target(&self) -> &Ident {
        match self {
            TypeRef::Named(ident) => ident,
            TypeRef::Sequence(element) => element,
        }
    }
}

/// One `(type, name)` pair split out of a variant's specification string
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub ty: TypeRef,
    pub name: Ident,
}

/// One concrete node kind within a family
#[derive(Debug, Clone)]
pub struct VariantDef {
    pub name: Ident,
    pub fields: Vec<FieldSpec>,
}

/// Grammar for one base type: its variants in declaration order, plus the
/// other base types (or external types) its generated unit references.
#[derive(Debug, Clone)]
pub struct GrammarSpec {
    pub base: Ident,
    pub variants: Vec<VariantDef>,
    pub requires: Vec<Ident>,
}

/// Parse one `family Base [requires Dep, ...] { Variant : "spec" ; ... }`
/// block. Variant order is insertion order and determines both emission
/// order inside the unit and the visitor method enumeration order.
pub fn parse_family(input: ParseStream) -> SynResult<GrammarSpec> {
    let family_kw = input.parse::<Ident>()?;
    if family_kw != "family" {
        return Err(syn::Error::new(family_kw.span(), "expected 'family'"));
    }

    let base = input.parse::<Ident>()?;

    // Optional: requires Dep, Dep, ...
    let mut requires = Vec::new();
    if input.peek(Ident) {
        let lookahead = input.fork().parse::<Ident>()?;
        if lookahead == "requires" {
            let _ = input.parse::<Ident>()?;
            loop {
                requires.push(input.parse::<Ident>()?);
                if input.peek(Token![,]) && input.peek2(Ident) {
                    let _ = input.parse::<Token![,]>()?;
                } else {
                    break;
                }
            }
        }
    }

    let content;
    syn::braced!(content in input);

    let mut variants = Vec::new();
    while !content.is_empty() {
        variants.push(parse_variant(&content)?);
    }

    // Optional comma after closing brace
    if input.peek(Token![,]) {
        let _ = input.parse::<Token![,]>()?;
    }

    Ok(GrammarSpec { base, variants, requires })
}

/// Parse one variant rule: `Variant : "Type name | Type name" ;`
fn parse_variant(input: ParseStream) -> SynResult<VariantDef> {
    let name = input.parse::<Ident>()?;
    let _ = input.parse::<Token![:]>()?;
    let spec = input.parse::<LitStr>()?;
    let _ = input.parse::<Token![;]>()?;

    let fields = split_field_clauses(&spec)?;

    Ok(VariantDef { name, fields })
}

/// Split a pipe-delimited specification string into `(type, name)` field
/// pairs. Every clause must hold exactly two whitespace-separated tokens;
/// anything else is a malformed clause, reported against the literal's span.
pub fn split_field_clauses(spec: &LitStr) -> SynResult<Vec<FieldSpec>> {
    let text = spec.value();
    let mut fields = Vec::new();

    for clause in text.split('|') {
        let clause = clause.trim();
        let tokens: Vec<&str> = clause.split_whitespace().collect();

        match tokens.as_slice() {
            [ty, name] => {
                fields.push(FieldSpec {
                    ty: parse_type_token(ty, spec.span())?,
                    name: parse_ident_token(name, spec.span())?,
                });
            },
            _ => {
                return Err(syn::Error::new(
                    spec.span(),
                    format!(
                        "malformed field clause `{}`: expected exactly `Type name`",
                        clause
                    ),
                ));
            },
        }
    }

    Ok(fields)
}

/// Parse one type token: a bare identifier or the sequence form `Vec<T>`.
fn parse_type_token(token: &str, span: Span) -> SynResult<TypeRef> {
    if let Some(element) = token.strip_prefix("Vec<").and_then(|rest| rest.strip_suffix('>')) {
        return Ok(TypeRef::Sequence(parse_ident_token(element, span)?));
    }
    Ok(TypeRef::Named(parse_ident_token(token, span)?))
}

fn parse_ident_token(token: &str, span: Span) -> SynResult<Ident> {
    match syn::parse_str::<Ident>(token) {
        Ok(ident) => Ok(Ident::new(&ident.to_string(), span)),
        Err(_) => Err(syn::Error::new(
            span,
            format!("`{}` is not a valid identifier", token),
        )),
    }
}
