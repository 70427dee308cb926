//! Batch validation for node family definitions
//!
//! Every semantic error is detected here, before any code is generated, so
//! a failed expansion never exposes a partial hierarchy.

mod validator;

pub use validator::validate_families;

use proc_macro2::Span;

/// A semantic error in an otherwise well-formed grammar description.
#[derive(Debug)]
pub enum GrammarError {
    /// Two families share one base type name.
    DuplicateBase { base: String, span: Span },
    /// Two variants share a name within one family.
    DuplicateVariant {
        base: String,
        variant: String,
        span: Span,
    },
    /// Two fields share a name within one variant.
    DuplicateField {
        base: String,
        variant: String,
        field: String,
        span: Span,
    },
    /// A field references a type that is declared nowhere in the batch and
    /// is not an external type.
    UnknownTypeReference {
        base: String,
        variant: String,
        ty: String,
        span: Span,
    },
    /// A field references a type declared in the batch but not visible to
    /// this family; the family must list the owning base in `requires`.
    MissingDependency {
        base: String,
        variant: String,
        dependency: String,
        span: Span,
    },
    /// A `requires` entry names something never declared.
    UnknownDependency {
        base: String,
        dependency: String,
        span: Span,
    },
    /// The `requires` graph has no valid emission order.
    CircularDependency { base: String, span: Span },
}

impl GrammarError {
    pub fn span(&self) -> Span {
        match self {
            GrammarError::DuplicateBase { span, .. }
            | GrammarError::DuplicateVariant { span, .. }
            | GrammarError::DuplicateField { span, .. }
            | GrammarError::UnknownTypeReference { span, .. }
            | GrammarError::MissingDependency { span, .. }
            | GrammarError::UnknownDependency { span, .. }
            | GrammarError::CircularDependency { span, .. } => *span,
        }
    }

    pub fn message(&self) -> String {
        match self {
            GrammarError::DuplicateBase { base, .. } => {
                format!("base type `{}` is declared more than once", base)
            },
            GrammarError::DuplicateVariant { base, variant, .. } => {
                format!(
                    "family `{}` declares variant `{}` more than once",
                    base, variant
                )
            },
            GrammarError::DuplicateField { base, variant, field, .. } => {
                format!(
                    "variant `{}` of family `{}` declares field `{}` more than once",
                    variant, base, field
                )
            },
            GrammarError::UnknownTypeReference { base, variant, ty, .. } => {
                format!(
                    "variant `{}` of family `{}` references `{}`, which is neither a declared node type nor an external type",
                    variant, base, ty
                )
            },
            GrammarError::MissingDependency { base, variant, dependency, .. } => {
                format!(
                    "variant `{}` references types from family `{}`; add `requires {}` to family `{}`",
                    variant, dependency, dependency, base
                )
            },
            GrammarError::UnknownDependency { base, dependency, .. } => {
                format!(
                    "family `{}` requires `{}`, which is never declared",
                    base, dependency
                )
            },
            GrammarError::CircularDependency { base, .. } => {
                format!("family `{}` participates in a dependency cycle", base)
            },
        }
    }
}
