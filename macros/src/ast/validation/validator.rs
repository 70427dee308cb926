use std::collections::{HashMap, HashSet};

use super::GrammarError;
use crate::ast::family::FamilyDef;
use crate::ast::grammar::GrammarSpec;

/// Validate a whole batch before any generation happens.
///
/// Checks, in order: base name uniqueness, `requires` resolvability, variant
/// and field name uniqueness, and resolvability of every field type
/// reference. The first failure aborts the batch.
pub fn validate_families(def: &FamilyDef) -> Result<(), GrammarError> {
    // Build set of declared base names
    let mut bases: HashSet<String> = HashSet::new();
    for family in &def.families {
        let base_name = family.base.to_string();
        if !bases.insert(base_name.clone()) {
            return Err(GrammarError::DuplicateBase {
                base: base_name,
                span: family.base.span(),
            });
        }
    }

    let externals: HashSet<String> = def.externals.iter().map(|e| e.to_string()).collect();

    // Map every concrete node type name (`<Variant><Base>`) to its owning base
    let mut concrete: HashMap<String, String> = HashMap::new();
    for family in &def.families {
        for variant in &family.variants {
            concrete.insert(
                format!("{}{}", variant.name, family.base),
                family.base.to_string(),
            );
        }
    }

    for family in &def.families {
        validate_family(family, &bases, &externals, &concrete)?;
    }

    Ok(())
}

fn validate_family(
    family: &GrammarSpec,
    bases: &HashSet<String>,
    externals: &HashSet<String>,
    concrete: &HashMap<String, String>,
) -> Result<(), GrammarError> {
    let base_name = family.base.to_string();

    // requires entries must name another declared family or an external type
    for dep in &family.requires {
        let dep_name = dep.to_string();
        if !bases.contains(&dep_name) && !externals.contains(&dep_name) {
            return Err(GrammarError::UnknownDependency {
                base: base_name.clone(),
                dependency: dep_name,
                span: dep.span(),
            });
        }
    }

    // Node types visible to this family: itself plus everything it requires
    let mut visible: HashSet<String> = HashSet::new();
    visible.insert(base_name.clone());
    for dep in &family.requires {
        visible.insert(dep.to_string());
    }

    let mut seen_variants = HashSet::new();
    for variant in &family.variants {
        let variant_name = variant.name.to_string();
        if !seen_variants.insert(variant_name.clone()) {
            return Err(GrammarError::DuplicateVariant {
                base: base_name.clone(),
                variant: variant_name,
                span: variant.name.span(),
            });
        }

        let mut seen_fields = HashSet::new();
        for field in &variant.fields {
            let field_name = field.name.to_string();
            if !seen_fields.insert(field_name.clone()) {
                return Err(GrammarError::DuplicateField {
                    base: base_name.clone(),
                    variant: variant_name.clone(),
                    field: field_name,
                    span: field.name.span(),
                });
            }

            let target = field.ty.target();
            let target_name = target.to_string();

            if externals.contains(&target_name) || visible.contains(&target_name) {
                continue;
            }
            // Concrete variant types resolve through their owning base
            if let Some(owner) = concrete.get(&target_name) {
                if visible.contains(owner) {
                    continue;
                }
                return Err(GrammarError::MissingDependency {
                    base: base_name.clone(),
                    variant: variant_name.clone(),
                    dependency: owner.clone(),
                    span: target.span(),
                });
            }
            // Declared elsewhere in the batch, just not listed in requires
            if bases.contains(&target_name) {
                return Err(GrammarError::MissingDependency {
                    base: base_name.clone(),
                    variant: variant_name.clone(),
                    dependency: target_name,
                    span: target.span(),
                });
            }

            return Err(GrammarError::UnknownTypeReference {
                base: base_name.clone(),
                variant: variant_name.clone(),
                ty: target_name,
                span: target.span(),
            });
        }
    }

    Ok(())
}
