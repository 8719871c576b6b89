use crate::pattern_set::PatternSet;
use crate::value::{Object, TypeRegistry};

/// Match an object by type name.
///
/// Only bare-identifier keys naming a registered type are considered; the
/// first one equal to the subject's type name wins. Handlers get no
/// arguments; object patterns never destructure.
pub fn match_object<R: From<bool>>(registry: &TypeRegistry, set: &PatternSet<'_, R>, subject: &Object) -> R {
    let hit = set.specs().find(|(_, spec)| {
        spec.as_type_name()
            .is_some_and(|name| registry.contains(name) && name == subject.type_name())
    });
    match hit {
        Some((pattern, _)) => {
            tracing::trace!(pattern, "object match");
            set.invoke(pattern, &[])
        }
        None => {
            tracing::debug!(type_name = subject.type_name(), "no type pattern matched, using fallback");
            set.fallback()
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
