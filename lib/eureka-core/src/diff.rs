//! Instance set difference by identity key

use crate::Instance;
use std::collections::HashSet;

/// Instances of `previous` whose identity is absent from `desired`.
///
/// Attribute changes on an instance that keeps its identity do not count as
/// vanished. Order follows `previous`.
pub fn vanished_instances<'a>(previous: &'a [Instance], desired: &[Instance]) -> Vec<&'a Instance> {
    let desired: HashSet<&str> = desired.iter().map(Instance::id).collect();

    previous
        .iter()
        .filter(|instance| !desired.contains(instance.id()))
        .collect()
}
