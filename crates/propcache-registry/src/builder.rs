//! Type table builder.
//!
//! A class table starts from its base class's table and overlays the class's
//! own declarations. An interface table is the union of its base interfaces'
//! tables, in declaration order with the first one seen winning a name
//! collision, overlaid with the interface's own declarations. Own
//! declarations always replace inherited entries of the same name.

use std::sync::Arc;

use propcache_core::{AccessResult, TypeCategory, TypeInfo, catalog};
use tracing::debug;

use crate::table::{Entries, TypeAccessorTable};
use crate::tables::{BuildState, TableCache};

/// Build the table for `info` under `cache`'s policy.
///
/// Runs with `cache`'s build lock held. Base tables are taken from the same
/// cache and built on demand without locking again.
#[cfg_attr(feature = "profiling", profiling::function)]
pub(crate) fn build(cache: &TableCache, state: &mut BuildState, info: &TypeInfo) -> AccessResult<Arc<TypeAccessorTable>> {
    if info.is_open_generic() {
        debug!(type_name = %info.name, policy = %cache.policy(), "open generic, empty table");
        return Ok(TypeAccessorTable::empty());
    }

    // Instances of this type must be castable to the declaring types below.
    if info.type_id.is_some() && !catalog().contains(info.type_hash) {
        catalog().register(info.clone());
    }

    let mut entries = Entries::default();
    match info.category {
        TypeCategory::Class => {
            let base = match &info.base_class {
                Some(base) => cache.get_locked_ref(state, &base.type_ref)?,
                None => TypeAccessorTable::empty(),
            };
            entries.extend(base.iter().map(|(name, accessor)| (Arc::clone(name), Arc::clone(accessor))));
        }
        TypeCategory::Interface => {
            for interface in &info.interfaces {
                let table = cache.get_locked_ref(state, &interface.type_ref)?;
                for (name, accessor) in table.iter() {
                    entries
                        .entry(Arc::clone(name))
                        .or_insert_with(|| Arc::clone(accessor));
                }
            }
        }
    }

    let inherited = entries.len();
    for property in &info.properties {
        if property.is_indexed() || !property.is_admitted(cache.policy()) {
            continue;
        }
        let accessor = cache.registry().get(property)?;
        entries.insert(Arc::clone(&property.name), accessor);
    }

    debug!(
        type_name = %info.name,
        policy = %cache.policy(),
        inherited,
        total = entries.len(),
        "built accessor table"
    );

    Ok(TypeAccessorTable::from_entries(entries))
}
