//! Fragment store operations.

use std::path::Path;

use botforge_fragments::{Fragment, FragmentStore, seed_sqlite};
use eyre::{Context, Result};

use crate::reports::{FragmentSummary, ListReport, SeedReport, ShowReport};

/// Slot names as written in templates, optional ones with a trailing `?`.
fn slot_names(fragment: &Fragment) -> Vec<String> {
    fragment
        .slots()
        .iter()
        .map(|slot| {
            if slot.optional {
                format!("{}?", slot.name)
            } else {
                slot.name.clone()
            }
        })
        .collect()
}

/// List every fragment the store holds.
pub fn list(store: &dyn FragmentStore) -> Result<ListReport> {
    let fragments = store
        .ids()
        .wrap_err("Failed to list fragments")?
        .into_iter()
        .map(|id| -> Result<FragmentSummary> {
            let fragment = store
                .get(&id)
                .wrap_err_with(|| format!("Failed to load fragment '{}'", id))?;
            Ok(FragmentSummary {
                slots: slot_names(&fragment),
                id,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ListReport {
        location: store.location().to_string(),
        fragments,
    })
}

/// Show one fragment template.
pub fn show(store: &dyn FragmentStore, id: &str) -> Result<ShowReport> {
    let fragment = store
        .get(id)
        .wrap_err_with(|| format!("Failed to load fragment '{}'", id))?;

    Ok(ShowReport {
        id: fragment.id().to_string(),
        location: store.location().to_string(),
        slots: slot_names(&fragment),
        template: fragment.template().to_string(),
    })
}

/// Copy every fragment of `source` into the SQLite database at `database`.
pub fn seed(source: &dyn FragmentStore, database: &Path) -> Result<SeedReport> {
    seed_sqlite(database, source)
        .wrap_err_with(|| format!("Failed to seed {}", database.display()))?;

    Ok(SeedReport {
        database: database.to_path_buf(),
        source: source.location().to_string(),
        ids: source.ids().wrap_err("Failed to list fragments")?,
    })
}
