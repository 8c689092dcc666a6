//! Fragments command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// One fragment in a listing.
#[derive(Debug)]
pub struct FragmentSummary {
    pub id: String,
    /// Slot names; optional slots carry a trailing `?`.
    pub slots: Vec<String>,
}

/// Fragments available in a store.
#[derive(Debug)]
pub struct ListReport {
    pub location: String,
    pub fragments: Vec<FragmentSummary>,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        out.section(&format!(
            "Fragments in {} ({})",
            self.location,
            self.fragments.len()
        ));
        for fragment in &self.fragments {
            if fragment.slots.is_empty() {
                out.list_item(&fragment.id);
            } else {
                out.list_item(&format!("{} ({})", fragment.id, fragment.slots.join(", ")));
            }
        }
    }
}

/// A single fragment template.
#[derive(Debug)]
pub struct ShowReport {
    pub id: String,
    pub location: String,
    pub slots: Vec<String>,
    pub template: String,
}

impl Report for ShowReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Store", &self.location);
        out.key_value("Slots", &self.slots.join(", "));
        out.code(&self.id, &self.template);
    }
}

/// Result of seeding a SQLite database.
#[derive(Debug)]
pub struct SeedReport {
    pub database: PathBuf,
    pub source: String,
    pub ids: Vec<String>,
}

impl Report for SeedReport {
    fn render(&self, out: &mut dyn Output) {
        out.section(&format!(
            "Seeded {} from {}",
            self.database.display(),
            self.source
        ));
        for id in &self.ids {
            out.added_item(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::RecordingOutput;

    #[test]
    fn test_list_report() {
        let report = ListReport {
            location: "built-in fragments".into(),
            fragments: vec![
                FragmentSummary {
                    id: "def_init".into(),
                    slots: vec![],
                },
                FragmentSummary {
                    id: "launch".into(),
                    slots: vec!["own_code".into()],
                },
            ],
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "Fragments in built-in fragments (2):",
                "  - def_init",
                "  - launch (own_code)",
            ]
        );
    }
}
