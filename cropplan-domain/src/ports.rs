use cropplan_catalog::Catalog;
use cropplan_types::CropRecord;

/// Read-only catalog access.
///
/// The planner only ever reads rows, so anything that can hand out a slice of crops will do.
pub trait CatalogView {
    fn crops(&self) -> &[CropRecord];
}

impl CatalogView for Catalog {
    fn crops(&self) -> &[CropRecord] {
        Catalog::crops(self)
    }
}

impl CatalogView for Vec<CropRecord> {
    fn crops(&self) -> &[CropRecord] {
        self
    }
}
