//! Record data model.
//!
//! A [`Record`] is one documented technique; a [`RecordStore`] is the
//! immutable, explicitly constructed set of records that every derived view
//! (catalog, key index, registry tree) is computed from.

mod record;
mod store;

pub use record::{mitre_url, Record, RecordRef, Resource, UseCase, MITRE_TECHNIQUE_URL};
pub use store::RecordStore;
