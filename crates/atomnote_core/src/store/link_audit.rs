//! Dangling cross-reference detection over a `NoteStore`.
//!
//! Dangling links are allowed by default; this module only reports them.
//! Callers decide whether a report entry is fatal.

use crate::model::note::NoteRecord;
use crate::render::link::extract_links;
use crate::store::note_store::NoteStore;
use serde::Serialize;

/// Where a dangling reference was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOrigin {
    Related,
    Body,
}

/// One reference whose target title is not in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingLink {
    pub source: String,
    pub target: String,
    pub origin: LinkOrigin,
}

/// Lists dangling references for every note, in store order.
pub fn audit_links(store: &NoteStore) -> Vec<DanglingLink> {
    store
        .iter()
        .flat_map(|note| dangling_links_for(note, store))
        .collect()
}

/// Lists dangling references of one note: `related` entries first, then
/// body links in order of appearance.
pub fn dangling_links_for(note: &NoteRecord, store: &NoteStore) -> Vec<DanglingLink> {
    let related = note
        .related
        .iter()
        .cloned()
        .map(|target| (target, LinkOrigin::Related));
    let body = extract_links(&note.body)
        .into_iter()
        .map(|target| (target, LinkOrigin::Body));

    related
        .chain(body)
        .filter(|(target, _)| !store.contains(target))
        .map(|(target, origin)| DanglingLink {
            source: note.title.clone(),
            target,
            origin,
        })
        .collect()
}
