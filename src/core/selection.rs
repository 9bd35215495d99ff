//! The selection collaborator ("gallery") consumed by the tracker and wheel
//! navigation.

/// Snapshot of the gallery's current listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryData {
    pub item_count: usize,
    /// Location of the listing; empty at the root.
    pub path: String,
}

impl GalleryData {
    /// A non-empty path means there is a parent context to move up into.
    pub fn has_parent(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Current selection plus the mutator used by wheel navigation.
pub trait Selection {
    fn selected(&self) -> Option<usize>;
    /// Change the selection.  Returns `false` if the gallery refused it.
    fn select(&self, index: Option<usize>) -> bool;
    fn data(&self) -> Option<GalleryData>;
}
