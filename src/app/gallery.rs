//! The demo's gallery: a flat listing of a directory (or synthetic items)
//! with a single selection.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use gallery_scroll::core::selection::{GalleryData, Selection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub name: String,
    pub is_dir: bool,
}

#[derive(Debug, Default)]
struct Listing {
    /// `None` for synthetic listings, which have no parent to move into.
    dir: Option<PathBuf>,
    items: Vec<GalleryItem>,
}

#[derive(Debug, Default)]
pub struct Gallery {
    listing: RefCell<Listing>,
    selected: Cell<Option<usize>>,
}

impl Gallery {
    /// `count` placeholder items, first one selected.
    pub fn synthetic(count: usize) -> Self {
        let items = (0..count)
            .map(|i| GalleryItem {
                name: format!("item {:>4}", i + 1),
                is_dir: false,
            })
            .collect();
        let gallery = Self::default();
        gallery.replace(Listing { dir: None, items });
        gallery
    }

    pub fn open_dir(dir: &Path) -> Result<Self> {
        let gallery = Self::default();
        gallery.navigate(dir)?;
        Ok(gallery)
    }

    /// Replace the listing with the contents of `dir`.  The current listing
    /// is kept if `dir` cannot be read.
    pub fn navigate(&self, dir: &Path) -> Result<()> {
        let items = read_listing(dir)?;
        self.replace(Listing {
            dir: Some(dir.to_path_buf()),
            items,
        });
        Ok(())
    }

    fn replace(&self, listing: Listing) {
        let first = (!listing.items.is_empty()).then_some(0);
        *self.listing.borrow_mut() = listing;
        self.selected.set(first);
    }

    pub fn dir(&self) -> Option<PathBuf> {
        self.listing.borrow().dir.clone()
    }

    pub fn parent_dir(&self) -> Option<PathBuf> {
        self.listing
            .borrow()
            .dir
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
    }

    pub fn len(&self) -> usize {
        self.listing.borrow().items.len()
    }

    pub fn item(&self, index: usize) -> Option<GalleryItem> {
        self.listing.borrow().items.get(index).cloned()
    }

    /// Borrow the items for the duration of `f`.
    pub fn with_items<R>(&self, f: impl FnOnce(&[GalleryItem]) -> R) -> R {
        f(&self.listing.borrow().items)
    }

    /// Title shown above the grid.
    pub fn title(&self) -> String {
        match self.dir() {
            Some(dir) => dir.display().to_string(),
            None => format!("{} items", self.len()),
        }
    }
}

impl Selection for Gallery {
    fn selected(&self) -> Option<usize> {
        self.selected.get()
    }

    fn select(&self, index: Option<usize>) -> bool {
        if index.is_some_and(|i| i >= self.len()) {
            return false;
        }
        self.selected.set(index);
        true
    }

    fn data(&self) -> Option<GalleryData> {
        let listing = self.listing.borrow();
        // The filesystem root has no parent to move up into.
        let path = match listing.dir.as_deref() {
            Some(dir) if dir.parent().is_some() => dir.display().to_string(),
            _ => String::new(),
        };
        Some(GalleryData {
            item_count: listing.items.len(),
            path,
        })
    }
}

/// Directories first, then files, each sorted case-insensitively.
fn read_listing(dir: &Path) -> Result<Vec<GalleryItem>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("cannot read {}", dir.display()))?;
    let mut items: Vec<GalleryItem> = entries
        .flatten()
        .map(|entry| GalleryItem {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: entry.file_type().is_ok_and(|ft| ft.is_dir()),
        })
        .collect();
    items.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(items)
}
