//! Photo list shared between whoever supplies photos and the frame loop.
//!
//! The frame loop polls [`PhotoLibrary::generation`] and rebuilds the photo
//! panel population when it changes. Image references are opaque strings:
//! nothing here fetches or validates them.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Built-in photos used when no list was supplied.
pub const DEFAULT_PHOTOS: [&str; 6] = [
    "https://images.unsplash.com/photo-1543269664-56d93c1b41a6?auto=format&fit=crop&q=80&w=500",
    "https://images.unsplash.com/photo-1511367461989-f85a21fda167?auto=format&fit=crop&q=80&w=500",
    "https://images.unsplash.com/photo-1544005313-94ddf0286df2?auto=format&fit=crop&q=80&w=500",
    "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?auto=format&fit=crop&q=80&w=500",
    "https://images.unsplash.com/photo-1517841905240-472988babdf9?auto=format&fit=crop&q=80&w=500",
    "https://images.unsplash.com/photo-1534528741775-53994a69daeb?auto=format&fit=crop&q=80&w=500",
];

/// Thread-safe, versioned list of user photos.
#[derive(Debug, Default)]
pub struct PhotoLibrary {
    photos: RwLock<Vec<String>>,
    generation: AtomicU64,
}

impl PhotoLibrary {
    /// Creates an empty library (panels will use [`DEFAULT_PHOTOS`]).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library holding `photos`.
    #[must_use]
    pub fn with_photos(photos: Vec<String>) -> Self {
        Self {
            photos: RwLock::new(photos),
            generation: AtomicU64::new(0),
        }
    }

    /// Replaces the whole list and bumps the generation.
    pub fn replace(&self, photos: Vec<String>) {
        *self.photos.write() = photos;
        self.generation.fetch_add(1, Ordering::Release);
    }

    /// Bumped on every [`replace`](Self::replace).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// The list the panels should cycle through: the user list, or the
    /// defaults when it is empty.
    #[must_use]
    pub fn effective(&self) -> Vec<String> {
        let photos = self.photos.read();
        if photos.is_empty() {
            DEFAULT_PHOTOS.iter().map(|s| (*s).to_string()).collect()
        } else {
            photos.clone()
        }
    }

    /// Number of user-supplied photos.
    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.read().len()
    }

    /// True when no user photos were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.read().is_empty()
    }
}
