use std::cmp::Ordering;
use std::fs;
use std::path::PathBuf;

use log::{debug, info, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::errors::BrowserError;
use crate::services::classifier;
use crate::types::{Entry, MediaKind};
use crate::utils::join_relative;

/// Natural, case-insensitive name comparison (`file2` < `file10`).
///
/// Names that compare equal ignoring case fall back to a byte-wise
/// comparison so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    alphanumeric_sort::compare_str(a.to_lowercase(), b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Directories first, then natural order by name
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    match (a.is_dir, b.is_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => compare_names(&a.name, &b.name),
    }
}

/// Permute the file suffix of a sorted listing, leaving the directory prefix alone
pub fn shuffle_files<R: Rng + ?Sized>(entries: &mut [Entry], rng: &mut R) {
    let split = entries.partition_point(|e| e.is_dir);
    entries[split..].shuffle(rng);
}

/// Service producing ordered directory listings under the root
#[derive(Clone)]
pub struct ListingService {
    root_dir: PathBuf,
}

impl ListingService {
    pub fn new(root_dir: PathBuf) -> Self {
        debug!("Creating ListingService with root directory: {:?}", root_dir);
        Self { root_dir }
    }

    /// List a directory, relative to the root, in directory-first natural order.
    ///
    /// Children whose metadata can't be read (deleted mid-scan, dangling
    /// symlinks) or whose names aren't valid UTF-8 are left out of the result.
    pub fn list(&self, relative_dir: &str) -> Result<Vec<Entry>, BrowserError> {
        let full_path = self.root_dir.join(relative_dir);
        debug!("Listing directory: '{}' (full path: {:?})", relative_dir, full_path);

        let read_dir = fs::read_dir(&full_path).map_err(|e| {
            warn!("Failed to read directory {:?}: {}", full_path, e);
            BrowserError::NotFound
        })?;

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = match dir_entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {:?}: {}", full_path, e);
                    continue;
                }
            };
            // Lossy names would link to paths that don't exist
            let name = match dir_entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    debug!("Skipping non-UTF-8 name {:?} in {:?}", raw, full_path);
                    continue;
                }
            };
            let absolute_path = dir_entry.path();
            // Follow symlinks like a plain stat would
            let metadata = match fs::metadata(&absolute_path) {
                Ok(m) => m,
                Err(e) => {
                    debug!("Skipping {:?}, stat failed: {}", absolute_path, e);
                    continue;
                }
            };
            let is_dir = metadata.is_dir();
            let media_kind = if is_dir {
                MediaKind::Other
            } else {
                classifier::media_kind(&absolute_path)
            };
            entries.push(Entry {
                relative_path: join_relative(relative_dir, &name),
                name,
                absolute_path,
                is_dir,
                media_kind,
            });
        }

        entries.sort_by(compare_entries);
        info!("Listed directory '{}', found {} entries", relative_dir, entries.len());
        Ok(entries)
    }

    /// List a directory and shuffle its files
    pub fn list_shuffled(&self, relative_dir: &str) -> Result<Vec<Entry>, BrowserError> {
        let mut entries = self.list(relative_dir)?;
        shuffle_files(&mut entries, &mut rand::thread_rng());
        Ok(entries)
    }

    /// Relative path of the first image among a directory's immediate children.
    ///
    /// Any failure to read the directory yields `None`.
    pub fn representative_image(&self, relative_dir: &str) -> Option<String> {
        match self.list(relative_dir) {
            Ok(children) => children
                .into_iter()
                .find(|e| !e.is_dir && e.media_kind == MediaKind::Image)
                .map(|e| e.relative_path),
            Err(e) => {
                debug!("No thumbnail for '{}': {}", relative_dir, e);
                None
            }
        }
    }
}
