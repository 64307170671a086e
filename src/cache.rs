use crate::error::Result;
use crate::loader::load_trips;
use crate::types::Dataset;
use once_cell::unsync::OnceCell;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

/// Memoized dataset handle.
///
/// Single-threaded: the host runs panels one after another, so handles are
/// `Rc`s and the cell is `unsync`.
///
/// The first [`DatasetCache::get`] reads the file; later calls hand out the
/// same `Rc` until [`DatasetCache::clear`] drops it.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    cell: OnceCell<Rc<Dataset>>,
    loads: Cell<usize>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            path: path.into(),
            cell: OnceCell::new(),
            loads: Cell::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> Result<Rc<Dataset>> {
        if let Some(data) = self.cell.get() {
            debug!(path = %self.path.display(), "dataset cache hit");
            return Ok(Rc::clone(data));
        }
        let data = self.cell.get_or_try_init(|| {
            self.loads.set(self.loads.get() + 1);
            load_trips(&self.path).map(Rc::new)
        })?;
        Ok(Rc::clone(data))
    }

    /// Forget the memoized dataset. Returns whether anything was cached.
    pub fn clear(&mut self) -> bool {
        let had = self.cell.take().is_some();
        info!(path = %self.path.display(), had_data = had, "dataset cache cleared");
        had
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Number of times the file has actually been read.
    pub fn load_count(&self) -> usize {
        self.loads.get()
    }
}
