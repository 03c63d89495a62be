//! Page cache over the backing file.
//!
//! Pages are loaded on first touch into a fixed arena of `TABLE_MAX_PAGES`
//! slots and stay resident until the pager is closed. There is exactly one
//! buffer per page; reads and writes go through the same copy.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{PagerError, PagerResult};
use crate::{PAGE_SIZE, ROW_SIZE, ROWS_PER_PAGE, TABLE_MAX_PAGES};

pub type Page = [u8; PAGE_SIZE];

struct Frame {
    data: Box<Page>,
    dirty: bool,
}

pub struct Pager {
    file: File,
    path: PathBuf,
    file_length: u64,
    frames: Vec<Option<Frame>>,
}

impl Pager {
    /// Opens or creates the backing file.
    ///
    /// The file must be a run of full pages followed by at most one partial
    /// page holding whole rows. Anything else is reported as corruption.
    pub fn open<P: AsRef<Path>>(path: P) -> PagerResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        let file_length = file.metadata()?.len();

        let tail = file_length % PAGE_SIZE as u64;
        let pages = file_length.div_ceil(PAGE_SIZE as u64);
        if tail % ROW_SIZE as u64 != 0 || pages > TABLE_MAX_PAGES as u64 {
            return Err(PagerError::CorruptFile {
                length: file_length,
            });
        }

        info!(path = %path.display(), file_length, "opened pager");

        Ok(Self {
            file,
            path: path.to_path_buf(),
            file_length,
            frames: (0..TABLE_MAX_PAGES).map(|_| None).collect(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// Pages present in the file, counting a partial last page.
    pub fn num_pages(&self) -> usize {
        self.file_length.div_ceil(PAGE_SIZE as u64) as usize
    }

    /// Rows stored in the file. Full pages carry `ROWS_PER_PAGE` rows plus
    /// trailing padding; the last page may be partial.
    pub fn stored_rows(&self) -> usize {
        let full_pages = (self.file_length / PAGE_SIZE as u64) as usize;
        let tail = (self.file_length % PAGE_SIZE as u64) as usize;
        full_pages * ROWS_PER_PAGE + tail / ROW_SIZE
    }

    pub fn is_resident(&self, index: usize) -> bool {
        self.frames.get(index).is_some_and(Option::is_some)
    }

    pub fn page(&mut self, index: usize) -> PagerResult<&Page> {
        let frame = self.load(index)?;
        Ok(&frame.data)
    }

    /// Same buffer as [`Pager::page`], marked dirty so it is written on close.
    pub fn page_mut(&mut self, index: usize) -> PagerResult<&mut Page> {
        let frame = self.load(index)?;
        frame.dirty = true;
        Ok(&mut frame.data)
    }

    fn load(&mut self, index: usize) -> PagerResult<&mut Frame> {
        if index >= TABLE_MAX_PAGES {
            return Err(PagerError::PageOutOfBounds {
                page: index,
                max: TABLE_MAX_PAGES,
            });
        }

        if self.frames[index].is_none() {
            let mut data = Box::new([0u8; PAGE_SIZE]);
            let offset = (index * PAGE_SIZE) as u64;
            if offset < self.file_length {
                let available = (self.file_length - offset).min(PAGE_SIZE as u64) as usize;
                self.file.seek(SeekFrom::Start(offset))?;
                self.file.read_exact(&mut data[..available])?;
                debug!(page = index, bytes = available, "loaded page from disk");
            } else {
                debug!(page = index, "allocated fresh page");
            }
            self.frames[index] = Some(Frame { data, dirty: false });
        }

        match self.frames[index].as_mut() {
            Some(frame) => Ok(frame),
            None => Err(PagerError::PageOutOfBounds {
                page: index,
                max: TABLE_MAX_PAGES,
            }),
        }
    }

    /// Writes the first `size` bytes of a resident page to its slot in the
    /// file.
    pub fn flush(&mut self, index: usize, size: usize) -> PagerResult<()> {
        let frame = self
            .frames
            .get_mut(index)
            .and_then(Option::as_mut)
            .ok_or(PagerError::EmptyPageFlush(index))?;

        let offset = (index * PAGE_SIZE) as u64;
        let size = size.min(PAGE_SIZE);
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(&frame.data[..size])?;
        frame.dirty = false;

        self.file_length = self.file_length.max(offset + size as u64);
        debug!(page = index, bytes = size, "flushed page");
        Ok(())
    }

    /// Writes every dirty page. Pages wholly covered by `num_rows` are written
    /// in full, the last page only up to its last row, so the file length
    /// stays a whole number of rows.
    pub fn flush_all(&mut self, num_rows: usize) -> PagerResult<()> {
        let full_pages = num_rows / ROWS_PER_PAGE;
        let additional_rows = num_rows % ROWS_PER_PAGE;

        for index in 0..TABLE_MAX_PAGES {
            let dirty = self.frames[index].as_ref().is_some_and(|f| f.dirty);
            if !dirty {
                continue;
            }
            if index < full_pages {
                self.flush(index, PAGE_SIZE)?;
            } else if index == full_pages && additional_rows > 0 {
                self.flush(index, additional_rows * ROW_SIZE)?;
            }
        }

        Ok(())
    }

    pub fn sync(&mut self) -> PagerResult<()> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Flushes all dirty pages, syncs and releases the file handle.
    pub fn close(mut self, num_rows: usize) -> PagerResult<()> {
        self.flush_all(num_rows)?;
        self.sync()?;
        info!(path = %self.path.display(), file_length = self.file_length, "closed pager");
        Ok(())
    }
}
