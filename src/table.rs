//! The single table: schema checks, capacity, and row placement.

use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ExecuteError, TableResult};
use crate::pager::Pager;
use crate::row::Row;
use crate::{COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, ROW_SIZE, ROWS_PER_PAGE, TABLE_MAX_ROWS};

pub struct Table {
    num_rows: usize,
    pager: Pager,
    flush_every_insert: bool,
}

impl Table {
    pub fn open<P: AsRef<Path>>(path: P) -> TableResult<Self> {
        let path: &Path = path.as_ref();
        Self::open_with_config(&Config::builder().db_path(path).build())
    }

    pub fn open_with_config(config: &Config) -> TableResult<Self> {
        let pager = Pager::open(&config.db_path)?;
        let num_rows = pager.stored_rows();
        info!(path = %config.db_path.display(), num_rows, "opened table");

        Ok(Self {
            num_rows,
            pager,
            flush_every_insert: config.flush_every_insert,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= TABLE_MAX_ROWS
    }

    /// Page index and byte offset of a row.
    fn row_slot(row_num: usize) -> (usize, usize) {
        (row_num / ROWS_PER_PAGE, (row_num % ROWS_PER_PAGE) * ROW_SIZE)
    }

    /// Checks the id before field lengths, then capacity.
    fn validate(&self, row: &Row) -> Result<(), ExecuteError> {
        if row.id == 0 {
            return Err(ExecuteError::InvalidId);
        }
        if row.username.len() > COLUMN_USERNAME_SIZE || row.email.len() > COLUMN_EMAIL_SIZE {
            return Err(ExecuteError::FieldTooLong);
        }
        if self.is_full() {
            return Err(ExecuteError::TableFull);
        }
        Ok(())
    }

    /// Appends a row. Rejected rows leave the table untouched.
    pub fn insert(&mut self, row: &Row) -> TableResult<()> {
        if let Err(err) = self.validate(row) {
            debug!(id = row.id, error = %err, "rejected insert");
            return Err(err.into());
        }

        let (page_num, offset) = Self::row_slot(self.num_rows);
        let page = self.pager.page_mut(page_num)?;
        row.serialize(&mut page[offset..offset + ROW_SIZE]);
        self.num_rows += 1;

        if self.flush_every_insert {
            self.pager.flush(page_num, offset + ROW_SIZE)?;
        }

        debug!(id = row.id, row_num = self.num_rows - 1, page = page_num, "inserted row");
        Ok(())
    }

    /// Rows in insertion order. Each call starts again from the first row.
    pub fn scan(&mut self) -> Cursor<'_> {
        Cursor {
            table: self,
            row_num: 0,
        }
    }

    /// Writes resident pages back and releases the file.
    pub fn close(self) -> TableResult<()> {
        info!(path = %self.pager.path().display(), num_rows = self.num_rows, "closing table");
        self.pager.close(self.num_rows)?;
        Ok(())
    }
}

pub struct Cursor<'a> {
    table: &'a mut Table,
    row_num: usize,
}

impl Iterator for Cursor<'_> {
    type Item = TableResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row_num >= self.table.num_rows {
            return None;
        }

        let (page_num, offset) = Table::row_slot(self.row_num);
        match self.table.pager.page(page_num) {
            Ok(page) => {
                self.row_num += 1;
                Some(Ok(Row::deserialize(&page[offset..offset + ROW_SIZE])))
            }
            Err(err) => {
                self.row_num = self.table.num_rows;
                Some(Err(err.into()))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.num_rows.saturating_sub(self.row_num);
        (0, Some(remaining))
    }
}
