//! Line-oriented command loop over a [`Table`].

use std::io::{BufRead, Write};

use tracing::{debug, error};

use crate::error::{ExecuteError, SessionResult, TableError};
use crate::statement::{InputType, MetaCommand, Statement};
use crate::table::Table;
use crate::{PAGE_SIZE, ROW_SIZE, ROWS_PER_PAGE, TABLE_MAX_PAGES, TABLE_MAX_ROWS};

pub const PROMPT: &str = "db > ";

struct InputBuffer<R> {
    reader: R,
    buffer: String,
}

impl<R: BufRead> InputBuffer<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
        }
    }

    /// Returns `false` at end of input.
    fn read_input(&mut self) -> std::io::Result<bool> {
        self.buffer.clear();
        let read = self.reader.read_line(&mut self.buffer)?;
        self.buffer = self.buffer.trim().to_string();
        Ok(read > 0)
    }
}

pub struct Session<R, W> {
    input: InputBuffer<R>,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self {
            input: InputBuffer::new(reader),
            out,
        }
    }

    /// Runs commands until `.exit`, end of input or a fatal storage error.
    /// The table is closed on every path.
    pub fn run(mut self, mut table: Table) -> SessionResult<()> {
        let result = self.drive(&mut table);
        if let Err(err) = &result {
            error!(error = %err, "session aborted");
        }

        let closed = table.close();
        result?;
        closed?;
        Ok(())
    }

    fn drive(&mut self, table: &mut Table) -> SessionResult<()> {
        loop {
            self.print_prompt()?;
            if !self.input.read_input()? {
                debug!("end of input");
                return Ok(());
            }

            match InputType::parse(&self.input.buffer) {
                InputType::Meta(MetaCommand::Exit) => return Ok(()),
                InputType::Meta(MetaCommand::Constants) => self.print_constants()?,
                InputType::Meta(MetaCommand::Unrecognized(command)) => {
                    writeln!(self.out, "Unrecognized command: {command}")?;
                }
                InputType::Statement(Ok(statement)) => self.execute(&statement, table)?,
                InputType::Statement(Err(err)) => writeln!(self.out, "{err}")?,
            }
        }
    }

    fn execute(&mut self, statement: &Statement, table: &mut Table) -> SessionResult<()> {
        match statement {
            Statement::Insert(row) => match table.insert(row) {
                Ok(()) => writeln!(self.out, "Executed.")?,
                Err(TableError::Execute(ExecuteError::TableFull)) => {
                    writeln!(self.out, "Error: Table full.")?;
                }
                Err(TableError::Execute(err)) => writeln!(self.out, "{err}")?,
                Err(err) => return Err(err.into()),
            },
            Statement::Select => {
                for row in table.scan() {
                    writeln!(self.out, "{}", row?)?;
                }
                writeln!(self.out, "Executed.")?;
            }
        }
        Ok(())
    }

    fn print_prompt(&mut self) -> SessionResult<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()?;
        Ok(())
    }

    fn print_constants(&mut self) -> SessionResult<()> {
        writeln!(self.out, "Constants:")?;
        writeln!(self.out, "ROW_SIZE: {ROW_SIZE}")?;
        writeln!(self.out, "PAGE_SIZE: {PAGE_SIZE}")?;
        writeln!(self.out, "ROWS_PER_PAGE: {ROWS_PER_PAGE}")?;
        writeln!(self.out, "TABLE_MAX_PAGES: {TABLE_MAX_PAGES}")?;
        writeln!(self.out, "TABLE_MAX_ROWS: {TABLE_MAX_ROWS}")?;
        Ok(())
    }
}
