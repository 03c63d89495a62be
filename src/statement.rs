use crate::error::PrepareError;
use crate::row::Row;

// Non-SQL statements like .exit are called "meta-commands".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Constants,
    Unrecognized(String),
}

impl MetaCommand {
    pub fn parse(input: &str) -> Option<MetaCommand> {
        match input {
            ".exit" => Some(MetaCommand::Exit),
            ".constants" => Some(MetaCommand::Constants),
            _ => {
                if input.starts_with('.') {
                    Some(MetaCommand::Unrecognized(input.to_string()))
                } else {
                    None
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

impl Statement {
    /// Parses `insert <id> <username> <email>` or `select`.
    ///
    /// Field lengths are not checked here; the table owns that rule.
    pub fn prepare(input: &str) -> Result<Statement, PrepareError> {
        let mut words = input.split_whitespace();
        match words.next() {
            Some("insert") => Self::prepare_insert(words),
            Some("select") => Ok(Statement::Select),
            _ => Err(PrepareError::UnrecognizedStatement(input.to_string())),
        }
    }

    fn prepare_insert<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<Statement, PrepareError> {
        let (Some(id), Some(username), Some(email), None) =
            (args.next(), args.next(), args.next(), args.next())
        else {
            return Err(PrepareError::SyntaxError);
        };

        let id: i64 = id.parse().map_err(|_| PrepareError::SyntaxError)?;
        let id = u32::try_from(id).map_err(|_| PrepareError::InvalidId)?;

        Ok(Statement::Insert(Row::new(id, username, email)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    Meta(MetaCommand),
    Statement(Result<Statement, PrepareError>),
}

impl InputType {
    pub fn parse(input: &str) -> InputType {
        if let Some(meta) = MetaCommand::parse(input) {
            InputType::Meta(meta)
        } else {
            InputType::Statement(Statement::prepare(input))
        }
    }
}
