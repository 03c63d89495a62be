//! Fixed-width row codec.
//!
//! On-disk layout of one row (`ROW_SIZE` = 291 bytes):
//!
//! ```text
//! +--------+------------------+---------------------+
//! | id u32 | username [u8;32] | email [u8;255]      |
//! | LE     | NUL padded       | NUL padded          |
//! +--------+------------------+---------------------+
//! ```

use std::fmt;

use crate::{
    COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE,
    ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Writes the row into `dst`, which must be exactly `ROW_SIZE` bytes.
    ///
    /// Expects a row that already passed table validation; oversized fields
    /// are cut at the column width rather than reported.
    pub fn serialize(&self, dst: &mut [u8]) {
        debug_assert_eq!(dst.len(), ROW_SIZE);
        dst[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        dst[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]
            .copy_from_slice(&fixed_bytes::<COLUMN_USERNAME_SIZE>(&self.username));
        dst[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]
            .copy_from_slice(&fixed_bytes::<COLUMN_EMAIL_SIZE>(&self.email));
    }

    pub fn encode(&self) -> [u8; ROW_SIZE] {
        let mut buf = [0u8; ROW_SIZE];
        self.serialize(&mut buf);
        buf
    }

    /// Reads a row back from `src` (`ROW_SIZE` bytes). Padding is dropped and
    /// invalid UTF-8 is replaced rather than rejected.
    pub fn deserialize(src: &[u8]) -> Self {
        debug_assert_eq!(src.len(), ROW_SIZE);
        let mut id = [0u8; ID_SIZE];
        id.copy_from_slice(&src[ID_OFFSET..ID_OFFSET + ID_SIZE]);

        Self {
            id: u32::from_le_bytes(id),
            username: str_from_fixed(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]),
            email: str_from_fixed(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

fn fixed_bytes<const N: usize>(input: &str) -> [u8; N] {
    let mut buffer = [0u8; N];
    let bytes = input.as_bytes();
    let len = bytes.len().min(N);
    buffer[..len].copy_from_slice(&bytes[..len]);
    buffer
}

fn str_from_fixed(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
