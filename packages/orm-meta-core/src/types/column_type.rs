use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OrmError;

/// Declared type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Bool,
    Int,
    Float,
    String,
    Text,
    Json,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    UnixTimestamp,
    Ipv4,
    Email,
    Password,
    Blob,
    File,
    Image,
}

impl ColumnType {
    /// All recognized types, in declaration order.
    pub const ALL: [ColumnType; 17] = [
        ColumnType::Bool,
        ColumnType::Int,
        ColumnType::Float,
        ColumnType::String,
        ColumnType::Text,
        ColumnType::Json,
        ColumnType::Date,
        ColumnType::Time,
        ColumnType::Timestamp,
        ColumnType::TimestampTz,
        ColumnType::UnixTimestamp,
        ColumnType::Ipv4,
        ColumnType::Email,
        ColumnType::Password,
        ColumnType::Blob,
        ColumnType::File,
        ColumnType::Image,
    ];

    /// Lowercase name used in schema declarations.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Bool => "bool",
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::Json => "json",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::Timestamp => "timestamp",
            ColumnType::TimestampTz => "timestamp_tz",
            ColumnType::UnixTimestamp => "unix_timestamp",
            ColumnType::Ipv4 => "ipv4",
            ColumnType::Email => "email",
            ColumnType::Password => "password",
            ColumnType::Blob => "blob",
            ColumnType::File => "file",
            ColumnType::Image => "image",
        }
    }

    /// Whether columns of this type hold file attachments rather than data.
    pub fn is_file(&self) -> bool {
        matches!(self, ColumnType::File | ColumnType::Image)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| OrmError::InvalidType {
                type_name: s.to_string(),
            })
    }
}
