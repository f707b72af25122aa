use thiserror::Error;

/// Which input table a structural error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableRole {
    Base,
    Mapping,
}

impl TableRole {
    pub fn as_str(&self) -> &str {
        match self {
            TableRole::Base => "base",
            TableRole::Mapping => "mapping",
        }
    }
}

impl std::fmt::Display for TableRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural problems with the inputs. Any of these aborts the whole run
/// before output is produced; cell-level noise never surfaces here.
#[derive(Error, Debug, PartialEq)]
pub enum EnrichError {
    #[error("{table} file missing required columns: {missing:?}")]
    MissingColumns {
        table: TableRole,
        missing: Vec<String>,
    },

    #[error("{table} file has no `{canonical}` column (accepted headers: {accepted:?})")]
    MissingHeaderAlias {
        table: TableRole,
        canonical: String,
        accepted: Vec<String>,
    },

    #[error("variant `{variant}` requires an RCA mapping file")]
    MissingMapping { variant: String },
}

pub type Result<T> = std::result::Result<T, EnrichError>;
