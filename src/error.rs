#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error("record consumed {consumed} bytes, descriptor declares {expected}")]
    RecordSizeMismatch { expected: usize, consumed: usize },

    #[error("inconsistent count: {count} records of {record_size} bytes, but {remaining} bytes remain")]
    InconsistentCount {
        count: usize,
        record_size: usize,
        remaining: usize,
    },

    #[error("negative count: {0}")]
    NegativeCount(i32),

    #[error("malformed entity text: {0}")]
    EntityParse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
