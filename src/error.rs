use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The report returned no dataset accessor, so nothing can be laid out.
    #[error("report does not provide a dataset")]
    MissingDataset,
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("export device failed: {0}")]
    Device(String),
    #[error("malformed delimited input: {0}")]
    Csv(#[from] csv::Error),
    /// Field delimiters must be a single ASCII character.
    #[error("unsupported delimiter {0:?}")]
    Delimiter(char),
}

impl Error {
    /// Wrap a destination write failure, keeping the path in the message.
    pub(crate) fn write_failed(e: std::io::Error, path: &Path) -> Self {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, path.display()),
        ))
    }
}
