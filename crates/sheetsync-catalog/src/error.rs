use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandleError {
    #[error("cannot create {kind} handle: brand=\"{brand}\", model=\"{model}\"")]
    InvalidInput {
        kind: &'static str,
        brand: String,
        model: String,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}
