use thiserror::Error;

#[derive(Error, Debug)]
pub enum CovratioError {
    #[error("Can't read coverage report: {path}: {source}")]
    ReportUnavailable {
        path: String,
        source: std::io::Error,
    },

    #[error(
        "Strange JaCoCo report!\n\
         File path: {path}\n\
         Can't extract numeric value by: {expr}\n\
         from:\n{content}"
    )]
    MalformedReport {
        path: String,
        expr: String,
        content: String,
    },
}

pub type Result<T> = std::result::Result<T, CovratioError>;
