use std::path::PathBuf;

use thiserror::Error;

pub type Result<A> = std::result::Result<A, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The configuration file `{0}` was not found")]
    ConfigNotFound(PathBuf),
    #[error("Invalid configuration: `{0}`")]
    Config(Box<figment::Error>),
    #[error("Encountered io error: `{0}`")]
    IOError(std::io::Error),
    #[error("Failed to parse data file `{path}`: `{source}`")]
    DataParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Template `{0}` does not exist")]
    TemplateNotFound(String),
    #[error("Error with templating: `{0}`")]
    Template(minijinja::Error),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::IOError(value)
    }
}

impl From<figment::Error> for Error {
    fn from(value: figment::Error) -> Self {
        Self::Config(Box::new(value))
    }
}

impl From<minijinja::Error> for Error {
    fn from(value: minijinja::Error) -> Self {
        Self::Template(value)
    }
}
