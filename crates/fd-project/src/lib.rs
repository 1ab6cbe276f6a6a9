//! fd-project: run file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_run_file};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn from_yaml_str(content: &str) -> ProjectResult<RunFile> {
    let run: RunFile = serde_yaml::from_str(content)?;
    validate_run_file(&run)?;
    Ok(run)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<RunFile> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, run: &RunFile) -> ProjectResult<()> {
    validate_run_file(run)?;
    let content = serde_yaml::to_string(run)?;
    std::fs::write(path, content)?;
    Ok(())
}
