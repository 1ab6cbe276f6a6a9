//! Run file loading, saving and validation.

use std::path::Path;

use fd_project::schema::RunFile;

use crate::error::{AppError, AppResult};

/// Load and validate a run file.
pub fn load_run_file(path: &Path) -> AppResult<RunFile> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::RunFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(fd_project::from_yaml_str(&content)?)
}

/// Validate and write a run file.
pub fn save_run_file(path: &Path, run: &RunFile) -> AppResult<()> {
    let content = run_file_to_yaml(run)?;
    std::fs::write(path, content).map_err(|e| AppError::RunFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

pub fn run_file_to_yaml(run: &RunFile) -> AppResult<String> {
    validate_run_file(run)?;
    Ok(serde_yaml::to_string(run)?)
}

pub fn validate_run_file(run: &RunFile) -> AppResult<()> {
    fd_project::validate_run_file(run)?;
    Ok(())
}
