use std::{
    env::current_dir,
    path::{Path, PathBuf},
};

use miette::{miette, Context, IntoDiagnostic, Result};


/// Returns the default configuration filepath, which is at
/// `{current directory}/data/configuration.toml`.
pub fn get_default_configuration_file_path() -> Result<PathBuf> {
    let mut configuration_filepath = current_dir()
        .into_diagnostic()
        .wrap_err_with(|| miette!("Could not get the current directory."))?;
    configuration_filepath.push("data/configuration.toml");

    if !configuration_filepath.exists() {
        return Err(miette!(
            "Could not find configuration file at {}.",
            configuration_filepath.display()
        ));
    }

    Ok(configuration_filepath)
}

/// Joins `path` onto `base_directory`, unless `path` is already absolute.
#[must_use = "function returns the anchored path"]
pub fn anchor_path_at<S>(base_directory: &Path, path: S) -> PathBuf
where
    S: Into<PathBuf>,
{
    let path: PathBuf = path.into();

    if path.is_absolute() {
        path
    } else {
        base_directory.join(path)
    }
}
