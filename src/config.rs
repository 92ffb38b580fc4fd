//! Runtime configuration: where the reference table comes from and where
//! the dashboard listens.
//!
//! Data source precedence: `--data` / `DATA_PATH` → `~/.uptl/facilities.csv`
//! (when it exists) → built-in sample.

use std::path::{Path, PathBuf};

use crate::facility::DataSource;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

/// Queries shown on the dashboard and run by `--demo`.
pub const EXAMPLE_QUERIES: &[&str] = &[
    "Where can I find a toilet near Arjun Nagar?",
    "I need a washroom near Connaught Place",
    "Public toilet close to Hauz Khas please",
    "Where is the nearest washroom from Karol Bagh bus stand?",
    "I'm at Lajpat Nagar, need a toilet urgently",
];

/// Per-user data file (~/.uptl/facilities.csv).
pub fn user_data_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".uptl").join("facilities.csv"))
}

/// Pick the data source for this run.
pub fn data_source(explicit: Option<&Path>) -> DataSource {
    choose_source(explicit, user_data_file().as_deref())
}

fn choose_source(explicit: Option<&Path>, user_file: Option<&Path>) -> DataSource {
    if let Some(path) = explicit {
        return DataSource::File(path.to_path_buf());
    }
    match user_file {
        Some(path) if path.is_file() => DataSource::File(path.to_path_buf()),
        _ => DataSource::Sample,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let user = dir.path().join("facilities.csv");
        std::fs::write(&user, "x").unwrap();

        let src = choose_source(Some(Path::new("/data/stops.csv")), Some(&user));
        assert_eq!(src, DataSource::File(PathBuf::from("/data/stops.csv")));
    }

    #[test]
    fn test_user_file_used_when_present() {
        let dir = TempDir::new().unwrap();
        let user = dir.path().join("facilities.csv");
        std::fs::write(&user, "x").unwrap();

        assert_eq!(choose_source(None, Some(&user)), DataSource::File(user));
    }

    #[test]
    fn test_sample_when_nothing_configured() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("facilities.csv");
        assert_eq!(choose_source(None, Some(&missing)), DataSource::Sample);
        assert_eq!(choose_source(None, None), DataSource::Sample);
    }

    #[test]
    fn test_user_data_file_location() {
        if let Some(path) = user_data_file() {
            assert!(path.ends_with(".uptl/facilities.csv"));
        }
    }
}
