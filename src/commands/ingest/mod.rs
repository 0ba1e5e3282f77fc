use std::path::{Path, PathBuf};

const DB_SCHEMA_VERSION: &str = "0.1.0";

mod run;
mod store;

pub use run::run;
pub(crate) use store::count_rows;

use store::*;

pub(crate) fn default_db_path(cache_root: &Path) -> PathBuf {
    cache_root.join("hansard.sqlite")
}
