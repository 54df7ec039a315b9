pub mod app_dirs;

pub use app_dirs::{AppDirectories, APP_NAME, CONFIG_FILE_NAME};
