pub mod app_settings;
pub mod persistence;
pub mod selection_file;

pub use app_settings::AppSettings;
pub use persistence::Persistable;
pub use selection_file::SelectionFile;
