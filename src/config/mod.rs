pub mod load;
pub mod model;

pub use load::{load_optional, resolve_settings, Overrides};
pub use model::{BackupSettings, Config};
