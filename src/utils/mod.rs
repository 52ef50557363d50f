pub mod errors;
pub mod html;
pub mod locale;
pub mod table;

pub use errors::{DashboardError, Result};
pub use locale::Locale;
pub use table::Table;
