pub mod data_loader;
pub mod logging;
pub mod rounding;

pub use data_loader::{DataLoader, ReportInput};
pub use logging::init_logging;
pub use rounding::round_to;
