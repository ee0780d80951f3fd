pub mod allocator;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod model;

pub use allocator::{compute, AMOUNT_DECIMALS, PERCENTAGE_DECIMALS};
pub use config::{AppConfig, CorsConfig, ServerConfig};
pub use config_loader::ConfigLoader;
pub use error::AllocationError;
pub use model::{AllocationRecord, AllocationRequest, Asset};
