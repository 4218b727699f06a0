// HTTP routes
pub mod health;
pub mod leads;
pub mod models;

pub use health::*;
pub use leads::*;
pub use models::*;
