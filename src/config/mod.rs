pub mod router;
pub mod settings;

pub use router::init_router;
pub use settings::*;
