pub mod export;
pub mod import;
pub mod sample;
pub mod settings;
pub mod stats;
pub mod trades;

pub use export::*;
pub use import::*;
pub use sample::*;
pub use settings::*;
pub use stats::*;
pub use trades::*;
