pub mod classification;
pub mod intent;
pub mod order;

pub use classification::*;
pub use intent::*;
pub use order::*;
