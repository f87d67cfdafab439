pub mod roast;

pub use roast::{RoastResult, RoastStats};
