//! Releases API model types.

mod license_class;
mod product;
mod release;

pub use license_class::*;
pub use product::*;
pub use release::*;
