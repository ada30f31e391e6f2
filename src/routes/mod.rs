mod base;
mod health_check;

pub use base::*;
pub use health_check::*;
