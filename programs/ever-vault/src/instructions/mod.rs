pub mod deposit;
pub mod divest;
pub mod initialize;
pub mod invest;
pub mod withdraw;

pub use deposit::*;
pub use divest::*;
pub use initialize::*;
pub use invest::*;
pub use withdraw::*;
