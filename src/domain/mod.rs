mod cash_drawer;
mod label;
mod money;
mod report;
mod vault;

pub use cash_drawer::*;
pub use label::ParseLabelError;
pub use money::*;
pub use report::*;
pub use vault::*;
