pub mod angle;
pub mod descriptor;
pub mod error;
pub mod header;
pub mod sample_width;

pub use angle::*;
pub use descriptor::*;
pub use error::*;
pub use header::*;
pub use sample_width::*;
