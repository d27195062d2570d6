mod options;

pub use options::{OptExt, ResExt};
