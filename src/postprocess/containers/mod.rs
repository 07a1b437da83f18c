mod vision;

pub use vision::*;
