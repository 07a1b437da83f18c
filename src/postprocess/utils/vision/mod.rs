mod draw_utils;

pub use draw_utils::*;
