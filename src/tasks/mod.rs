#[macro_use]
pub(crate) mod common;

pub mod vision;
