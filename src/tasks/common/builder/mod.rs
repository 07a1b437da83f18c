#[macro_use]
mod base_task_builder;

pub(crate) use base_task_builder::BaseTaskBuilder;
