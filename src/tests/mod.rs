use super::*;

mod history_stack;
mod status_format;
