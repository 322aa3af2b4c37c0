mod advance;
mod worker;

pub use advance::{RecurrenceError, next_occurrence};
pub use worker::DueCheckWorker;
