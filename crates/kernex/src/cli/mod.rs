pub use app::{App, init_tracing, run};

pub mod app;
pub mod report;
