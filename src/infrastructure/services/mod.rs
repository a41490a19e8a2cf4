mod table_runner;

pub use table_runner::*;
