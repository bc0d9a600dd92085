pub mod clean_use_case;
pub mod ports;

pub use clean_use_case::{CleanReport, CleanUseCase};
