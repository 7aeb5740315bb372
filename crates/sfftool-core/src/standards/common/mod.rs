//! Pieces shared by every layout decoder.

pub mod date_code;
pub mod reader;
pub mod rx_power_type;
pub mod thresholds;

pub use date_code::DateCode;
pub use reader::EepromReader;
pub use rx_power_type::RxPowerMeasurement;
pub use thresholds::{PowerThresholds, Thresholds};
