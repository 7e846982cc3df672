//! Scale and white balance calibration module
//!
//! This module turns the two user-marked calibration points (a reference
//! coin and a white patch) into a physical scale and a color correction.

pub mod scale;
pub mod white_balance;

pub use scale::{CoinCalibration, Denomination, ScaleCalibrator, ScaleRatio};
pub use white_balance::{ChannelGains, WhiteBalanceCorrector, WhitePatch};
