pub mod availability;
pub mod clipboard;
pub mod conf;
pub mod ephemeris;
pub mod error;
pub mod logging;
pub mod nearest;
pub mod slider;
pub mod timestamp;
pub mod window;
