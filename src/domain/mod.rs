// Domain types and value objects
mod candle;
mod series;
pub mod window;

// Re-export commonly used types to the world
pub use candle::Candle;
pub use series::{CandleSeries, SeriesError};
pub use window::{CandleWindow, forward_from, window_centers};
