mod maths_utils;
mod perf;
mod time_utils;

pub use maths_utils::{max_of, min_of, round_to, tail};
pub use time_utils::{AppInstant, TimeUtils, format_duration};
