mod time_utils;

pub use time_utils::{
    AppInstant, TimeUtils, epoch_ms_to_date_string, format_relative_time,
};
