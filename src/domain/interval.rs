use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::utils::TimeUtils;

/// Chart timeframe, Binance-style shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Default)]
pub enum ChartInterval {
    #[default]
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    OneHour,
    FourHours,
    OneDay,
}

impl ChartInterval {
    pub fn interval_ms(&self) -> i64 {
        match self {
            ChartInterval::OneMinute => TimeUtils::MS_IN_MIN,
            ChartInterval::FiveMinutes => TimeUtils::MS_IN_5_MIN,
            ChartInterval::FifteenMinutes => TimeUtils::MS_IN_15_MIN,
            ChartInterval::OneHour => TimeUtils::MS_IN_H,
            ChartInterval::FourHours => TimeUtils::MS_IN_4_H,
            ChartInterval::OneDay => TimeUtils::MS_IN_D,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartInterval::OneMinute => "1m",
            ChartInterval::FiveMinutes => "5m",
            ChartInterval::FifteenMinutes => "15m",
            ChartInterval::OneHour => "1h",
            ChartInterval::FourHours => "4h",
            ChartInterval::OneDay => "1D",
        }
    }
}

impl fmt::Display for ChartInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn intervals_strictly_increase() {
        let ms: Vec<i64> = ChartInterval::iter().map(|i| i.interval_ms()).collect();
        assert!(ms.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn one_minute_is_default() {
        assert_eq!(ChartInterval::default(), ChartInterval::OneMinute);
        assert_eq!(ChartInterval::default().interval_ms(), 60_000);
    }
}
