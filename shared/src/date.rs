//! 日期类型模块
//!
//! 提供两种类型：
//! - `CalendarDate`: 可序列化的日历日期，兼容 `YYYY-MM-DD` 与 ISO 8601 时间戳
//! - `StayDates`: 入住/退房区间，保证退房严格晚于入住

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

// =========================================================
// CalendarDate - 可传输的日期类型
// =========================================================

/// 日历日期（无时区）
///
/// 序列化为 `YYYY-MM-DD`；反序列化同时接受后端返回的完整时间戳。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// 从表单输入或后端字符串解析
    ///
    /// 返回 None 如果格式无法识别
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
            return Some(Self(date));
        }
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Self(dt.date_naive()))
    }

    #[inline]
    pub const fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
    }
}

// =========================================================
// StayDates - 入住区间
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayDatesError {
    /// 退房日期不晚于入住日期
    NotAfterCheckIn,
    /// 入住日期早于今天
    CheckInInPast,
}

impl fmt::Display for StayDatesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StayDatesError::NotAfterCheckIn => {
                write!(f, "Check-out date must be after the check-in date")
            }
            StayDatesError::CheckInInPast => write!(f, "Check-in date cannot be in the past"),
        }
    }
}

impl std::error::Error for StayDatesError {}

/// 入住/退房区间，构造时即校验
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayDates {
    check_in: CalendarDate,
    check_out: CalendarDate,
}

impl StayDates {
    pub fn new(
        check_in: CalendarDate,
        check_out: CalendarDate,
        today: CalendarDate,
    ) -> Result<Self, StayDatesError> {
        if check_out <= check_in {
            return Err(StayDatesError::NotAfterCheckIn);
        }
        if check_in < today {
            return Err(StayDatesError::CheckInInPast);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> CalendarDate {
        self.check_in
    }

    pub fn check_out(&self) -> CalendarDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out.0 - self.check_in.0).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_parse_accepts_both_formats() {
        assert_eq!(d("2026-12-01"), d("2026-12-01T00:00:00.000Z"));
        assert!(CalendarDate::parse("12/01/2026").is_none());
        assert!(CalendarDate::parse("").is_none());
    }

    #[test]
    fn test_checkout_must_be_strictly_after_checkin() {
        let today = d("2026-10-17");
        let pairs = [
            ("2026-11-03", "2026-11-03"),
            ("2026-11-03", "2026-11-02"),
            ("2026-11-03", "2025-01-01"),
        ];
        for (check_in, check_out) in pairs {
            assert_eq!(
                StayDates::new(d(check_in), d(check_out), today),
                Err(StayDatesError::NotAfterCheckIn),
                "{} -> {}",
                check_in,
                check_out
            );
        }
    }

    #[test]
    fn test_valid_stay() {
        let stay = StayDates::new(d("2026-11-03"), d("2026-11-06"), d("2026-10-17")).unwrap();
        assert_eq!(stay.nights(), 3);
        assert_eq!(stay.check_in().to_string(), "2026-11-03");
    }

    #[test]
    fn test_check_in_in_past_rejected() {
        let result = StayDates::new(d("2026-10-16"), d("2026-10-20"), d("2026-10-17"));
        assert_eq!(result, Err(StayDatesError::CheckInInPast));
    }
}
