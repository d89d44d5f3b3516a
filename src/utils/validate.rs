use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

/// 密码最小长度
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("邮箱格式不正确");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("密码长度至少为 6 位");
    }
    Ok(())
}

/// 将 HH:MM 或 HH:MM:SS 规范化为 HH:MM:SS
pub fn normalize_clock_time(value: &str) -> Result<String, &'static str> {
    let value = value.trim();
    let parsed = NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| "时间格式不正确，应为 HH:MM 或 HH:MM:SS")?;
    Ok(parsed.format("%H:%M:%S").to_string())
}

/// 校验课表时段，返回规范化后的开始与结束时间
pub fn validate_schedule_slot(
    day_of_week: i16,
    start_time: &str,
    end_time: &str,
) -> Result<(String, String), &'static str> {
    if !(0..=6).contains(&day_of_week) {
        return Err("day_of_week 必须在 0 到 6 之间");
    }
    let start = normalize_clock_time(start_time)?;
    let end = normalize_clock_time(end_time)?;
    // 规范化后的字符串按字典序即时间顺序
    if start >= end {
        return Err("开始时间必须早于结束时间");
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("student@example.com").is_ok());
        assert!(validate_email("first.last+tag@uni.edu.cn").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("12345").is_err());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_normalize_clock_time() {
        assert_eq!(normalize_clock_time("8:30").unwrap(), "08:30:00");
        assert_eq!(normalize_clock_time("14:05:30").unwrap(), "14:05:30");
        assert!(normalize_clock_time("25:00").is_err());
        assert!(normalize_clock_time("noon").is_err());
    }

    #[test]
    fn test_schedule_slot() {
        assert_eq!(
            validate_schedule_slot(1, "09:00", "10:30").unwrap(),
            ("09:00:00".to_string(), "10:30:00".to_string())
        );
        assert!(validate_schedule_slot(7, "09:00", "10:30").is_err());
        assert!(validate_schedule_slot(-1, "09:00", "10:30").is_err());
        assert!(validate_schedule_slot(1, "10:30", "09:00").is_err());
        assert!(validate_schedule_slot(1, "10:30", "10:30").is_err());
    }
}
