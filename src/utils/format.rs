use chrono::{DateTime, NaiveDate, NaiveDateTime};

const MISSING: &str = "N/A";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// 將伺服器回傳的日期轉成 `D/M/YYYY` 顯示；無法解析時原樣返回
pub fn format_date(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return MISSING.to_string();
    }

    match parse_date(trimmed) {
        Some(date) => date.format("%-d/%-m/%Y").to_string(),
        None => {
            tracing::debug!("Unparseable date '{}', showing raw value", input);
            input.to_string()
        }
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    // 帶時區的日期保留其原本的日曆日
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}

/// 千分位使用 `.`，與後台介面的顯示習慣一致
pub fn format_number(number: Option<i64>) -> String {
    let Some(number) = number else {
        return MISSING.to_string();
    };

    let digits = number.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if number < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2024-03-05"), "5/3/2024");
        assert_eq!(format_date("2024-12-25 08:30:00"), "25/12/2024");
        assert_eq!(format_date("2024-12-25T08:30:00.123456"), "25/12/2024");
        assert_eq!(format_date("2024-01-31T23:00:00+07:00"), "31/1/2024");
    }

    #[test]
    fn test_format_date_fallbacks() {
        assert_eq!(format_date(""), "N/A");
        assert_eq!(format_date("   "), "N/A");
        assert_eq!(format_date("next tuesday"), "next tuesday");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(None), "N/A");
        assert_eq!(format_number(Some(0)), "0");
        assert_eq!(format_number(Some(999)), "999");
        assert_eq!(format_number(Some(1000)), "1.000");
        assert_eq!(format_number(Some(1234567)), "1.234.567");
        assert_eq!(format_number(Some(-98765)), "-98.765");
    }
}
