//! Date input normalization.

use chrono::NaiveDate;

use crate::domain::{DomainError, DomainResult};

/// Normalize a `Y-M-D`, `M-D-Y`, `Y/M/D` or `M/D/Y` date to `"YYYY-MM-DD"`.
///
/// Only the text before the first space is considered, so a trailing time
/// component is ignored.
pub fn parse_date(input: &str) -> DomainResult<String> {
    let date = parse_naive_date(input)?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Same rules as [`parse_date`], returning the calendar date itself.
pub fn parse_naive_date(input: &str) -> DomainResult<NaiveDate> {
    let err = || DomainError::date_format(input);

    let mut response = input.trim();
    if response.contains(' ') {
        response = response.split(' ').next().filter(|s| !s.is_empty()).ok_or_else(err)?;
    }

    let separator = if response.contains('-') {
        '-'
    } else if response.contains('/') {
        '/'
    } else {
        return Err(err());
    };

    let parts: Vec<&str> = response.split(separator).collect();
    if parts.len() != 3 {
        return Err(err());
    }

    let short = |s: &str| s.len() < 4;
    let value = |s: &str| s.parse::<u32>().unwrap_or(0);
    if short(parts[0]) && value(parts[0]) > 31 {
        return Err(err());
    }
    if short(parts[1]) && value(parts[1]) > 31 {
        return Err(err());
    }
    if short(parts[0]) && short(parts[1]) && value(parts[0]) > 12 && value(parts[1]) > 12 {
        return Err(err());
    }

    let number = |s: &str| -> DomainResult<u32> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }
        s.parse().map_err(|_| err())
    };

    let (year, month, day) = if parts[0].len() >= 4 {
        (number(parts[0])?, number(parts[1])?, number(parts[2])?)
    } else {
        let year = number(parts[2])?;
        let year = match parts[2].len() {
            1 | 2 if year < 70 => 2000 + year,
            1 | 2 => 1900 + year,
            _ => year,
        };
        (year, number(parts[0])?, number(parts[1])?)
    };

    let year = i32::try_from(year).map_err(|_| err())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(err)
}
