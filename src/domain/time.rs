//! Free-form time-of-day normalization.
//!
//! Turns operator input such as `"3"`, `"2:30p"`, `"noon"` or `"14:30"` into
//! a 24-hour `"HH:MM"` string. The rules are a deliberately literal heuristic:
//! stray punctuation is dropped rather than rejected, hours above 12 imply PM,
//! and a bare small hour typed late in the day is read as this afternoon.

use regex::Regex;
use tracing::{debug, trace};

use crate::domain::{DomainError, DomainResult};

/// AM/PM designation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        }
    }
}

/// Hook for asking the operator to settle an ambiguous meridiem.
///
/// Returning `None` (or an unrecognized reply) keeps the heuristic choice.
pub trait Disambiguate {
    fn ask(&self, question: &str) -> Option<String>;
}

/// Normalizes time-of-day strings relative to the current wall-clock hour.
#[derive(Debug, Clone, Copy)]
pub struct TimeNormalizer {
    now_hour: u32,
}

impl TimeNormalizer {
    /// `now_hour` is the current local hour (0-23), used by the PM heuristic.
    pub fn new(now_hour: u32) -> Self {
        Self { now_hour }
    }

    /// Normalize `input` to `"HH:MM"`.
    ///
    /// When `prompt` is `None` the heuristic meridiem is accepted silently.
    pub fn normalize(&self, input: &str, prompt: Option<&dyn Disambiguate>) -> DomainResult<String> {
        let mut meridiem = None;
        let mut response = input.trim().to_lowercase();

        if response == "noon" {
            response = "12".to_string();
            meridiem = Some(Meridiem::Pm);
        } else if response == "midnight" {
            response = "12".to_string();
            meridiem = Some(Meridiem::Am);
        }

        let junk = Regex::new(r"[^0-9apm:\s]").map_err(|_| DomainError::time_format(input))?;
        let mut response = junk.replace_all(&response, "").into_owned();

        if response.ends_with('a') || response.ends_with('p') {
            response.push('m');
        }
        if let Some(rest) = response.strip_suffix("am") {
            meridiem = Some(Meridiem::Am);
            response = rest.trim().to_string();
        } else if let Some(rest) = response.strip_suffix("pm") {
            meridiem = Some(Meridiem::Pm);
            response = rest.trim().to_string();
        }

        if !response.contains(':') {
            response.push_str(":00");
        }

        let mut parts = response.split(':');
        let hour_part = parts.next().unwrap_or_default().trim();
        let minute_part = parts.next().unwrap_or_default().trim();
        if !is_numeric(hour_part) || (!minute_part.is_empty() && !is_numeric(minute_part)) {
            return Err(DomainError::time_format(input));
        }
        let mut hour: u32 = hour_part
            .parse()
            .map_err(|_| DomainError::time_format(input))?;
        let minute: u32 = if minute_part.is_empty() {
            0
        } else {
            minute_part
                .parse()
                .map_err(|_| DomainError::time_format(input))?
        };

        // out-of-range hours become midnight; no PM is implied
        if hour > 23 {
            hour = 0;
        }
        if hour > 12 {
            meridiem = Some(Meridiem::Pm);
            hour -= 12;
        }

        let meridiem = match meridiem {
            Some(m) => m,
            None => {
                let guess = self.guess(hour);
                trace!("normalize: hour={} guessed {:?}", hour, guess);
                match prompt {
                    Some(prompt) => confirm(prompt, hour, minute, guess),
                    None => guess,
                }
            }
        };

        if (hour < 12 && meridiem == Meridiem::Pm) || (hour == 12 && meridiem == Meridiem::Am) {
            hour += 12;
        }
        if hour >= 24 {
            hour = 0;
        }

        if (meridiem == Meridiem::Am && hour > 12)
            || (meridiem == Meridiem::Pm && hour > 0 && hour < 12)
        {
            return Err(DomainError::time_format(input));
        }

        let normalized = format!("{:02}:{:02}", hour, minute);
        debug!("normalize: {:?} -> {}", input, normalized);
        Ok(normalized)
    }

    /// Heuristic meridiem for an hour given without one.
    fn guess(&self, hour: u32) -> Meridiem {
        if hour < 12 {
            if self.now_hour > 11 && hour <= 7 {
                Meridiem::Pm
            } else {
                Meridiem::Am
            }
        } else {
            Meridiem::Pm
        }
    }
}

fn confirm(prompt: &dyn Disambiguate, hour: u32, minute: u32, guess: Meridiem) -> Meridiem {
    if hour == 12 && minute < 30 {
        let default = if guess == Meridiem::Pm { "noon" } else { "midnight" };
        let reply = prompt.ask(&format!("Noon or midnight? [{}]: ", default));
        match first_letter(reply.as_deref()) {
            Some('n') => Meridiem::Pm,
            Some('m') => Meridiem::Am,
            _ => guess,
        }
    } else {
        let reply = prompt.ask(&format!(
            "{:02}:{:02} AM or PM? [{}]: ",
            hour,
            minute,
            guess.as_str()
        ));
        match first_letter(reply.as_deref()) {
            Some('p') => Meridiem::Pm,
            Some('a') => Meridiem::Am,
            _ => guess,
        }
    }
}

fn first_letter(reply: Option<&str>) -> Option<char> {
    reply
        .and_then(|r| r.trim().chars().next())
        .map(|c| c.to_ascii_lowercase())
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Render a `"HH:MM"` time as `"g:i a"`, e.g. `"15:05"` -> `"3:05 pm"`.
pub fn to_twelve_hour(time: &str) -> DomainResult<String> {
    let parsed = chrono::NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| DomainError::time_format(time))?;
    Ok(parsed.format("%-I:%M %P").to_string())
}
