use std::str::FromStr;
use std::time::Duration;

/// Durations like `30s`, `1m30s`, `1500ms` or a bare number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Duration must include a number".to_string());
        }

        let mut total = Duration::ZERO;
        let mut number = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                number.push(c);
                continue;
            }
            if c.is_whitespace() {
                continue;
            }
            let value: u64 = number
                .parse()
                .map_err(|_| format!("Unit '{}' is missing a number", c))?;
            number.clear();
            let part = match c {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    Some(Duration::from_millis(value))
                }
                's' => Some(Duration::from_secs(value)),
                'm' => value.checked_mul(60).map(Duration::from_secs),
                'h' => value.checked_mul(3600).map(Duration::from_secs),
                other => return Err(format!("Invalid duration unit: {}", other)),
            };
            total = add(total, part)?;
        }

        // trailing number without a unit counts as seconds
        if !number.is_empty() {
            let value: u64 = number.parse().map_err(|_| "Invalid number in duration".to_string())?;
            total = add(total, Some(Duration::from_secs(value)))?;
        }

        if total.is_zero() {
            return Err("Duration must be greater than zero".to_string());
        }
        Ok(HumanDuration(total))
    }
}

fn add(total: Duration, part: Option<Duration>) -> Result<Duration, String> {
    part.and_then(|p| total.checked_add(p))
        .ok_or_else(|| "Duration is too large".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Duration, String> {
        s.parse::<HumanDuration>().map(|d| d.0)
    }

    #[test]
    fn test_units() {
        assert_eq!(parse("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse("250ms"), Ok(Duration::from_millis(250)));
    }

    #[test]
    fn test_combined_and_bare() {
        assert_eq!(parse("1m30s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse("1s 500ms"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse("45"), Ok(Duration::from_secs(45)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse("").is_err());
        assert!(parse("s").is_err());
        assert!(parse("10x").is_err());
        assert!(parse("0s").is_err());
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = format!("{}h", u64::MAX);
        assert_eq!(parse(&huge), Err("Duration is too large".to_string()));
        let sum = format!("{}s {}s", u64::MAX, u64::MAX);
        assert_eq!(parse(&sum), Err("Duration is too large".to_string()));
        assert!(parse("99999999999999999999999s").is_err());
    }
}
