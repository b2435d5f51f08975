//! Ordering of release tags such as `v1.2.0` or `2.0.0-rc1`.

use std::cmp::Ordering;

/// Compare two version strings segment by segment.
///
/// A leading `v` is ignored; segments are split on `.` and `-`. Numeric
/// segments compare numerically, anything else lexically, and a missing
/// segment sorts before a present one (`1.2` < `1.2.1`).
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = segments(a);
    let right = segments(b);

    for pair in left.iter().zip(right.iter()) {
        let ord = match pair {
            (Segment::Number(x), Segment::Number(y)) => x.cmp(y),
            (Segment::Number(_), Segment::Text(_)) => Ordering::Greater,
            (Segment::Text(_), Segment::Number(_)) => Ordering::Less,
            (Segment::Text(x), Segment::Text(y)) => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len())
}

/// Highest version among `tags`, if any.
pub fn latest<'a, I>(tags: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    tags.into_iter()
        .max_by(|a, b| compare_versions(a, b))
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Number(u64),
    Text(&'a str),
}

fn segments(version: &str) -> Vec<Segment<'_>> {
    let trimmed = version.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    trimmed
        .split(['.', '-'])
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<u64>() {
            Ok(n) => Segment::Number(n),
            Err(_) => Segment::Text(s),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_numeric_segments_when_compared_then_not_lexical() {
        assert_eq!(compare_versions("v1.10.0", "v1.9.3"), Ordering::Greater);
        assert_eq!(compare_versions("1.2", "1.2.1"), Ordering::Less);
        assert_eq!(compare_versions("v2.0.0", "2.0.0"), Ordering::Equal);
    }

    #[test]
    fn given_tags_when_latest_then_highest_version() {
        let tags = ["v0.9.0", "v0.10.1", "v0.10.0"];
        assert_eq!(latest(tags.iter().copied()), Some("v0.10.1"));
    }
}
