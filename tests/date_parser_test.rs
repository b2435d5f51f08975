//! Tests for date normalization.

use rstest::rstest;

use worklog::domain::parse_date;

#[rstest]
#[case("2024-03-05", "2024-03-05")]
#[case("2024/3/5", "2024-03-05")]
#[case("3/5/2024", "2024-03-05")]
#[case("03-05-24", "2024-03-05")]
#[case("12/31/99", "1999-12-31")]
#[case("2024-02-29 08:30", "2024-02-29")]
fn given_valid_date_when_parsed_then_iso_format(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(parse_date(input).unwrap(), expected);
}

#[rstest]
#[case("2023-02-29")]
#[case("13/13/2024")]
#[case("32-1-2024")]
#[case("1-32-2024")]
#[case("20240305")]
#[case("2024-03")]
#[case("2024-03-05-01")]
#[case("march 5")]
#[case("")]
fn given_invalid_date_when_parsed_then_format_error(#[case] input: &str) {
    let err = parse_date(input).unwrap_err();
    assert_eq!(err.to_string(), "Date must be a valid format, eg. YYYY-MM-DD");
}
