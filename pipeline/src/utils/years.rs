use std::cmp::Ordering;

/// Orders year labels so that "9" comes before "10".
///
/// A label that parses as an integer (after trimming) is numeric. Numeric labels
/// sort by value and come before all other labels, which sort as plain strings.
/// Labels with the same value (e.g. "2020" and "02020") fall back to string order.
pub fn cmp_year_labels(a: &str, b: &str) -> Ordering {
    match (parse_year(a), parse_year(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.cmp(b))
}

fn parse_year(label: &str) -> Option<i128> {
    label.trim().parse::<i128>().ok()
}
