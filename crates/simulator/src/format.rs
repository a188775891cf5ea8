//! Output formatting.

/// Splits `text` into blocks of five symbols joined by single spaces.
#[must_use]
pub fn group_in_fives(text: &str) -> String {
    let mut grouped = String::with_capacity(text.len() + text.len() / 5);
    for (index, symbol) in text.chars().enumerate() {
        if index > 0 && index % 5 == 0 {
            grouped.push(' ');
        }
        grouped.push(symbol);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::group_in_fives;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("ABC", "ABC")]
    #[case("ABCDE", "ABCDE")]
    #[case("ABCDEF", "ABCDE F")]
    #[case("QVPQSOKOILPUBKJZPISFXDW", "QVPQS OKOIL PUBKJ ZPISF XDW")]
    fn groups_without_trailing_space(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(group_in_fives(input), expected);
    }
}
