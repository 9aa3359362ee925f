/// Splits free-form text into posts: one per line, trimmed, blank lines
/// dropped, input order kept.
pub fn collect_posts(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case("hello\nworld", vec!["hello", "world"])]
    #[case("  hello  \r\n\r\n\tworld\t\n", vec!["hello", "world"])]
    #[case("\n\n   \n", vec![])]
    #[case("", vec![])]
    #[case("same\nsame", vec!["same", "same"])]
    #[case("b\na\nc", vec!["b", "a", "c"])]
    #[case("<b>bold</b> & co", vec!["<b>bold</b> & co"])]
    fn test_collect_posts(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(collect_posts(text), expected);
    }
}
