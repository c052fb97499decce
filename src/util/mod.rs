/// First character of every space-separated word, uppercased.
pub(crate) fn initials(title: &str) -> String {
    title
        .split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_takes_first_letter_of_each_word() {
        assert_eq!(initials("Hacker News"), "HN");
        assert_eq!(initials("github"), "G");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_initials_skips_repeated_spaces() {
        assert_eq!(initials("a  b"), "AB");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("notes"), "Notes");
        assert_eq!(capitalize(""), "");
    }
}
