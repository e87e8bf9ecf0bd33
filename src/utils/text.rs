use regex::Regex;
use std::sync::OnceLock;

fn extra_spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("static regex"))
}

/// Replaces every run of two or more whitespace characters with a single space.
///
/// A lone whitespace character is kept as is and nothing is trimmed.
pub fn clean_extra_spaces(text: &str) -> String {
    extra_spaces().replace_all(text, " ").into_owned()
}

/// Splits a comma separated list of names into a de-duplicated list that keeps
/// the order in which names first appear.
pub fn parse_names(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for piece in raw.split(',') {
        let name = clean_extra_spaces(piece.trim());
        if name.is_empty() || names.contains(&name) {
            continue;
        }
        names.push(name);
    }
    names
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_is_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(ch);
            prev_is_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_extra_spaces() {
        assert_eq!(clean_extra_spaces("Albert   Einstein"), "Albert Einstein");
        assert_eq!(clean_extra_spaces("a  b   c"), "a b c");
        assert_eq!(clean_extra_spaces("a\t\n b"), "a b");
    }

    #[test]
    fn test_clean_extra_spaces_keeps_single_whitespace() {
        assert_eq!(clean_extra_spaces(" Marie Curie "), " Marie Curie ");
        assert_eq!(clean_extra_spaces("a\tb"), "a\tb");
    }

    #[test]
    fn test_parse_names_dedupes_in_order() {
        let names = parse_names("Albert Einstein,   Albert   Einstein, Fake  Doctorine   ");
        assert_eq!(names, vec!["Albert Einstein", "Fake Doctorine"]);
    }

    #[test]
    fn test_parse_names_skips_empty_entries() {
        let names = parse_names("Isaac Newton,, ,Marie Curie,");
        assert_eq!(names, vec!["Isaac Newton", "Marie Curie"]);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("albert einstein"), "Albert Einstein");
        assert_eq!(title_case("MARIE curie"), "Marie Curie");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }
}
