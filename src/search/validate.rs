use crate::utils::ValidationError;

pub const MAX_NAME_LENGTH: usize = 32;

fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '(' | ')')
}

fn is_valid_name(name: &str) -> bool {
    name.chars().count() <= MAX_NAME_LENGTH && name.chars().all(is_name_char)
}

/// Lowercases an alias and checks it can be stored.
///
/// Purely numeric aliases are refused so that a bookmark reference can always
/// be told apart from a display number.
pub fn normalize_alias(raw: &str) -> Result<String, ValidationError> {
    let alias = raw.trim().to_lowercase();
    if alias.is_empty() {
        return Err(ValidationError::EmptyAlias);
    }
    if alias.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NumericAlias);
    }
    if !is_valid_name(&alias) {
        return Err(ValidationError::InvalidAlias);
    }
    Ok(alias)
}

/// Lowercases a user supplied tag name and checks it can be stored.
pub fn normalize_tag(raw: &str) -> Result<String, ValidationError> {
    let tag = raw.trim().trim_start_matches('#').to_lowercase();
    if tag.is_empty() {
        return Err(ValidationError::EmptyTag);
    }
    if !is_valid_name(&tag) {
        return Err(ValidationError::InvalidTag);
    }
    Ok(tag)
}

#[cfg(test)]
mod test {
    use super::*;
    use ValidationError::*;

    #[test]
    fn test_normalize_alias() {
        let too_long = "a".repeat(33);
        let longest = "a".repeat(32);
        for (raw, expect) in [
            ("my_bookmark(1)", Ok("my_bookmark(1)")),
            ("My_Bookmark", Ok("my_bookmark")),
            ("a1", Ok("a1")),
            ("1a", Ok("1a")),
            (longest.as_str(), Ok(longest.as_str())),
            ("12345", Err(NumericAlias)),
            ("0", Err(NumericAlias)),
            (too_long.as_str(), Err(InvalidAlias)),
            ("abc!", Err(InvalidAlias)),
            ("two words", Err(InvalidAlias)),
            ("has:colon", Err(InvalidAlias)),
            ("", Err(EmptyAlias)),
            ("   ", Err(EmptyAlias)),
        ] {
            assert_eq!(
                normalize_alias(raw),
                expect.map(|s| s.to_string()),
                "alias {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_normalize_tag() {
        for (raw, expect) in [
            ("rust", Ok("rust")),
            ("Rust", Ok("rust")),
            ("#rust", Ok("rust")),
            ("12345", Ok("12345")),
            ("todo(later)", Ok("todo(later)")),
            ("has:attachment", Err(InvalidTag)),
            ("abc!", Err(InvalidTag)),
            ("", Err(EmptyTag)),
            ("#", Err(EmptyTag)),
        ] {
            assert_eq!(
                normalize_tag(raw),
                expect.map(|s| s.to_string()),
                "tag {:?}",
                raw
            );
        }
        assert_eq!(normalize_tag(&"t".repeat(33)), Err(InvalidTag));
    }
}
