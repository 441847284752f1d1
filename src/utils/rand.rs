pub fn rand_str(length: usize) -> String {
    use rand::distr::Alphanumeric;
    use rand::Rng;

    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Random snowflake-like id, large enough to never collide with fixtures.
pub fn rand_snowflake() -> i64 {
    use rand::Rng;

    rand::rng().random_range(1_000_000_000_000_000..i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rand_str() {
        let s1 = rand_str(10);
        assert_eq!(s1.len(), 10);
        let s2 = rand_str(10);
        assert_eq!(s2.len(), 10);
        assert_ne!(s1, s2)
    }

    #[test]
    fn test_rand_snowflake() {
        let id = rand_snowflake();
        assert!(id >= 1_000_000_000_000_000);
        assert_ne!(id, rand_snowflake());
    }
}
