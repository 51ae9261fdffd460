#[cfg(test)]
mod tests {
    use crate::service::session_code;

    #[test]
    fn codes_are_six_uppercase_hex_chars() {
        for _ in 0..100 {
            let code = session_code::generate();
            assert_eq!(code.len(), 6);
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
            );
        }
    }

    #[test]
    fn codes_vary_between_calls() {
        let codes: std::collections::HashSet<String> =
            (0..50).map(|_| session_code::generate()).collect();

        // 16^6 combinations; 50 draws colliding entirely would mean a
        // broken generator, not bad luck.
        assert!(codes.len() > 1);
    }
}
