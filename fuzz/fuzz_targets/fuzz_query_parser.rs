#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let terms = nappi::query::parse_query(data);

    for token in terms.tokens() {
        assert!(token.chars().count() >= nappi::query::MIN_TOKEN_LEN);
    }

    let _ = nappi::query::validate_term(Some(data), 3);
});
