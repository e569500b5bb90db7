use std::collections::HashSet;

use crate::domain::entities::otp_code::{CODE_LENGTH, CODE_MAX, CODE_MIN};
use crate::services::otp::{generate_code, CodeGenerator, SecureCodeGenerator};

#[test]
fn test_codes_are_six_digits_in_range() {
    for _ in 0..10_000 {
        let code = generate_code().unwrap();
        assert_eq!(code.as_str().len(), CODE_LENGTH);
        assert!(code.as_str().bytes().all(|b| b.is_ascii_digit()));

        let value: u32 = code.as_str().parse().unwrap();
        assert!((CODE_MIN..=CODE_MAX).contains(&value));
    }
}

#[test]
fn test_codes_vary() {
    let generator = SecureCodeGenerator;
    let codes: HashSet<String> = (0..200)
        .map(|_| generator.generate().unwrap().into_inner())
        .collect();
    // 200 draws from 900k values practically never collide much
    assert!(codes.len() > 190);
}

#[test]
fn test_leading_digit_spread() {
    let mut seen = HashSet::new();
    for _ in 0..2_000 {
        let code = generate_code().unwrap();
        seen.insert(code.as_str().as_bytes()[0]);
    }
    // Leading digit is always 1-9 and all of them show up
    assert!(!seen.contains(&b'0'));
    assert_eq!(seen.len(), 9);
}
