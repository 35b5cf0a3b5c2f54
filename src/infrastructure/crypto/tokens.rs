//! Random codes and content hashes

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Six-digit numeric code in `100000..=999999`, used for login OTPs and
/// password reset tokens.
pub fn six_digit_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Eight upper-case alphanumerics
pub fn reservation_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect()
}

pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_expected_shape() {
        for _ in 0..50 {
            let otp: u32 = six_digit_code().parse().unwrap();
            assert!((100_000..=999_999).contains(&otp));

            let code = reservation_code();
            assert_eq!(code.len(), 8);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn sha256_is_hex_encoded() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
