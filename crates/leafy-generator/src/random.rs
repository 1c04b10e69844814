use crate::Generator;
use leafy_core::LinkCode;
use rand::Rng;
use typed_builder::TypedBuilder;

/// Characters generated codes are drawn from.
pub const ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Uniform random code generator.
///
/// Every character is drawn independently and with replacement from
/// [`ALPHABET`]. With the default length there are 62^7 (about 3.5e12)
/// possible codes.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    #[builder(default = DEFAULT_CODE_LENGTH)]
    length: usize,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    type Output = LinkCode;

    fn generate(&self) -> Self::Output {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        LinkCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_codes_have_seven_alphanumeric_chars() {
        let generator = RandomGenerator::new();

        for _ in 0..1000 {
            let code = generator.generate();
            assert_eq!(code.as_str().len(), 7);
            assert!(code.as_str().bytes().all(|b| b.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn custom_length() {
        let generator = RandomGenerator::builder().length(12).build();
        assert_eq!(generator.length(), 12);
        assert_eq!(generator.generate().as_str().len(), 12);
    }

    #[test]
    fn generated_codes_pass_validation() {
        let generator = RandomGenerator::new();
        let code = generator.generate();
        assert!(LinkCode::new(code.as_str()).is_ok());
    }

    #[test]
    fn codes_are_spread_over_the_alphabet() {
        let generator = RandomGenerator::new();
        let mut seen = HashSet::new();

        for _ in 0..2000 {
            seen.extend(generator.generate().as_str().bytes());
        }

        // 14k draws from 62 symbols leave no symbol out in practice.
        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
