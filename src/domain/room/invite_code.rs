//! Invite code value object.
//!
//! An invite code is an opaque token granting access to a private room in
//! lieu of enumeration. Codes are ten characters over the alphanumeric
//! alphabet and always contain at least one ASCII letter, which keeps the
//! code namespace disjoint from the numeric room-id namespace: a resolve
//! input can parse as a room id or match a code, never both.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Alphabet used for invite code generation.
pub const INVITE_CODE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Fixed invite code length.
pub const INVITE_CODE_LENGTH: usize = 10;

/// Opaque unique token granting access to a private room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteCode(String);

impl InviteCode {
    /// Generate a fresh random invite code.
    ///
    /// Regenerates internally until the code contains at least one letter,
    /// so a code can never be all digits and collide with the numeric
    /// room-id namespace.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let code: String = (0..INVITE_CODE_LENGTH)
                .map(|_| INVITE_CODE_ALPHABET[rng.gen_range(0..INVITE_CODE_ALPHABET.len())] as char)
                .collect();
            if code.bytes().any(|b| b.is_ascii_alphabetic()) {
                return Self(code);
            }
        }
    }

    /// Parse an invite code from persisted or client-supplied input.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the input is not exactly ten alphanumeric
    ///   characters containing at least one letter
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.len() != INVITE_CODE_LENGTH
            || !input.bytes().all(|b| b.is_ascii_alphanumeric())
            || !input.bytes().any(|b| b.is_ascii_alphabetic())
        {
            return Err(ValidationError::invalid_format(
                "invite_code",
                "expected ten alphanumeric characters with at least one letter",
            ));
        }
        Ok(Self(input.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RoomId;
    use proptest::prelude::*;

    #[test]
    fn generated_codes_have_fixed_length() {
        for _ in 0..100 {
            assert_eq!(InviteCode::generate().as_str().len(), INVITE_CODE_LENGTH);
        }
    }

    #[test]
    fn generated_codes_never_parse_as_room_ids() {
        for _ in 0..100 {
            let code = InviteCode::generate();
            assert!(code.as_str().parse::<RoomId>().is_err());
        }
    }

    #[test]
    fn parse_accepts_generated_codes() {
        let code = InviteCode::generate();
        assert_eq!(InviteCode::parse(code.as_str()).unwrap(), code);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(InviteCode::parse("AB12").is_err());
        assert!(InviteCode::parse("AB12CD34EF99").is_err());
    }

    #[test]
    fn parse_rejects_all_digit_input() {
        assert!(InviteCode::parse("0123456789").is_err());
    }

    #[test]
    fn parse_rejects_non_alphanumeric() {
        assert!(InviteCode::parse("AB12CD34E!").is_err());
    }

    proptest! {
        #[test]
        fn parse_never_accepts_input_that_parses_as_a_room_id(id in any::<i64>()) {
            // The two identifier spaces must stay disjoint for resolve().
            prop_assert!(InviteCode::parse(&id.to_string()).is_err());
        }

        #[test]
        fn parse_round_trips_valid_codes(
            code in "[A-Za-z0-9]{9}[A-Za-z]"
        ) {
            let parsed = InviteCode::parse(&code).unwrap();
            prop_assert_eq!(parsed.as_str(), code.as_str());
        }
    }
}
