//! Password generation functionality
//!
//! Produces credentials that Wialon accepts for newly provisioned users.
//! A candidate is drawn uniformly from lowercase letters, uppercase letters,
//! digits and the symbols `@ # $ %`, then kept only if it contains at least
//! one lowercase letter, one uppercase letter and three digits. Failing
//! candidates are thrown away whole and redrawn (rejection sampling).
//!
//! The requested length is a minimum: the generated password is always
//! `length + 1` characters long. Existing accounts were provisioned with this
//! convention, so it is kept as is.

use std::fmt;
use rand::{CryptoRng, Rng};
use tracing::debug;
use crate::error::{IntegrationError, Result};
use crate::utils::mask_secret;

const LOWER_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "@#$%";

/// Union of all character classes, in draw order
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%";

/// Digits a password must contain
pub const MIN_DIGITS: usize = 3;

/// Smallest requested length that can satisfy the composition rule
/// (1 lowercase + 1 uppercase + 3 digits = 5 characters = 4 + 1).
pub const MIN_REQUESTED_LENGTH: usize = 4;

/// Generate a Wialon-compliant password using the thread-local CSPRNG.
///
/// # Arguments
/// * `length` - Requested length; the result has `length + 1` characters
///
/// # Errors
/// `InvalidArgument` when `length` is below [`MIN_REQUESTED_LENGTH`], since no
/// string that short can ever pass the composition check.
///
/// # Example
/// ```
/// use wialink::crypto::password::{generate_wialon_password, is_valid_wialon_password};
///
/// let password = generate_wialon_password(8).unwrap();
/// assert_eq!(password.len(), 9);
/// assert!(is_valid_wialon_password(&password));
/// ```
pub fn generate_wialon_password(length: usize) -> Result<String> {
    generate_wialon_password_with(&mut rand::rng(), length)
}

/// Generate a Wialon-compliant password from the given random source.
///
/// Tests pass a seeded generator here to get reproducible output.
pub fn generate_wialon_password_with<R: CryptoRng + ?Sized>(rng: &mut R, length: usize) -> Result<String> {
    if length < MIN_REQUESTED_LENGTH {
        return Err(IntegrationError::InvalidArgument(format!(
            "password length must be at least {}, got {}",
            MIN_REQUESTED_LENGTH, length
        )));
    }

    let total = length + 1;
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let candidate: String = (0..total)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();

        if is_valid_wialon_password(&candidate) {
            debug!(attempts, length = total, "generated password");
            return Ok(candidate);
        }
    }
}

/// Check the composition rule: at least one lowercase letter, one uppercase
/// letter and [`MIN_DIGITS`] digits. Symbols are allowed but not required.
pub fn is_valid_wialon_password(password: &str) -> bool {
    password.chars().any(|c| LOWER_LETTERS.contains(c))
        && password.chars().any(|c| UPPER_LETTERS.contains(c))
        && password.chars().filter(|c| DIGITS.contains(*c)).count() >= MIN_DIGITS
}

/// Check that every character belongs to the generator alphabet
pub fn is_wialon_alphabet(password: &str) -> bool {
    password.bytes().all(|b| ALPHABET.contains(&b))
}

/// A generated credential for a Wialon user
///
/// The value is fixed once created. `Debug` prints it masked so it does not
/// end up in logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct WialonPassword {
    password: String,
}

impl WialonPassword {
    /// Generate a new password of `length + 1` characters
    pub fn new(length: usize) -> Result<Self> {
        Ok(Self {
            password: generate_wialon_password(length)?,
        })
    }

    /// Generate a new password from the given random source
    pub fn with_rng<R: CryptoRng + ?Sized>(rng: &mut R, length: usize) -> Result<Self> {
        Ok(Self {
            password: generate_wialon_password_with(rng, length)?,
        })
    }

    /// The password in clear text
    pub fn raw(&self) -> &str {
        &self.password
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.password.len()
    }

    pub fn is_empty(&self) -> bool {
        self.password.is_empty()
    }

    pub fn into_string(self) -> String {
        self.password
    }
}

impl fmt::Debug for WialonPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WialonPassword")
            .field(&mask_secret(&self.password))
            .finish()
    }
}
