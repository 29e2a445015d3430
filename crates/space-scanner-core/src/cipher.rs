use crate::ScanError;

/// Opaque reason reported by a [`Cipher`].
#[derive(Debug, Clone, thiserror::Error, Eq, PartialEq)]
#[error("{0}")]
pub struct CipherError(pub String);

impl From<CipherError> for ScanError {
    fn from(err: CipherError) -> Self {
        Self::CipherFailure(err.0)
    }
}

/// Symmetric cipher, keyed before it is handed to the scanner.
pub trait Cipher {
    /// # Errors
    /// Returns [`CipherError`] when the plaintext cannot be sealed.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// # Errors
    /// Returns [`CipherError`] when the ciphertext is malformed or fails authentication.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>;
}

impl<C: Cipher + ?Sized> Cipher for &C {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).decrypt(ciphertext)
    }
}

impl<C: Cipher + ?Sized> Cipher for Box<C> {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).decrypt(ciphertext)
    }
}
