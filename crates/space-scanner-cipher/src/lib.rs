//! XChaCha20-Poly1305 implementation of the scanner's [`Cipher`] plus hex key-file helpers.
//!
//! Sealed payloads are framed as `MAGIC || nonce || ciphertext+tag`.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use rand::rngs::OsRng;
use rand::RngCore;
use space_scanner_core::{Cipher, CipherError};
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const KEY_LEN: usize = 32;
pub const NONCE_LEN: usize = 24;
pub const TAG_LEN: usize = 16;
pub const MAGIC: &[u8] = b"SSENC1";

const KEY_FILE_PERMISSIONS: u32 = 0o600;

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("refusing to overwrite existing key file {path}")]
    AlreadyExists { path: String },
    #[error("key file I/O failed for {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("key file {path} MUST contain {expected} hex-encoded bytes: {reason}")]
    InvalidFormat { path: String, expected: usize, reason: String },
}

/// 32-byte symmetric key, zeroed on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CipherKey {
    key: [u8; KEY_LEN],
}

impl CipherKey {
    #[must_use]
    pub fn generate() -> Self {
        let mut key = [0_u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        Self { key }
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { key: bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// Caller owns the returned secret and should zeroize it after use.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.key)
    }

    /// # Errors
    /// Returns a reason when `text` is not exactly [`KEY_LEN`] hex-encoded bytes.
    pub fn from_hex(text: &str) -> Result<Self, String> {
        let mut bytes = hex::decode(text.trim()).map_err(|err| err.to_string())?;
        if bytes.len() != KEY_LEN {
            let found = bytes.len();
            bytes.zeroize();
            return Err(format!("decoded {found} bytes"));
        }

        let mut key = [0_u8; KEY_LEN];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self { key })
    }
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherKey").field("key", &"[REDACTED]").finish()
    }
}

#[must_use]
pub fn generate_key() -> CipherKey {
    CipherKey::generate()
}

/// Read a key stored as hex text; surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`KeyError`] when the file cannot be read or does not hold exactly
/// [`KEY_LEN`] hex-encoded bytes.
pub fn read_hex_key_file(path: &Path) -> Result<CipherKey, KeyError> {
    let mut body = fs::read_to_string(path)
        .map_err(|err| KeyError::Io { path: path.display().to_string(), reason: err.to_string() })?;
    let key = CipherKey::from_hex(&body);
    body.zeroize();

    key.map_err(|reason| KeyError::InvalidFormat {
        path: path.display().to_string(),
        expected: KEY_LEN,
        reason,
    })
}

/// Write `key` as hex text to a new file, readable by the owner only where the platform
/// supports it. An existing file is never replaced.
///
/// # Errors
/// Returns [`KeyError::AlreadyExists`] when `path` exists and [`KeyError::Io`] when the file
/// cannot be written.
pub fn write_hex_key_file(path: &Path, key: &CipherKey) -> Result<(), KeyError> {
    let io_error = |err: std::io::Error| KeyError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    };

    let mut file = create_owner_only(path).map_err(|err| {
        if err.kind() == ErrorKind::AlreadyExists {
            KeyError::AlreadyExists { path: path.display().to_string() }
        } else {
            io_error(err)
        }
    })?;

    let mut body = key.to_hex();
    let written = file.write_all(body.as_bytes()).and_then(|()| file.sync_all());
    body.zeroize();
    written.map_err(io_error)?;

    tracing::debug!(path = %path.display(), "wrote key file");
    Ok(())
}

#[cfg(unix)]
fn create_owner_only(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new().write(true).create_new(true).mode(KEY_FILE_PERMISSIONS).open(path)
}

#[cfg(not(unix))]
fn create_owner_only(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

/// [`Cipher`] sealing payloads with XChaCha20-Poly1305 and a fresh random nonce per call.
#[derive(Debug, Clone)]
pub struct XChaChaCipher {
    key: CipherKey,
}

impl XChaChaCipher {
    #[must_use]
    pub fn new(key: CipherKey) -> Self {
        Self { key }
    }

    fn aead(&self) -> XChaCha20Poly1305 {
        XChaCha20Poly1305::new(Key::from_slice(self.key.as_bytes()))
    }
}

impl Cipher for XChaChaCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let mut nonce_bytes = [0_u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let ciphertext = self
            .aead()
            .encrypt(XNonce::from_slice(&nonce_bytes), plaintext)
            .map_err(|err| CipherError(format!("failed to encrypt payload: {err}")))?;

        let mut out = Vec::with_capacity(MAGIC.len() + NONCE_LEN + ciphertext.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, CipherError> {
        if sealed.len() < MAGIC.len() + NONCE_LEN + TAG_LEN {
            return Err(CipherError("encrypted payload is too short".to_string()));
        }
        if !sealed.starts_with(MAGIC) {
            return Err(CipherError("encrypted payload is missing expected header".to_string()));
        }

        let nonce_end = MAGIC.len() + NONCE_LEN;
        let nonce = XNonce::from_slice(&sealed[MAGIC.len()..nonce_end]);
        self.aead()
            .decrypt(nonce, &sealed[nonce_end..])
            .map_err(|err| CipherError(format!("failed to decrypt payload: {err}")))
    }
}
