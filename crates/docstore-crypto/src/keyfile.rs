use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::signer::SigningKey;

/// File-backed key provider.
///
/// Resolves a username to `<key_dir>/<username>.priv` holding the
/// hex-encoded 32-byte seed, with a matching `<username>.pub` file holding
/// the hex public key. The `.pub` file is a convenience for operators; only
/// the `.priv` file is consulted when loading.
#[derive(Clone, Debug)]
pub struct FileKeyStore {
    key_dir: PathBuf,
}

impl FileKeyStore {
    /// A key store rooted at an explicit directory.
    pub fn new(key_dir: impl Into<PathBuf>) -> Self {
        Self {
            key_dir: key_dir.into(),
        }
    }

    /// The conventional per-user key store at `~/.docstore/keys`.
    pub fn default_dir() -> Result<Self, KeyError> {
        let home = dirs::home_dir().ok_or(KeyError::NoHomeDirectory)?;
        Ok(Self::new(home.join(".docstore").join("keys")))
    }

    /// Path of the private key file for `username`.
    pub fn key_path(&self, username: &str) -> PathBuf {
        self.key_dir.join(format!("{username}.priv"))
    }

    /// Path of the public key file for `username`.
    pub fn public_key_path(&self, username: &str) -> PathBuf {
        self.key_dir.join(format!("{username}.pub"))
    }

    /// Load the signing key for `username`.
    pub fn load(&self, username: &str) -> Result<SigningKey, KeyError> {
        let path = self.key_path(username);
        let contents = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                KeyError::NotFound(path.clone())
            } else {
                KeyError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        parse_seed(contents.trim(), &path)
    }

    /// Generate a fresh keypair for `username` and write both key files.
    ///
    /// Refuses to overwrite an existing private key.
    pub fn generate(&self, username: &str) -> Result<SigningKey, KeyError> {
        let priv_path = self.key_path(username);
        if priv_path.exists() {
            return Err(KeyError::AlreadyExists(priv_path));
        }
        fs::create_dir_all(&self.key_dir).map_err(|source| KeyError::Io {
            path: self.key_dir.clone(),
            source,
        })?;

        let key = SigningKey::generate();
        write_key_file(&priv_path, &hex::encode(key.as_bytes()))?;
        write_key_file(&self.public_key_path(username), &key.public_key_hex())?;
        Ok(key)
    }
}

fn parse_seed(hex_seed: &str, path: &Path) -> Result<SigningKey, KeyError> {
    let bytes = hex::decode(hex_seed).map_err(|_| KeyError::Malformed(path.to_path_buf()))?;
    let seed: [u8; 32] = bytes
        .try_into()
        .map_err(|_| KeyError::Malformed(path.to_path_buf()))?;
    Ok(SigningKey::from_bytes(seed))
}

fn write_key_file(path: &Path, contents: &str) -> Result<(), KeyError> {
    let mut file = fs::File::create(path).map_err(|source| KeyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    writeln!(file, "{contents}").map_err(|source| KeyError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Errors from the file-backed key provider.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("key file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("no key file at {0}")]
    NotFound(PathBuf),

    #[error("malformed key material in {0}")]
    Malformed(PathBuf),

    #[error("home directory could not be determined")]
    NoHomeDirectory,

    #[error("key file I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
