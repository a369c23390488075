//! Ed25519 verification of inbound interaction requests.
//!
//! Discord signs `timestamp || raw_body` with the application's private key.
//! Verification must run on the raw, unparsed body bytes.

use super::headers::{Headers, MissingHeader, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("Bad request signature: {0}")]
    MissingHeader(#[from] MissingHeader),

    #[error("Bad request signature: malformed signature")]
    Malformed,

    #[error("Bad request signature")]
    Mismatch,
}

#[derive(Debug, thiserror::Error)]
pub enum PublicKeyError {
    #[error("Public key is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Public key must be 32 bytes, got {0}")]
    Length(usize),

    #[error("Public key is not a valid Ed25519 point")]
    InvalidPoint,
}

/// Verifies interaction signatures against the application public key
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    public_key: VerifyingKey,
}

impl SignatureVerifier {
    /// Create a verifier from the hex-encoded public key shown in the developer portal
    pub fn from_hex(public_key_hex: &str) -> Result<Self, PublicKeyError> {
        let bytes = hex::decode(public_key_hex.trim())?;
        let key: [u8; 32] = bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| PublicKeyError::Length(bytes.len()))?;
        let public_key =
            VerifyingKey::from_bytes(&key).map_err(|_| PublicKeyError::InvalidPoint)?;

        Ok(Self { public_key })
    }

    /// Verify a request
    ///
    /// # Arguments
    ///
    /// * `headers` - The inbound request headers
    /// * `body` - The raw request body, exactly as received
    ///
    /// # Errors
    ///
    /// Returns `SignatureError` when either signature header is missing, or when
    /// the signature does not match. Mismatches are logged with their inputs.
    pub fn verify(&self, headers: &Headers, body: &[u8]) -> Result<(), SignatureError> {
        let signature = headers.require(SIGNATURE_HEADER)?;
        let timestamp = headers.require(TIMESTAMP_HEADER)?;

        let result = decode_signature(signature).and_then(|parsed| {
            let mut message = Vec::with_capacity(timestamp.len() + body.len());
            message.extend_from_slice(timestamp.as_bytes());
            message.extend_from_slice(body);

            self.public_key
                .verify(&message, &parsed)
                .map_err(|_| SignatureError::Mismatch)
        });

        if let Err(err) = &result {
            error!(
                ?err,
                body = %String::from_utf8_lossy(body),
                %signature,
                %timestamp,
                public_key = %hex::encode(self.public_key.as_bytes()),
                "Interaction signature verification failed"
            );
        }

        result
    }
}

fn decode_signature(signature: &str) -> Result<Signature, SignatureError> {
    let bytes = hex::decode(signature).map_err(|_| SignatureError::Malformed)?;
    let bytes: [u8; 64] = bytes.try_into().map_err(|_| SignatureError::Malformed)?;
    Ok(Signature::from_bytes(&bytes))
}
