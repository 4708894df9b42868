//! X25519 + Deoxys-II-256-128 call data envelope.
//!
//! Wire shape, CBOR with canonical key order:
//! ```text
//! { "body": { "pk": bytes(32), "data": bytes, "nonce": bytes(15) }, "format": 1 }
//! ```
//! where `data` seals the CBOR map `{ "body": plaintext }`.

use deoxys::aead::{Aead, KeyInit, Nonce};
use deoxys::DeoxysII256;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;
use sha2::Sha512_256;
use x25519_dalek::{EphemeralSecret, PublicKey};

use crate::envelope::{EnvelopeCipher, EnvelopeError, EnvelopeResult};

/// Deoxys-II nonce length.
pub const NONCE_SIZE: usize = 15;

/// Envelope format tag for X25519/Deoxys-II.
pub const FORMAT_X25519_DEOXYSII: u8 = 1;

const BOX_KDF_TWEAK: &[u8] = b"MRAE_Box_Deoxys-II-256-128";

#[derive(Serialize)]
struct PlainCall<'a> {
    #[serde(with = "serde_bytes")]
    body: &'a [u8],
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct EncryptedCall {
    pub(crate) body: EncryptedBody,
    pub(crate) format: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct EncryptedBody {
    pub(crate) pk: ByteBuf,
    pub(crate) data: ByteBuf,
    pub(crate) nonce: ByteBuf,
}

/// Symmetric key for a box, from the X25519 shared secret.
pub(crate) fn derive_key(shared_secret: &[u8; 32]) -> EnvelopeResult<[u8; 32]> {
    let mut kdf = <Hmac<Sha512_256> as Mac>::new_from_slice(BOX_KDF_TWEAK)
        .map_err(|e| EnvelopeError::Cipher(e.to_string()))?;
    kdf.update(shared_secret);
    Ok(kdf.finalize().into_bytes().into())
}

/// Cipher context holding an ephemeral key pair agreed with the runtime key.
pub struct DeoxysCipher {
    cipher: DeoxysII256,
    public_key: [u8; 32],
}

impl DeoxysCipher {
    /// Agree a fresh ephemeral key with `runtime_public_key`.
    pub fn new(runtime_public_key: [u8; 32]) -> EnvelopeResult<Self> {
        let secret = EphemeralSecret::random_from_rng(OsRng);
        let public_key = PublicKey::from(&secret);
        let shared = secret.diffie_hellman(&PublicKey::from(runtime_public_key));

        Self::from_shared_secret(shared.as_bytes(), public_key.to_bytes())
    }

    pub(crate) fn from_shared_secret(
        shared_secret: &[u8; 32],
        public_key: [u8; 32],
    ) -> EnvelopeResult<Self> {
        let key = derive_key(shared_secret)?;
        let cipher = DeoxysII256::new_from_slice(&key)
            .map_err(|e| EnvelopeError::Cipher(e.to_string()))?;
        Ok(Self { cipher, public_key })
    }

    /// Our ephemeral public key, as carried in every envelope.
    pub fn public_key(&self) -> [u8; 32] {
        self.public_key
    }

    fn seal(&self, nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> EnvelopeResult<Vec<u8>> {
        let mut inner = Vec::new();
        ciborium::into_writer(&PlainCall { body: plaintext }, &mut inner)
            .map_err(|e| EnvelopeError::Encoding(e.to_string()))?;

        let data = self
            .cipher
            .encrypt(Nonce::<DeoxysII256>::from_slice(nonce), inner.as_slice())
            .map_err(|e| EnvelopeError::Cipher(e.to_string()))?;

        let envelope = EncryptedCall {
            body: EncryptedBody {
                pk: ByteBuf::from(self.public_key.to_vec()),
                data: ByteBuf::from(data),
                nonce: ByteBuf::from(nonce.to_vec()),
            },
            format: FORMAT_X25519_DEOXYSII,
        };

        let mut out = Vec::new();
        ciborium::into_writer(&envelope, &mut out)
            .map_err(|e| EnvelopeError::Encoding(e.to_string()))?;
        Ok(out)
    }
}

impl EnvelopeCipher for DeoxysCipher {
    fn encrypt_encode(&self, plaintext: &[u8]) -> EnvelopeResult<Vec<u8>> {
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);
        self.seal(&nonce, plaintext)
    }
}

impl std::fmt::Debug for DeoxysCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeoxysCipher")
            .field("public_key", &hex::encode(self.public_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x25519_dalek::StaticSecret;

    #[derive(Deserialize)]
    struct PlainCallOwned {
        body: ByteBuf,
    }

    /// Open an envelope the way the confidential runtime would.
    fn runtime_open(runtime_secret: &StaticSecret, envelope: &[u8]) -> Vec<u8> {
        let call: EncryptedCall = ciborium::from_reader(envelope).unwrap();
        assert_eq!(call.format, FORMAT_X25519_DEOXYSII);

        let pk: [u8; 32] = call.body.pk.as_slice().try_into().unwrap();
        let shared = runtime_secret.diffie_hellman(&PublicKey::from(pk));
        let key = derive_key(shared.as_bytes()).unwrap();
        let cipher = DeoxysII256::new_from_slice(&key).unwrap();

        let inner = cipher
            .decrypt(
                Nonce::<DeoxysII256>::from_slice(&call.body.nonce),
                call.body.data.as_slice(),
            )
            .unwrap();
        let plain: PlainCallOwned = ciborium::from_reader(inner.as_slice()).unwrap();
        plain.body.into_vec()
    }

    #[test]
    fn test_runtime_can_open_envelope() {
        let runtime_secret = StaticSecret::random_from_rng(OsRng);
        let runtime_public = PublicKey::from(&runtime_secret);

        let cipher = DeoxysCipher::new(runtime_public.to_bytes()).unwrap();
        let envelope = cipher.encrypt_encode(&[0xde, 0xad, 0xbe, 0xef]).unwrap();

        assert_eq!(runtime_open(&runtime_secret, &envelope), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_envelope_carries_ephemeral_key_and_fresh_nonce() {
        let runtime_public = PublicKey::from(&StaticSecret::random_from_rng(OsRng));
        let cipher = DeoxysCipher::new(runtime_public.to_bytes()).unwrap();

        let first: EncryptedCall =
            ciborium::from_reader(cipher.encrypt_encode(b"call").unwrap().as_slice()).unwrap();
        let second: EncryptedCall =
            ciborium::from_reader(cipher.encrypt_encode(b"call").unwrap().as_slice()).unwrap();

        assert_eq!(first.body.pk.as_slice(), cipher.public_key().as_slice());
        assert_eq!(first.body.nonce.len(), NONCE_SIZE);
        assert_ne!(first.body.nonce, second.body.nonce);
        assert_ne!(first.body.data, second.body.data);
    }

    #[test]
    fn test_plaintext_not_visible_in_envelope() {
        let runtime_public = PublicKey::from(&StaticSecret::random_from_rng(OsRng));
        let cipher = DeoxysCipher::new(runtime_public.to_bytes()).unwrap();
        let marker = b"transfer(address,uint256)";

        let envelope = cipher.encrypt_encode(marker).unwrap();
        assert!(!envelope.windows(marker.len()).any(|w| w == marker));
    }
}
