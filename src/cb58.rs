use sha2::{Digest, Sha256};
use thiserror::Error;

const CHECKSUM_LEN: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Cb58Error {
    #[error("invalid base-58 payload")]
    InvalidBase58,

    #[error("payload shorter than its checksum")]
    TooShort,

    #[error("checksum mismatch")]
    ChecksumMismatch,
}

/// Encode raw bytes as CB58: base-58 over the payload followed by the last
/// four bytes of its sha256 digest.
pub fn encode(raw: &[u8]) -> String {
    let digest = Sha256::digest(raw);
    let mut buf = Vec::with_capacity(raw.len() + CHECKSUM_LEN);
    buf.extend_from_slice(raw);
    buf.extend_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
    bs58::encode(buf).into_string()
}

/// Decode a CB58 string back to raw bytes, verifying the trailing checksum.
pub fn decode(encoded: &str) -> Result<Vec<u8>, Cb58Error> {
    let buf = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| Cb58Error::InvalidBase58)?;
    if buf.len() < CHECKSUM_LEN {
        return Err(Cb58Error::TooShort);
    }
    let (payload, checksum) = buf.split_at(buf.len() - CHECKSUM_LEN);
    let digest = Sha256::digest(payload);
    if checksum != &digest[digest.len() - CHECKSUM_LEN..] {
        return Err(Cb58Error::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_the_avax_asset_id() {
        // Memastikan vektor mainnet menghasilkan string yang dikenal
        let raw =
            hex::decode("21e67317cbc4be2aeb00677ad6462778a8f52274b9d605df2591b23027a87dff")
                .unwrap();
        assert_eq!(
            encode(&raw),
            "FvwEAhmxKfeiG8SnEvq42hc6whRyY3EFYAvebMqDNDGCgxN5Z"
        );
    }

    #[test]
    fn encodes_leading_zeros() {
        assert_eq!(encode(&[0u8; 32]), "11111111111111111111111111111111LpoYY");
    }

    #[test]
    fn encoding_is_deterministic_and_injective() {
        let a = [1u8; 32];
        let mut b = a;
        b[31] = 2;
        assert_eq!(encode(&a), encode(&a));
        assert_ne!(encode(&a), encode(&b));
    }

    #[test]
    fn round_trips() {
        let raw = hex::decode("0001020304").unwrap();
        assert_eq!(encode(&raw), "1An6UjfmaXE");
        assert_eq!(decode(&encode(&raw)).unwrap(), raw);
    }

    #[test]
    fn rejects_tampered_checksum() {
        // Memastikan perubahan satu karakter terdeteksi checksum
        let encoded = encode(&[7u8; 32]);
        let mut tampered = encoded.into_bytes();
        tampered[0] = if tampered[0] == b'2' { b'3' } else { b'2' };
        let tampered = String::from_utf8(tampered).unwrap();
        assert_eq!(decode(&tampered), Err(Cb58Error::ChecksumMismatch));
    }

    #[test]
    fn rejects_short_and_junk_input() {
        assert_eq!(decode("11"), Err(Cb58Error::TooShort));
        assert_eq!(decode("not-base58-0OIl"), Err(Cb58Error::InvalidBase58));
    }
}
