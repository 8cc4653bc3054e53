// RSA Block Encryption
// Raw per-block transform shared by both chaining modes

use tracing::trace;

use super::bigint::{mod_pow, RsaBigInt};
use super::keygen::RsaPublicKey;
use crate::error::{Result, RsaError};

/// value^exponent mod modulus
pub fn rsa_transform(value: &RsaBigInt, exponent: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    mod_pow(value, exponent, modulus)
}

/// Encrypt one block value: c = m^e mod n
///
/// Fails with `BlockRange` if `m >= n`. Block size validation makes this
/// unreachable from the text-level entry points.
pub fn encrypt_block(m: &RsaBigInt, public_key: &RsaPublicKey) -> Result<RsaBigInt> {
    if m >= &public_key.n {
        return Err(RsaError::BlockRange {
            value: m.to_string(),
            modulus: public_key.n.to_string(),
        });
    }

    let c = rsa_transform(m, &public_key.e, &public_key.n);
    trace!(%m, %c, "encrypted block");
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::keygen::toy_keypair;

    // pow(m, 17, 3233)
    const REFERENCE_VECTORS: [(u64, u64); 7] = [
        (65, 2790),
        (66, 524),
        (72, 3000),
        (89, 99),
        (123, 855),
        (1000, 175),
        (2000, 2698),
    ];

    #[test]
    fn test_reference_vectors() {
        let keypair = toy_keypair();

        for (m, expected) in REFERENCE_VECTORS {
            let c = encrypt_block(&from_u64(m), &keypair.public_key).unwrap();
            assert_eq!(c, from_u64(expected), "encryption of {}", m);
        }
    }

    #[test]
    fn test_block_at_modulus_rejected() {
        let keypair = toy_keypair();

        let result = encrypt_block(&from_u64(3233), &keypair.public_key);
        assert!(matches!(result, Err(RsaError::BlockRange { .. })));

        assert!(encrypt_block(&from_u64(3232), &keypair.public_key).is_ok());
    }

    #[test]
    fn test_fixed_points() {
        let keypair = toy_keypair();

        // 0 and 1 map to themselves under any exponent
        assert_eq!(encrypt_block(&from_u64(0), &keypair.public_key).unwrap(), from_u64(0));
        assert_eq!(encrypt_block(&from_u64(1), &keypair.public_key).unwrap(), from_u64(1));
    }
}
