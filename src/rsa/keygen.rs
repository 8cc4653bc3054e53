// RSA Key Generation
// Produces the key pair and modulus used by both chaining modes

use num_traits::{One, Zero};
use rand::{thread_rng, Rng};
use tracing::{debug, trace};

use super::bigint::{bit_length, from_u64, mod_inverse, random_prime, RsaBigInt};
use crate::error::{Result, RsaError};

/// Public exponent used by `keygen`
pub const PUBLIC_EXPONENT: u64 = 65537;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt, // Modulus (same as public)
    pub d: RsaBigInt, // Private exponent
}

/// RSA Key Pair (both public and private keys)
///
/// Held by the caller for the length of a session; nothing is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

impl RsaPublicKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        bit_length(&self.n)
    }
}

impl RsaKeyPair {
    /// Assemble a key pair from already known exponents and modulus.
    ///
    /// Fails with `KeyGeneration` if the modulus is 0 or 1.
    pub fn from_components(e: RsaBigInt, d: RsaBigInt, n: RsaBigInt) -> Result<Self> {
        if n <= RsaBigInt::one() {
            return Err(RsaError::KeyGeneration(format!("modulus must be greater than 1, got {}", n)));
        }

        Ok(Self {
            public_key: RsaPublicKey { n: n.clone(), e },
            private_key: RsaPrivateKey { n, d },
        })
    }

    /// Derive a key pair from two distinct primes and a public exponent.
    ///
    /// Fails with `KeyGeneration` if the primes are equal or if `e` divides the
    /// totient, in which case it has no inverse.
    pub fn from_primes(p: &RsaBigInt, q: &RsaBigInt, e: &RsaBigInt) -> Result<Self> {
        let two = from_u64(2);
        if p < &two || q < &two {
            return Err(RsaError::KeyGeneration("primes must be at least 2".to_string()));
        }
        if p == q {
            return Err(RsaError::KeyGeneration("primes must be distinct".to_string()));
        }

        let n = p * q;
        let totient = (p - 1u8) * (q - 1u8);

        if (&totient % e).is_zero() {
            return Err(RsaError::KeyGeneration(format!(
                "public exponent {} divides the totient, retry with fresh primes",
                e
            )));
        }

        let d = mod_inverse(e, &totient).ok_or_else(|| {
            RsaError::KeyGeneration(format!("public exponent {} has no inverse modulo the totient", e))
        })?;

        debug!(modulus_bits = bit_length(&n), "derived RSA modulus");
        trace!(%n, %e, %d, "derived RSA exponents");

        Self::from_components(e.clone(), d, n)
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }

    pub fn public_exponent(&self) -> &RsaBigInt {
        &self.public_key.e
    }

    pub fn private_exponent(&self) -> &RsaBigInt {
        &self.private_key.d
    }

    pub fn modulus(&self) -> &RsaBigInt {
        &self.public_key.n
    }
}

/// Generate an RSA key pair whose primes are each `bit_length` bits long.
///
/// The public exponent is fixed at 65537. A failed attempt is returned as
/// `KeyGeneration` and not retried here.
pub fn keygen(bit_length: u32) -> Result<RsaKeyPair> {
    keygen_with_rng(&mut thread_rng(), bit_length)
}

/// `keygen` with a caller supplied randomness source.
pub fn keygen_with_rng<R: Rng + ?Sized>(rng: &mut R, bit_length: u32) -> Result<RsaKeyPair> {
    if bit_length < 2 {
        return Err(RsaError::KeyGeneration(format!(
            "prime bit length must be at least 2, got {}",
            bit_length
        )));
    }

    let p = random_prime(rng, bit_length);
    let mut q = random_prime(rng, bit_length);
    while q == p {
        q = random_prime(rng, bit_length);
    }

    debug!(prime_bits = bit_length, "generated distinct primes");
    trace!(%p, %q, "generated primes");

    RsaKeyPair::from_primes(&p, &q, &from_u64(PUBLIC_EXPONENT))
}

/// Textbook key: p = 61, q = 53, e = 17 (n = 3233, d = 2753)
#[cfg(test)]
pub(crate) fn toy_keypair() -> RsaKeyPair {
    RsaKeyPair::from_primes(&from_u64(61), &from_u64(53), &from_u64(17)).unwrap()
}

/// Generated key, retried on the rare exponent failure
#[cfg(test)]
pub(crate) fn test_keypair(bit_length: u32) -> RsaKeyPair {
    loop {
        match keygen(bit_length) {
            Ok(keypair) => return keypair,
            Err(RsaError::KeyGeneration(_)) => continue,
            Err(e) => panic!("unexpected keygen error: {}", e),
        }
    }
}

/// One 64-bit-prime key shared by the property tests of every module
#[cfg(test)]
pub(crate) fn shared_keypair() -> &'static RsaKeyPair {
    static KEYPAIR: std::sync::OnceLock<RsaKeyPair> = std::sync::OnceLock::new();
    KEYPAIR.get_or_init(|| test_keypair(64))
}
