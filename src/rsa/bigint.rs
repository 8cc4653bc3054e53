// RSA Big Integer Operations
// Narrow wrapper around num-bigint: the arithmetic substrate for every block operation

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::Rng;

use crate::error::{Result, RsaError};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Miller-Rabin rounds used when drawing primes
const PRIME_TEST_ROUNDS: u32 = 20;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert a big integer to exactly `width` big-endian bytes, left-padded with zeros.
///
/// Fails with `BlockOverflow` when the value needs more than `width` bytes.
pub fn to_fixed_bytes(n: &RsaBigInt, width: usize) -> Result<Vec<u8>> {
    if n.is_zero() {
        return Ok(vec![0u8; width]);
    }

    let bytes = n.to_bytes_be();
    if bytes.len() > width {
        return Err(RsaError::BlockOverflow {
            needed: bytes.len(),
            block_size: width,
        });
    }

    let mut result = vec![0u8; width];
    result[width - bytes.len()..].copy_from_slice(&bytes);
    Ok(result)
}

/// Number of significant bits (0 for zero)
pub fn bit_length(n: &RsaBigInt) -> u64 {
    n.bits()
}

/// Modular exponentiation: base^exp mod modulus
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }
    base.modpow(exp, modulus)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if the inverse doesn't exist
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Option<RsaBigInt> {
    if m.is_zero() {
        return None;
    }

    // Bezout coefficients can be negative, so work in signed space.
    let a = BigInt::from(a.clone());
    let m = BigInt::from(m.clone());
    let egcd = a.extended_gcd(&m);

    if !egcd.gcd.is_one() {
        return None;
    }

    let mut x = egcd.x % &m;
    if x.is_negative() {
        x += &m;
    }

    x.to_biguint()
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime
pub fn is_probable_prime<R: Rng + ?Sized>(rng: &mut R, n: &RsaBigInt, iterations: u32) -> bool {
    let two = RsaBigInt::from(2u8);
    let three = RsaBigInt::from(3u8);

    if n < &two {
        return false;
    }
    if n == &two || n == &three {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    'witness: for _ in 0..iterations {
        // Pick random witness a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = mod_pow(&a, &d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = mod_pow(&x, &two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Generate a uniformly random big integer in range [0, bound)
pub fn random_below<R: Rng + ?Sized>(rng: &mut R, bound: &RsaBigInt) -> RsaBigInt {
    rng.gen_biguint_below(bound)
}

/// Generate a random prime of exactly `bit_length` bits
///
/// `bit_length` must be at least 2.
pub fn random_prime<R: Rng + ?Sized>(rng: &mut R, bit_length: u32) -> RsaBigInt {
    debug_assert!(bit_length >= 2);

    let lower = RsaBigInt::one() << (bit_length - 1);
    let upper = RsaBigInt::one() << bit_length;

    loop {
        let mut candidate = rng.gen_biguint_range(&lower, &upper);

        // 2 is the only even prime and only lives in the 2-bit range
        if bit_length > 2 && candidate.is_even() {
            candidate += 1u8;
        }

        if is_probable_prime(rng, &candidate, PRIME_TEST_ROUNDS) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        let result = mod_pow(&from_u64(3), &from_u64(5), &from_u64(7));
        assert_eq!(result, from_u64(5));

        assert_eq!(mod_pow(&from_u64(65), &from_u64(17), &from_u64(3233)), from_u64(2790));
        assert_eq!(mod_pow(&from_u64(9), &from_u64(4), &from_u64(1)), from_u64(0));
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7
        let inv = mod_inverse(&from_u64(3), &from_u64(7)).unwrap();
        assert_eq!(inv, from_u64(5));

        // Textbook key: 17 * 2753 ≡ 1 mod 3120
        assert_eq!(mod_inverse(&from_u64(17), &from_u64(3120)), Some(from_u64(2753)));
    }

    #[test]
    fn test_mod_inverse_missing() {
        assert_eq!(mod_inverse(&from_u64(6), &from_u64(9)), None);
        assert_eq!(mod_inverse(&from_u64(3), &from_u64(0)), None);
    }

    #[test]
    fn test_is_probable_prime() {
        let mut rng = StdRng::seed_from_u64(1);
        for p in [2u64, 3, 5, 7, 53, 61, 65537, 2_147_483_647] {
            assert!(is_probable_prime(&mut rng, &from_u64(p), 10), "{} is prime", p);
        }
        for c in [0u64, 1, 4, 9, 561, 3233, 65535] {
            assert!(!is_probable_prime(&mut rng, &from_u64(c), 10), "{} is composite", c);
        }
    }

    #[test]
    fn test_random_prime_bit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for bits in [2u32, 3, 8, 64, 128] {
            let p = random_prime(&mut rng, bits);
            assert_eq!(bit_length(&p), bits as u64);
            assert!(is_probable_prime(&mut rng, &p, 10));
        }
    }

    #[test]
    fn test_random_prime_uses_only_the_given_rng() {
        // Same seed, same candidates and same witnesses
        for bits in [16u32, 64] {
            let first = random_prime(&mut StdRng::seed_from_u64(42), bits);
            let second = random_prime(&mut StdRng::seed_from_u64(42), bits);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_to_fixed_bytes() {
        assert_eq!(to_fixed_bytes(&from_u64(0x0102), 4).unwrap(), vec![0, 0, 1, 2]);
        assert_eq!(to_fixed_bytes(&from_u64(0), 2).unwrap(), vec![0, 0]);
        assert!(matches!(
            to_fixed_bytes(&from_u64(0x010203), 2),
            Err(RsaError::BlockOverflow { needed: 3, block_size: 2 })
        ));
    }

    #[test]
    fn test_random_below_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let bound = from_u64(256);
        for _ in 0..100 {
            assert!(random_below(&mut rng, &bound) < bound);
        }
    }
}
