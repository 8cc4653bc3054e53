// RSA Block Decryption

use tracing::trace;

use super::bigint::RsaBigInt;
use super::encrypt::rsa_transform;
use super::keygen::RsaPrivateKey;

/// Decrypt one ciphertext value: m = c^d mod n
///
/// Any input is reduced modulo n; a wrong key simply yields a wrong value.
pub fn decrypt_block(c: &RsaBigInt, private_key: &RsaPrivateKey) -> RsaBigInt {
    let m = rsa_transform(c, &private_key.d, &private_key.n);
    trace!(%c, %m, "decrypted block");
    m
}
