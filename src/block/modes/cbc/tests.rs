use super::*;
use crate::block::Aes128;
use crate::error::Error;
use crate::types::SecretBytes;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn nist_cbc() -> Cbc<Aes128> {
    // NIST SP 800-38A F.2 key and IV
    let key_bytes = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
    let key = SecretBytes::<16>::from_slice(&key_bytes).unwrap();
    let iv_bytes = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
    let iv = Nonce::<16>::from_slice(&iv_bytes).unwrap();
    Cbc::new(Aes128::new(&key), &iv).unwrap()
}

const NIST_PT: &str = "6bc1bee22e409f96e93d7e117393172a\
                       ae2d8a571e03ac9c9eb76fac45af8e51\
                       30c81c46a35ce411e5fbc1191a0a52ef\
                       f69f2445df4f9b17ad2b417be66c3710";

const NIST_CT: &str = "7649abac8119b246cee98e9b12e9197d\
                      5086cb9b507219ee95db113a917678b2\
                      73bed6b8e3c1743b7116e69e22229516\
                      3ff1caa1681fac09120eca307586e1a7";

#[test]
fn test_nist_sp800_38a_encrypt() {
    let cbc = nist_cbc();
    let mut buf = hex::decode(NIST_PT).unwrap();
    cbc.encrypt_in_place(&mut buf).unwrap();
    assert_eq!(hex::encode(&buf), NIST_CT);
}

#[test]
fn test_nist_sp800_38a_decrypt() {
    let cbc = nist_cbc();
    let mut buf = hex::decode(NIST_CT).unwrap();
    cbc.decrypt_in_place(&mut buf).unwrap();
    assert_eq!(hex::encode(&buf), NIST_PT);
}

#[test]
fn test_vec_conveniences_match_in_place() {
    let cbc = nist_cbc();
    let plaintext = hex::decode(NIST_PT).unwrap();

    let ciphertext = cbc.encrypt(&plaintext).unwrap();
    assert_eq!(hex::encode(&ciphertext), NIST_CT);

    let recovered = cbc.decrypt(&ciphertext).unwrap();
    assert_eq!(recovered, plaintext);
}

#[test]
fn test_round_trip_random() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    for blocks in [1usize, 2, 7, 32] {
        let key = Aes128::generate_key(&mut rng);
        let iv = Nonce::<16>::random(&mut rng);
        let cbc = Cbc::new(Aes128::new(&key), &iv).unwrap();

        let mut buf = vec![0u8; blocks * 16];
        rng.fill_bytes(&mut buf);
        let plaintext = buf.clone();

        cbc.encrypt_in_place(&mut buf).unwrap();
        assert_ne!(buf, plaintext);
        cbc.decrypt_in_place(&mut buf).unwrap();
        assert_eq!(buf, plaintext);
    }
}

#[test]
fn test_empty_buffer() {
    let cbc = nist_cbc();
    let mut buf: [u8; 0] = [];
    cbc.encrypt_in_place(&mut buf).unwrap();
    cbc.decrypt_in_place(&mut buf).unwrap();
}

#[test]
fn test_length_must_be_block_multiple() {
    let cbc = nist_cbc();

    let mut buf = [0u8; 17];
    let result = cbc.encrypt_in_place(&mut buf);
    assert!(matches!(result, Err(Error::Length { expected: 32, actual: 17, .. })));

    let mut buf = [0u8; 15];
    let result = cbc.decrypt_in_place(&mut buf);
    assert!(matches!(result, Err(Error::Length { .. })));
}

#[test]
fn test_wrong_iv_garbles_first_block_only() {
    let key = SecretBytes::<16>::new([0x11; 16]);
    let iv = Nonce::<16>::new([0x22; 16]);
    let cbc = Cbc::new(Aes128::new(&key), &iv).unwrap();

    let plaintext = [0x33u8; 48];
    let mut buf = plaintext;
    cbc.encrypt_in_place(&mut buf).unwrap();

    // Decrypting under a different IV corrupts only the first block; the
    // chaining XOR for later blocks uses ciphertext, not the IV
    let wrong_iv = Nonce::<16>::new([0x23; 16]);
    let cbc_wrong = Cbc::new(Aes128::new(&key), &wrong_iv).unwrap();
    cbc_wrong.decrypt_in_place(&mut buf).unwrap();

    assert_ne!(&buf[..16], &plaintext[..16]);
    assert_eq!(&buf[16..], &plaintext[16..]);
}
