use super::*;
use crate::block::Aes128;
use crate::types::SecretBytes;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn gcm_from_hex(key_hex: &str, nonce_hex: &str) -> Gcm<Aes128> {
    let key_bytes = hex::decode(key_hex).unwrap();
    let key = SecretBytes::<16>::from_slice(&key_bytes).unwrap();
    let nonce_bytes = hex::decode(nonce_hex).unwrap();
    let nonce = Nonce::<12>::from_slice(&nonce_bytes).unwrap();
    Gcm::new(Aes128::new(&key), &nonce).unwrap()
}

#[test]
fn test_empty_message_known_answer() {
    // McGrew-Viega test case 1
    let gcm = gcm_from_hex("00000000000000000000000000000000", "000000000000000000000000");
    let ct = gcm.encrypt(&[], None).unwrap();
    assert_eq!(hex::encode(&ct), "58e2fccefa7e3061367f1d57a4e7455a");

    let pt = gcm.decrypt(&ct, None).unwrap();
    assert!(pt.is_empty());
}

#[test]
fn test_single_block_known_answer() {
    // McGrew-Viega test case 2
    let gcm = gcm_from_hex("00000000000000000000000000000000", "000000000000000000000000");
    let mut buf = [0u8; 16];
    let tag = gcm.encrypt_in_place(&mut buf, None).unwrap();

    assert_eq!(hex::encode(buf), "0388dace60b6a392f328c2b971b2fe78");
    assert_eq!(tag.to_hex(), "ab6e47d42cec13bdf53a67b21257bddf");
}

#[test]
fn test_four_block_known_answer() {
    // McGrew-Viega test case 3
    let gcm = gcm_from_hex("feffe9928665731c6d6a8f9467308308", "cafebabefacedbaddecaf888");
    let plaintext = hex::decode(
        "d9313225f88406e5a55909c5aff5269a\
         86a7a9531534f7da2e4c303d8a318a72\
         1c3c0c95956809532fcf0e2449a6b525\
         b16aedf5aa0de657ba637b391aafd255",
    )
    .unwrap();

    let ct = gcm.encrypt(&plaintext, None).unwrap();
    assert_eq!(
        hex::encode(&ct),
        "42831ec2217774244b7221b784d0d49c\
         e3aa212f2c02a4e035c17e2329aca12e\
         21d514b25466931c7d8f6a5aac84aa05\
         1ba30b396a0aac973d58e091473f5985\
         4d5c2af327cd64a62cf35abd2ba6fab4"
    );

    let pt = gcm.decrypt(&ct, None).unwrap();
    assert_eq!(pt, plaintext);
}

#[test]
fn test_aad_known_answer() {
    // McGrew-Viega test case 4: 60-byte plaintext with AAD
    let gcm = gcm_from_hex("feffe9928665731c6d6a8f9467308308", "cafebabefacedbaddecaf888");
    let aad = hex::decode("feedfacedeadbeeffeedfacedeadbeefabaddad2").unwrap();
    let plaintext = hex::decode(
        "d9313225f88406e5a55909c5aff5269a\
         86a7a9531534f7da2e4c303d8a318a72\
         1c3c0c95956809532fcf0e2449a6b525\
         b16aedf5aa0de657ba637b39",
    )
    .unwrap();

    let ct = gcm.encrypt(&plaintext, Some(&aad)).unwrap();
    assert_eq!(
        hex::encode(&ct),
        "42831ec2217774244b7221b784d0d49c\
         e3aa212f2c02a4e035c17e2329aca12e\
         21d514b25466931c7d8f6a5aac84aa05\
         1ba30b396a0aac973d58e091\
         5bc94fbc3221a5db94fae95ae7121a47"
    );

    let pt = gcm.decrypt(&ct, Some(&aad)).unwrap();
    assert_eq!(pt, plaintext);
}

#[test]
fn test_round_trip_and_tag_stability() {
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    for len in [0usize, 1, 15, 16, 17, 48, 61] {
        let key = Aes128::generate_key(&mut rng);
        let nonce = Nonce::<12>::random(&mut rng);
        let mut aad = vec![0u8; 24];
        rng.fill_bytes(&mut aad);

        let gcm = Gcm::new(Aes128::new(&key), &nonce).unwrap();

        let mut buf = vec![0u8; len];
        rng.fill_bytes(&mut buf);
        let plaintext = buf.clone();

        let tag1 = gcm.encrypt_in_place(&mut buf, Some(&aad)).unwrap();
        let tag2 = gcm.decrypt_in_place(&mut buf, Some(&aad)).unwrap();

        assert_eq!(buf, plaintext, "round trip failed for len {}", len);
        assert_eq!(tag1, tag2, "tag mismatch for len {}", len);
    }
}

#[test]
fn test_multi_block_decrypt_offsets() {
    // Each decrypted block must see its own keystream block, not a fixed
    // one; distinct per-block plaintext pins the incrementing offset
    let gcm = gcm_from_hex("000102030405060708090a0b0c0d0e0f", "101112131415161718191a1b");
    let plaintext: Vec<u8> = (0u8..48).collect();

    let mut buf = plaintext.clone();
    gcm.encrypt_in_place(&mut buf, None).unwrap();
    gcm.decrypt_in_place(&mut buf, None).unwrap();

    assert_eq!(buf, plaintext);
}

#[test]
fn test_tag_sensitivity() {
    let key = SecretBytes::<16>::new([0x42; 16]);
    let nonce = Nonce::<12>::new([0x24; 12]);
    let aad = [0x10u8; 20];
    let plaintext = [0xaau8; 33];

    let gcm = Gcm::new(Aes128::new(&key), &nonce).unwrap();
    let mut buf = plaintext;
    let tag = gcm.encrypt_in_place(&mut buf, Some(&aad)).unwrap();

    // Flipping any single AAD bit changes the tag
    for byte in 0..aad.len() {
        let mut tampered = aad;
        tampered[byte] ^= 0x01;
        let recomputed = gcm.decrypt_in_place(&mut buf.clone(), Some(&tampered)).unwrap();
        assert_ne!(tag, recomputed, "AAD byte {} did not affect the tag", byte);
    }

    // Flipping any single ciphertext bit changes the tag
    for byte in 0..buf.len() {
        let mut tampered = buf;
        tampered[byte] ^= 0x80;
        let recomputed = gcm.decrypt_in_place(&mut tampered, Some(&aad)).unwrap();
        assert_ne!(tag, recomputed, "ciphertext byte {} did not affect the tag", byte);
    }

    // A different nonce changes the tag
    let other = Gcm::new(Aes128::new(&key), &Nonce::<12>::new([0x25; 12])).unwrap();
    let other_tag = other.encrypt_in_place(&mut plaintext.clone(), Some(&aad)).unwrap();
    assert_ne!(tag, other_tag);
}

#[test]
fn test_tampered_ciphertext_rejected() {
    let key = SecretBytes::<16>::new([0x42; 16]);
    let nonce = Nonce::<12>::new([0x24; 12]);
    let aad = [0x10u8; 16];
    let plaintext = [0xaau8; 32];

    let gcm = Gcm::new(Aes128::new(&key), &nonce).unwrap();
    let mut ciphertext = gcm.encrypt(&plaintext, Some(&aad)).unwrap();
    ciphertext[5] ^= 0x01;

    let result = gcm.decrypt(&ciphertext, Some(&aad));
    assert!(matches!(result, Err(Error::Authentication { algorithm: "GCM" })));
}

#[test]
fn test_tampered_tag_rejected() {
    let key = SecretBytes::<16>::new([0x42; 16]);
    let nonce = Nonce::<12>::new([0x24; 12]);
    let plaintext = [0xaau8; 32];

    let gcm = Gcm::new(Aes128::new(&key), &nonce).unwrap();
    let mut ciphertext = gcm.encrypt(&plaintext, None).unwrap();
    let tag_idx = ciphertext.len() - GCM_TAG_SIZE;
    ciphertext[tag_idx] ^= 0x01;

    let result = gcm.decrypt(&ciphertext, None);
    assert!(matches!(result, Err(Error::Authentication { algorithm: "GCM" })));
}

#[test]
fn test_wrong_aad_rejected() {
    let key = SecretBytes::<16>::new([0x42; 16]);
    let nonce = Nonce::<12>::new([0x24; 12]);
    let plaintext = [0xaau8; 32];

    let gcm = Gcm::new(Aes128::new(&key), &nonce).unwrap();
    let ciphertext = gcm.encrypt(&plaintext, Some(b"header-v1")).unwrap();

    let result = gcm.decrypt(&ciphertext, Some(b"header-v2"));
    assert!(matches!(result, Err(Error::Authentication { .. })));
}

#[test]
fn test_short_ciphertext() {
    let key = SecretBytes::<16>::new([0x42; 16]);
    let nonce = Nonce::<12>::new([0x24; 12]);

    let gcm = Gcm::new(Aes128::new(&key), &nonce).unwrap();
    let result = gcm.decrypt(&[0xaa; 8], None);
    assert!(matches!(result, Err(Error::Length { .. })));
}

#[test]
fn test_empty_aad_equals_no_aad() {
    let key = SecretBytes::<16>::new([0x42; 16]);
    let nonce = Nonce::<12>::new([0x24; 12]);
    let plaintext = [0xaau8; 32];

    let gcm = Gcm::new(Aes128::new(&key), &nonce).unwrap();
    let empty_aad: [u8; 0] = [];
    let ciphertext = gcm.encrypt(&plaintext, Some(&empty_aad)).unwrap();

    let decrypted = gcm.decrypt(&ciphertext, None).unwrap();
    assert_eq!(decrypted, &plaintext[..]);
}
