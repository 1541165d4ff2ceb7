//! Cross-module properties of sealing and opening.

use codec::{open, open_blob, open_message, seal, CodecError, Key, SealedMessage, SealedPayload};
use codec::{KEY_LEN, NONCE_LEN, TAG_LEN};

#[test]
fn round_trip_various_sizes() {
    let key = Key::generate();
    for len in [0usize, 1, 15, 16, 17, 255, 4096] {
        let plaintext: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let sealed = seal(key.as_bytes(), &plaintext, b"aad").unwrap();
        assert_eq!(sealed.ciphertext.len(), len + TAG_LEN);
        assert_eq!(open_message(key.as_bytes(), &sealed, b"aad").unwrap(), plaintext);
    }
}

#[test]
fn every_tampered_byte_fails_authentication() {
    let key = Key::generate();
    let blob = seal(key.as_bytes(), b"do not touch", b"hdr").unwrap().to_bytes();

    for i in 0..blob.len() {
        let mut tampered = blob.clone();
        tampered[i] ^= 0x80;
        assert_eq!(
            open_blob(key.as_bytes(), &tampered, b"hdr"),
            Err(CodecError::AuthenticationFailure),
            "byte {i} was flipped"
        );
    }
}

#[test]
fn repeated_seals_use_fresh_nonces() {
    let key = Key::generate();
    let a = seal(key.as_bytes(), b"same input", b"").unwrap();
    let b = seal(key.as_bytes(), b"same input", b"").unwrap();
    assert_ne!(a.nonce, b.nonce);
    assert_ne!(a.ciphertext, b.ciphertext);
}

#[test]
fn bad_lengths_rejected() {
    let sealed = seal(&[0u8; KEY_LEN], b"x", b"").unwrap();
    for len in [0usize, 16, 31, 33, 64] {
        let key = vec![0u8; len];
        assert_eq!(seal(&key, b"x", b""), Err(CodecError::InvalidKeyLength(len)));
        assert_eq!(
            open(&key, &sealed.nonce, &sealed.ciphertext, b""),
            Err(CodecError::InvalidKeyLength(len))
        );
    }
    for len in [0usize, 8, 11, 13, 16] {
        let nonce = vec![0u8; len];
        assert_eq!(
            open(&[0u8; KEY_LEN], &nonce, &sealed.ciphertext, b""),
            Err(CodecError::InvalidNonceLength(len))
        );
    }
}

#[test]
fn aad_is_bound_but_optional() {
    let key = Key::generate();
    let sealed = seal(key.as_bytes(), b"body", &[]).unwrap();
    assert_eq!(open_message(key.as_bytes(), &sealed, &[]).unwrap(), b"body");
    assert!(open_message(key.as_bytes(), &sealed, b"extra")
        .unwrap_err()
        .is_tampering());
}

#[test]
fn text_and_json_forms_open() {
    let key = Key::generate();
    let sealed = seal(key.as_bytes(), b"hello AES-256-GCM", b"header-data").unwrap();

    let text = sealed.to_string_repr();
    let parsed: SealedMessage = text.parse().unwrap();
    assert_eq!(
        open_message(key.as_bytes(), &parsed, b"header-data").unwrap(),
        b"hello AES-256-GCM"
    );

    let json = sealed.to_payload().to_json();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value.get("nonce").is_some());
    let from_json = SealedMessage::try_from(&SealedPayload::from_json(&json).unwrap()).unwrap();
    assert_eq!(from_json, sealed);
}

#[test]
fn concurrent_seals_are_independent() {
    let key = Key::generate();
    let results: Vec<SealedMessage> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let key = &key;
                scope.spawn(move || seal(key.as_bytes(), &[i; 32], &[i]).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, sealed) in results.iter().enumerate() {
        let i = i as u8;
        assert_eq!(open_message(key.as_bytes(), sealed, &[i]).unwrap(), vec![i; 32]);
    }

    let mut nonces: Vec<[u8; NONCE_LEN]> = results.iter().map(|s| s.nonce).collect();
    nonces.sort();
    nonces.dedup();
    assert_eq!(nonces.len(), results.len());
}
