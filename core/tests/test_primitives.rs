// Ordering and key-schedule checks through recording primitives plugged into
// the engine's generic slots.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use aead_core::constants::{KEY_LEN_32, MAC_KEY_LEN, NONCE_LEN_12, TAG_LEN};
    use aead_core::crypto::{AeadEngine, ChaCha20Keystream, OneTimeMac, Poly1305Mac, StreamCipher};
    use aead_core::types::{AeadError, Result};

    thread_local! {
        static KEYSTREAM_CALLS: RefCell<Vec<(u32, usize)>> = RefCell::new(Vec::new());
        static MAC_INPUTS: RefCell<Vec<Vec<u8>>> = RefCell::new(Vec::new());
    }

    struct RecordingKeystream;

    impl StreamCipher for RecordingKeystream {
        fn apply_keystream(
            key: &[u8; KEY_LEN_32],
            nonce: &[u8; NONCE_LEN_12],
            counter: u32,
            data: &mut [u8],
        ) -> Result<()> {
            KEYSTREAM_CALLS.with(|c| c.borrow_mut().push((counter, data.len())));
            ChaCha20Keystream::apply_keystream(key, nonce, counter, data)
        }
    }

    struct RecordingMac;

    impl OneTimeMac for RecordingMac {
        fn compute(mac_key: &[u8; MAC_KEY_LEN], message: &[u8]) -> [u8; TAG_LEN] {
            MAC_INPUTS.with(|m| m.borrow_mut().push(message.to_vec()));
            Poly1305Mac::compute(mac_key, message)
        }
    }

    type Engine = AeadEngine<RecordingKeystream, RecordingMac>;

    fn calls() -> Vec<(u32, usize)> {
        KEYSTREAM_CALLS.with(|c| c.borrow().clone())
    }

    fn mac_inputs() -> Vec<Vec<u8>> {
        MAC_INPUTS.with(|m| m.borrow().clone())
    }

    fn engine(ad: &[u8]) -> Engine {
        Engine::with_primitives(&[0x21u8; 32], &[0x03u8; 12], Some(ad), 20).unwrap()
    }

    #[test]
    fn construction_derives_mac_key_once_from_block_zero() {
        let _e = engine(b"");
        assert_eq!(calls(), vec![(0, 64)]);
        assert!(mac_inputs().is_empty());
    }

    #[test]
    fn invalid_construction_does_no_crypto() {
        assert!(Engine::with_primitives(&[0u8; 31], &[0u8; 12], None, 20).is_err());
        assert!(Engine::with_primitives(&[0u8; 32], &[0u8; 12], None, 8).is_err());
        assert!(calls().is_empty());
    }

    #[test]
    fn update_does_no_crypto() {
        let mut e = engine(b"ad");
        e.update_block(&[1u8; 100], 0, 100).unwrap();
        e.update(2).unwrap();
        assert_eq!(calls(), vec![(0, 64)]);
        assert!(mac_inputs().is_empty());
    }

    #[test]
    fn seal_uses_block_one_then_authenticates_ciphertext() {
        let pt = [0u8; 40];
        let mut e = engine(b"ad");
        e.update_block(&pt, 0, pt.len()).unwrap();
        let mut ct = [0u8; 40];
        e.finalize(&mut ct, 0).unwrap();

        assert_eq!(calls(), vec![(0, 64), (1, 40)]);

        let inputs = mac_inputs();
        assert_eq!(inputs.len(), 1);
        let mac_input = &inputs[0];
        assert_eq!(mac_input.len(), 16 + 48 + 16);
        assert_eq!(&mac_input[..2], b"ad");
        assert_eq!(&mac_input[16..56], &ct[..]);
        assert_eq!(&mac_input[64..72], &2u64.to_le_bytes());
        assert_eq!(&mac_input[72..80], &40u64.to_le_bytes());
    }

    #[test]
    fn open_authenticates_buffered_ciphertext_before_decrypting() {
        let ct = [0x5Cu8; 20];
        let mut e = engine(b"");
        e.set_tag(&[0u8; 16]).unwrap();
        e.update_block(&ct, 0, ct.len()).unwrap();

        let mut out = [0u8; 20];
        assert_eq!(e.finalize(&mut out, 0), Err(AeadError::TagMismatch));

        // MAC ran over the wire ciphertext; the payload keystream never ran.
        assert_eq!(calls(), vec![(0, 64)]);
        let inputs = mac_inputs();
        assert_eq!(inputs.len(), 1);
        assert_eq!(&inputs[0][..20], &ct[..]);
        assert_eq!(&inputs[0][32..40], &0u64.to_le_bytes());
        assert_eq!(&inputs[0][40..48], &20u64.to_le_bytes());
    }

    #[test]
    fn successful_open_decrypts_from_block_one() {
        let pt = b"twenty-one bytes long";
        let mut sealer = engine(b"");
        sealer.update_block(pt, 0, pt.len()).unwrap();
        let mut ct = vec![0u8; pt.len()];
        let tag = sealer.finalize(&mut ct, 0).unwrap().tag;

        KEYSTREAM_CALLS.with(|c| c.borrow_mut().clear());
        let mut opener = engine(b"");
        opener.set_tag(tag.as_bytes()).unwrap();
        opener.update_block(&ct, 0, ct.len()).unwrap();
        let mut out = vec![0u8; ct.len()];
        opener.finalize(&mut out, 0).unwrap();

        assert_eq!(calls(), vec![(0, 64), (1, pt.len())]);
        assert_eq!(&out[..], pt);
    }

    #[test]
    fn reset_keeps_mac_key_and_new_nonce_derives_once() {
        let mut e = engine(b"");
        e.reset().unwrap();
        e.reset().unwrap();
        assert_eq!(calls(), vec![(0, 64)]);

        e.reset_with_nonce(&[0x04u8; 12]).unwrap();
        assert_eq!(calls(), vec![(0, 64), (0, 64)]);

        assert!(e.reset_with_nonce(&[0u8; 8]).is_err());
        assert_eq!(calls().len(), 2);
    }
}
