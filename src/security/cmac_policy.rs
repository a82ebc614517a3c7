//! A default, optional `SecurityPolicy` (§4.5, §4.10) computing a MIC
//! with AES-CMAC over a buffer's frame bytes.
//!
//! Built on the same `aes`/`cmac`/`generic-array`/`cipher` stack and
//! the same `Cmac::<Aes128>::new_from_slice` construction the teacher
//! uses for `PhyPayload::mic_expected`. Demonstrates the shape of the
//! abstract authenticator named in §4.5; not wired into
//! [`crate::pipeline::security::Security`] by default.

use aes::Aes128;
use cipher::KeyInit;
use cmac::{Cmac, Mac as _};
use generic_array::GenericArray;

use crate::buffer::Buffer;
use crate::pipeline::security::{Context, SecurityPolicy};

const MIC_SIZE: usize = 4;

pub struct CmacAuthenticator {
    key: GenericArray<u8, <Aes128 as cipher::KeySizeUser>::KeySize>,
}

impl CmacAuthenticator {
    pub fn new(key: [u8; 16]) -> Self {
        Self {
            key: GenericArray::clone_from_slice(&key),
        }
    }

    fn mic(&self, frame: &[u8]) -> [u8; MIC_SIZE] {
        let mut mac = Cmac::<Aes128>::new(&self.key);
        mac.update(frame);
        let tag = mac.finalize().into_bytes();
        let mut out = [0u8; MIC_SIZE];
        out.copy_from_slice(&tag[..MIC_SIZE]);
        out
    }
}

impl SecurityPolicy for CmacAuthenticator {
    /// Append a 4-byte MIC after the frame payload on send.
    fn marshal(&self, buf: &mut Buffer, _ctx: Context) {
        let mic = self.mic(buf.frame());
        let _ = buf.append(&mic);
    }

    /// Verify the trailing 4-byte MIC on receive, setting `trusted`
    /// accordingly.
    fn update(&self, buf: &mut Buffer, _ctx: Context) {
        let frame = buf.frame();
        if frame.len() < MIC_SIZE {
            buf.meta.trusted = false;
            return;
        }
        let (payload, mic) = frame.split_at(frame.len() - MIC_SIZE);
        let expected = self.mic(payload);
        buf.meta.trusted = mic == expected;
    }
}
