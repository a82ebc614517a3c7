//! Security (§4.5): marshal/update hook points.
//!
//! The original's `TSTP::Security::marshal`/`update` are both
//! literally empty. This is reproduced as `Security<P>` generic over a
//! pluggable [`SecurityPolicy`], with [`NoopPolicy`] (always trusted)
//! as the default matching the original's empty bodies. The ECC
//! primitive (`crate::security::ecc`) and the `CmacAuthenticator`
//! policy (`crate::security::cmac_policy`) are available but neither is
//! wired in here by default (§9).

use crate::buffer::Buffer;

/// Full pipeline context a [`SecurityPolicy`] may need to annotate or
/// reject a buffer.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub is_microframe: bool,
    pub downlink: bool,
}

pub trait SecurityPolicy {
    fn marshal(&self, buf: &mut Buffer, ctx: Context);
    fn update(&self, buf: &mut Buffer, ctx: Context);
}

/// The original's empty hook bodies: every buffer is trusted.
pub struct NoopPolicy;

impl SecurityPolicy for NoopPolicy {
    fn marshal(&self, _buf: &mut Buffer, _ctx: Context) {}

    fn update(&self, buf: &mut Buffer, _ctx: Context) {
        buf.meta.trusted = true;
    }
}

pub struct Security<P> {
    policy: P,
}

impl<P: SecurityPolicy> Security<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    pub fn marshal(&self, buf: &mut Buffer) {
        let ctx = Context {
            is_microframe: buf.meta.is_microframe,
            downlink: buf.meta.downlink,
        };
        self.policy.marshal(buf, ctx);
    }

    pub fn update(&self, buf: &mut Buffer) {
        let ctx = Context {
            is_microframe: buf.meta.is_microframe,
            downlink: buf.meta.downlink,
        };
        self.policy.update(buf, ctx);
    }
}
