use tstp::buffer::{Buffer, BufferPool};
use tstp::security::CmacAuthenticator;
use tstp::pipeline::security::{Context, SecurityPolicy};

fn blank_buffer(payload: &[u8]) -> Buffer {
    let mut pool: BufferPool<1> = BufferPool::new();
    let handle = pool.alloc(payload.len()).unwrap();
    {
        let buf = pool.get_mut(handle).unwrap();
        buf.set_frame(payload).unwrap();
    }
    *pool.get(handle).unwrap()
}

fn ctx() -> Context {
    Context {
        is_microframe: false,
        downlink: false,
    }
}

#[test]
fn cmac_round_trips_a_valid_mic() {
    let auth = CmacAuthenticator::new([7u8; 16]);
    let mut buf = blank_buffer(b"hello tstp");

    auth.marshal(&mut buf, ctx());
    auth.update(&mut buf, ctx());

    assert!(buf.meta.trusted);
}

#[test]
fn cmac_rejects_a_tampered_frame() {
    let auth = CmacAuthenticator::new([7u8; 16]);
    let mut buf = blank_buffer(b"hello tstp");
    auth.marshal(&mut buf, ctx());

    let tampered = {
        let mut frame = buf.frame().to_vec();
        frame[0] ^= 0xff;
        frame
    };
    buf.set_frame(&tampered).unwrap();

    auth.update(&mut buf, ctx());
    assert!(!buf.meta.trusted);
}

#[test]
fn cmac_rejects_a_frame_too_short_to_carry_a_mic() {
    let auth = CmacAuthenticator::new([7u8; 16]);
    let mut buf = blank_buffer(&[1, 2]);
    auth.update(&mut buf, ctx());
    assert!(!buf.meta.trusted);
}
