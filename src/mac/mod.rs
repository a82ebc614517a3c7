//! The duty-cycled MAC state machine (§4.1, §5, §6.3): Microframe
//! preamble sampling over a [`Radio`]/[`MacTimer`] pair.
//!
//! Single-threaded cooperative model: every state is either the body
//! of [`Mac::on_timer`] (driven by a scheduled one-shot interrupt) or a
//! synchronous tail-call from within one. There are no mutexes; the
//! only tolerated busy-waits are the bounded `tx_done()`/CCA polls the
//! teacher's own `transmit`/`cca` helpers already perform this way.

use heapless::Vec;

use crate::buffer::{Buffer, BufferPool, Metadata, MTU};
use crate::error::{Error, Result};
use crate::frame::Microframe;
use crate::parameters::Parameters;
use crate::radio::{Power, Radio};
use crate::timer::{MacEvent, MacTimer};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RxState {
    Idle,
    RxMf,
    RxData,
}

/// Outcome of [`Mac::on_rx`]: the driver has a frame ready and the MAC
/// either consumed it internally or is handing a freshly allocated
/// buffer to the caller for pipeline processing.
pub enum Received {
    /// Nothing usable (wrong size, or not currently listening).
    None,
    /// An inbound microframe. The caller must run the pipeline's
    /// `update_microframe` stage on this buffer and then call
    /// [`Mac::after_microframe`] with the verdict.
    Microframe { handle: usize },
    /// An inbound data frame, fully received and ready for the
    /// Locator → Timekeeper → Router → Security `update` chain.
    Data { handle: usize },
}

/// `POOL` bounds both the buffer pool and the TX schedule (at most one
/// schedule entry per allocated buffer).
pub struct Mac<R, T, const POOL: usize> {
    radio: R,
    timer: T,
    params: Parameters,
    pool: BufferPool<POOL>,
    schedule: Vec<usize, POOL>,
    tx_pending: Option<usize>,
    state: RxState,
    /// Remaining microframes in the train currently airborne.
    mf_count: u16,
    /// Counter-domain timestamp of the microframe heard during the
    /// current/last RX_MF, awaiting the pipeline's relevance verdict.
    rx_id: u16,
    rx_hint: i64,
    rx_downlink: bool,
    pending_data_time: u64,
}

impl<R: Radio, T: MacTimer, const POOL: usize> Mac<R, T, POOL> {
    pub fn new(radio: R, timer: T, params: Parameters) -> Self {
        Self {
            radio,
            timer,
            params,
            pool: BufferPool::new(),
            schedule: Vec::new(),
            tx_pending: None,
            state: RxState::Idle,
            mf_count: 0,
            rx_id: 0,
            rx_hint: 0,
            rx_downlink: false,
            pending_data_time: 0,
        }
    }

    pub fn pool(&self) -> &BufferPool<POOL> {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut BufferPool<POOL> {
        &mut self.pool
    }

    fn now_us(&self) -> u64 {
        self.timer.now()
    }

    fn now_count(&self) -> u64 {
        self.timer.read()
    }

    fn arm(&mut self, delay_us: u32, event: MacEvent) {
        let when = self.now_count() + self.timer.us2count(delay_us as u64);
        self.timer.interrupt(when, event);
    }

    /// Enqueue `frame`/`meta` for transmission and kick the scheduler.
    /// `meta.size` is overwritten to match `frame`'s actual length.
    pub fn send(&mut self, frame: &[u8], mut meta: Metadata) -> Result<usize> {
        let handle = self.pool.alloc(frame.len())?;
        {
            let buf = self.pool.get_mut(handle).expect("just allocated");
            buf.set_frame(frame)?;
            meta.size = frame.len();
            buf.meta = meta;
        }
        self.schedule
            .push(handle)
            .map_err(|_| Error::ScheduleFull)?;
        let now = self.now_us();
        self.update_tx_schedule(now);
        Ok(handle)
    }

    /// Drop expired buffers, then select the earliest-expiry remaining
    /// buffer (if any) as `_tx_pending` and begin its preamble train;
    /// otherwise sleep for `SLEEP_PERIOD` and wake directly into
    /// `RX_MF` (§4.1).
    pub fn update_tx_schedule(&mut self, now: u64) {
        let mut keep: Vec<usize, POOL> = Vec::new();
        for &handle in self.schedule.iter() {
            match self.pool.get(handle) {
                Some(buf) if buf.meta.expiry > now => {
                    let _ = keep.push(handle);
                }
                _ => self.pool.free(handle),
            }
        }
        self.schedule = keep;

        let best = self
            .schedule
            .iter()
            .copied()
            .min_by_key(|&h| self.pool.get(h).map(|b| b.meta.expiry).unwrap_or(u64::MAX));

        match best {
            None => {
                self.tx_pending = None;
                self.state = RxState::Idle;
                self.radio.power(Power::Sleep);
                self.arm(self.params.sleep_period_us, MacEvent::RxMfTimeout);
            }
            Some(handle) => {
                self.tx_pending = Some(handle);
                self.mf_count = (self.params.nmf - 1) as u16;
                let offset_us = self
                    .pool
                    .get(handle)
                    .map(|b| b.meta.offset)
                    .unwrap_or(0);
                if let Some(buf) = self.pool.get(handle) {
                    let mf = Microframe::new()
                        .with_all_listen(buf.meta.downlink)
                        .with_count(self.mf_count)
                        .with_id(buf.meta.id)
                        .with_hint(buf.meta.sender_distance as u32);
                    crate::radio::load_microframe(&mut self.radio, mf);
                }
                self.radio.power(Power::Light);
                // (offset * SLEEP_PERIOD) / (G * RADIO_RANGE) * G: scales the
                // geographic backoff offset into a fraction of one MAC cycle
                // before converting back to a G-multiple delay.
                let scaled = (offset_us as u64)
                    .saturating_mul(self.params.sleep_period_us as u64)
                    / (self.params.g_us as u64 * self.params.radio_range as u64)
                    * self.params.g_us as u64;
                self.arm(scaled as u32, MacEvent::Cca);
            }
        }
    }

    /// CCA before the first microframe of a train (§4.1).
    fn cca(&mut self) {
        self.radio.power(Power::Light);
        let clear = self.radio.cca(self.params.cca_time_us);
        if clear && self.radio.transmit() {
            self.advance_tx_mf();
        } else {
            self.rx_mf();
        }
    }

    /// Having just transmitted the current microframe (via `transmit`
    /// or `transmit_no_cca`), decide whether to load and schedule the
    /// next one or hand off to the data frame.
    fn advance_tx_mf(&mut self) {
        if self.mf_count == 0 {
            self.tx_data();
            return;
        }
        self.mf_count -= 1;
        if let Some(handle) = self.tx_pending {
            if let Some(buf) = self.pool.get(handle) {
                let mf = Microframe::new()
                    .with_all_listen(buf.meta.downlink)
                    .with_count(self.mf_count)
                    .with_id(buf.meta.id)
                    .with_hint(buf.meta.sender_distance as u32);
                crate::radio::load_microframe(&mut self.radio, mf);
            }
        }
        self.arm(self.params.ts_us + self.params.ti_us, MacEvent::TxMf);
    }

    /// Subsequent microframes of the train, `transmit_no_cca` each time.
    fn tx_mf(&mut self) {
        self.radio.transmit_no_cca();
        while !self.radio.tx_done() {}
        self.advance_tx_mf();
    }

    /// The data frame itself: no CCA (the channel was already claimed
    /// by the preamble train). A node that is itself the destination has
    /// nothing to relay; skip the actual transmission and just free the
    /// buffer.
    fn tx_data(&mut self) {
        let destined_to_me = self
            .tx_pending
            .and_then(|handle| self.pool.get(handle))
            .map(|b| b.meta.destined_to_me)
            .unwrap_or(false);
        if !destined_to_me {
            if let Some(handle) = self.tx_pending {
                if let Some(buf) = self.pool.get(handle) {
                    self.radio.copy_to_nic(buf.frame());
                }
            }
            self.radio.transmit_no_cca();
            while !self.radio.tx_done() {}
        }
        if let Some(handle) = self.tx_pending.take() {
            self.pool.free(handle);
            let mut keep: Vec<usize, POOL> = Vec::new();
            for &h in self.schedule.iter() {
                if h != handle {
                    let _ = keep.push(h);
                }
            }
            self.schedule = keep;
        }
        self.state = RxState::Idle;
        self.radio.power(Power::Sleep);
        self.arm(self.params.sleep_period_us, MacEvent::RxMfTimeout);
    }

    /// Power up and listen for a microframe, arming `T_r`.
    fn rx_mf(&mut self) {
        self.state = RxState::RxMf;
        self.radio.power(Power::Full);
        self.radio.listen();
        self.arm(self.params.tr_us, MacEvent::RxMfTimeout);
    }

    /// Power up and listen for the data frame, arming `RX_DATA_TIMEOUT`.
    fn rx_data_listen(&mut self) {
        self.state = RxState::RxData;
        self.radio.power(Power::Full);
        self.radio.listen();
        self.arm(self.params.rx_data_timeout_us, MacEvent::RxDataTimeout);
    }

    /// Timer-interrupt entry point; the driver calls this with the
    /// event recorded by the armed interrupt (§6.2).
    ///
    /// `RxMfTimeout` is overloaded the same way a single-shot hardware
    /// timer is in the original: armed both for "wake from sleep into
    /// RX_MF" and for RX_MF's own `T_r` deadline. `self.state` tells
    /// the two apart: not yet listening means this is the wake-up.
    pub fn on_timer(&mut self, event: MacEvent) {
        match event {
            MacEvent::UpdateTxSchedule => {
                let now = self.now_us();
                self.update_tx_schedule(now);
            }
            MacEvent::Cca => self.cca(),
            MacEvent::TxMf => self.tx_mf(),
            MacEvent::TxData => self.tx_data(),
            MacEvent::RxMfTimeout => {
                if self.state == RxState::RxMf {
                    let now = self.now_us();
                    self.update_tx_schedule(now);
                } else {
                    self.rx_mf();
                }
            }
            MacEvent::RxData => self.rx_data_listen(),
            MacEvent::RxDataTimeout => {
                self.state = RxState::Idle;
                let now = self.now_us();
                self.update_tx_schedule(now);
            }
        }
    }

    /// The driver calls this when `Radio::filter()` reports a frame is
    /// present. Dispatches on `self.state`.
    pub fn on_rx(&mut self) -> Result<Received> {
        if !self.radio.filter() {
            self.radio.drop_rx();
            return Ok(Received::None);
        }
        match self.state {
            RxState::RxMf => self.receive_microframe(),
            RxState::RxData => self.receive_data(),
            RxState::Idle => {
                self.radio.drop_rx();
                Ok(Received::None)
            }
        }
    }

    fn receive_microframe(&mut self) -> Result<Received> {
        let mut raw = [0u8; Microframe::WIRE_SIZE];
        let n = self.radio.copy_from_nic(&mut raw);
        self.radio.drop_rx();
        if n != Microframe::WIRE_SIZE {
            return Err(Error::Truncated);
        }
        let mf = Microframe::from_bytes_exact(raw);
        let sfd = self.timer.sfd();

        // Duplicate suppression: if we're pending a send for this same
        // id, someone else already transmitted it.
        if let Some(pos) = self
            .schedule
            .iter()
            .position(|&h| self.pool.get(h).map(|b| b.meta.id) == Some(mf.id()))
        {
            let handle = self.schedule.remove(pos);
            self.pool.free(handle);
            if self.tx_pending == Some(handle) {
                self.tx_pending = None;
            }
        }

        let ti = self.timer.us2count(self.params.ti_us as u64);
        let ts_ti = self.timer.us2count((self.params.ts_us + self.params.ti_us) as u64);
        let margin = self.timer.us2count(self.params.data_listen_margin_us as u64);
        self.pending_data_time = sfd + ti + (mf.count() as u64) * ts_ti - margin;
        self.rx_id = mf.id();
        self.rx_hint = mf.hint() as i64;
        self.rx_downlink = mf.all_listen();

        let handle = self.pool.alloc(0)?;
        if let Some(buf) = self.pool.get_mut(handle) {
            buf.meta.is_microframe = true;
            buf.meta.id = self.rx_id;
            buf.meta.sender_distance = self.rx_hint;
            buf.meta.downlink = self.rx_downlink;
            buf.meta.sfd_time_stamp = sfd;
        }
        Ok(Received::Microframe { handle })
    }

    /// Called by the caller after running the pipeline's
    /// `Router::update_microframe` on the buffer returned by
    /// [`Mac::on_rx`], with `handle` still identifying that buffer.
    pub fn after_microframe(&mut self, handle: usize) {
        let relevant = self
            .pool
            .get(handle)
            .map(|b| b.meta.relevant)
            .unwrap_or(false);
        self.pool.free(handle);
        if relevant {
            self.timer.interrupt(self.pending_data_time, MacEvent::RxData);
        } else {
            let skip = self.pending_data_time
                + self.timer.us2count(self.params.data_skip_time_us as u64);
            self.state = RxState::Idle;
            self.radio.power(Power::Sleep);
            self.timer.interrupt(skip, MacEvent::UpdateTxSchedule);
        }
    }

    fn receive_data(&mut self) -> Result<Received> {
        let mut raw = [0u8; MTU];
        let n = self.radio.copy_from_nic(&mut raw);
        self.radio.drop_rx();
        let sfd = self.timer.sfd();
        let handle = self.pool.alloc(n)?;
        if let Some(buf) = self.pool.get_mut(handle) {
            buf.set_frame(&raw[..n])?;
            buf.meta.is_microframe = false;
            buf.meta.id = self.rx_id;
            buf.meta.sender_distance = self.rx_hint;
            buf.meta.downlink = self.rx_downlink;
            buf.meta.sfd_time_stamp = sfd;
        }
        self.state = RxState::Idle;
        Ok(Received::Data { handle })
    }

    /// After the pipeline's full `update` chain has run on a received
    /// data frame (and any forwarding has been enqueued via [`Mac::send`]
    /// or a Router-provided handle), resume scheduling.
    pub fn after_data(&mut self, handle: usize) {
        self.pool.free(handle);
        let now = self.now_us();
        self.update_tx_schedule(now);
    }

    pub fn frame(&self, handle: usize) -> Option<&Buffer> {
        self.pool.get(handle)
    }

    /// The buffer currently selected for transmission, if any.
    pub fn tx_pending(&self) -> Option<usize> {
        self.tx_pending
    }

    /// Number of buffers still awaiting transmission.
    pub fn schedule_len(&self) -> usize {
        self.schedule.len()
    }
}
