//! Two fixed-size buffers sliding over an unbounded byte stream.
//!
//! The stream is divided into *epochs* of `buffer_size` bytes; epoch `e`
//! covers logical offsets `[e * buffer_size, (e + 1) * buffer_size)`. Two
//! physical slots are resident at all times and always hold epochs `b` and
//! `b + 1`, where `b` is the epoch of the lexeme-start cursor.
//!
//! # Cursors
//!
//! ```text
//!  slot A (epoch b)          slot B (epoch b + 1)
//! [ . . . L x x x x x ]     [ x x F . . . . . . ]
//!         ^                      ^
//!    lexeme_begin             forward
//! ```
//!
//! The lexeme is the half-open range `[lexeme_begin, forward)`; the byte at
//! `forward` is the unconsumed lookahead returned by [`current_byte`].
//! `forward` may run at most into epoch `b + 1`. When
//! [`mark_lexeme_start`] pulls the begin cursor into `b + 1`, the slot holding
//! `b` is no longer referenced and is reloaded in place with epoch `b + 2`.
//! Loads are synchronous and finish before any cursor can enter the epoch.
//!
//! # End of stream
//!
//! A short read marks the end of the stream. The first unfilled byte of that
//! slot is set to [`EOF_SENTINEL`], and the logical end offset is recorded so
//! that [`is_eof`] can tell the sentinel apart from an interior `0x00` byte.
//!
//! [`current_byte`]: DualBufferReader::current_byte
//! [`mark_lexeme_start`]: DualBufferReader::mark_lexeme_start
//! [`is_eof`]: DualBufferReader::is_eof

use tracing::{debug, trace};

use crate::{ReaderError, Source};

/// Byte returned by [`DualBufferReader::current_byte`] at end of stream.
pub const EOF_SENTINEL: u8 = 0x00;

/// One physical buffer and the epoch it currently holds.
#[derive(Debug)]
struct Slot {
    data: Box<[u8]>,
    epoch: u64,
    /// Valid bytes in `data`. Less than `data.len()` only for the final epoch.
    len: usize,
}

impl Slot {
    fn new(size: usize, epoch: u64) -> Self {
        Self {
            data: vec![EOF_SENTINEL; size].into_boxed_slice(),
            epoch,
            len: 0,
        }
    }
}

/// Bounded lookahead/backtrack window over a [`Source`].
///
/// Tokens must be shorter than `buffer_size`;
/// longer ones are reported as [`ReaderError::TokenExceedsBuffer`] instead
/// of silently reading a recycled buffer.
#[derive(Debug)]
pub struct DualBufferReader<S> {
    source: S,
    slots: [Slot; 2],
    buffer_size: usize,
    /// Logical offset of the first byte of the current lexeme.
    begin: u64,
    /// Logical offset of the lookahead byte.
    forward: u64,
    begin_slot: usize,
    forward_slot: usize,
    /// Logical end of stream, known once a short read has happened.
    end: Option<u64>,
}

impl<S: Source> DualBufferReader<S> {
    /// Allocate both buffers and load the first two epochs.
    pub fn new(source: S, buffer_size: usize) -> Result<Self, ReaderError> {
        if buffer_size == 0 {
            return Err(ReaderError::InvalidBufferSize { size: buffer_size });
        }
        let mut reader = Self {
            source,
            slots: [Slot::new(buffer_size, 0), Slot::new(buffer_size, 1)],
            buffer_size,
            begin: 0,
            forward: 0,
            begin_slot: 0,
            forward_slot: 0,
            end: None,
        };
        reader.load(0, 0)?;
        reader.load(1, 1)?;
        debug!(buffer_size, "buffer window ready");
        Ok(reader)
    }

    /// The byte at the forward cursor, or [`EOF_SENTINEL`] past the end.
    #[inline]
    pub fn current_byte(&self) -> u8 {
        if self.is_eof() {
            return EOF_SENTINEL;
        }
        self.slots[self.forward_slot].data[self.local(self.forward)]
    }

    /// Returns `true` once the forward cursor has reached the stream end.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.end.is_some_and(|end| self.forward >= end)
    }

    /// Move the forward cursor `n` bytes ahead.
    ///
    /// Stops at the end of stream: advancing there does not move the cursor.
    /// Crossing into the next epoch switches to the other slot, which is
    /// always preloaded.
    #[inline]
    pub fn advance(&mut self, n: usize) -> Result<(), ReaderError> {
        let mut target = self.forward + n as u64;
        if let Some(end) = self.end {
            target = target.min(end);
        }
        self.seek_forward(target)
    }

    /// Move the forward cursor `n` bytes back.
    ///
    /// Backtracking may re-enter the older resident slot but never goes
    /// below the lexeme start; the bytes there may already be recycled.
    ///
    /// # Panics
    ///
    /// Panics if the move would cross the lexeme start. Grammars must bound
    /// their backtracking to the current lexeme.
    pub fn retreat(&mut self, n: usize) {
        let n = n as u64;
        assert!(
            n <= self.forward - self.begin,
            "retreat of {n} bytes from offset {} crosses lexeme start {}",
            self.forward,
            self.begin
        );
        let target = self.forward - n;
        if self.epoch_of(target) != self.slots[self.forward_slot].epoch {
            // Target is at or after `begin`, so it lives in the begin slot.
            self.forward_slot = self.begin_slot;
        }
        self.forward = target;
    }

    /// Start a new lexeme at the forward cursor.
    ///
    /// If the begin cursor moves into the next epoch, the slot it leaves is
    /// reloaded with the epoch after the forward one.
    pub fn mark_lexeme_start(&mut self) -> Result<(), ReaderError> {
        let epoch = self.epoch_of(self.forward);
        if epoch != self.slots[self.begin_slot].epoch {
            let vacated = self.begin_slot;
            self.begin_slot = self.forward_slot;
            trace!(epoch, "lexeme start entered next buffer");
            self.load(vacated, epoch + 1)?;
        }
        self.begin = self.forward;
        Ok(())
    }

    /// Append the bytes of `[lexeme_begin, forward)` to `out`.
    ///
    /// The lexeme may straddle both slots; the two pieces are concatenated.
    pub fn slice_lexeme_into(&self, out: &mut Vec<u8>) {
        let len = self.lexeme_len();
        if len == 0 {
            return;
        }
        let start = self.local(self.begin);
        let begin_data = &self.slots[self.begin_slot].data;
        if self.epoch_of(self.begin) == self.epoch_of(self.forward) {
            out.extend_from_slice(&begin_data[start..start + len]);
        } else {
            out.extend_from_slice(&begin_data[start..]);
            let tail = self.local(self.forward);
            out.extend_from_slice(&self.slots[self.forward_slot].data[..tail]);
        }
    }

    /// Advance until the lookahead byte equals `needle` or the stream ends.
    ///
    /// The needle is not consumed. Returns `false` if the stream ended
    /// first. Scanning inside a slot uses `memchr`.
    pub fn eat_until(&mut self, needle: u8) -> Result<bool, ReaderError> {
        loop {
            if self.is_eof() {
                return Ok(false);
            }
            let slot = &self.slots[self.forward_slot];
            let start = self.local(self.forward);
            if let Some(i) = memchr::memchr(needle, &slot.data[start..slot.len]) {
                self.forward += i as u64;
                return Ok(true);
            }
            let skipped = slot.len - start;
            self.advance(skipped)?;
        }
    }

    /// Logical offset of the lookahead byte.
    #[inline]
    pub fn position(&self) -> u64 {
        self.forward
    }

    /// Logical offset of the first byte of the current lexeme.
    #[inline]
    pub fn lexeme_begin(&self) -> u64 {
        self.begin
    }

    #[inline]
    pub fn lexeme_len(&self) -> usize {
        (self.forward - self.begin) as usize
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Give back the source, dropping both buffers.
    pub fn into_source(self) -> S {
        self.source
    }

    fn seek_forward(&mut self, target: u64) -> Result<(), ReaderError> {
        let epoch = self.epoch_of(target);
        if epoch != self.slots[self.forward_slot].epoch {
            let Some(slot) = self.slot_holding(epoch) else {
                return Err(ReaderError::TokenExceedsBuffer {
                    buffer_size: self.buffer_size,
                    offset: self.begin,
                });
            };
            trace!(epoch, "forward cursor entered next buffer");
            self.forward_slot = slot;
        }
        self.forward = target;
        Ok(())
    }

    /// Fill `slot` with `epoch`. After the stream has ended no read is made.
    fn load(&mut self, slot: usize, epoch: u64) -> Result<(), ReaderError> {
        let size = self.buffer_size;
        let target = &mut self.slots[slot];
        target.epoch = epoch;
        if self.end.is_some() {
            target.len = 0;
            target.data[0] = EOF_SENTINEL;
            return Ok(());
        }
        let read = self.source.read(&mut target.data)?.min(size);
        target.len = read;
        if read < size {
            target.data[read] = EOF_SENTINEL;
            self.end = Some(epoch * size as u64 + read as u64);
        }
        trace!(epoch, bytes = read, "loaded buffer");
        Ok(())
    }

    fn slot_holding(&self, epoch: u64) -> Option<usize> {
        self.slots.iter().position(|slot| slot.epoch == epoch)
    }

    #[inline]
    fn epoch_of(&self, pos: u64) -> u64 {
        pos / self.buffer_size as u64
    }

    #[inline]
    fn local(&self, pos: u64) -> usize {
        (pos % self.buffer_size as u64) as usize
    }
}
