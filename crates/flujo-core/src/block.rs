//! Audio block storage and ownership handles.
//!
//! An [`AudioBlock`] is one fixed-size slot of the global
//! [`BlockPool`](crate::BlockPool): 128 signed 16-bit samples plus
//! reference-counting
//! bookkeeping. Blocks are the unit of data moved through the graph — a
//! source node fills one, `transmit` shares it with every connected
//! destination, and each owner gives its reference back with `release`.
//!
//! A [`BlockHandle`] is one owning reference. It is deliberately neither
//! `Clone` nor `Copy`: every additional owner is minted by the pool when the
//! reference count goes up, and every handle must eventually flow back into
//! `release` (or be transferred wholesale, as `transmit` caching does).
//!
//! ## Float pairs
//!
//! With the `float` feature, a block pair can represent 128 `f32` samples:
//! each half stores 64 floats as bit patterns packed into its `i16` words
//! (two words per float, low half first). The pair is allocated and freed
//! together, but each half keeps its own reference count.

/// Number of 16-bit samples per audio block.
pub const BLOCK_SAMPLES: usize = 128;

/// Number of `f32` samples one block of a float pair holds.
#[cfg(feature = "float")]
pub const BLOCK_FLOAT_SAMPLES: usize = BLOCK_SAMPLES / 2;

/// Sample representation of a block or a node.
#[cfg(feature = "float")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleKind {
    /// Signed 16-bit PCM, one sample per `i16` word.
    Pcm,
    /// 32-bit float, stored bit-packed across a linked block pair.
    Float,
}

/// One slot of the block pool.
///
/// Applications supply the backing array once at startup; a `static` array
/// of [`AudioBlock::EMPTY`] handed out through a one-shot cell is the usual
/// shape on hardware. The pool stamps `slot` at init and it never changes.
pub struct AudioBlock {
    /// Sample payload.
    pub data: [i16; BLOCK_SAMPLES],
    pub(crate) ref_count: u16,
    pub(crate) slot: u16,
    #[cfg(feature = "float")]
    pub(crate) kind: SampleKind,
    /// Slot index of the second half of a float pair.
    #[cfg(feature = "float")]
    pub(crate) partner: Option<u16>,
}

impl AudioBlock {
    /// An unallocated block, suitable for building backing arrays:
    /// `[AudioBlock::EMPTY; 32]`.
    pub const EMPTY: AudioBlock = AudioBlock {
        data: [0; BLOCK_SAMPLES],
        ref_count: 0,
        slot: 0,
        #[cfg(feature = "float")]
        kind: SampleKind::Pcm,
        #[cfg(feature = "float")]
        partner: None,
    };

    /// Current number of owners (0 while the slot is free).
    #[inline]
    pub fn ref_count(&self) -> u16 {
        self.ref_count
    }

    /// This block's fixed position in the pool array.
    #[inline]
    pub fn slot(&self) -> usize {
        usize::from(self.slot)
    }

    /// Sample representation currently stored in this block.
    #[cfg(feature = "float")]
    #[inline]
    pub fn kind(&self) -> SampleKind {
        self.kind
    }

    /// Reads the float at `idx` (0..[`BLOCK_FLOAT_SAMPLES`]) of this half.
    #[cfg(feature = "float")]
    #[inline]
    pub fn float_at(&self, idx: usize) -> f32 {
        let lo = self.data[2 * idx] as u16;
        let hi = self.data[2 * idx + 1] as u16;
        f32::from_bits(u32::from(lo) | (u32::from(hi) << 16))
    }

    /// Stores a float at `idx` (0..[`BLOCK_FLOAT_SAMPLES`]) of this half.
    #[cfg(feature = "float")]
    #[inline]
    pub fn set_float_at(&mut self, idx: usize, value: f32) {
        let bits = value.to_bits();
        self.data[2 * idx] = bits as u16 as i16;
        self.data[2 * idx + 1] = (bits >> 16) as u16 as i16;
    }
}

/// One owning reference to an allocated block.
///
/// Obtained from `allocate`/`receive_*`; returned through `release`. Holding
/// a handle keeps the slot out of the free list. Dropping a handle without
/// releasing it strands the slot until pool re-init, so nodes treat handles
/// like the hardware resources they stand for.
#[derive(Debug, PartialEq, Eq)]
pub struct BlockHandle {
    pub(crate) slot: u16,
}

impl BlockHandle {
    pub(crate) fn new(slot: u16) -> Self {
        Self { slot }
    }

    /// Pool slot this handle refers to.
    #[inline]
    pub fn slot(&self) -> usize {
        usize::from(self.slot)
    }
}

/// Converts one q15 PCM sample to float in [-1.0, 1.0).
#[cfg(feature = "float")]
#[inline]
pub fn q15_to_f32(sample: i16) -> f32 {
    f32::from(sample) / 32768.0
}

/// Converts one float sample to q15 PCM with saturation.
#[cfg(feature = "float")]
#[inline]
pub fn f32_to_q15(sample: f32) -> i16 {
    (sample * 32768.0).clamp(-32768.0, 32767.0) as i16
}
