//! Fixed-capacity block pool with a bitmap free list.
//!
//! The pool owns no memory of its own: the application supplies the backing
//! array once at startup (on hardware, a `static` handed out through a
//! one-shot cell). Allocation is a leading-zeros bit scan over six packed
//! `u32` words — lowest word first, highest set bit within the word — so
//! both allocate and release are O(1) and safe to run with the tick
//! interrupt masked.
//!
//! Exhaustion is not an error: `allocate` returns `None` and the caller
//! skips its output for that tick. The `used`/`used_max` counters make
//! sustained exhaustion observable without any logging in the hot path.

use crate::block::{AudioBlock, BlockHandle};

/// Hard ceiling on pool capacity; `init` clamps larger arrays.
pub const MAX_POOL_BLOCKS: usize = 192;

const POOL_WORDS: usize = MAX_POOL_BLOCKS / 32;

/// Fixed-capacity allocator for [`AudioBlock`]s.
pub struct BlockPool {
    storage: Option<&'static mut [AudioBlock]>,
    free_mask: [u32; POOL_WORDS],
    used: u16,
    used_max: u16,
}

impl BlockPool {
    /// An uninitialized pool with zero capacity.
    pub const fn new() -> Self {
        Self {
            storage: None,
            free_mask: [0; POOL_WORDS],
            used: 0,
            used_max: 0,
        }
    }

    /// Installs the backing array and marks every slot free.
    ///
    /// Capacity is clamped to [`MAX_POOL_BLOCKS`]. Each block's slot index
    /// is stamped here and never changes afterwards. Any handles from a
    /// previous init are invalidated; callers re-init only at startup or
    /// between test cases.
    pub fn init(&mut self, storage: &'static mut [AudioBlock]) {
        let count = storage.len().min(MAX_POOL_BLOCKS);
        let storage = &mut storage[..count];

        self.free_mask = [0; POOL_WORDS];
        for (i, block) in storage.iter_mut().enumerate() {
            self.free_mask[i >> 5] |= 1 << (i & 0x1f);
            block.slot = i as u16;
            block.ref_count = 0;
        }
        self.storage = Some(storage);
        self.used = 0;
        self.used_max = 0;

        #[cfg(feature = "tracing")]
        tracing::debug!("pool_init: {count} blocks");
    }

    /// Allocates one block. The caller becomes its only owner.
    ///
    /// Returns `None` when every slot is taken; callers treat that as a
    /// dropped frame, not a failure.
    pub fn allocate(&mut self) -> Option<BlockHandle> {
        let word = self.free_mask.iter().position(|&w| w != 0);
        let Some(word) = word else {
            #[cfg(feature = "tracing")]
            tracing::trace!("pool_allocate: exhausted ({} in use)", self.used);
            return None;
        };

        let bit = 31 - self.free_mask[word].leading_zeros();
        self.free_mask[word] &= !(1 << bit);
        let slot = (word as u16) << 5 | bit as u16;

        self.used += 1;
        if self.used > self.used_max {
            self.used_max = self.used;
        }

        let block = self.block_at_mut(slot);
        block.ref_count = 1;
        #[cfg(feature = "float")]
        {
            block.kind = crate::block::SampleKind::Pcm;
            block.partner = None;
        }
        Some(BlockHandle::new(slot))
    }

    /// Allocates a linked float pair. The caller owns both halves through
    /// the single returned handle.
    ///
    /// If the second half cannot be allocated the first is released again
    /// and `None` is returned.
    #[cfg(feature = "float")]
    pub fn allocate_pair(&mut self) -> Option<BlockHandle> {
        use crate::block::SampleKind;

        let first = self.allocate()?;
        let Some(second) = self.allocate() else {
            self.release(first);
            return None;
        };

        // The second handle is absorbed into the pair: its reference is
        // tracked on the partner block and travels with the primary handle.
        let BlockHandle { slot: second_slot } = second;

        let primary = self.block_at_mut(first.slot);
        primary.kind = SampleKind::Float;
        primary.partner = Some(second_slot);
        let partner = self.block_at_mut(second_slot);
        partner.kind = SampleKind::Float;
        partner.partner = None;

        Some(first)
    }

    /// Gives back one ownership reference.
    ///
    /// With other owners remaining this only decrements the count; the last
    /// owner returns the slot to the free list. A float pair's partner slot
    /// is handled under the same rule, on its own reference count.
    pub fn release(&mut self, handle: BlockHandle) {
        let BlockHandle { slot } = handle;

        #[cfg(feature = "float")]
        if let Some(partner) = self.block_at(slot).partner {
            self.release_slot(partner);
        }

        self.release_slot(slot);
    }

    /// Mints an additional owning handle for an allocated slot, bumping the
    /// reference count (and the partner's, for float pairs).
    pub(crate) fn retain(&mut self, slot: u16) -> BlockHandle {
        #[cfg(feature = "float")]
        if let Some(partner) = self.block_at(slot).partner {
            self.block_at_mut(partner).ref_count += 1;
        }

        self.block_at_mut(slot).ref_count += 1;
        BlockHandle::new(slot)
    }

    fn release_slot(&mut self, slot: u16) {
        let block = self.block_at_mut(slot);
        if block.ref_count > 1 {
            block.ref_count -= 1;
        } else {
            block.ref_count = 0;
            self.free_mask[usize::from(slot) >> 5] |= 1 << (slot & 0x1f);
            self.used -= 1;
        }
    }

    /// Shared view of the block behind a handle.
    #[inline]
    pub fn block(&self, handle: &BlockHandle) -> &AudioBlock {
        self.block_at(handle.slot)
    }

    /// Exclusive view of the block behind a handle.
    ///
    /// The type system cannot see other owners, so mutation is only correct
    /// on handles obtained via an exclusivity-guaranteeing path
    /// (`allocate`, `receive_writable`).
    #[inline]
    pub fn block_mut(&mut self, handle: &BlockHandle) -> &mut AudioBlock {
        self.block_at_mut(handle.slot)
    }

    #[inline]
    pub(crate) fn block_at(&self, slot: u16) -> &AudioBlock {
        &self.storage.as_deref().unwrap_or_default()[usize::from(slot)]
    }

    #[inline]
    pub(crate) fn block_at_mut(&mut self, slot: u16) -> &mut AudioBlock {
        &mut self.storage.as_deref_mut().unwrap_or_default()[usize::from(slot)]
    }

    /// Number of slots managed by the pool.
    pub fn capacity(&self) -> usize {
        self.storage.as_deref().map_or(0, <[AudioBlock]>::len)
    }

    /// Slots currently owned by at least one handle.
    pub fn used(&self) -> u16 {
        self.used
    }

    /// Occupancy high-water mark since init (or the last reset).
    pub fn used_max(&self) -> u16 {
        self.used_max
    }

    /// Resets the high-water mark to the current occupancy.
    pub fn reset_used_max(&mut self) {
        self.used_max = self.used;
    }
}

impl Default for BlockPool {
    fn default() -> Self {
        Self::new()
    }
}
