/// Initial and maximum size of a connection's staging buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferLimits {
    pub initial: usize,
    pub max: usize,
}

impl BufferLimits {
    /// Both sizes are at least one byte and `max` is never below `initial`.
    pub fn new(initial: usize, max: usize) -> Self {
        let initial = initial.max(1);
        Self {
            initial,
            max: max.max(initial),
        }
    }
}

/// Per-connection staging area for bytes read but not yet parsed.
///
/// `data[..filled]` holds pending input. The backing storage doubles when it
/// is full and more input is requested, up to the configured maximum;
/// consumed bytes are discarded by shifting the remainder back to offset 0.
#[derive(Debug)]
pub struct StagingBuffer {
    data: Vec<u8>,
    filled: usize,
    max: usize,
}

impl StagingBuffer {
    pub fn new(limits: BufferLimits) -> Self {
        let limits = BufferLimits::new(limits.initial, limits.max);
        Self {
            data: vec![0; limits.initial],
            filled: 0,
            max: limits.max,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The size the buffer will never grow past.
    pub fn max_capacity(&self) -> usize {
        self.max
    }

    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// The pending bytes.
    pub fn filled(&self) -> &[u8] {
        &self.data[..self.filled]
    }

    /// Free space to read into, doubling the capacity first if there is none.
    ///
    /// Returns `None` when the buffer is full and already at its maximum.
    pub fn spare_mut(&mut self) -> Option<&mut [u8]> {
        if self.filled == self.data.len() {
            if self.data.len() >= self.max {
                return None;
            }
            let doubled = (self.data.len() * 2).min(self.max);
            self.data.resize(doubled, 0);
        }
        Some(&mut self.data[self.filled..])
    }

    /// Marks `n` bytes of the spare region as filled.
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.filled + n <= self.data.len());
        self.filled = (self.filled + n).min(self.data.len());
    }

    /// Drops the first `n` pending bytes, moving the rest to the front.
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.filled);
        self.data.copy_within(n..self.filled, 0);
        self.filled -= n;
    }
}
