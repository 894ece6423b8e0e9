use std::fmt;

const F32_SIZE: usize = std::mem::size_of::<f32>();

/// CPU-side contents of a vertex buffer, addressed in floats.
///
/// Indices are float indices, not byte offsets. Out-of-range indices panic
/// like slice indexing does.
pub trait BufferStorage: fmt::Debug {
    /// Number of floats the storage holds.
    fn capacity(&self) -> usize;

    fn put(&mut self, index: usize, value: f32);

    fn get(&self, index: usize) -> f32;

    /// Writes `values` starting at float index `offset`.
    fn write(&mut self, offset: usize, values: &[f32]) {
        for (i, v) in values.iter().enumerate() {
            self.put(offset + i, *v);
        }
    }

    /// Upload-ready view of the whole storage.
    fn bytes(&self) -> &[u8];
}

/// Selects the [`BufferStorage`] implementation at construction time.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum StorageStrategy {
    /// Resident `f32` array, written in place and uploaded wholesale.
    #[default]
    HighPerformance,
    /// Byte buffer written one element at a time; no float array is kept.
    LowMemory,
}

impl StorageStrategy {
    pub fn allocate(self, capacity: usize) -> Box<dyn BufferStorage> {
        match self {
            StorageStrategy::HighPerformance => Box::new(ResidentStorage::new(capacity)),
            StorageStrategy::LowMemory => Box::new(DirectStorage::new(capacity)),
        }
    }
}

/// Float array kept resident for the lifetime of the buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidentStorage {
    data: Vec<f32>,
}

impl ResidentStorage {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity],
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl BufferStorage for ResidentStorage {
    #[inline]
    fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn put(&mut self, index: usize, value: f32) {
        self.data[index] = value;
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self.data[index]
    }

    fn write(&mut self, offset: usize, values: &[f32]) {
        self.data[offset..offset + values.len()].copy_from_slice(values);
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Raw byte buffer in native float layout.
///
/// A `Vec<u8>` has no `f32` alignment guarantee, so every access goes
/// through `to_ne_bytes`/`from_ne_bytes` instead of a slice cast.
#[derive(Clone, PartialEq, Eq)]
pub struct DirectStorage {
    bytes: Vec<u8>,
}

impl DirectStorage {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity * F32_SIZE],
        }
    }

    #[inline]
    fn range(index: usize) -> std::ops::Range<usize> {
        let start = index * F32_SIZE;
        start..start + F32_SIZE
    }
}

impl fmt::Debug for DirectStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectStorage")
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl BufferStorage for DirectStorage {
    #[inline]
    fn capacity(&self) -> usize {
        self.bytes.len() / F32_SIZE
    }

    #[inline]
    fn put(&mut self, index: usize, value: f32) {
        self.bytes[Self::range(index)].copy_from_slice(&value.to_ne_bytes());
    }

    fn get(&self, index: usize) -> f32 {
        let mut raw = [0u8; F32_SIZE];
        raw.copy_from_slice(&self.bytes[Self::range(index)]);
        f32::from_ne_bytes(raw)
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both(capacity: usize) -> [Box<dyn BufferStorage>; 2] {
        [
            StorageStrategy::HighPerformance.allocate(capacity),
            StorageStrategy::LowMemory.allocate(capacity),
        ]
    }

    // ── allocation ────────────────────────────────────────────────────────

    #[test]
    fn allocation_is_zeroed_with_requested_capacity() {
        for s in both(12) {
            assert_eq!(s.capacity(), 12);
            assert_eq!(s.bytes().len(), 48);
            assert!(s.bytes().iter().all(|b| *b == 0));
        }
    }

    #[test]
    fn default_strategy_is_high_performance() {
        assert_eq!(StorageStrategy::default(), StorageStrategy::HighPerformance);
    }

    // ── access ────────────────────────────────────────────────────────────

    #[test]
    fn put_then_get_preserves_bits() {
        let nan_bits = f32::from_bits(0xFFFF_FFFF);
        for mut s in both(4) {
            s.put(0, 1.5);
            s.put(3, nan_bits);
            assert_eq!(s.get(0), 1.5);
            assert_eq!(s.get(3).to_bits(), 0xFFFF_FFFF);
        }
    }

    #[test]
    fn bulk_write_matches_between_strategies() {
        let [mut a, mut b] = both(6);
        a.write(1, &[1.0, -2.0, 3.25]);
        b.write(1, &[1.0, -2.0, 3.25]);
        assert_eq!(a.bytes(), b.bytes());
        assert_eq!(a.get(2), -2.0);
    }

    #[test]
    fn bytes_are_native_float_layout() {
        let mut s = DirectStorage::new(2);
        s.put(1, 2.0);
        assert_eq!(&s.bytes()[4..8], &2.0f32.to_ne_bytes());
    }

    #[test]
    #[should_panic]
    fn out_of_range_put_panics() {
        let mut s = ResidentStorage::new(2);
        s.put(2, 0.0);
    }

    #[test]
    #[should_panic]
    fn out_of_range_direct_get_panics() {
        let s = DirectStorage::new(2);
        s.get(2);
    }
}
