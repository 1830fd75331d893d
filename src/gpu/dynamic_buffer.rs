//! GPU buffers that grow on demand.
//!
//! Rebuilding the helix replaces every batch's bytes. Buffers keep their
//! allocation across rebuilds and only reallocate when the new data does
//! not fit, growing to twice the required size.

/// Minimum allocation in bytes.
const MIN_CAPACITY: usize = 64;

/// A GPU buffer that can grow dynamically. Never shrinks.
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Buffer with the given initial byte capacity.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        Self {
            buffer: Self::allocate(device, label, capacity, usage),
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Byte capacity needed to hold `needed` bytes starting from `current`.
    /// Returns `None` when the current allocation suffices.
    #[must_use]
    pub fn grown_capacity(current: usize, needed: usize) -> Option<usize> {
        (needed > current).then(|| (needed * 2).max(current + 1024))
    }

    /// Write raw bytes, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write_bytes(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
    ) -> bool {
        let needed = data.len();
        let grown = Self::grown_capacity(self.capacity, needed);
        if let Some(capacity) = grown {
            log::debug!(
                "growing buffer '{}' from {} to {} bytes",
                self.label,
                self.capacity,
                capacity
            );
            self.buffer =
                Self::allocate(device, &self.label, capacity, self.usage);
            self.capacity = capacity;
        }

        // write_buffer needs a 4-byte aligned size.
        if needed > 0 {
            if needed % 4 == 0 {
                queue.write_buffer(&self.buffer, 0, data);
            } else {
                let mut padded = data.to_vec();
                padded.resize(needed.next_multiple_of(4), 0);
                queue.write_buffer(&self.buffer, 0, &padded);
            }
        }
        self.len = needed;
        grown.is_some()
    }

    /// Write typed data, growing if necessary.
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.write_bytes(device, queue, bytemuck::cast_slice(data))
    }

    /// Underlying wgpu buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Slice covering the bytes written last.
    #[must_use]
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..self.len as u64)
    }

    /// Bytes written last.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_growth_when_data_fits() {
        assert_eq!(DynamicBuffer::grown_capacity(4096, 4096), None);
        assert_eq!(DynamicBuffer::grown_capacity(4096, 0), None);
    }

    #[test]
    fn grows_to_double_the_request() {
        assert_eq!(DynamicBuffer::grown_capacity(64, 10_000), Some(20_000));
        // Small overflows still add at least a kilobyte.
        assert_eq!(DynamicBuffer::grown_capacity(4096, 4100), Some(8200));
        assert_eq!(DynamicBuffer::grown_capacity(64, 100), Some(1088));
    }
}
