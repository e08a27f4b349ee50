//! Flat 256-byte memory model.
//!
//! Addresses are `u8`, so every address names a cell and no access can fall
//! outside the image.

use thiserror::Error;

/// Size in bytes of the flat architectural address space.
pub const MEMORY_BYTES: usize = u8::MAX as usize + 1;

/// Failure to build a [`Memory`] from an externally supplied byte image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MemoryImageError {
    /// The image did not contain exactly [`MEMORY_BYTES`] bytes.
    #[error("memory image must be exactly {MEMORY_BYTES} bytes, got {actual}")]
    WrongLength {
        /// Length of the rejected image.
        actual: usize,
    },
}

/// Byte-addressable memory image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct Memory {
    cells: [u8; MEMORY_BYTES],
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            cells: [0; MEMORY_BYTES],
        }
    }
}

impl Memory {
    /// Reads the cell at `addr`.
    #[must_use]
    pub fn read(&self, addr: u8) -> u8 {
        self.cells[usize::from(addr)]
    }

    /// Writes `value` to the cell at `addr`.
    pub fn write(&mut self, addr: u8, value: u8) {
        self.cells[usize::from(addr)] = value;
    }

    /// Borrows the whole image in address order.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; MEMORY_BYTES] {
        &self.cells
    }
}

impl TryFrom<&[u8]> for Memory {
    type Error = MemoryImageError;

    fn try_from(image: &[u8]) -> Result<Self, Self::Error> {
        let cells = <[u8; MEMORY_BYTES]>::try_from(image).map_err(|_| {
            MemoryImageError::WrongLength {
                actual: image.len(),
            }
        })?;
        Ok(Self { cells })
    }
}

impl TryFrom<Vec<u8>> for Memory {
    type Error = MemoryImageError;

    fn try_from(image: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(image.as_slice())
    }
}

impl From<Memory> for Vec<u8> {
    fn from(memory: Memory) -> Self {
        memory.cells.to_vec()
    }
}
