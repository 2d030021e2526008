/// CRC-32/ISO-HDLC, the checksum carried in the capsule trailer
///
/// Table-driven implementation; the 256-entry table is precomputed when the
/// [`FormatDescriptor`](super::FormatDescriptor) is built and shared
/// read-only for the process lifetime.

/// Reflected polynomial for CRC-32/ISO-HDLC
const POLYNOMIAL: u32 = 0xedb8_8320;

#[derive(Debug, Clone)]
pub(crate) struct Crc32 {
    table: [u32; 256],
}

impl Crc32 {
    pub(crate) fn new() -> Self {
        let mut table = [0u32; 256];
        for (byte, entry) in table.iter_mut().enumerate() {
            let mut crc = byte as u32;
            for _ in 0..8 {
                crc = if crc & 1 != 0 {
                    POLYNOMIAL ^ (crc >> 1)
                } else {
                    crc >> 1
                };
            }
            *entry = crc;
        }
        Self { table }
    }

    /// Checksum of `data`, as stored in the token trailer
    pub(crate) fn checksum(&self, data: &[u8]) -> u32 {
        let mut crc = u32::MAX;
        for &byte in data {
            let index = ((crc ^ u32::from(byte)) & 0xff) as usize;
            crc = self.table[index] ^ (crc >> 8);
        }
        crc ^ u32::MAX
    }
}
