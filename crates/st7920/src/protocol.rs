//! Wire-level protocol helpers for the ST7920 serial interface.

/// Panel width in pixels.
pub const WIDTH: usize = 128;
/// Panel height in pixels.
pub const HEIGHT: usize = 64;
/// Number of bytes in one display row.
pub const LINE_BYTES: usize = WIDTH / 8;
/// Total framebuffer size in bytes.
pub const BUFFER_SIZE: usize = LINE_BYTES * HEIGHT;
/// Bytes per GDRAM data word.
pub const WORD_BYTES: usize = 2;
/// Rows per half-screen bank.
pub const BANK_ROWS: usize = HEIGHT / 2;

/// Bits clocked out for one byte transfer.
///
/// Layout:
/// - 5 sync bits (high)
/// - R/W bit (low = write)
/// - RS bit
/// - 1 spacer bit (low)
/// - high nibble, MSB first
/// - 4 spacer bits (low)
/// - low nibble, MSB first
/// - 4 spacer bits (low)
pub const TRANSFER_BITS: usize = 24;
/// Number of leading sync bits in a transfer.
pub const SYNC_BITS: usize = 5;

/// 8-bit interface, basic instruction set.
pub const CMD_FUNCTION_BASIC: u8 = 0x30;
/// Clear DDRAM so character mode does not bleed into graphics.
pub const CMD_DISPLAY_CLEAR: u8 = 0x01;
/// 8-bit interface, extended instruction set.
pub const CMD_FUNCTION_EXTENDED: u8 = 0x34;
/// Extended instruction set with graphic display on.
pub const CMD_GRAPHICS_ON: u8 = 0x36;
/// Base of the GDRAM address commands (vertical first, then horizontal).
pub const CMD_SET_GDRAM_ADDRESS: u8 = 0x80;

/// Minimum wait after [`CMD_DISPLAY_CLEAR`].
pub const CLEAR_SETTLE_NS: u32 = 1_600_000;

/// Register selected by a transfer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RegisterSelect {
    Command,
    Data,
}

impl RegisterSelect {
    const fn bit(self) -> bool {
        matches!(self, Self::Data)
    }
}

/// GDRAM address of one 16-bit word, in controller units.
///
/// The controller maps the 128x64 panel as a 256x32 surface: rows 32..64
/// live to the right of rows 0..32.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WordAddress {
    /// Horizontal word index (0..16).
    pub column: u8,
    /// Vertical row index (0..32).
    pub row: u8,
}

/// Builds the bit sequence for one byte transfer.
#[inline]
pub fn encode_transfer(rs: RegisterSelect, value: u8) -> [bool; TRANSFER_BITS] {
    let mut bits = [false; TRANSFER_BITS];

    for bit in bits.iter_mut().take(SYNC_BITS) {
        *bit = true;
    }
    // bits[5] is R/W, always write (low).
    bits[6] = rs.bit();
    // bits[7] spacer.
    for i in 0..4 {
        bits[8 + i] = value & (0x80 >> i) != 0;
    }
    // bits[12..16] spacer.
    for i in 0..4 {
        bits[16 + i] = value & (0x08 >> i) != 0;
    }
    // bits[20..24] spacer.

    bits
}

/// Decodes a transfer produced by [`encode_transfer`].
///
/// Returns `None` when sync, R/W, or spacer bits are not where the
/// controller expects them.
pub fn decode_transfer(bits: &[bool; TRANSFER_BITS]) -> Option<(RegisterSelect, u8)> {
    if !bits[..SYNC_BITS].iter().all(|bit| *bit) {
        return None;
    }
    let spacers = [5usize, 7, 12, 13, 14, 15, 20, 21, 22, 23];
    if spacers.iter().any(|&i| bits[i]) {
        return None;
    }

    let rs = if bits[6] {
        RegisterSelect::Data
    } else {
        RegisterSelect::Command
    };

    let mut value = 0u8;
    for i in 0..4 {
        if bits[8 + i] {
            value |= 0x80 >> i;
        }
        if bits[16 + i] {
            value |= 0x08 >> i;
        }
    }

    Some((rs, value))
}

/// Maps the byte offset of a word's first byte to its GDRAM address.
///
/// Returns `None` for offsets outside the framebuffer or not word aligned.
#[inline]
pub fn word_address(byte_offset: usize) -> Option<WordAddress> {
    if byte_offset >= BUFFER_SIZE || byte_offset % WORD_BYTES != 0 {
        return None;
    }

    let y = byte_offset / LINE_BYTES;
    let x = byte_offset % LINE_BYTES;

    let (column, row) = if y < BANK_ROWS {
        (x / WORD_BYTES, y)
    } else {
        ((x + LINE_BYTES) / WORD_BYTES, y - BANK_ROWS)
    };

    Some(WordAddress {
        column: column as u8,
        row: row as u8,
    })
}

/// Builds the two address commands for a word (vertical, then horizontal).
#[inline]
pub const fn address_commands(address: WordAddress) -> [u8; 2] {
    [
        CMD_SET_GDRAM_ADDRESS | address.row,
        CMD_SET_GDRAM_ADDRESS | address.column,
    ]
}

/// Whether the word starting at `byte_offset` differs between two buffers.
#[inline]
pub fn word_changed(
    pending: &[u8; BUFFER_SIZE],
    committed: &[u8; BUFFER_SIZE],
    byte_offset: usize,
) -> bool {
    let end = byte_offset + WORD_BYTES;
    match (pending.get(byte_offset..end), committed.get(byte_offset..end)) {
        (Some(new), Some(old)) => new != old,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_frames_command_byte() {
        let bits = encode_transfer(RegisterSelect::Command, 0x36);
        let expected = [
            true, true, true, true, true, // sync
            false, false, false, // R/W, RS, spacer
            false, false, true, true, // 0x3
            false, false, false, false, // spacer
            false, true, true, false, // 0x6
            false, false, false, false, // spacer
        ];
        assert_eq!(bits, expected);
    }

    #[test]
    fn data_transfer_sets_register_select() {
        let bits = encode_transfer(RegisterSelect::Data, 0x00);
        assert!(bits[6]);
        assert_eq!(bits.iter().filter(|b| **b).count(), SYNC_BITS + 1);
    }

    #[test]
    fn decode_inverts_encode() {
        for value in [0x00u8, 0x01, 0x80, 0xA5, 0xFF] {
            for rs in [RegisterSelect::Command, RegisterSelect::Data] {
                assert_eq!(decode_transfer(&encode_transfer(rs, value)), Some((rs, value)));
            }
        }
    }

    #[test]
    fn decode_rejects_broken_sync() {
        let mut bits = encode_transfer(RegisterSelect::Data, 0x42);
        bits[0] = false;
        assert_eq!(decode_transfer(&bits), None);

        let mut bits = encode_transfer(RegisterSelect::Data, 0x42);
        bits[13] = true;
        assert_eq!(decode_transfer(&bits), None);
    }

    #[test]
    fn top_bank_addresses_map_directly() {
        assert_eq!(word_address(0), Some(WordAddress { column: 0, row: 0 }));
        assert_eq!(word_address(14), Some(WordAddress { column: 7, row: 0 }));
        assert_eq!(
            word_address(31 * LINE_BYTES + 2),
            Some(WordAddress { column: 1, row: 31 })
        );
    }

    #[test]
    fn bottom_bank_addresses_shift_right() {
        assert_eq!(
            word_address(BANK_ROWS * LINE_BYTES),
            Some(WordAddress { column: 8, row: 0 })
        );
        assert_eq!(
            word_address(BUFFER_SIZE - WORD_BYTES),
            Some(WordAddress { column: 15, row: 31 })
        );
    }

    #[test]
    fn invalid_offsets_are_rejected() {
        assert_eq!(word_address(1), None);
        assert_eq!(word_address(BUFFER_SIZE), None);
    }

    #[test]
    fn address_commands_carry_row_then_column() {
        assert_eq!(
            address_commands(WordAddress { column: 9, row: 3 }),
            [0x83, 0x89]
        );
    }

    #[test]
    fn word_change_covers_both_bytes() {
        let committed = [0u8; BUFFER_SIZE];
        let mut pending = [0u8; BUFFER_SIZE];
        pending[1] = 0x01;
        pending[40] = 0x80;

        assert!(word_changed(&pending, &committed, 0));
        assert!(!word_changed(&pending, &committed, 2));
        assert!(word_changed(&pending, &committed, 40));
        assert!(!word_changed(&pending, &committed, BUFFER_SIZE));
    }
}
