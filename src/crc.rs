/// Length of one checksummed word on the wire: two data bytes and their CRC.
pub const GROUP_LEN: usize = 3;

/// CRC-8 used by Sensirion sensors: polynomial 0x31, init 0xFF, MSB first,
/// no reflection and no final XOR.
#[inline]
pub fn sensirion_crc8(data: &[u8]) -> u8 {
    const CRC8_POLYNOMIAL: u8 = 0x31;
    const CRC8_INIT: u8 = 0xFF;

    let mut crc: u8 = CRC8_INIT;

    for &b in data {
        crc ^= b;
        for _ in 0..8 {
            crc = if (crc & 0x80) != 0 {
                (crc << 1) ^ CRC8_POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }

    crc
}

/// Checks one `[msb, lsb, crc]` group.
#[inline]
pub fn verify_group(group: &[u8; GROUP_LEN]) -> bool {
    sensirion_crc8(&group[..2]) == group[2]
}

/// Splits the group into its big-endian word, ignoring the checksum byte.
#[inline]
pub fn group_word(group: &[u8; GROUP_LEN]) -> u16 {
    u16::from_be_bytes([group[0], group[1]])
}
