// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Shared unary-prefix band framing used by both [`uint`] and [`sint`].
//!
//! Five narrow bands plus a big-integer escape share one byte-layout rule:
//! a unary run of leading 1-bits in the first byte selects the total byte
//! count, the remaining bits of the first byte and all of the following
//! bytes hold the payload, big-endian. The escape band recurses: it writes
//! its own byte count (minus the nine bytes already spent on the narrower
//! bands) as a nested data-form [`uint`] value, then that many raw bytes.
//!
//! `Int.UInt`'s specialized code-byte payload reuses this exact data-form
//! table (unsigned), rather than a second nibble-embedded scheme; see
//! `DESIGN.md` for why that reading was chosen over the code-byte-embedded
//! "object form" described informally elsewhere.

pub mod sint;
pub mod uint;

/// One of the four fixed-width bands below the 64-bit-exact band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NarrowBand {
    /// Number of leading 1-bits (0 for the first band) before a 0 bit or
    /// the unary run terminates.
    pub prefix_bits: u32,
    /// The prefix pattern, right-aligned, `prefix_bits` wide.
    pub prefix_value: u8,
    /// Total encoded length in bytes, including the prefix bits.
    pub total_bytes: usize,
    /// Number of payload bits carried once the prefix is stripped.
    pub payload_bits: u32,
}

pub(crate) const NARROW_BANDS: [NarrowBand; 4] = [
    NarrowBand {
        prefix_bits: 1,
        prefix_value: 0b0,
        total_bytes: 1,
        payload_bits: 7,
    },
    NarrowBand {
        prefix_bits: 2,
        prefix_value: 0b10,
        total_bytes: 2,
        payload_bits: 14,
    },
    NarrowBand {
        prefix_bits: 3,
        prefix_value: 0b110,
        total_bytes: 4,
        payload_bits: 29,
    },
    NarrowBand {
        prefix_bits: 4,
        prefix_value: 0b1110,
        total_bytes: 8,
        payload_bits: 60,
    },
];

/// Marker byte for the fifth band: 8 payload bytes hold the full 64-bit
/// value with no bits borrowed for framing.
pub(crate) const WIDE_MARKER: u8 = 0b1111_0000;
/// Marker byte for the big-integer escape.
pub(crate) const ESCAPE_MARKER: u8 = 0b1111_0001;

/// Pack `payload` (must fit in `band.payload_bits`) into `band.total_bytes`
/// big-endian bytes with the band's unary prefix in the high bits of the
/// first byte.
pub(crate) fn pack_narrow(band: &NarrowBand, payload: u64) -> Vec<u8> {
    let combined = ((band.prefix_value as u64) << band.payload_bits) | payload;
    let total_bits = band.prefix_bits + band.payload_bits;
    debug_assert_eq!(total_bits as usize, band.total_bytes * 8);
    combined.to_be_bytes()[8 - band.total_bytes..].to_vec()
}

/// Inverse of [`pack_narrow`]: strip the prefix and return the payload.
pub(crate) fn unpack_narrow(band: &NarrowBand, bytes: &[u8]) -> u64 {
    debug_assert_eq!(bytes.len(), band.total_bytes);
    let mut buf = [0u8; 8];
    buf[8 - band.total_bytes..].copy_from_slice(bytes);
    let combined = u64::from_be_bytes(buf);
    let mask = if band.payload_bits == 64 {
        u64::MAX
    } else {
        (1u64 << band.payload_bits) - 1
    };
    combined & mask
}

/// Choose the narrowest band whose payload fits `bits_needed`, or `None`
/// if even the 60-bit band is too small (caller falls back to the 64-bit
/// band or the escape).
pub(crate) fn narrow_band_for(bits_needed: u64) -> Option<&'static NarrowBand> {
    NARROW_BANDS
        .iter()
        .find(|band| bits_needed <= band.payload_bits as u64)
}

/// Identify which band a leading byte belongs to, without consuming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BandTag {
    Narrow(usize),
    Wide,
    Escape,
    Unknown,
}

pub(crate) fn tag_for_lead_byte(byte: u8) -> BandTag {
    if byte & 0b1000_0000 == 0 {
        BandTag::Narrow(0)
    } else if byte & 0b1100_0000 == 0b1000_0000 {
        BandTag::Narrow(1)
    } else if byte & 0b1110_0000 == 0b1100_0000 {
        BandTag::Narrow(2)
    } else if byte & 0b1111_0000 == 0b1110_0000 {
        BandTag::Narrow(3)
    } else if byte == WIDE_MARKER {
        BandTag::Wide
    } else if byte == ESCAPE_MARKER {
        BandTag::Escape
    } else {
        BandTag::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_and_unpacks_each_band() {
        for band in NARROW_BANDS.iter() {
            let max_payload = if band.payload_bits == 64 {
                u64::MAX
            } else {
                (1u64 << band.payload_bits) - 1
            };
            for payload in [0u64, 1, max_payload / 2, max_payload] {
                let bytes = pack_narrow(band, payload);
                assert_eq!(bytes.len(), band.total_bytes);
                assert_eq!(unpack_narrow(band, &bytes), payload);
            }
        }
    }

    #[test]
    fn tags_lead_bytes() {
        assert_eq!(tag_for_lead_byte(0x00), BandTag::Narrow(0));
        assert_eq!(tag_for_lead_byte(0x80), BandTag::Narrow(1));
        assert_eq!(tag_for_lead_byte(0xC0), BandTag::Narrow(2));
        assert_eq!(tag_for_lead_byte(0xE0), BandTag::Narrow(3));
        assert_eq!(tag_for_lead_byte(0xF0), BandTag::Wide);
        assert_eq!(tag_for_lead_byte(0xF1), BandTag::Escape);
        assert_eq!(tag_for_lead_byte(0xF2), BandTag::Unknown);
        assert_eq!(tag_for_lead_byte(0xFF), BandTag::Unknown);
    }

    #[test]
    fn narrow_band_for_picks_tightest() {
        assert_eq!(narrow_band_for(0).unwrap().total_bytes, 1);
        assert_eq!(narrow_band_for(7).unwrap().total_bytes, 1);
        assert_eq!(narrow_band_for(8).unwrap().total_bytes, 2);
        assert_eq!(narrow_band_for(60).unwrap().total_bytes, 8);
        assert!(narrow_band_for(61).is_none());
    }
}
