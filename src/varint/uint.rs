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

//! Standalone (data-form) VarUInt: list/dict lengths, buffer/str byte
//! counts, and the `Int.UInt` specialization's payload all reuse this.

use std::io::{Read, Write};

use num_bigint::BigUint;
use snafu::ResultExt;

use crate::bigint::unsigned_bits;
use crate::error::{IoErrorSnafu, ParseErrSnafu, Result};
use crate::io::{must_read_vec, read_u8};
use crate::varint::{narrow_band_for, pack_narrow, tag_for_lead_byte, unpack_narrow, BandTag};

/// Encode `value` into its narrowest legal data-form representation.
pub fn encode_data(value: &BigUint) -> Vec<u8> {
    let bits = unsigned_bits(value);
    if let Some(band) = narrow_band_for(bits) {
        let payload = value
            .iter_u64_digits()
            .next()
            .unwrap_or(0);
        pack_narrow(band, payload)
    } else if bits <= 64 {
        let payload = to_u64(value);
        let mut out = Vec::with_capacity(9);
        out.push(super::WIDE_MARKER);
        out.extend_from_slice(&payload.to_be_bytes());
        out
    } else {
        encode_escape(value)
    }
}

/// Length in bytes that [`encode_data`] would produce for `value`, without
/// allocating. Used by the optimizer to compare `UInt` against `IntObj`.
pub fn encoded_len(value: &BigUint) -> usize {
    let bits = unsigned_bits(value);
    if let Some(band) = narrow_band_for(bits) {
        band.total_bytes
    } else if bits <= 64 {
        9
    } else {
        let magnitude = value.to_bytes_be();
        1 + encoded_len_usize(magnitude.len().saturating_sub(9)) + magnitude.len()
    }
}

fn encoded_len_usize(n: usize) -> usize {
    encoded_len(&BigUint::from(n))
}

fn to_u64(value: &BigUint) -> u64 {
    let digits = value.to_u64_digits();
    match digits.len() {
        0 => 0,
        1 => digits[0],
        _ => {
            // unsigned_bits <= 64 guarantees this never happens, but stay
            // defensive rather than panic on a malformed caller value.
            digits[0]
        }
    }
}

fn encode_escape(value: &BigUint) -> Vec<u8> {
    let magnitude = value.to_bytes_be();
    let n = magnitude.len();
    let mut out = Vec::with_capacity(1 + 9 + n);
    out.push(super::ESCAPE_MARKER);
    out.extend(encode_data(&BigUint::from(n - 9)));
    out.extend(magnitude);
    out
}

/// Write `value` in data form to `writer`.
pub fn write_data(value: &BigUint, writer: &mut impl Write) -> Result<()> {
    writer.write_all(&encode_data(value)).context(IoErrorSnafu)
}

/// Read a data-form VarUInt from `reader`.
pub fn read_data(reader: &mut impl Read) -> Result<BigUint> {
    let lead = read_u8(reader)?;
    match tag_for_lead_byte(lead) {
        BandTag::Narrow(idx) => {
            let band = &crate::varint::NARROW_BANDS[idx];
            let mut bytes = vec![lead];
            if band.total_bytes > 1 {
                bytes.extend(must_read_vec(reader, band.total_bytes - 1)?);
            }
            let payload = unpack_narrow(band, &bytes);
            Ok(BigUint::from(payload))
        }
        BandTag::Wide => {
            let bytes = must_read_vec(reader, 8)?;
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes);
            Ok(BigUint::from(u64::from_be_bytes(buf)))
        }
        BandTag::Escape => {
            let extra = read_data(reader)?;
            let extra: usize = extra.try_into().map_err(|_| {
                ParseErrSnafu {
                    msg: "big-integer escape byte count overflowed usize".to_string(),
                }
                .build()
            })?;
            let n = extra + 9;
            let bytes = must_read_vec(reader, n)?;
            Ok(BigUint::from_bytes_be(&bytes))
        }
        BandTag::Unknown => ParseErrSnafu {
            msg: format!("unrecognized VarUInt lead byte 0x{lead:02X}"),
        }
        .fail(),
    }
}

/// Convenience for list/dict lengths and buffer/str byte counts, which are
/// always small enough to live in a `usize`.
pub fn write_length(n: usize, writer: &mut impl Write) -> Result<()> {
    write_data(&BigUint::from(n), writer)
}

/// Inverse of [`write_length`].
pub fn read_length(reader: &mut impl Read) -> Result<usize> {
    let value = read_data(reader)?;
    value.try_into().map_err(|_| {
        ParseErrSnafu {
            msg: "length VarUInt exceeds usize".to_string(),
        }
        .build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn round_trip(value: u64) {
        let big = BigUint::from(value);
        let mut buf = Vec::new();
        write_data(&big, &mut buf).unwrap();
        assert_eq!(buf.len(), encoded_len(&big));
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_data(&mut cursor).unwrap(), big);
    }

    #[test]
    fn round_trips_each_band_boundary() {
        for value in [0u64, 1, 127, 128, 16383, 16384, 1 << 29, u64::MAX] {
            round_trip(value);
        }
    }

    #[test]
    fn matches_concrete_scenario_bytes() {
        let mut buf = Vec::new();
        write_data(&BigUint::from(128u32), &mut buf).unwrap();
        assert_eq!(buf, vec![0x80, 0x80]);

        let mut buf = Vec::new();
        write_data(&BigUint::from(4u32), &mut buf).unwrap();
        assert_eq!(buf, vec![0x04]);
    }

    #[test]
    fn round_trips_big_integer_escape() {
        let huge = BigUint::from(u64::MAX) * BigUint::from(1000u32);
        let mut buf = Vec::new();
        write_data(&huge, &mut buf).unwrap();
        assert_eq!(buf[0], super::super::ESCAPE_MARKER);
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_data(&mut cursor).unwrap(), huge);
    }

    #[test]
    fn rejects_reserved_lead_byte() {
        let mut cursor = Cursor::new(vec![0xF5]);
        let err = read_data(&mut cursor).unwrap_err();
        assert!(matches!(err, crate::error::BinonError::ParseErr { .. }));
    }
}
