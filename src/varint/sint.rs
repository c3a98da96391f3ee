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

//! Standalone (data-form) VarSInt: the `Int.IntObj` (base, unspecialized)
//! codec's payload. Reuses the same unary-prefix band table as [`super::uint`]
//! but interprets the payload bits as a two's-complement value, narrowest
//! band first.

use std::io::{Read, Write};

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use snafu::ResultExt;

use crate::error::{IoErrorSnafu, ParseErrSnafu, Result};
use crate::io::{must_read_vec, read_u8};
use crate::varint::{narrow_band_for, pack_narrow, tag_for_lead_byte, unpack_narrow, uint, BandTag};

/// Encode `value` into its narrowest legal data-form representation.
pub fn encode_data(value: &BigInt) -> Vec<u8> {
    if let Some(v) = value.to_i64() {
        if let Some(band) = narrow_band_for_signed(v) {
            let payload = to_twos_complement(v, band.payload_bits);
            return pack_narrow(band, payload);
        }
        let mut out = Vec::with_capacity(9);
        out.push(super::WIDE_MARKER);
        out.extend_from_slice(&v.to_be_bytes());
        return out;
    }
    encode_escape(value)
}

/// Length in bytes [`encode_data`] would produce, without allocating.
pub fn encoded_len(value: &BigInt) -> usize {
    if let Some(v) = value.to_i64() {
        if let Some(band) = narrow_band_for_signed(v) {
            return band.total_bytes;
        }
        9
    } else {
        let magnitude = value.to_signed_bytes_be();
        1 + uint::encoded_len(&num_bigint::BigUint::from(magnitude.len() - 9)) + magnitude.len()
    }
}

fn narrow_band_for_signed(v: i64) -> Option<&'static super::NarrowBand> {
    super::NARROW_BANDS.iter().find(|band| {
        let half = 1i64 << (band.payload_bits - 1);
        v >= -half && v < half
    })
}

fn to_twos_complement(v: i64, bits: u32) -> u64 {
    let mask = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
    (v as u64) & mask
}

fn from_twos_complement(payload: u64, bits: u32) -> i64 {
    let sign_bit = 1u64 << (bits - 1);
    if payload & sign_bit != 0 {
        (payload as i64) - (1i64 << bits)
    } else {
        payload as i64
    }
}

fn encode_escape(value: &BigInt) -> Vec<u8> {
    let bytes = value.to_signed_bytes_be();
    let n = bytes.len();
    let mut out = Vec::with_capacity(1 + 9 + n);
    out.push(super::ESCAPE_MARKER);
    out.extend(uint::encode_data(&num_bigint::BigUint::from(n - 9)));
    out.extend(bytes);
    out
}

/// Write `value` in data form to `writer`.
pub fn write_data(value: &BigInt, writer: &mut impl Write) -> Result<()> {
    writer.write_all(&encode_data(value)).context(IoErrorSnafu)
}

/// Read a data-form VarSInt from `reader`.
pub fn read_data(reader: &mut impl Read) -> Result<BigInt> {
    let lead = read_u8(reader)?;
    match tag_for_lead_byte(lead) {
        BandTag::Narrow(idx) => {
            let band = &crate::varint::NARROW_BANDS[idx];
            let mut bytes = vec![lead];
            if band.total_bytes > 1 {
                bytes.extend(must_read_vec(reader, band.total_bytes - 1)?);
            }
            let payload = unpack_narrow(band, &bytes);
            Ok(BigInt::from(from_twos_complement(payload, band.payload_bits)))
        }
        BandTag::Wide => {
            let bytes = must_read_vec(reader, 8)?;
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes);
            Ok(BigInt::from(i64::from_be_bytes(buf)))
        }
        BandTag::Escape => {
            let extra = uint::read_data(reader)?;
            let extra: usize = extra.try_into().map_err(|_| {
                ParseErrSnafu {
                    msg: "big-integer escape byte count overflowed usize".to_string(),
                }
                .build()
            })?;
            let n = extra + 9;
            let bytes = must_read_vec(reader, n)?;
            Ok(BigInt::from_signed_bytes_be(&bytes))
        }
        BandTag::Unknown => ParseErrSnafu {
            msg: format!("unrecognized VarSInt lead byte 0x{lead:02X}"),
        }
        .fail(),
    }
}
