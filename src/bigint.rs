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

//! Arbitrary-precision integer support for `Value::Int`.
//!
//! The wire format allows integers of unbounded width via the big-integer
//! escape band, so the in-memory representation can't be a fixed machine
//! word. We reuse `num-bigint` rather than hand-roll bit-length/byte-sign
//! arithmetic; everything in this module is a thin convenience layer over
//! `BigInt`/`BigUint` for the shapes the codec needs (minimal big-endian
//! magnitude bytes, minimal two's-complement bytes, bit lengths for band
//! selection).

pub use num_bigint::{BigInt, BigUint, Sign};

/// Number of bits needed to hold `value`'s magnitude, ignoring sign.
/// Zero needs zero bits.
pub fn unsigned_bits(value: &BigUint) -> u64 {
    value.bits()
}

/// Number of bits needed to hold `value` in two's complement, including
/// the sign bit. Zero needs one bit (the lone sign bit).
pub fn signed_bits(value: &BigInt) -> u64 {
    if value.sign() == num_bigint::Sign::NoSign {
        return 1;
    }
    // BigInt::bits() reports the magnitude's bit length; two's complement
    // needs one more bit for the sign unless the magnitude is an exact
    // power of two and the value is negative (e.g. -128 fits in 8 bits).
    let mag_bits = value.magnitude().bits();
    if value.sign() == num_bigint::Sign::Minus && value.magnitude().count_ones() == 1 {
        mag_bits
    } else {
        mag_bits + 1
    }
}
