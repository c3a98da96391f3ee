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

//! BinON: a compact, self-describing binary serialization codec for
//! dynamically typed values drawn from a fixed universe of eight kinds —
//! `Null`, `Bool`, `Int`, `Float`, `Buffer`, `Str`, `List`, `Dict`.
//!
//! Every encoded value opens with a [`code_byte::CodeByte`]: a base-type
//! nibble identifying the kind and a subtype nibble selecting among a
//! default ("the kind's zero, no payload"), base (unspecialized), or
//! specialized encoding. [`encode`] optionally runs the specialization
//! optimizer (`specialize: true`) to pick the tightest legal encoding for
//! every node in the tree; [`decode`] reverses the process by dispatching
//! on the code byte it reads.
//!
//! ```
//! use binon::Value;
//!
//! let value = Value::List(vec![Value::Int(1.into()), Value::Str("hi".into())]);
//! let mut wire = Vec::new();
//! binon::encode(&value, &mut wire, true).unwrap();
//!
//! let mut cursor = std::io::Cursor::new(wire);
//! assert_eq!(binon::decode(&mut cursor).unwrap(), value);
//! ```

pub mod bigint;
pub mod code_byte;
mod encoding;
pub mod error;
mod io;
mod optimizer;
mod registry;
pub mod value;
pub mod varint;

use std::io::{Read, Write};

pub use crate::error::{BinonError, Result};
pub use crate::value::{FloatValue, Value, ValueKind};

/// Encode `value` to `writer`.
///
/// With `specialize: false`, every node uses its kind's base (unspecialized)
/// encoding, except that a value equal to its kind's zero always elides to
/// the one-byte default form regardless of `specialize`. With
/// `specialize: true`, the optimizer additionally narrows `Int` to `UInt`
/// when non-negative, `Float` to `Float32` when lossless, `Bool(true)` to
/// `TrueObj`, and homogeneous `List`/`Dict` to `SList`/`SKDict`/`SDict`.
pub fn encode(value: &Value, writer: &mut impl Write, specialize: bool) -> Result<()> {
    registry::encode_tagged(value, writer, specialize)
}

/// Decode exactly one [`Value`] from `reader`. The stream carries no
/// trailing delimiter: decoding stops after consuming exactly the bytes
/// that formed the value.
pub fn decode(reader: &mut impl Read) -> Result<Value> {
    registry::decode_tagged(reader)
}

/// Shortcut for `encode(&Value::Bool(value), writer, specialize)`.
pub fn encode_bool(value: bool, writer: &mut impl Write, specialize: bool) -> Result<()> {
    encode(&Value::Bool(value), writer, specialize)
}

/// Decode a value known to be `Bool`, failing with [`BinonError::TypeErr`]
/// if the decoded value is some other kind.
pub fn decode_bool(reader: &mut impl Read) -> Result<bool> {
    decode(reader)?.into_bool()
}

/// Shortcut for `encode(&Value::Int(value.into()), writer, specialize)`.
pub fn encode_int(value: impl Into<num_bigint::BigInt>, writer: &mut impl Write, specialize: bool) -> Result<()> {
    encode(&Value::Int(value.into()), writer, specialize)
}

/// Decode a value known to be `Int`.
pub fn decode_int(reader: &mut impl Read) -> Result<num_bigint::BigInt> {
    decode(reader)?.into_int()
}

/// Shortcut for `encode(&Value::Str(value.into()), writer, specialize)`.
pub fn encode_str(value: impl Into<String>, writer: &mut impl Write, specialize: bool) -> Result<()> {
    encode(&Value::Str(value.into()), writer, specialize)
}

/// Decode a value known to be `Str`.
pub fn decode_str(reader: &mut impl Read) -> Result<String> {
    decode(reader)?.into_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_round_trip() {
        let value = Value::List(vec![Value::Int(1.into()), Value::Str("hi".into())]);
        let mut wire = Vec::new();
        encode(&value, &mut wire, true).unwrap();
        let mut cursor = std::io::Cursor::new(wire);
        assert_eq!(decode(&mut cursor).unwrap(), value);
    }

    #[test]
    fn per_kind_shortcuts_round_trip() {
        let mut wire = Vec::new();
        encode_str("hello", &mut wire, true).unwrap();
        let mut cursor = std::io::Cursor::new(wire);
        assert_eq!(decode_str(&mut cursor).unwrap(), "hello");
    }
}
