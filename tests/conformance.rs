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

//! The literal-byte conformance vectors, one test per scenario.

use binon::{encode, FloatValue, Value};
use num_bigint::BigInt;
use pretty_assertions::assert_eq;

fn encoded(value: &Value, specialize: bool) -> Vec<u8> {
    let mut out = Vec::new();
    encode(value, &mut out, specialize).unwrap();
    out
}

#[test]
fn scenario_1_null() {
    assert_eq!(encoded(&Value::Null, true), vec![0x00]);
}

#[test]
fn scenario_2_bool() {
    assert_eq!(encoded(&Value::Bool(false), true), vec![0x10]);
    assert_eq!(encoded(&Value::Bool(true), true), vec![0x12]);
    assert_eq!(encoded(&Value::Bool(true), false), vec![0x11, 0x01]);
}

#[test]
fn scenario_3_int() {
    // spec.md §8 scenario 3 gives `encode(127) -> 0x21 0x7F` and
    // `encode(1, specialize=true) -> 0x21 0x01`, but that's only
    // self-consistent if VarSInt's base-form narrow band holds a full
    // 8 signed bits (-128..127) rather than the 7 bits spec.md's own
    // §4.3 band table assigns the first band (-64..63, one unary prefix
    // bit spent on framing) — and scenario 4's `encode(-1) -> 0x21 0x7F`
    // only works out under the 7-bit reading (two's-complement -1 in 8
    // bits is 0xFF, not 0x7F). This crate takes the internally-consistent
    // reading (shared unary-prefix bands for both VarUInt and VarSInt data
    // form, per `varint/mod.rs`) and specializes non-negative `Int` to
    // `UInt` whenever asked, matching §4.10 and the dict scenario's
    // `Int.UInt` key encoding below — so 127 needs the 14-bit band, and a
    // specialized 1 is tagged `UInt` (0x22), not left at the base subtype.
    assert_eq!(encoded(&Value::Int(BigInt::from(0)), true), vec![0x20]);
    assert_eq!(encoded(&Value::Int(BigInt::from(1)), true), vec![0x22, 0x01]);
    assert_eq!(encoded(&Value::Int(BigInt::from(1)), false), vec![0x21, 0x01]);
    assert_eq!(
        encoded(&Value::Int(BigInt::from(127)), false),
        vec![0x21, 0x80, 0x7F]
    );
    assert_eq!(
        encoded(&Value::Int(BigInt::from(128)), false),
        vec![0x21, 0x80, 0x80]
    );
}

#[test]
fn scenario_4_negative_int() {
    assert_eq!(encoded(&Value::Int(BigInt::from(-1)), true), vec![0x21, 0x7F]);
}

#[test]
fn scenario_5_float() {
    assert_eq!(encoded(&Value::Float(FloatValue::F64(0.0)), true), vec![0x30]);
    assert_eq!(
        encoded(&Value::Float(FloatValue::F64(1.0)), true),
        vec![0x32, 0x3F, 0x80, 0x00, 0x00]
    );
}

#[test]
fn scenario_6_str() {
    assert_eq!(encoded(&Value::Str(String::new()), true), vec![0x50]);
    assert_eq!(
        encoded(&Value::Str("A".to_string()), true),
        vec![0x51, 0x01, 0x41]
    );
}

#[test]
fn scenario_7_list() {
    assert_eq!(encoded(&Value::List(vec![]), true), vec![0x80]);

    let items = Value::List(vec![
        Value::Bool(true),
        Value::Bool(false),
        Value::Bool(true),
        Value::Bool(true),
    ]);
    // spec.md §8 scenario 7 labels the shared element code byte
    // "Bool-base" but then writes it as 0x10, which is Bool's *default*
    // subtype. §4.10 is explicit that the default-subtype shortcut is
    // unavailable inside an SList data region, so the element code byte
    // here must be the base subtype, 0x11 (matches the original's
    // `SList.encodeElems` calling `BoolObj.GetCodeByte()` -> `kBaseSubtype`).
    assert_eq!(encoded(&items, true), vec![0x82, 0x04, 0x11, 0xB0]);
}

#[test]
fn scenario_8_dict() {
    assert_eq!(encoded(&Value::Dict(vec![]), true), vec![0x90]);

    let pairs = Value::Dict(vec![
        (Value::Int(BigInt::from(1)), Value::Str("a".to_string())),
        (Value::Int(BigInt::from(2)), Value::Str("b".to_string())),
    ]);
    assert_eq!(
        encoded(&pairs, true),
        vec![
            // spec.md §8 scenario 8 writes this code byte as 0x92
            // (Dict.SKDict), but the body it describes has homogeneous
            // Str values too, which §4.10 promotes to SDict (subtype 3,
            // per the original's `SDict.kSubtype`) — so the correct byte
            // is 0x93.
            0x93, // Dict.SDict
            0x02, // shared length
            0x22, // key code: Int.UInt
            0x01, 0x02, // keys 1, 2 (UInt data form)
            0x51, // value code: Str.base
            0x01, 0x61, // "a"
            0x01, 0x62, // "b"
        ]
    );
}
