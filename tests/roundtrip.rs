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

//! Whole-value round trips: `decode(encode(v)) == v` across arbitrary
//! generated trees, plus the other invariants spec.md §8 names.

use std::io::Cursor;

use binon::{decode, encode, FloatValue, Value};
use bytes::Bytes;
use num_bigint::BigInt;
use proptest::prelude::*;

fn round_trip(value: &Value, specialize: bool) {
    let mut wire = Vec::new();
    encode(value, &mut wire, specialize).unwrap();
    let mut cursor = Cursor::new(wire);
    let decoded = decode(&mut cursor).unwrap();
    assert_eq!(&decoded, value);
    // The decoder must consume exactly the bytes the encoder wrote; no
    // trailing delimiter, per spec.md §6.
    assert_eq!(cursor.position() as usize, cursor.get_ref().len());
}

/// A depth-bounded `Value` strategy: containers recurse into `leaf()` at
/// shallow depth to keep generated trees finite and termination fast.
fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| Value::Int(BigInt::from(i))),
        any::<f64>().prop_map(|f| Value::Float(FloatValue::F64(f))),
        proptest::collection::vec(any::<u8>(), 0..16).prop_map(|b| Value::Buffer(Bytes::from(b))),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::Str),
    ]
}

fn arbitrary_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..8).prop_map(Value::List),
            proptest::collection::vec((inner.clone(), inner), 0..8).prop_map(|pairs| {
                // Dedup keys so the generated dict is always legal (spec.md
                // §3: duplicate dict keys are forbidden).
                let mut seen = Vec::new();
                let mut out = Vec::new();
                for (k, v) in pairs {
                    if !seen.contains(&k) {
                        seen.push(k.clone());
                        out.push((k, v));
                    }
                }
                Value::Dict(out)
            }),
        ]
    })
}

proptest! {
    #[test]
    fn arbitrary_values_round_trip_specialized(value in arbitrary_value()) {
        round_trip(&value, true);
    }

    #[test]
    fn arbitrary_values_round_trip_unspecialized(value in arbitrary_value()) {
        round_trip(&value, false);
    }

    #[test]
    fn distinct_ints_encode_distinctly(a in any::<i64>(), b in any::<i64>()) {
        prop_assume!(a != b);
        let mut wire_a = Vec::new();
        let mut wire_b = Vec::new();
        encode(&Value::Int(BigInt::from(a)), &mut wire_a, true).unwrap();
        encode(&Value::Int(BigInt::from(b)), &mut wire_b, true).unwrap();
        prop_assert_ne!(wire_a, wire_b);
    }

    #[test]
    fn specialize_never_grows_a_scalar(value in leaf()) {
        let mut specialized = Vec::new();
        let mut base = Vec::new();
        encode(&value, &mut specialized, true).unwrap();
        encode(&value, &mut base, false).unwrap();
        prop_assert!(specialized.len() <= base.len());
    }

    #[test]
    fn strings_round_trip_through_the_str_shortcut(s in any::<String>()) {
        let mut wire = Vec::new();
        binon::encode_str(s.clone(), &mut wire, true).unwrap();
        let mut cursor = Cursor::new(wire);
        prop_assert_eq!(binon::decode_str(&mut cursor).unwrap(), s);
    }
}

#[test]
fn bit_packed_bool_slist_uses_ceil_n_over_8_payload_bytes() {
    for n in [0usize, 1, 7, 8, 9, 15, 16, 17] {
        let items = Value::List(vec![Value::Bool(true); n]);
        let mut wire = Vec::new();
        encode(&items, &mut wire, true).unwrap();
        if n == 0 {
            assert_eq!(wire, vec![0x80]);
            continue;
        }
        // code byte + length VarUInt + element code byte + ceil(n/8) payload.
        let length_bytes = {
            let mut len_wire = Vec::new();
            binon::varint::uint::write_length(n, &mut len_wire).unwrap();
            len_wire.len()
        };
        let expected_len = 1 + length_bytes + 1 + n.div_ceil(8);
        assert_eq!(wire.len(), expected_len);

        let mut cursor = Cursor::new(wire);
        let decoded = decode(&mut cursor).unwrap();
        assert_eq!(decoded, items);
    }
}

#[test]
fn deeply_nested_list_fails_closed_instead_of_overflowing_the_stack() {
    let mut value = Value::List(vec![]);
    for _ in 0..500 {
        value = Value::List(vec![value]);
    }
    let mut wire = Vec::new();
    let err = encode(&value, &mut wire, true).unwrap_err();
    assert!(matches!(err, binon::BinonError::ParseErr { .. }));
}
