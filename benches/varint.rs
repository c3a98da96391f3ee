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

use std::io::Cursor;

use binon::varint::{sint, uint};
use criterion::{criterion_group, criterion_main, Criterion};
use num_bigint::{BigInt, BigUint};

fn uint_values() -> Vec<BigUint> {
    vec![
        BigUint::from(0u32),
        BigUint::from(127u32),
        BigUint::from(16_383u32),
        BigUint::from(1u64 << 40),
        BigUint::from(u64::MAX),
        BigUint::from(u64::MAX) * BigUint::from(1_000u32),
    ]
}

fn sint_values() -> Vec<BigInt> {
    vec![
        BigInt::from(0),
        BigInt::from(-64),
        BigInt::from(8_191),
        BigInt::from(-(1i64 << 40)),
        BigInt::from(i64::MIN),
        BigInt::from(i64::MAX) * BigInt::from(1_000),
    ]
}

fn encode_uint_all() {
    for value in uint_values() {
        let _ = uint::encode_data(&value);
    }
}

fn decode_uint_all() {
    let encoded: Vec<Vec<u8>> = uint_values().iter().map(uint::encode_data).collect();
    for bytes in &encoded {
        let mut cursor = Cursor::new(bytes.as_slice());
        let _ = uint::read_data(&mut cursor).unwrap();
    }
}

fn encode_sint_all() {
    for value in sint_values() {
        let _ = sint::encode_data(&value);
    }
}

fn decode_sint_all() {
    let encoded: Vec<Vec<u8>> = sint_values().iter().map(sint::encode_data).collect();
    for bytes in &encoded {
        let mut cursor = Cursor::new(bytes.as_slice());
        let _ = sint::read_data(&mut cursor).unwrap();
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("varuint encode", |b| b.iter(encode_uint_all));
    c.bench_function("varuint decode", |b| b.iter(decode_uint_all));
    c.bench_function("varsint encode", |b| b.iter(encode_sint_all));
    c.bench_function("varsint decode", |b| b.iter(decode_sint_all));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
