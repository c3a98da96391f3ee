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

//! `Float`: binary32 (`Float32`) or binary64 (`FloatObj`). The optimizer's
//! precision test (pack to binary32, unpack, compare bit patterns against
//! the original) decides whether a caller-supplied `F64` may narrow.

use std::io::{Read, Write};

use snafu::ResultExt;

use crate::code_byte::{base_type, subtype, CodeByte, BASE_SUBTYPE, DEFAULT_SUBTYPE};
use crate::error::{IoErrorSnafu, Result};
use crate::io::must_read_vec;
use crate::optimizer::{plan_float, FloatSubtype};
use crate::value::{FloatValue, Value};

pub(crate) fn write_tagged(value: &Value, writer: &mut dyn Write, specialize: bool) -> Result<()> {
    let f = value.as_float()?;
    if value.is_kind_zero() {
        return CodeByte::new(base_type::FLOAT, DEFAULT_SUBTYPE).write(writer);
    }
    match plan_float(&f, specialize) {
        FloatSubtype::F32 => {
            CodeByte::new(base_type::FLOAT, subtype::FLOAT_FLOAT32).write(writer)?;
            write_f32_payload(f, writer)
        }
        FloatSubtype::F64 => {
            CodeByte::new(base_type::FLOAT, BASE_SUBTYPE).write(writer)?;
            write_f64_payload(f, writer)
        }
    }
}

/// Write the data portion for an already-chosen `code` (used for `SList`
/// elements sharing one code byte).
pub(crate) fn write_data(value: &Value, code: CodeByte, writer: &mut dyn Write) -> Result<()> {
    let f = value.as_float()?;
    if code.subtype() == subtype::FLOAT_FLOAT32 {
        write_f32_payload(f, writer)
    } else {
        write_f64_payload(f, writer)
    }
}

fn write_f32_payload(f: FloatValue, writer: &mut dyn Write) -> Result<()> {
    let v = match f {
        FloatValue::F32(v) => v,
        FloatValue::F64(d) => d as f32,
    };
    writer.write_all(&v.to_be_bytes()).context(IoErrorSnafu)
}

fn write_f64_payload(f: FloatValue, writer: &mut dyn Write) -> Result<()> {
    let v = match f {
        FloatValue::F32(v) => v as f64,
        FloatValue::F64(d) => d,
    };
    writer.write_all(&v.to_be_bytes()).context(IoErrorSnafu)
}

pub(crate) fn decode_default(_reader: &mut dyn Read) -> Result<Value> {
    Ok(Value::Float(FloatValue::F64(0.0)))
}

pub(crate) fn decode_base(reader: &mut dyn Read) -> Result<Value> {
    let bytes = must_read_vec(reader, 8)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes);
    Ok(Value::Float(FloatValue::F64(f64::from_be_bytes(buf))))
}

pub(crate) fn decode_f32(reader: &mut dyn Read) -> Result<Value> {
    let bytes = must_read_vec(reader, 4)?;
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes);
    Ok(Value::Float(FloatValue::F32(f32::from_be_bytes(buf))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_elides_to_default_subtype() {
        let mut buf = Vec::new();
        write_tagged(&Value::Float(FloatValue::F64(0.0)), &mut buf, true).unwrap();
        assert_eq!(buf, vec![0x30]);
    }

    #[test]
    fn exact_value_narrows_to_float32() {
        let mut buf = Vec::new();
        write_tagged(&Value::Float(FloatValue::F64(1.0)), &mut buf, true).unwrap();
        assert_eq!(buf, vec![0x32, 0x3F, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn lossy_value_stays_float64() {
        let mut buf = Vec::new();
        write_tagged(&Value::Float(FloatValue::F64(0.1)), &mut buf, true).unwrap();
        assert_eq!(buf[0], 0x31);
        assert_eq!(buf.len(), 9);
    }
}
