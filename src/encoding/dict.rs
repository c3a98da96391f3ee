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

//! `Dict`: keys and values are two parallel sequences sharing one length.
//! `DictObj` (base) tags both sides fully; `SKDict` shares one key code
//! byte; `SDict` shares both a key and a value code byte.

use std::io::{Read, Write};

use crate::code_byte::{base_type, subtype, CodeByte, BASE_SUBTYPE, DEFAULT_SUBTYPE};
use crate::encoding::list;
use crate::error::{Result, TypeErrSnafu};
use crate::optimizer::{plan_dict, DictPlan};
use crate::registry;
use crate::value::{ensure_no_duplicate_keys, Value};
use crate::varint::uint;

pub(crate) fn write_tagged(value: &Value, writer: &mut dyn Write, specialize: bool) -> Result<()> {
    let pairs = value.as_dict()?;
    ensure_no_duplicate_keys(pairs)?;
    if pairs.is_empty() {
        return CodeByte::new(base_type::DICT, DEFAULT_SUBTYPE).write(writer);
    }
    match plan_dict(pairs, specialize) {
        DictPlan::SDict(key_code, val_code) => {
            CodeByte::new(base_type::DICT, subtype::DICT_SDICT).write(writer)?;
            write_sdict_data(pairs, key_code, val_code, writer, specialize)
        }
        DictPlan::SKDict(key_code) => {
            CodeByte::new(base_type::DICT, subtype::DICT_SKDICT).write(writer)?;
            write_skdict_data(pairs, key_code, writer, specialize)
        }
        DictPlan::General | DictPlan::Empty => {
            CodeByte::new(base_type::DICT, BASE_SUBTYPE).write(writer)?;
            write_dict_base_data(pairs, writer, specialize)
        }
    }
}

/// Write the data portion for an already-chosen `code` (used when a `Dict`
/// is itself an `SList`/`SDict` element).
pub(crate) fn write_data(value: &Value, code: CodeByte, writer: &mut dyn Write, specialize: bool) -> Result<()> {
    let pairs = value.as_dict()?;
    ensure_no_duplicate_keys(pairs)?;
    match code.subtype() {
        subtype::DICT_SDICT => match plan_dict(pairs, specialize) {
            DictPlan::SDict(key_code, val_code) => {
                write_sdict_data(pairs, key_code, val_code, writer, specialize)
            }
            _ => TypeErrSnafu {
                msg: "Dict entries are not all assignable to the declared SDict kinds".to_string(),
            }
            .fail(),
        },
        subtype::DICT_SKDICT => match plan_dict(pairs, specialize) {
            DictPlan::SKDict(key_code) | DictPlan::SDict(key_code, _) => {
                write_skdict_data(pairs, key_code, writer, specialize)
            }
            _ => TypeErrSnafu {
                msg: "Dict keys are not all assignable to the declared SKDict key kind".to_string(),
            }
            .fail(),
        },
        _ => write_dict_base_data(pairs, writer, specialize),
    }
}

fn write_dict_base_data(pairs: &[(Value, Value)], writer: &mut dyn Write, specialize: bool) -> Result<()> {
    uint::write_length(pairs.len(), writer)?;
    for (key, _) in pairs {
        registry::encode_tagged(key, writer, specialize)?;
    }
    for (_, value) in pairs {
        registry::encode_tagged(value, writer, specialize)?;
    }
    Ok(())
}

fn write_skdict_data(
    pairs: &[(Value, Value)],
    key_code: CodeByte,
    writer: &mut dyn Write,
    specialize: bool,
) -> Result<()> {
    uint::write_length(pairs.len(), writer)?;
    key_code.write(writer)?;
    if key_code.base_type() == base_type::BOOL {
        list::write_packed_bools(pairs.iter().map(|(k, _)| k), writer)?;
    } else {
        for (key, _) in pairs {
            registry::write_data_for(key, key_code, writer, specialize)?;
        }
    }
    for (_, value) in pairs {
        registry::encode_tagged(value, writer, specialize)?;
    }
    Ok(())
}

fn write_sdict_data(
    pairs: &[(Value, Value)],
    key_code: CodeByte,
    val_code: CodeByte,
    writer: &mut dyn Write,
    specialize: bool,
) -> Result<()> {
    uint::write_length(pairs.len(), writer)?;
    key_code.write(writer)?;
    if key_code.base_type() == base_type::BOOL {
        list::write_packed_bools(pairs.iter().map(|(k, _)| k), writer)?;
    } else {
        for (key, _) in pairs {
            registry::write_data_for(key, key_code, writer, specialize)?;
        }
    }
    val_code.write(writer)?;
    if val_code.base_type() == base_type::BOOL {
        list::write_packed_bools(pairs.iter().map(|(_, v)| v), writer)?;
    } else {
        for (_, value) in pairs {
            registry::write_data_for(value, val_code, writer, specialize)?;
        }
    }
    Ok(())
}

pub(crate) fn decode_default(_reader: &mut dyn Read) -> Result<Value> {
    Ok(Value::Dict(Vec::new()))
}

pub(crate) fn decode_base(reader: &mut dyn Read) -> Result<Value> {
    let n = uint::read_length(reader)?;
    let mut keys = Vec::with_capacity(n);
    for _ in 0..n {
        keys.push(registry::decode_tagged(reader)?);
    }
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        values.push(registry::decode_tagged(reader)?);
    }
    finish_dict(keys, values)
}

pub(crate) fn decode_skdict(reader: &mut dyn Read) -> Result<Value> {
    let n = uint::read_length(reader)?;
    let key_code = CodeByte::read(reader)?;
    let keys = read_homogeneous(reader, key_code, n)?;
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        values.push(registry::decode_tagged(reader)?);
    }
    finish_dict(keys, values)
}

pub(crate) fn decode_sdict(reader: &mut dyn Read) -> Result<Value> {
    let n = uint::read_length(reader)?;
    let key_code = CodeByte::read(reader)?;
    let keys = read_homogeneous(reader, key_code, n)?;
    let val_code = CodeByte::read(reader)?;
    let values = read_homogeneous(reader, val_code, n)?;
    finish_dict(keys, values)
}

fn read_homogeneous(reader: &mut dyn Read, code: CodeByte, n: usize) -> Result<Vec<Value>> {
    if code.base_type() == base_type::BOOL {
        list::read_packed_bools(reader, n)
    } else {
        let mut v = Vec::with_capacity(n);
        for _ in 0..n {
            v.push(registry::decode_data_for(code, reader)?);
        }
        Ok(v)
    }
}

fn finish_dict(keys: Vec<Value>, values: Vec<Value>) -> Result<Value> {
    let pairs: Vec<(Value, Value)> = keys.into_iter().zip(values).collect();
    ensure_no_duplicate_keys(&pairs)?;
    Ok(Value::Dict(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn empty_dict_elides_to_default_subtype() {
        let mut buf = Vec::new();
        write_tagged(&Value::Dict(vec![]), &mut buf, true).unwrap();
        assert_eq!(buf, vec![0x90]);
    }

    #[test]
    fn matches_concrete_sdict_scenario_bytes() {
        let pairs = Value::Dict(vec![
            (Value::Int(BigInt::from(1)), Value::Str("a".into())),
            (Value::Int(BigInt::from(2)), Value::Str("b".into())),
        ]);
        let mut buf = Vec::new();
        write_tagged(&pairs, &mut buf, true).unwrap();
        assert_eq!(
            buf,
            vec![
                0x93, // Dict.SDict (keys and values both homogeneous)
                0x02, // shared length
                0x22, // key code: Int.UInt
                0x01, 0x02, // keys 1, 2 (UInt data form)
                0x51, // value code: Str.base
                0x01, 0x61, // "a"
                0x01, 0x62, // "b"
            ]
        );
    }

    #[test]
    fn rejects_duplicate_keys() {
        let pairs = Value::Dict(vec![
            (Value::Int(BigInt::from(1)), Value::Null),
            (Value::Int(BigInt::from(1)), Value::Null),
        ]);
        let mut buf = Vec::new();
        let err = write_tagged(&pairs, &mut buf, true).unwrap_err();
        assert!(matches!(err, crate::error::BinonError::TypeErr { .. }));
    }
}
