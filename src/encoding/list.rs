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

//! `List`: `GList` (heterogeneous, every element fully tagged) and `SList`
//! (homogeneous, one shared element code byte, per-element tags elided).
//! Booleans inside an `SList` are additionally bit-packed, most-significant
//! bit first.

use std::io::{Read, Write};

use snafu::ResultExt;

use crate::code_byte::{base_type, subtype, CodeByte, BASE_SUBTYPE, DEFAULT_SUBTYPE};
use crate::error::{IoErrorSnafu, TypeErrSnafu};
use crate::error::Result;
use crate::io::must_read_vec;
use crate::optimizer::{plan_list, ListPlan};
use crate::value::Value;
use crate::varint::uint;
use crate::registry;

pub(crate) fn write_tagged(value: &Value, writer: &mut dyn Write, specialize: bool) -> Result<()> {
    let items = value.as_list()?;
    if items.is_empty() {
        return CodeByte::new(base_type::LIST, DEFAULT_SUBTYPE).write(writer);
    }
    match plan_list(items, specialize) {
        ListPlan::Simple(elem_code) => {
            CodeByte::new(base_type::LIST, subtype::LIST_SLIST).write(writer)?;
            write_slist_data(items, elem_code, writer, specialize)
        }
        ListPlan::General | ListPlan::Empty => {
            CodeByte::new(base_type::LIST, BASE_SUBTYPE).write(writer)?;
            write_glist_data(items, writer, specialize)
        }
    }
}

/// Write the data portion for an already-chosen `code` (used when a `List`
/// is itself an `SList`/`SDict` element).
pub(crate) fn write_data(value: &Value, code: CodeByte, writer: &mut dyn Write, specialize: bool) -> Result<()> {
    let items = value.as_list()?;
    if code.subtype() == subtype::LIST_SLIST {
        match plan_list(items, specialize) {
            ListPlan::Simple(elem_code) => write_slist_data(items, elem_code, writer, specialize),
            ListPlan::General | ListPlan::Empty => TypeErrSnafu {
                msg: "List elements are not all assignable to the declared SList kind".to_string(),
            }
            .fail(),
        }
    } else {
        write_glist_data(items, writer, specialize)
    }
}

fn write_glist_data(items: &[Value], writer: &mut dyn Write, specialize: bool) -> Result<()> {
    uint::write_length(items.len(), writer)?;
    for item in items {
        registry::encode_tagged(item, writer, specialize)?;
    }
    Ok(())
}

fn write_slist_data(
    items: &[Value],
    elem_code: CodeByte,
    writer: &mut dyn Write,
    specialize: bool,
) -> Result<()> {
    uint::write_length(items.len(), writer)?;
    elem_code.write(writer)?;
    if elem_code.base_type() == base_type::BOOL {
        write_packed_bools(items.iter(), writer)
    } else {
        for item in items {
            registry::write_data_for(item, elem_code, writer, specialize)?;
        }
        Ok(())
    }
}

/// Bit-pack `items` (each must be `Bool`) most-significant-bit first, the
/// final byte padded with zero bits in the low end.
pub(crate) fn write_packed_bools<'a>(
    items: impl Iterator<Item = &'a Value>,
    writer: &mut dyn Write,
) -> Result<()> {
    let mut out = Vec::new();
    let mut cur = 0u8;
    let mut nbits = 0u32;
    for item in items {
        let b = item.as_bool()?;
        cur = (cur << 1) | (b as u8);
        nbits += 1;
        if nbits == 8 {
            out.push(cur);
            cur = 0;
            nbits = 0;
        }
    }
    if nbits > 0 {
        cur <<= 8 - nbits;
        out.push(cur);
    }
    writer.write_all(&out).context(IoErrorSnafu)
}

/// Inverse of [`write_packed_bools`]: unpack `n` booleans from
/// `ceil(n/8)` bytes.
pub(crate) fn read_packed_bools(reader: &mut dyn Read, n: usize) -> Result<Vec<Value>> {
    let nbytes = n.div_ceil(8);
    let bytes = must_read_vec(reader, nbytes)?;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let byte = bytes[i / 8];
        let bit = 7 - (i % 8);
        out.push(Value::Bool((byte >> bit) & 1 != 0));
    }
    Ok(out)
}

pub(crate) fn decode_default(_reader: &mut dyn Read) -> Result<Value> {
    Ok(Value::List(Vec::new()))
}

pub(crate) fn decode_glist(reader: &mut dyn Read) -> Result<Value> {
    let n = uint::read_length(reader)?;
    let mut items = Vec::with_capacity(n);
    for _ in 0..n {
        items.push(registry::decode_tagged(reader)?);
    }
    Ok(Value::List(items))
}

pub(crate) fn decode_slist(reader: &mut dyn Read) -> Result<Value> {
    let n = uint::read_length(reader)?;
    let elem_code = CodeByte::read(reader)?;
    let items = if elem_code.base_type() == base_type::BOOL {
        read_packed_bools(reader, n)?
    } else {
        let mut v = Vec::with_capacity(n);
        for _ in 0..n {
            v.push(registry::decode_data_for(elem_code, reader)?);
        }
        v
    };
    Ok(Value::List(items))
}
