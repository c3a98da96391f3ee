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

//! `Int`: arbitrary-precision signed. Non-negative values specialize to
//! `UInt` (VarUInt data form over the magnitude) when `specialize` is set;
//! otherwise, and for negative values, the base form uses VarSInt data.

use std::io::{Read, Write};

use num_bigint::BigInt;

use crate::code_byte::{base_type, subtype, CodeByte, BASE_SUBTYPE, DEFAULT_SUBTYPE};
use crate::error::Result;
use crate::optimizer::{plan_int, IntSubtype};
use crate::value::Value;
use crate::varint::{sint, uint};

pub(crate) fn write_tagged(value: &Value, writer: &mut dyn Write, specialize: bool) -> Result<()> {
    let i = value.as_int()?;
    if value.is_kind_zero() {
        return CodeByte::new(base_type::INT, DEFAULT_SUBTYPE).write(writer);
    }
    match plan_int(i, specialize) {
        IntSubtype::UInt => {
            CodeByte::new(base_type::INT, subtype::INT_UINT).write(writer)?;
            uint::write_data(i.magnitude(), writer)
        }
        IntSubtype::Base => {
            CodeByte::new(base_type::INT, BASE_SUBTYPE).write(writer)?;
            sint::write_data(i, writer)
        }
    }
}

/// Write the data portion for an already-chosen `code` (used for `SList`
/// elements sharing one code byte).
pub(crate) fn write_data(value: &Value, code: CodeByte, writer: &mut dyn Write) -> Result<()> {
    let i = value.as_int()?;
    if code.subtype() == subtype::INT_UINT {
        uint::write_data(i.magnitude(), writer)
    } else {
        sint::write_data(i, writer)
    }
}

pub(crate) fn decode_default(_reader: &mut dyn Read) -> Result<Value> {
    Ok(Value::Int(BigInt::from(0)))
}

pub(crate) fn decode_base(reader: &mut dyn Read) -> Result<Value> {
    Ok(Value::Int(sint::read_data(reader)?))
}

pub(crate) fn decode_uint(reader: &mut dyn Read) -> Result<Value> {
    Ok(Value::Int(BigInt::from(uint::read_data(reader)?)))
}
