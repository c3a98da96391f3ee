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

//! `Bool`: `false` is always the kind's zero (default subtype). `true`
//! specializes to `TrueObj` (one byte total) when `specialize` is set;
//! otherwise it's written as the base form, one data byte `0x01`.

use std::io::{Read, Write};

use snafu::ResultExt;

use crate::code_byte::{base_type, subtype, CodeByte, BASE_SUBTYPE, DEFAULT_SUBTYPE};
use crate::error::{IoErrorSnafu, Result};
use crate::io::read_u8;
use crate::optimizer::{plan_bool, BoolSubtype};
use crate::value::Value;

pub(crate) fn write_tagged(value: &Value, writer: &mut dyn Write, specialize: bool) -> Result<()> {
    let b = value.as_bool()?;
    if !b {
        return CodeByte::new(base_type::BOOL, DEFAULT_SUBTYPE).write(writer);
    }
    match plan_bool(b, specialize) {
        BoolSubtype::True => CodeByte::new(base_type::BOOL, subtype::BOOL_TRUE).write(writer),
        BoolSubtype::Base => {
            CodeByte::new(base_type::BOOL, BASE_SUBTYPE).write(writer)?;
            write_data(value, writer)
        }
    }
}

/// Write the one-byte `0x00`/`0x01` data form. Used both by `write_tagged`
/// and, directly, whenever `Bool` is an `SList` element (always base-form —
/// `TrueObj` is never a legal homogeneous element kind, see `DESIGN.md`).
pub(crate) fn write_data(value: &Value, writer: &mut dyn Write) -> Result<()> {
    let b = value.as_bool()?;
    writer.write_all(&[b as u8]).context(IoErrorSnafu)
}

pub(crate) fn decode_default(_reader: &mut dyn Read) -> Result<Value> {
    Ok(Value::Bool(false))
}

pub(crate) fn decode_true(_reader: &mut dyn Read) -> Result<Value> {
    Ok(Value::Bool(true))
}

pub(crate) fn decode_base(reader: &mut dyn Read) -> Result<Value> {
    Ok(Value::Bool(read_u8(reader)? != 0))
}
