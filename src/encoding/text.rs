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

//! `Str`: identical wire shape to `Buffer`, but the bytes must be valid
//! UTF-8; the decoder rejects ill-formed text with `ParseErr`.

use std::io::{Read, Write};

use snafu::ResultExt;

use crate::code_byte::{base_type, CodeByte, BASE_SUBTYPE, DEFAULT_SUBTYPE};
use crate::error::{IoErrorSnafu, ParseErrSnafu, Result};
use crate::io::must_read_vec;
use crate::value::Value;
use crate::varint::uint;

pub(crate) fn write_tagged(value: &Value, writer: &mut dyn Write, _specialize: bool) -> Result<()> {
    let s = value.as_str()?;
    if s.is_empty() {
        return CodeByte::new(base_type::STR, DEFAULT_SUBTYPE).write(writer);
    }
    CodeByte::new(base_type::STR, BASE_SUBTYPE).write(writer)?;
    write_data(value, writer)
}

pub(crate) fn write_data(value: &Value, writer: &mut dyn Write) -> Result<()> {
    let bytes = value.as_str()?.as_bytes();
    uint::write_length(bytes.len(), writer)?;
    writer.write_all(bytes).context(IoErrorSnafu)
}

pub(crate) fn decode_default(_reader: &mut dyn Read) -> Result<Value> {
    Ok(Value::Str(String::new()))
}

pub(crate) fn decode_base(reader: &mut dyn Read) -> Result<Value> {
    let n = uint::read_length(reader)?;
    let bytes = must_read_vec(reader, n)?;
    let s = String::from_utf8(bytes).map_err(|e| {
        ParseErrSnafu {
            msg: format!("Str payload is not valid UTF-8: {e}"),
        }
        .build()
    })?;
    Ok(Value::Str(s))
}
