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

//! `Buffer`: a VarUInt length followed by that many raw bytes. No
//! specialized form beyond base; the default subtype covers the empty
//! buffer.

use std::io::{Read, Write};

use bytes::Bytes;
use snafu::ResultExt;

use crate::code_byte::{base_type, CodeByte, BASE_SUBTYPE, DEFAULT_SUBTYPE};
use crate::error::{IoErrorSnafu, Result};
use crate::io::must_read_vec;
use crate::value::Value;
use crate::varint::uint;

pub(crate) fn write_tagged(value: &Value, writer: &mut dyn Write, _specialize: bool) -> Result<()> {
    let buf = value.as_buffer()?;
    if buf.is_empty() {
        return CodeByte::new(base_type::BUFFER, DEFAULT_SUBTYPE).write(writer);
    }
    CodeByte::new(base_type::BUFFER, BASE_SUBTYPE).write(writer)?;
    write_data(value, writer)
}

pub(crate) fn write_data(value: &Value, writer: &mut dyn Write) -> Result<()> {
    let buf = value.as_buffer()?;
    uint::write_length(buf.len(), writer)?;
    writer.write_all(buf).context(IoErrorSnafu)
}

pub(crate) fn decode_default(_reader: &mut dyn Read) -> Result<Value> {
    Ok(Value::Buffer(Bytes::new()))
}

pub(crate) fn decode_base(reader: &mut dyn Read) -> Result<Value> {
    let n = uint::read_length(reader)?;
    Ok(Value::Buffer(Bytes::from(must_read_vec(reader, n)?)))
}
