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

//! `Null`: one code byte, no payload, no base or specialized form.

use std::io::{Read, Write};

use crate::code_byte::{base_type, CodeByte, DEFAULT_SUBTYPE};
use crate::error::Result;
use crate::value::Value;

pub(crate) fn write_tagged(_value: &Value, writer: &mut dyn Write, _specialize: bool) -> Result<()> {
    CodeByte::new(base_type::NULL, DEFAULT_SUBTYPE).write(writer)
}

pub(crate) fn decode_default(_reader: &mut dyn Read) -> Result<Value> {
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_single_zero_byte() {
        let mut buf = Vec::new();
        write_tagged(&Value::Null, &mut buf, true).unwrap();
        assert_eq!(buf, vec![0x00]);
    }
}
