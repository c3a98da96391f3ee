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

//! The one-byte header that precedes almost every encoded value: a 4-bit
//! base type identifying the value's kind, and a 4-bit subtype that is
//! either a marker (`Default`/`Base`) or a specialization selector.

use std::io::{Read, Write};

use snafu::ResultExt;

use crate::error::{IoErrorSnafu, Result};
use crate::io::read_u8;

/// Subtype indicating the value equals its kind's zero and no payload
/// bytes follow.
pub const DEFAULT_SUBTYPE: u8 = 0;
/// Subtype indicating the unspecialized ("base") encoding of the kind.
pub const BASE_SUBTYPE: u8 = 1;

/// Base-type nibble assignments, bit-exact per the wire format.
pub mod base_type {
    pub const NULL: u8 = 0;
    pub const BOOL: u8 = 1;
    pub const INT: u8 = 2;
    pub const FLOAT: u8 = 3;
    pub const BUFFER: u8 = 4;
    pub const STR: u8 = 5;
    pub const LIST: u8 = 8;
    pub const DICT: u8 = 9;
}

/// Specialized-subtype assignments that have a fixed meaning across the
/// format (container element-kind subtypes are not listed here; they are
/// themselves full [`CodeByte`]s).
pub mod subtype {
    pub const BOOL_TRUE: u8 = 2;
    pub const INT_UINT: u8 = 2;
    pub const FLOAT_FLOAT32: u8 = 2;
    pub const LIST_SLIST: u8 = 2;
    pub const DICT_SKDICT: u8 = 2;
    pub const DICT_SDICT: u8 = 3;
}

/// One byte, split into a base-type nibble and a subtype nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeByte {
    base_type: u8,
    subtype: u8,
}

impl CodeByte {
    /// Build a code byte from a base type (0-15) and subtype (0-15).
    pub fn new(base_type: u8, subtype: u8) -> Self {
        debug_assert!(base_type <= 0x0F, "base_type must fit in 4 bits");
        debug_assert!(subtype <= 0x0F, "subtype must fit in 4 bits");
        Self { base_type, subtype }
    }

    /// Decompose a raw byte into base type / subtype nibbles.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            base_type: byte >> 4 & 0x0F,
            subtype: byte & 0x0F,
        }
    }

    pub fn base_type(self) -> u8 {
        self.base_type
    }

    pub fn subtype(self) -> u8 {
        self.subtype
    }

    pub fn is_default(self) -> bool {
        self.subtype == DEFAULT_SUBTYPE
    }

    pub fn is_base(self) -> bool {
        self.subtype == BASE_SUBTYPE
    }

    pub fn is_specialized(self) -> bool {
        self.subtype >= 2
    }

    /// Pack into the single wire byte.
    pub fn to_byte(self) -> u8 {
        (self.base_type << 4) | self.subtype
    }

    /// Read a code byte from the source.
    pub fn read(reader: &mut impl Read) -> Result<Self> {
        Ok(Self::from_byte(read_u8(reader)?))
    }

    /// Write the code byte to the sink.
    pub fn write(self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(&[self.to_byte()]).context(IoErrorSnafu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn splits_nibbles() {
        let cb = CodeByte::from_byte(0x92);
        assert_eq!(cb.base_type(), base_type::DICT);
        assert_eq!(cb.subtype(), subtype::DICT_SKDICT);
    }

    #[test]
    fn round_trips_through_wire() {
        let cb = CodeByte::new(base_type::LIST, subtype::LIST_SLIST);
        let mut buf = Vec::new();
        cb.write(&mut buf).unwrap();
        assert_eq!(buf, [0x82]);
        let mut cursor = Cursor::new(buf);
        assert_eq!(CodeByte::read(&mut cursor).unwrap(), cb);
    }

    #[test]
    fn classifies_subtype_markers() {
        assert!(CodeByte::new(base_type::BOOL, DEFAULT_SUBTYPE).is_default());
        assert!(CodeByte::new(base_type::BOOL, BASE_SUBTYPE).is_base());
        assert!(CodeByte::new(base_type::BOOL, subtype::BOOL_TRUE).is_specialized());
    }
}
