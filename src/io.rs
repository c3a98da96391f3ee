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

//! Thin wrappers over [`std::io::Read`]/[`std::io::Write`], the two abstract
//! collaborators the codec consumes. A short read is promoted to
//! [`BinonError::EndOfFile`] rather than silently returning a partial buffer.

use std::io::Read;

use snafu::ResultExt;

use crate::error::{EndOfFileSnafu, IoErrorSnafu, Result};

/// Read exactly one byte, failing with [`BinonError::EndOfFile`] on EOF.
#[inline]
pub fn read_u8(reader: &mut impl Read) -> Result<u8> {
    let mut byte = [0u8; 1];
    must_read(reader, &mut byte)?;
    Ok(byte[0])
}

/// Read exactly `buf.len()` bytes, failing with [`BinonError::EndOfFile`] if
/// the source runs dry first.
///
/// Mirrors the original BinON implementation's `ioutil.MustRead`: a plain
/// `read()` is allowed to return fewer bytes than requested to signal EOF,
/// which `must_read` turns into a hard error instead of a partial buffer.
pub fn must_read(reader: &mut impl Read, buf: &mut [u8]) -> Result<()> {
    let requested = buf.len();
    let mut filled = 0;
    while filled < requested {
        let n = reader
            .read(&mut buf[filled..])
            .context(IoErrorSnafu)?;
        if n == 0 {
            return EndOfFileSnafu {
                requested,
                got: filled,
            }
            .fail();
        }
        filled += n;
    }
    Ok(())
}

/// Read `n` bytes into a freshly allocated buffer.
pub fn must_read_vec(reader: &mut impl Read, n: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; n];
    must_read(reader, &mut buf)?;
    Ok(buf)
}
