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

use snafu::prelude::*;
use snafu::Location;

/// Errors raised by the BinON codec.
///
/// All four variants are fatal to the encode/decode call that raised them;
/// there is no internal retry and no partial result.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum BinonError {
    /// Raised by the encoder when a value's kind has no registered encoder,
    /// when an `SList`/`SDict` element doesn't match its declared element
    /// kind, or when a `Dict` contains duplicate keys.
    #[snafu(display("type error: {}", msg))]
    TypeErr {
        msg: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Raised by the decoder on an unrecognized code byte, a malformed
    /// VarUInt/VarSInt header, or invalid UTF-8 in a `Str`.
    #[snafu(display("parse error: {}", msg))]
    ParseErr {
        msg: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Raised when the byte source returned fewer bytes than requested.
    #[snafu(display("end of file: requested {} bytes, got {}", requested, got))]
    EndOfFile {
        requested: usize,
        got: usize,
        #[snafu(implicit)]
        location: Location,
    },

    /// Raised when the underlying reader/writer itself failed.
    #[snafu(display("io error: {}", source))]
    IoError {
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = BinonError> = std::result::Result<T, E>;

impl From<std::io::Error> for BinonError {
    fn from(source: std::io::Error) -> Self {
        IoErrorSnafu.into_error(source)
    }
}
