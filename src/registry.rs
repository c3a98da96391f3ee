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

//! Two dispatch tables, built once and shared read-only across calls:
//! `by_code_byte` (decode: code byte → data reader) and `by_kind` (encode:
//! source kind → tagged writer). Building both in one place avoids the
//! mutable-global-init-order hazards of registering codecs as a side effect
//! of importing each module.

use std::cell::Cell;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::OnceLock;

use crate::code_byte::{base_type, subtype, CodeByte, BASE_SUBTYPE, DEFAULT_SUBTYPE};
use crate::encoding::{boolean, bytes, dict, float, int, list, null, text};
use crate::error::{ParseErrSnafu, Result, TypeErrSnafu};
use crate::value::{Value, ValueKind};

type DecodeFn = fn(&mut dyn Read) -> Result<Value>;
type EncodeFn = fn(&Value, &mut dyn Write, bool) -> Result<()>;

/// Upper bound on `List`/`Dict` nesting. Not part of the wire format — a
/// defensive limit so a maliciously (or accidentally) deep input fails with
/// `ParseErr`/`TypeErr` rather than overflowing the stack, per spec's
/// "implementations should guard against unbounded stack growth".
const MAX_DEPTH: usize = 64;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// RAII guard that increments the per-thread recursion depth for the
/// lifetime of one container's encode/decode call and decrements it again
/// on return, success or failure.
struct DepthGuard;

impl DepthGuard {
    fn enter(err_msg: &str) -> Result<Self> {
        DEPTH.with(|depth| {
            let current = depth.get();
            if current >= MAX_DEPTH {
                return ParseErrSnafu {
                    msg: err_msg.to_string(),
                }
                .fail();
            }
            depth.set(current + 1);
            Ok(Self)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

struct Registry {
    by_code_byte: HashMap<CodeByte, DecodeFn>,
    by_kind: HashMap<ValueKind, EncodeFn>,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn build() -> Registry {
    let mut by_code_byte: HashMap<CodeByte, DecodeFn> = HashMap::new();
    let mut by_kind: HashMap<ValueKind, EncodeFn> = HashMap::new();

    by_code_byte.insert(CodeByte::new(base_type::NULL, DEFAULT_SUBTYPE), null::decode_default);
    by_kind.insert(ValueKind::Null, null::write_tagged);

    by_code_byte.insert(CodeByte::new(base_type::BOOL, DEFAULT_SUBTYPE), boolean::decode_default);
    by_code_byte.insert(CodeByte::new(base_type::BOOL, BASE_SUBTYPE), boolean::decode_base);
    by_code_byte.insert(CodeByte::new(base_type::BOOL, subtype::BOOL_TRUE), boolean::decode_true);
    by_kind.insert(ValueKind::Bool, boolean::write_tagged);

    by_code_byte.insert(CodeByte::new(base_type::INT, DEFAULT_SUBTYPE), int::decode_default);
    by_code_byte.insert(CodeByte::new(base_type::INT, BASE_SUBTYPE), int::decode_base);
    by_code_byte.insert(CodeByte::new(base_type::INT, subtype::INT_UINT), int::decode_uint);
    by_kind.insert(ValueKind::Int, int::write_tagged);

    by_code_byte.insert(CodeByte::new(base_type::FLOAT, DEFAULT_SUBTYPE), float::decode_default);
    by_code_byte.insert(CodeByte::new(base_type::FLOAT, BASE_SUBTYPE), float::decode_base);
    by_code_byte.insert(CodeByte::new(base_type::FLOAT, subtype::FLOAT_FLOAT32), float::decode_f32);
    by_kind.insert(ValueKind::Float, float::write_tagged);

    by_code_byte.insert(CodeByte::new(base_type::BUFFER, DEFAULT_SUBTYPE), bytes::decode_default);
    by_code_byte.insert(CodeByte::new(base_type::BUFFER, BASE_SUBTYPE), bytes::decode_base);
    by_kind.insert(ValueKind::Buffer, bytes::write_tagged);

    by_code_byte.insert(CodeByte::new(base_type::STR, DEFAULT_SUBTYPE), text::decode_default);
    by_code_byte.insert(CodeByte::new(base_type::STR, BASE_SUBTYPE), text::decode_base);
    by_kind.insert(ValueKind::Str, text::write_tagged);

    by_code_byte.insert(CodeByte::new(base_type::LIST, DEFAULT_SUBTYPE), list::decode_default);
    by_code_byte.insert(CodeByte::new(base_type::LIST, BASE_SUBTYPE), list::decode_glist);
    by_code_byte.insert(CodeByte::new(base_type::LIST, subtype::LIST_SLIST), list::decode_slist);
    by_kind.insert(ValueKind::List, list::write_tagged);

    by_code_byte.insert(CodeByte::new(base_type::DICT, DEFAULT_SUBTYPE), dict::decode_default);
    by_code_byte.insert(CodeByte::new(base_type::DICT, BASE_SUBTYPE), dict::decode_base);
    by_code_byte.insert(CodeByte::new(base_type::DICT, subtype::DICT_SKDICT), dict::decode_skdict);
    by_code_byte.insert(CodeByte::new(base_type::DICT, subtype::DICT_SDICT), dict::decode_sdict);
    by_kind.insert(ValueKind::Dict, dict::write_tagged);

    Registry { by_code_byte, by_kind }
}

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(build)
}

/// Read one code byte and dispatch to its decoder. The entry point for a
/// whole value, and the recursion hook for `GList`/`Dict`-base elements.
pub(crate) fn decode_tagged(reader: &mut dyn Read) -> Result<Value> {
    let code = CodeByte::read(reader)?;
    decode_data_for(code, reader)
}

/// Decode the data-only portion for an already-known code byte: used for
/// `SList`/`SDict` element regions, which share one code byte across `n`
/// elements, and by [`decode_tagged`] after it has consumed the byte.
///
/// Guarded by [`DepthGuard`] since this is the recursion hook `List`/`Dict`
/// element decoding calls back into for nested containers.
pub(crate) fn decode_data_for(code: CodeByte, reader: &mut dyn Read) -> Result<Value> {
    let _guard = DepthGuard::enter("List/Dict nesting exceeds the maximum decode depth")?;
    let decoder = registry().by_code_byte.get(&code).copied().ok_or_else(|| {
        ParseErrSnafu {
            msg: format!("unrecognized code byte 0x{:02X}", code.to_byte()),
        }
        .build()
    })?;
    decoder(reader)
}

/// Dispatch by `value`'s kind to its tagged writer (picks the default,
/// base, or specialized code byte and writes the matching data).
///
/// Guarded by [`DepthGuard`] since `List`/`Dict` elements recurse back into
/// this function for nested containers.
pub(crate) fn encode_tagged(value: &Value, writer: &mut dyn Write, specialize: bool) -> Result<()> {
    let _guard = DepthGuard::enter("List/Dict nesting exceeds the maximum encode depth")?;
    let encoder = registry().by_kind.get(&value.kind()).copied().ok_or_else(|| {
        TypeErrSnafu {
            msg: format!("no encoder registered for {:?}", value.kind()),
        }
        .build()
    })?;
    encoder(value, writer, specialize)
}

/// Write the data portion of `value` under an already-chosen `code`: used
/// for `SList`/`SDict` elements, which share one code byte across `n`
/// elements and so never re-derive their own (possibly narrower) choice.
///
/// Guarded by [`DepthGuard`] since nested `List`/`Dict` elements inside an
/// `SList`/`SDict` region recurse back into this function directly, without
/// passing back through [`encode_tagged`].
pub(crate) fn write_data_for(value: &Value, code: CodeByte, writer: &mut dyn Write, specialize: bool) -> Result<()> {
    let _guard = DepthGuard::enter("List/Dict nesting exceeds the maximum encode depth")?;
    match code.base_type() {
        base_type::NULL => Ok(()),
        base_type::BOOL => boolean::write_data(value, writer),
        base_type::INT => int::write_data(value, code, writer),
        base_type::FLOAT => float::write_data(value, code, writer),
        base_type::BUFFER => bytes::write_data(value, writer),
        base_type::STR => text::write_data(value, writer),
        base_type::LIST => list::write_data(value, code, writer, specialize),
        base_type::DICT => dict::write_data(value, code, writer, specialize),
        other => TypeErrSnafu {
            msg: format!("unrecognized base type {other}"),
        }
        .fail(),
    }
}
