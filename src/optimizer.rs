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

//! The specialization optimizer: given a value (or a slice of values that
//! will share one list/dict region), decide the tightest legal codec for
//! each node. This module holds pure decision functions only; the actual
//! byte-level writing lives in `encoding/*.rs`, which calls back into these
//! decisions rather than re-deriving them.

use num_bigint::Sign;

use crate::code_byte::{base_type, subtype, CodeByte, BASE_SUBTYPE};
use crate::value::Value;

/// The two legal subtypes for `Int`'s base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntSubtype {
    /// Signed `IntObj`, subtype 1.
    Base,
    /// Unsigned `UInt`, subtype 2 — legal only for non-negative values.
    UInt,
}

/// `Int`: non-negative values specialize to `UInt` when `specialize` is set.
/// Negative values always use the signed base form.
pub(crate) fn plan_int(value: &num_bigint::BigInt, specialize: bool) -> IntSubtype {
    if specialize && value.sign() != Sign::Minus {
        IntSubtype::UInt
    } else {
        IntSubtype::Base
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FloatSubtype {
    /// `FloatObj`, subtype 1, 8-byte binary64 payload.
    F64,
    /// `Float32`, subtype 2, 4-byte binary32 payload.
    F32,
}

/// `Float`: a caller-supplied `F32` is already as narrow as it gets. A
/// caller-supplied `F64` is narrowed to `Float32` when `specialize` is set
/// and the precision test (pack to binary32, unpack, compare bit patterns
/// against the original binary64 value) passes.
pub(crate) fn plan_float(value: &crate::value::FloatValue, specialize: bool) -> FloatSubtype {
    use crate::value::FloatValue::*;
    match value {
        F32(_) => FloatSubtype::F32,
        F64(d) => {
            if specialize {
                let narrowed = *d as f32;
                if (narrowed as f64).to_bits() == d.to_bits() {
                    return FloatSubtype::F32;
                }
            }
            FloatSubtype::F64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoolSubtype {
    /// `BoolObj`, subtype 1.
    Base,
    /// `TrueObj`, subtype 2 — legal only for `true`, and only outside an
    /// `SList` data region (see [`element_code_byte`]).
    True,
}

/// `Bool`: `true` specializes to `TrueObj` when `specialize` is set.
pub(crate) fn plan_bool(value: bool, specialize: bool) -> BoolSubtype {
    if specialize && value {
        BoolSubtype::True
    } else {
        BoolSubtype::Base
    }
}

/// What an `SList`-eligible scan decided for a `List` value.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ListPlan {
    /// No elements; the caller should use the code byte's default subtype.
    Empty,
    /// Elements don't share one base type (or there are none after all):
    /// fall back to the fully-tagged general list.
    General,
    /// All elements share `CodeByte` as their natural (non-default) code,
    /// so the list can drop per-element code bytes.
    Simple(CodeByte),
}

/// `List`: recursively plan every element's natural code byte (§`element_code_byte`),
/// then require every element to agree on base type. Among elements that
/// agree, the *least* specialized subtype observed becomes the shared
/// element class — matching the reference algorithm, which otherwise would
/// have to fall back all the way to `FloatObj` for "a list of floats, all
/// but one of them `Float32`".
pub(crate) fn plan_list(items: &[Value], specialize: bool) -> ListPlan {
    let mut codes = items.iter().map(|item| element_code_byte(item, specialize));
    let Some(mut common) = codes.next() else {
        return ListPlan::Empty;
    };
    for code in codes {
        if code.base_type() != common.base_type() {
            return ListPlan::General;
        }
        if code.subtype() < common.subtype() {
            common = code;
        }
    }
    ListPlan::Simple(common)
}

/// What an `SKDict`/`SDict`-eligible scan decided for a `Dict` value.
#[derive(Debug, Clone, Copy)]
pub(crate) enum DictPlan {
    Empty,
    /// Keys don't all share one base type: fully-tagged general dict.
    General,
    /// Keys share `CodeByte`, but values don't: `SKDict`.
    SKDict(CodeByte),
    /// Both keys and values share a `CodeByte` each: `SDict`.
    SDict(CodeByte, CodeByte),
}

/// `Dict`: plan keys and values each as an independent list-shaped scan,
/// then promote `SKDict` -> `SDict` only if values also turned out simple.
pub(crate) fn plan_dict(pairs: &[(Value, Value)], specialize: bool) -> DictPlan {
    if pairs.is_empty() {
        return DictPlan::Empty;
    }
    let keys: Vec<Value> = pairs.iter().map(|(k, _)| k.clone()).collect();
    match plan_list(&keys, specialize) {
        ListPlan::General | ListPlan::Empty => DictPlan::General,
        ListPlan::Simple(key_code) => {
            let values: Vec<Value> = pairs.iter().map(|(_, v)| v.clone()).collect();
            match plan_list(&values, specialize) {
                ListPlan::Simple(val_code) => DictPlan::SDict(key_code, val_code),
                _ => DictPlan::SKDict(key_code),
            }
        }
    }
}

/// The code byte `value` would be written with as an `SList`/`SDict`
/// element: the subtype the optimizer would pick, but *never* the
/// default-subtype shortcut (SList/SDict data regions have no default
/// slot, per spec) and never `Bool.TrueObj` (only `Bool`'s base class is a
/// legal homogeneous element kind for the bit-packed encoding; see
/// `DESIGN.md`).
pub(crate) fn element_code_byte(value: &Value, specialize: bool) -> CodeByte {
    match value {
        Value::Null => CodeByte::new(base_type::NULL, BASE_SUBTYPE),
        Value::Bool(_) => CodeByte::new(base_type::BOOL, BASE_SUBTYPE),
        Value::Int(i) => match plan_int(i, specialize) {
            IntSubtype::UInt => CodeByte::new(base_type::INT, subtype::INT_UINT),
            IntSubtype::Base => CodeByte::new(base_type::INT, BASE_SUBTYPE),
        },
        Value::Float(f) => match plan_float(f, specialize) {
            FloatSubtype::F32 => CodeByte::new(base_type::FLOAT, subtype::FLOAT_FLOAT32),
            FloatSubtype::F64 => CodeByte::new(base_type::FLOAT, BASE_SUBTYPE),
        },
        Value::Buffer(_) => CodeByte::new(base_type::BUFFER, BASE_SUBTYPE),
        Value::Str(_) => CodeByte::new(base_type::STR, BASE_SUBTYPE),
        Value::List(items) => match plan_list(items, specialize) {
            ListPlan::Simple(_) => CodeByte::new(base_type::LIST, subtype::LIST_SLIST),
            ListPlan::General | ListPlan::Empty => CodeByte::new(base_type::LIST, BASE_SUBTYPE),
        },
        Value::Dict(pairs) => match plan_dict(pairs, specialize) {
            DictPlan::SDict(..) => CodeByte::new(base_type::DICT, subtype::DICT_SDICT),
            DictPlan::SKDict(_) => CodeByte::new(base_type::DICT, subtype::DICT_SKDICT),
            DictPlan::General | DictPlan::Empty => CodeByte::new(base_type::DICT, BASE_SUBTYPE),
        },
    }
}
