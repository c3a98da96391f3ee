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

//! The dynamically typed value BinON encodes and decodes.

use std::hash::{Hash, Hasher};

use bytes::Bytes;
use num_bigint::BigInt;

use crate::error::{Result, TypeErrSnafu};

/// A 32-bit or 64-bit IEEE 754 float. The variant the caller picks is the
/// variant `encode` starts from; with `specialize=true` a `F64` may still be
/// narrowed to `Float32` on the wire if that loses no precision, but the
/// in-memory `Value` itself is never mutated to reflect that choice.
#[derive(Debug, Clone, Copy)]
pub enum FloatValue {
    F32(f32),
    F64(f64),
}

impl FloatValue {
    /// Bit-pattern comparison, widening `F32` to `f64` first. Matches the
    /// wire-level precision test: `NaN` payloads compare equal only if their
    /// bit patterns are identical after widening, never by IEEE `==`.
    fn bits_eq(self, other: Self) -> bool {
        self.widen_bits() == other.widen_bits()
    }

    fn widen_bits(self) -> u64 {
        match self {
            FloatValue::F32(f) => (f as f64).to_bits(),
            FloatValue::F64(d) => d.to_bits(),
        }
    }
}

impl PartialEq for FloatValue {
    fn eq(&self, other: &Self) -> bool {
        self.bits_eq(*other)
    }
}
impl Eq for FloatValue {}

impl Hash for FloatValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.widen_bits().hash(state);
    }
}

/// A BinON value: the fixed universe of kinds the codec understands.
///
/// `Dict` stores key-value pairs in insertion order rather than as a
/// `HashMap`, since encoding must preserve a deterministic, caller-chosen
/// order (see spec's `Dict` invariants): a `HashMap`'s iteration order isn't
/// stable and would make `encode` non-reproducible across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Null,
    Bool(bool),
    Int(BigInt),
    Float(FloatValue),
    Buffer(Bytes),
    Str(String),
    List(Vec<Value>),
    Dict(Vec<(Value, Value)>),
}

/// The eight variant tags of [`Value`], used to key the encoder dispatch
/// table in `registry.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Buffer,
    Str,
    List,
    Dict,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Buffer(_) => ValueKind::Buffer,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
            Value::Dict(_) => ValueKind::Dict,
        }
    }

    /// Whether this value equals its kind's zero, the condition under which
    /// the code byte's default subtype elides the data region entirely.
    pub fn is_kind_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(i) => i.sign() == num_bigint::Sign::NoSign,
            Value::Float(f) => f.widen_bits() == 0.0f64.to_bits(),
            Value::Buffer(b) => b.is_empty(),
            Value::Str(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Dict(pairs) => pairs.is_empty(),
        }
    }

    pub(crate) fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => TypeErrSnafu {
                msg: "expected Bool".to_string(),
            }
            .fail(),
        }
    }

    pub(crate) fn as_int(&self) -> Result<&BigInt> {
        match self {
            Value::Int(i) => Ok(i),
            _ => TypeErrSnafu {
                msg: "expected Int".to_string(),
            }
            .fail(),
        }
    }

    pub(crate) fn as_float(&self) -> Result<FloatValue> {
        match self {
            Value::Float(f) => Ok(*f),
            _ => TypeErrSnafu {
                msg: "expected Float".to_string(),
            }
            .fail(),
        }
    }

    pub(crate) fn as_buffer(&self) -> Result<&[u8]> {
        match self {
            Value::Buffer(b) => Ok(b),
            _ => TypeErrSnafu {
                msg: "expected Buffer".to_string(),
            }
            .fail(),
        }
    }

    pub(crate) fn as_str(&self) -> Result<&str> {
        match self {
            Value::Str(s) => Ok(s),
            _ => TypeErrSnafu {
                msg: "expected Str".to_string(),
            }
            .fail(),
        }
    }

    pub(crate) fn as_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) => Ok(items),
            _ => TypeErrSnafu {
                msg: "expected List".to_string(),
            }
            .fail(),
        }
    }

    /// Consume a decoded `Bool`, failing with [`crate::error::BinonError::TypeErr`]
    /// if it's some other kind. Used by the crate's per-kind `decode_*` shortcuts.
    pub fn into_bool(self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(b),
            _ => TypeErrSnafu {
                msg: "expected Bool".to_string(),
            }
            .fail(),
        }
    }

    /// Consume a decoded `Int`.
    pub fn into_int(self) -> Result<BigInt> {
        match self {
            Value::Int(i) => Ok(i),
            _ => TypeErrSnafu {
                msg: "expected Int".to_string(),
            }
            .fail(),
        }
    }

    /// Consume a decoded `Str`.
    pub fn into_str(self) -> Result<String> {
        match self {
            Value::Str(s) => Ok(s),
            _ => TypeErrSnafu {
                msg: "expected Str".to_string(),
            }
            .fail(),
        }
    }

    pub(crate) fn as_dict(&self) -> Result<&[(Value, Value)]> {
        match self {
            Value::Dict(pairs) => Ok(pairs),
            _ => TypeErrSnafu {
                msg: "expected Dict".to_string(),
            }
            .fail(),
        }
    }
}

/// Validate that `pairs` has no duplicate keys under [`Value`]'s equality,
/// which for `Float` keys is IEEE bit-pattern equality rather than `==`.
pub(crate) fn ensure_no_duplicate_keys(pairs: &[(Value, Value)]) -> Result<()> {
    for (i, (key, _)) in pairs.iter().enumerate() {
        for (other, _) in &pairs[..i] {
            if other == key {
                return TypeErrSnafu {
                    msg: "Dict contains duplicate keys".to_string(),
                }
                .fail();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_bit_pattern_equality_treats_nan_consistently() {
        let a = FloatValue::F64(f64::NAN);
        let b = FloatValue::F64(f64::NAN);
        assert_eq!(a, b);
    }

    #[test]
    fn float32_widens_for_comparison_against_float64() {
        let a = FloatValue::F32(1.5);
        let b = FloatValue::F64(1.5);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_detection_covers_each_kind() {
        assert!(Value::Null.is_kind_zero());
        assert!(Value::Bool(false).is_kind_zero());
        assert!(!Value::Bool(true).is_kind_zero());
        assert!(Value::Int(BigInt::from(0)).is_kind_zero());
        assert!(Value::Float(FloatValue::F64(0.0)).is_kind_zero());
        assert!(Value::Buffer(Bytes::new()).is_kind_zero());
        assert!(Value::Str(String::new()).is_kind_zero());
        assert!(Value::List(vec![]).is_kind_zero());
        assert!(Value::Dict(vec![]).is_kind_zero());
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let pairs = vec![
            (Value::Int(BigInt::from(1)), Value::Null),
            (Value::Int(BigInt::from(1)), Value::Null),
        ];
        assert!(ensure_no_duplicate_keys(&pairs).is_err());
    }
}
