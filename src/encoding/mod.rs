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

//! Per-kind codecs. Each module owns one [`crate::value::ValueKind`]: it
//! knows how to pick its own default/base/specialized code byte and how to
//! read/write the data that follows. Containers (`list`, `dict`) recurse
//! back into [`crate::registry`] for their elements.

pub(crate) mod boolean;
pub(crate) mod bytes;
pub(crate) mod dict;
pub(crate) mod float;
pub(crate) mod int;
pub(crate) mod list;
pub(crate) mod null;
pub(crate) mod text;
