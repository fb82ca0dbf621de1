// Copyright 2025 bakri (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/editor/mod.rs
//!
//! Edit session layer
//!
//! The [`Controller`] mediates between a list view and the core: it owns the
//! repository and the conflict index, applies the caller-level rules the core
//! leaves out (duplicate check, conflict resolution, deletion rules, button
//! availability) and keeps the index invalidated after every write.
//!
//! It knows nothing about widgets, so any front-end (the CLI included) can
//! drive it.

pub mod controller;

pub use controller::{Assignment, ConflictPolicy, Controller, EditError, SlotActions, SlotRef, SlotRow};

#[cfg(test)]
mod tests;
