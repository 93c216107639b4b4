// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, BTreeSet};

#[must_use]
pub fn map_is_empty<K, V>(value: &BTreeMap<K, V>) -> bool {
    value.is_empty()
}

#[must_use]
pub fn set_is_empty<T>(value: &BTreeSet<T>) -> bool {
    value.is_empty()
}
