// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::fmt::Display;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShipId(i64);

impl ShipId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        ShipId(id)
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ShipId({})", self.0)
    }
}

impl From<i64> for ShipId {
    fn from(value: i64) -> Self {
        ShipId(value)
    }
}

/// Identifier of a compartment (cargo hold) within a ship's allocation.
///
/// Allocation rows without a compartment carry [`CompartmentId::UNSET`].
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompartmentId(i64);

impl CompartmentId {
    pub const UNSET: CompartmentId = CompartmentId(-1);

    #[inline]
    pub const fn new(id: i64) -> Self {
        CompartmentId(id)
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_unset(self) -> bool {
        self.0 == Self::UNSET.0
    }
}

impl Default for CompartmentId {
    #[inline]
    fn default() -> Self {
        Self::UNSET
    }
}

impl Display for CompartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompartmentId({})", self.0)
    }
}

impl From<i64> for CompartmentId {
    fn from(value: i64) -> Self {
        CompartmentId(value)
    }
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BerthId(i64);

impl BerthId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        BerthId(id)
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl Display for BerthId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BerthId({})", self.0)
    }
}

impl From<i64> for BerthId {
    fn from(value: i64) -> Self {
        BerthId(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compartment_defaults_to_unset() {
        let k = CompartmentId::default();
        assert!(k.is_unset());
        assert_eq!(k.value(), -1);
        assert!(!CompartmentId::new(0).is_unset());
    }

    #[test]
    fn ids_order_by_value() {
        let mut ships = vec![ShipId::new(3), ShipId::new(-2), ShipId::new(10)];
        ships.sort();
        assert_eq!(
            ships.iter().map(|s| s.value()).collect::<Vec<_>>(),
            vec![-2, 3, 10]
        );
    }

    #[test]
    fn display_wraps_value() {
        assert_eq!(ShipId::from(4).to_string(), "ShipId(4)");
        assert_eq!(BerthId::from(2).to_string(), "BerthId(2)");
        assert_eq!(CompartmentId::UNSET.to_string(), "CompartmentId(-1)");
    }
}
