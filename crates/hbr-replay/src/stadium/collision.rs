//! Collision mask and group bitfields.

use hbr_core::{ByteCursor, Result};
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

/// Named channels, highest bit first.
pub const CHANNELS: [(i32, &str); 6] = [
    (32, "wall"),
    (16, "blueKO"),
    (8, "redKO"),
    (4, "blue"),
    (2, "red"),
    (1, "ball"),
];

/// Channel names of a decoded mask.
pub type Channels = SmallVec<[&'static str; 6]>;

/// Decode a mask value into channel names.
///
/// `-1` is the "all channels" sentinel and yields `["all"]`. Otherwise
/// the names of the set bits are returned in descending bit order;
/// unnamed bits are ignored.
pub fn parse_mask(value: i32) -> Channels {
    if value == -1 {
        let mut all = Channels::new();
        all.push("all");
        return all;
    }
    CHANNELS
        .iter()
        .filter(|(bit, _)| value & bit != 0)
        .map(|&(_, name)| name)
        .collect()
}

/// A raw collision bitfield (`cMask` or `cGroup`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CollisionMask(pub i32);

impl CollisionMask {
    /// The "all channels" sentinel.
    pub const ALL: CollisionMask = CollisionMask(-1);

    /// Read a big-endian `i32` mask.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        c.read_i32_be().map(Self)
    }

    /// Channel names for this mask.
    pub fn channels(self) -> Channels {
        parse_mask(self.0)
    }
}

impl Serialize for CollisionMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.channels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sentinel_is_all() {
        assert_eq!(parse_mask(-1).as_slice(), &["all"]);
    }

    #[test]
    fn descending_bit_order() {
        assert_eq!(parse_mask(1 | 2 | 32).as_slice(), &["wall", "red", "ball"]);
        assert!(parse_mask(0).is_empty());
        assert!(parse_mask(64).is_empty());
    }

    #[test]
    fn serializes_as_names() {
        let json = serde_json::to_string(&CollisionMask(6)).unwrap();
        assert_eq!(json, r#"["blue","red"]"#);
    }

    proptest! {
        #[test]
        fn subset_round_trip(bits in prop::collection::vec(0usize..6, 0..6)) {
            let value = bits.iter().fold(0i32, |acc, &i| acc | CHANNELS[i].0);
            let mut expected: Vec<&str> = bits.iter().map(|&i| CHANNELS[i].1).collect();
            expected.sort_unstable();
            expected.dedup();
            let mut got = parse_mask(value).into_vec();
            got.sort_unstable();
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn names_match_set_bits(value in 0i32..64) {
            let names = parse_mask(value);
            prop_assert_eq!(names.len() as u32, value.count_ones());
        }
    }
}
