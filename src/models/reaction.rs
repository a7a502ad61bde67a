//! Emoji reaction counters attached to every changelog entry.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The closed set of reaction kinds, in display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    #[serde(rename = "👍")]
    ThumbsUp,
    #[serde(rename = "❤️")]
    Heart,
    #[serde(rename = "🎉")]
    Party,
    #[serde(rename = "👀")]
    Eyes,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 4] = [
        ReactionKind::ThumbsUp,
        ReactionKind::Heart,
        ReactionKind::Party,
        ReactionKind::Eyes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::ThumbsUp => "👍",
            ReactionKind::Heart => "❤️",
            ReactionKind::Party => "🎉",
            ReactionKind::Eyes => "👀",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    fn slot(self) -> usize {
        match self {
            ReactionKind::ThumbsUp => 0,
            ReactionKind::Heart => 1,
            ReactionKind::Party => 2,
            ReactionKind::Eyes => 3,
        }
    }
}

/// One counter. `user_reacted` is omitted from JSON until set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    #[serde(rename = "type")]
    pub kind: ReactionKind,
    pub count: u64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub user_reacted: bool,
}

impl Reaction {
    fn zero(kind: ReactionKind) -> Self {
        Self {
            kind,
            count: 0,
            user_reacted: false,
        }
    }
}

/// Fixed record holding exactly one counter per [`ReactionKind`].
///
/// Serialized as an ordered list `[{ "type": "👍", "count": 0 }, ...]`.
/// Counters only ever go up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reactions([Reaction; 4]);

impl Reactions {
    pub fn zeroed() -> Self {
        Self(ReactionKind::ALL.map(Reaction::zero))
    }

    /// Counters in [`ReactionKind::ALL`] order, none marked as reacted.
    pub fn with_counts(counts: [u64; 4]) -> Self {
        let mut reactions = Self::zeroed();
        for (slot, count) in reactions.0.iter_mut().zip(counts) {
            slot.count = count;
        }
        reactions
    }

    pub fn get(&self, kind: ReactionKind) -> &Reaction {
        &self.0[kind.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reaction> {
        self.0.iter()
    }

    /// Bump one counter and flag it as reacted. Not idempotent.
    pub fn record(&mut self, kind: ReactionKind) {
        let slot = &mut self.0[kind.slot()];
        slot.count = slot.count.saturating_add(1);
        slot.user_reacted = true;
    }
}

impl Default for Reactions {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl TryFrom<Vec<Reaction>> for Reactions {
    type Error = String;

    fn try_from(list: Vec<Reaction>) -> Result<Self, Self::Error> {
        let mut seen: [Option<Reaction>; 4] = [None; 4];
        for reaction in list {
            let slot = &mut seen[reaction.kind.slot()];
            if slot.is_some() {
                return Err(format!("duplicate reaction {}", reaction.kind.as_str()));
            }
            *slot = Some(reaction);
        }

        let mut reactions = Self::zeroed();
        for kind in ReactionKind::ALL {
            reactions.0[kind.slot()] = seen[kind.slot()]
                .ok_or_else(|| format!("missing reaction {}", kind.as_str()))?;
        }
        Ok(reactions)
    }
}

impl Serialize for Reactions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for Reactions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let list = Vec::<Reaction>::deserialize(deserializer)?;
        Reactions::try_from(list).map_err(D::Error::custom)
    }
}
