//! Vote entity and the directional-vote state machine
//!
//! A vote is one voter's signed weight on a single target. Repeating a
//! direction that already pushed the weight to its extreme is a no-op;
//! the opposite direction first returns the weight to zero and only a
//! further action crosses it. The reachable weight set is {-1, 0, +1}.

use crate::value_objects::Snowflake;

/// Kind discriminator for votable targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum VoteTargetKind {
    Question = 1,
    Answer = 2,
}

impl VoteTargetKind {
    /// Parse the kind from its wire name (`"question"` / `"answer"`)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "question" => Some(Self::Question),
            "answer" => Some(Self::Answer),
            _ => None,
        }
    }

    /// Stored discriminator value
    #[inline]
    pub const fn as_i16(self) -> i16 {
        self as i16
    }

    /// Reverse of [`as_i16`](Self::as_i16)
    pub const fn from_i16(v: i16) -> Option<Self> {
        match v {
            1 => Some(Self::Question),
            2 => Some(Self::Answer),
            _ => None,
        }
    }

    /// Wire name of the kind
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Answer => "answer",
        }
    }
}

/// The votable a vote points at: exactly one of question or answer
///
/// Stored as discriminator + id; two nullable columns are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteTarget {
    Question(Snowflake),
    Answer(Snowflake),
}

impl VoteTarget {
    #[inline]
    pub const fn kind(&self) -> VoteTargetKind {
        match self {
            Self::Question(_) => VoteTargetKind::Question,
            Self::Answer(_) => VoteTargetKind::Answer,
        }
    }

    #[inline]
    pub const fn id(&self) -> Snowflake {
        match self {
            Self::Question(id) | Self::Answer(id) => *id,
        }
    }

    /// Rebuild from the stored (discriminator, id) pair
    pub const fn from_parts(kind: VoteTargetKind, id: Snowflake) -> Self {
        match kind {
            VoteTargetKind::Question => Self::Question(id),
            VoteTargetKind::Answer => Self::Answer(id),
        }
    }
}

/// A directional vote intent: up (+1) or down (-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Construct from a raw value; only exactly +1 and -1 are directions
    pub const fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Up),
            -1 => Some(Self::Down),
            _ => None,
        }
    }

    /// Signed weight delta of this direction
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Outcome of applying a direction to an existing vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// Same-sign request: nothing changes, no write should occur
    Unchanged,
    /// The weight moves; the new value must be persisted
    Updated(i32),
}

/// Vote entity - one voter's signed weight on one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: Snowflake,
    pub voter_id: Snowflake,
    pub target: VoteTarget,
    pub weight: i32,
}

impl Vote {
    /// Create the vote written on a voter's first action on a target
    pub fn first(id: Snowflake, voter_id: Snowflake, target: VoteTarget, direction: VoteDirection) -> Self {
        Self {
            id,
            voter_id,
            target,
            weight: direction.value(),
        }
    }

    /// Apply a direction to the current weight
    ///
    /// Same sign (including repeating a vote already at its extreme) is a
    /// no-op; opposite sign or a zero weight accumulates the direction.
    pub fn apply(&self, direction: VoteDirection) -> VoteTransition {
        if self.weight * direction.value() > 0 {
            VoteTransition::Unchanged
        } else {
            VoteTransition::Updated(self.weight + direction.value())
        }
    }
}

/// An item paired with its aggregated rank
///
/// Rank is derived at read time as the sum of vote weights referencing the
/// item; it is never stored on the item itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<T> {
    pub item: T,
    pub rank: i64,
}

impl<T> Ranked<T> {
    pub fn new(item: T, rank: i64) -> Self {
        Self { item, rank }
    }
}
