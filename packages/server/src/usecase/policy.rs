//! 投稿ポリシー

use std::fmt;

use clap::ValueEnum;

/// Which authors may post to an existing room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PostPolicy {
    /// Any author name may post, registered or not
    #[default]
    Open,
    /// The author must be a registered user
    RegisteredOnly,
    /// The author must be a registered member of the room
    MembersOnly,
}

impl PostPolicy {
    pub fn requires_registration(self) -> bool {
        matches!(self, Self::RegisteredOnly | Self::MembersOnly)
    }

    pub fn requires_membership(self) -> bool {
        matches!(self, Self::MembersOnly)
    }
}

impl fmt::Display for PostPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::RegisteredOnly => "registered-only",
            Self::MembersOnly => "members-only",
        };
        f.write_str(name)
    }
}
