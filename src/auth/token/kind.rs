//! Token kinds held by a session.

// self
use crate::_prelude::*;

/// Distinguishes the two credentials a session carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
	/// Short-lived bearer credential attached to every authorized request.
	Access,
	/// Longer-lived credential used only to mint new access tokens.
	Refresh,
}
impl TokenKind {
	/// Both kinds, in the order they are cleared when a session ends.
	pub const ALL: [TokenKind; 2] = [TokenKind::Access, TokenKind::Refresh];

	/// Returns the storage key used for this kind.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenKind::Access => "access_token",
			TokenKind::Refresh => "refresh_token",
		}
	}
}
impl Display for TokenKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
