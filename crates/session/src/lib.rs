//! Single-user statement session.
//!
//! [`StatementSession`] owns everything one user works on at a time: the
//! selected member, the period, the fetched ledger, the sort direction, the
//! rendered table and the last export. User actions arrive one at a time as
//! method calls or as a [`Command`] and always come back as a [`Notice`].

pub mod command;
pub mod error;
pub mod member;
pub mod notice;
pub mod session;

pub use command::Command;
pub use error::{SessionError, SessionResult};
pub use member::MemberProfile;
pub use notice::{Notice, NoticeLevel};
pub use session::StatementSession;

#[cfg(test)]
mod tests;
