//! JIRA entities.
//!
//! Each entity wraps one JSON shape, is populated through
//! [`crate::api::field`], and offers static retrieval operations built on
//! [`crate::api::RestClient`].

mod attachment;
mod comment;
mod component;
mod issue_type;
mod link_type;
mod project;
mod time_tracking;
mod user;
mod version;
mod worklog;

use std::fmt;

pub use attachment::Attachment;
pub use comment::Comment;
pub use component::Component;
pub use issue_type::IssueType;
pub use link_type::LinkType;
pub use project::Project;
pub use time_tracking::TimeTracking;
pub use user::User;
pub use version::Version;
pub use worklog::WorkLog;

use crate::api::field::Timestamp;

/// Shared `"<created> by <author>"` rendering for comments and work logs.
fn fmt_created_by(
    f: &mut fmt::Formatter<'_>,
    created: Option<&Timestamp>,
    author: Option<&User>,
) -> fmt::Result {
    write!(
        f,
        "{} by {}",
        created.map(|c| c.to_rfc3339()).unwrap_or_default(),
        author.map(User::name).unwrap_or_default()
    )
}
