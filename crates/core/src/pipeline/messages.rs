//! User-facing status strings.

pub const WELCOME: &str =
    "Welcome to the offline download bot!\nSend a magnet link or a resource code to get started.";

pub const HELP: &str =
    "Usage:\n1. Send a magnet link to queue it directly\n2. Send a resource code to search for it";

/// Direct magnet link received.
pub const ADDING: &str = "Adding task...";

pub const SEARCHING: &str = "Searching for resource...";

pub const SEARCH_FAILED: &str = "Search failed, please check your input";

pub const FOUND: &str = "Resource found, adding...";

pub const SUBMITTED: &str = "✅ Download task added";

pub const SUBMIT_FAILED: &str = "❌ Failed to add task";

pub const AUTH_FAILED: &str = "❌ Failed to add task: could not log in to the storage backend";
