#![forbid(unsafe_code)]

pub mod ids {
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use sha2::{Digest, Sha256};

    pub const ID_LENGTH: usize = 4;

    /// Short, stable identifier derived from the exact task text.
    ///
    /// Two tasks with identical text share an identity; editing the text of a
    /// task gives it a new one.
    pub fn generate_id(text: &str) -> String {
        let digest = Sha256::digest(text.as_bytes());
        let encoded = URL_SAFE_NO_PAD.encode(digest);
        // Ids stay within [A-Za-z0-9_]; the base64-url `-` is dropped.
        let word: Vec<char> = encoded
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
            .collect();
        let skip = word.len().saturating_sub(ID_LENGTH);
        word[skip..].iter().collect()
    }

    /// Structural check only: does this look like a generated id?
    pub fn is_id(value: &str) -> bool {
        value.chars().count() == ID_LENGTH
            && value
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    }
}

pub mod config {
    /// Immutable per-process configuration. Constructed once at startup and
    /// passed into every component that needs it; nothing reads it ambiently.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Config {
        pub statuses: Vec<String>,
        pub status_wip: String,
        pub status_todo: String,
        pub status_done: String,
        pub status_deleted: String,
        pub status_notes: String,
        pub status_reminders: String,
        pub auto_wip: bool,
        pub keep_deleted: bool,
        pub instructions: String,
    }

    impl Default for Config {
        fn default() -> Self {
            Self {
                statuses: vec!["Backlog".to_string()],
                status_wip: "In Progress".to_string(),
                status_todo: "To Do".to_string(),
                status_done: "Done".to_string(),
                status_deleted: "Deleted".to_string(),
                status_notes: "Notes".to_string(),
                status_reminders: "Reminders".to_string(),
                auto_wip: true,
                keep_deleted: false,
                instructions: String::new(),
            }
        }
    }

    impl Config {
        /// Augments `statuses` so the known triad is always present: To Do and
        /// the WIP status go to the front, Done to the back, and the Deleted
        /// status joins only when retention is on.
        pub fn normalized(mut self) -> Self {
            if !self.statuses.contains(&self.status_todo) {
                self.statuses.insert(0, self.status_todo.clone());
            }
            if !self.statuses.contains(&self.status_wip) {
                self.statuses.insert(0, self.status_wip.clone());
            }
            if !self.statuses.contains(&self.status_done) {
                self.statuses.push(self.status_done.clone());
            }
            if self.keep_deleted && !self.statuses.contains(&self.status_deleted) {
                self.statuses.push(self.status_deleted.clone());
            }
            self
        }

        pub fn is_configured(&self, group: &str) -> bool {
            self.statuses.iter().any(|status| status == group)
        }

        /// Groups that are left out of a written file while they have no tasks.
        pub fn skip_if_empty(&self, group: &str) -> bool {
            group == self.status_deleted
                || group == self.status_notes
                || group == self.status_reminders
        }
    }
}

pub mod model {
    use indexmap::IndexMap;
    use serde::{Deserialize, Serialize};

    /// The persisted shape: an ordered mapping from status name to the ordered
    /// task texts filed under it. Nothing else is stored.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct State {
        #[serde(default)]
        pub groups: IndexMap<String, Vec<String>>,
    }

    impl State {
        pub fn total(&self) -> usize {
            self.groups.values().map(Vec::len).sum()
        }
    }

    /// Derived view of one task; recomputed on every projection, never stored.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize)]
    pub struct Task {
        pub id: String,
        pub text: String,
        pub status: String,
        pub index: usize,
    }

    /// A registered backing file. `id` is derived from the path.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Source {
        pub id: String,
        pub path: String,
        pub workspace: String,
    }
}

pub mod text {
    /// Lowercased, word characters only, runs of anything else collapsed to a
    /// single space.
    pub fn canonical(value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut pending_space = false;
        for ch in value.chars() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(ch.to_ascii_lowercase());
            } else {
                pending_space = true;
            }
        }
        out
    }

    /// Case- and punctuation-insensitive substring match.
    pub fn fuzzy_contains(haystack: &str, term: &str) -> bool {
        canonical(haystack).contains(&canonical(term))
    }
}
