use serde::{Deserialize, Serialize};

use crate::board_data::BoardData;

/// A query from the host: a command, a nonce to correlate responses, the
/// puzzle, and per-query options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    nonce: i32,
    command: String,
    #[serde(default)]
    board: Option<BoardData>,
    #[serde(default)]
    options: MessageOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageOptions {
    /// `solve`: pick branch values at random instead of lowest-first.
    #[serde(default)]
    pub random: bool,
    /// `solve` with `random`: seed for reproducible results.
    #[serde(default)]
    pub seed: Option<u64>,
    /// `count`: stop after this many solutions; 0 counts without bound.
    #[serde(rename = "maxSolutions", default)]
    pub max_solutions: usize,
    /// `truecandidates`: per-candidate solution count cap.
    #[serde(rename = "maxSolutionsPerCandidate", default = "default_per_candidate")]
    pub max_solutions_per_candidate: usize,
}

fn default_per_candidate() -> usize {
    1
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            random: false,
            seed: None,
            max_solutions: 0,
            max_solutions_per_candidate: default_per_candidate(),
        }
    }
}

impl Message {
    pub fn new(nonce: i32, command: &str, board: BoardData) -> Self {
        Self {
            nonce,
            command: command.to_owned(),
            board: Some(board),
            options: MessageOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MessageOptions) -> Self {
        self.options = options;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("message serializes")
    }

    pub fn nonce(&self) -> i32 {
        self.nonce
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn board(&self) -> Option<&BoardData> {
        self.board.as_ref()
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }
}
