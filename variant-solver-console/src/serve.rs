//! Serves the JSON query protocol over stdin/stdout, one message per line.

use std::io::{self, BufRead, Write};

use variant_constraints::prelude::*;
use variant_solver_lib::prelude::*;

struct StdoutSendResult;

impl SendResult for StdoutSendResult {
    fn send_result(&mut self, result: &str) {
        println!("{}", result);
        let _ = io::stdout().flush();
    }
}

/// Reads one query message per line from stdin and writes responses to
/// stdout until EOF.
pub fn run(cancellation: Cancellation) {
    let mut handler = MessageHandler::new(Box::new(StdoutSendResult));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        handler.handle_message(&line, cancellation.clone());
    }
}
