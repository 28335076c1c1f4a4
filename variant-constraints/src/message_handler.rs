//! Contains [`MessageHandler`], which executes queries against a message
//! sink.

pub mod message;
pub mod responses;

use std::time::Instant;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use variant_solver_lib::prelude::*;

use crate::puzzle_parser::PuzzleParser;

use self::message::*;
use self::responses::*;

/// Where responses go. Queries may stream more than one response (count
/// progress, say) before the final one.
pub trait SendResult {
    fn send_result(&mut self, result: &str);
}

/// Executes query messages and writes JSON responses to a [`SendResult`]
/// sink.
pub struct MessageHandler {
    send_result: Box<dyn SendResult>,
    cancellation: Cancellation,
    parser: PuzzleParser,
}

impl MessageHandler {
    pub fn new(send_result: Box<dyn SendResult>) -> Self {
        Self {
            send_result,
            cancellation: Cancellation::default(),
            parser: PuzzleParser::new(),
        }
    }

    fn send_result(&mut self, result: &str) {
        self.send_result.send_result(result);
    }

    /// Handles one query message. The cancellation token is polled
    /// throughout the query; flipping it ends the query with a `cancelled`
    /// response.
    pub fn handle_message(&mut self, message: &str, cancellation: Cancellation) {
        self.cancellation = cancellation;

        if self.cancellation.check() {
            return;
        }

        let message = match Message::from_json(message) {
            Ok(message) => message,
            Err(error) => {
                let response = InvalidResponse::new(0, &error.to_string()).to_json();
                self.send_result(&response);
                return;
            }
        };
        let nonce = message.nonce();

        if message.command() == "cancel" {
            let response = CancelledResponse::new(nonce).to_json();
            self.send_result(&response);
            return;
        }

        let Some(board) = message.board() else {
            let response = InvalidResponse::new(nonce, "No board provided.").to_json();
            self.send_result(&response);
            return;
        };

        // Brute-force queries see only the real givens; logical queries also
        // see the solver progress recorded in the grid.
        let only_givens = matches!(
            message.command(),
            "solve" | "count" | "check" | "truecandidates"
        );

        let solver = match self.parser.parse_board(board, !only_givens) {
            Ok(solver) => solver,
            Err(error) => {
                let response = InvalidResponse::new(nonce, &error).to_json();
                self.send_result(&response);
                return;
            }
        };

        let options = message.options().clone();
        let result = match message.command() {
            "solve" => self.solve(nonce, solver, &options),
            "count" => self.count(nonce, solver, options.max_solutions),
            "check" => self.count(nonce, solver, 2),
            "truecandidates" => self.true_candidates(nonce, solver, &options),
            "step" => self.step(nonce, solver),
            "logicalsolve" => self.logical_solve(nonce, solver),
            other => InvalidResponse::new(nonce, &format!("Unknown command: {}", other)).to_json(),
        };

        self.send_result(&result);
    }

    fn solve(&mut self, nonce: i32, solver: Solver, options: &MessageOptions) -> String {
        let cancellation = self.cancellation.clone();
        let result = if options.random {
            let mut rng = match options.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            solver.find_random_solution(&mut rng, &cancellation)
        } else {
            solver.find_first_solution(&cancellation)
        };

        match result {
            SingleSolutionResult::Solved(board) => {
                let solution: Vec<usize> =
                    board.all_cells().map(|cell| board.value(cell)).collect();
                SolutionResponse::new(nonce, &solution).to_json()
            }
            SingleSolutionResult::None => NoSolutionResponse::new(nonce).to_json(),
            SingleSolutionResult::Cancelled => CancelledResponse::new(nonce).to_json(),
            SingleSolutionResult::Error(error) => InvalidResponse::new(nonce, &error).to_json(),
        }
    }

    fn count(&mut self, nonce: i32, solver: Solver, max_solutions: usize) -> String {
        let cancellation = self.cancellation.clone();
        let result = if max_solutions > 0 {
            solver.find_solution_count(max_solutions, None, &cancellation)
        } else {
            let mut receiver =
                ReportCountSolutionReceiver::new(nonce, self.send_result.as_mut());
            solver.find_solution_count(0, Some(&mut receiver), &cancellation)
        };

        match result {
            SolutionCountResult::None => CountResponse::new(nonce, 0, true, false).to_json(),
            SolutionCountResult::ExactCount(count)
            | SolutionCountResult::AtLeastCount(count) => {
                CountResponse::new(nonce, count as u64, true, false).to_json()
            }
            SolutionCountResult::Cancelled(count) => {
                CountResponse::new(nonce, count as u64, false, true).to_json()
            }
            SolutionCountResult::Error(error) => InvalidResponse::new(nonce, &error).to_json(),
        }
    }

    fn true_candidates(&mut self, nonce: i32, solver: Solver, options: &MessageOptions) -> String {
        let max_per_candidate = options.max_solutions_per_candidate.max(1);
        let counting = max_per_candidate > 1;
        let cancellation = self.cancellation.clone();
        let result = if counting {
            solver.find_true_candidates_with_count(max_per_candidate, &cancellation)
        } else {
            solver.find_true_candidates(&cancellation)
        };

        match result {
            TrueCandidatesResult::None => {
                InvalidResponse::new(nonce, "No solutions found.").to_json()
            }
            TrueCandidatesResult::Solved(board) => {
                let counts = counting.then(|| {
                    let mut counts = vec![0; board.num_candidates()];
                    let cu = board.cell_utility();
                    for cell in board.all_cells() {
                        counts[cu.candidate(cell, board.value(cell)).index()] = 1;
                    }
                    counts
                });
                let candidates = board
                    .all_cells()
                    .map(|cell| CandidateCell::given(board.value(cell)))
                    .collect();
                TrueCandidatesResponse::new(nonce, candidates, counts).to_json()
            }
            TrueCandidatesResult::Candidates(board, counts) => {
                let candidates = Self::expanded_candidates_of(&board);
                TrueCandidatesResponse::new(nonce, candidates, counts).to_json()
            }
            TrueCandidatesResult::Cancelled => CancelledResponse::new(nonce).to_json(),
            TrueCandidatesResult::Error(error) => InvalidResponse::new(nonce, &error).to_json(),
        }
    }

    fn step(&mut self, nonce: i32, mut solver: Solver) -> String {
        if solver.board().is_solved() {
            return StepResponse::new(nonce, "Solved!", None, false, false).to_json();
        }

        // The first step on a freshly imported board is materializing the
        // computed candidates, when they differ from the marks on the grid.
        if let Some(original_marks) = solver.get_custom_info("OriginalCenterMarks") {
            if original_marks != Self::center_marks_string(solver.board()) {
                let candidates = Self::expanded_candidates(&solver);
                return StepResponse::new(nonce, "Initial Candidates", Some(candidates), false, true)
                    .to_json();
            }
        }

        match solver.run_single_logical_step() {
            LogicalStepResult::None => {
                StepResponse::new(nonce, "No logical steps found.", None, false, false).to_json()
            }
            LogicalStepResult::Changed(desc) => {
                let desc = desc
                    .map(|desc| desc.to_string())
                    .unwrap_or_else(|| "Changed.".to_owned());
                let candidates = Self::expanded_candidates(&solver);
                StepResponse::new(nonce, &desc, Some(candidates), false, true).to_json()
            }
            LogicalStepResult::Invalid(desc) => {
                let desc = desc
                    .map(|desc| desc.to_string())
                    .unwrap_or_else(|| "Board is invalid!".to_owned());
                let candidates = Self::expanded_candidates(&solver);
                StepResponse::new(nonce, &desc, Some(candidates), true, true).to_json()
            }
        }
    }

    fn logical_solve(&mut self, nonce: i32, mut solver: Solver) -> String {
        let result = solver.run_logical_solve();
        let candidates = Self::expanded_candidates(&solver);

        match result {
            LogicalSolveResult::None => LogicalSolveResponse::new(
                nonce,
                vec!["No logical steps found.".to_owned()],
                Some(candidates),
                false,
                false,
            )
            .to_json(),
            LogicalSolveResult::Changed(desc) | LogicalSolveResult::Solved(desc) => {
                let desc = desc.iter().map(|step| step.to_string()).collect();
                LogicalSolveResponse::new(nonce, desc, Some(candidates), false, true).to_json()
            }
            LogicalSolveResult::Invalid(desc) => {
                let mut desc: Vec<String> = desc.iter().map(|step| step.to_string()).collect();
                desc.push("Board is invalid!".to_owned());
                LogicalSolveResponse::new(nonce, desc, Some(candidates), true, true).to_json()
            }
        }
    }

    fn expanded_candidates(solver: &Solver) -> Vec<CandidateCell> {
        Self::expanded_candidates_of(solver.board())
    }

    fn expanded_candidates_of(board: &Board) -> Vec<CandidateCell> {
        board
            .all_cells()
            .map(|cell| {
                if board.is_given(cell) {
                    CandidateCell::given(board.value(cell))
                } else {
                    CandidateCell::Values(values_from_mask(board.candidates(cell)).collect())
                }
            })
            .collect()
    }

    /// The board's candidates in the same encoding as the input's center
    /// marks: one cell per `;`, values joined with `,`, solved cells empty.
    fn center_marks_string(board: &Board) -> String {
        board
            .all_cells()
            .map(|cell| {
                let mask = board.candidates(cell);
                if board.is_given(cell) || value_count(mask) == 1 {
                    String::new()
                } else {
                    values_from_mask(mask).join(",")
                }
            })
            .join(";")
    }
}

/// Streams count progress to the sink roughly once per second.
struct ReportCountSolutionReceiver<'a> {
    count: usize,
    nonce: i32,
    sender: &'a mut dyn SendResult,
    last_report_time: Instant,
}

impl<'a> ReportCountSolutionReceiver<'a> {
    pub fn new(nonce: i32, sender: &'a mut dyn SendResult) -> Self {
        Self {
            count: 0,
            nonce,
            sender,
            last_report_time: Instant::now(),
        }
    }
}

impl<'a> SolutionReceiver for ReportCountSolutionReceiver<'a> {
    fn receive(&mut self, _result: Box<Board>) -> bool {
        self.count += 1;

        let now = Instant::now();
        if now.duration_since(self.last_report_time).as_millis() >= 1000 {
            self.last_report_time = now;
            let response =
                CountResponse::new(self.nonce, self.count as u64, false, false).to_json();
            self.sender.send_result(&response);
        }

        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board_data::{BoardData, GridCell};
    use std::sync::{Arc, Mutex};

    struct TestSendResult {
        results: Arc<Mutex<Vec<String>>>,
    }

    impl SendResult for TestSendResult {
        fn send_result(&mut self, result: &str) {
            self.results.lock().unwrap().push(result.to_string());
        }
    }

    fn create_test_handler() -> (MessageHandler, Arc<Mutex<Vec<String>>>) {
        let results = Arc::new(Mutex::new(Vec::new()));
        let sink = Box::new(TestSendResult {
            results: results.clone(),
        });
        (MessageHandler::new(sink), results)
    }

    fn board_from_givens(givens: &str) -> BoardData {
        let mut data = BoardData::empty(9);
        for (index, c) in givens.chars().enumerate() {
            if let Some(value) = c.to_digit(10) {
                if value > 0 {
                    data.grid[index / 9][index % 9] = GridCell {
                        value: value as usize,
                        given: true,
                        ..GridCell::default()
                    };
                }
            }
        }
        data
    }

    const CLASSIC_GIVENS: &str =
        "5.6....29.9....13..4...376.........232.5......5..186.32..64.38..1.37529....821.7.";
    const CLASSIC_SOLUTION: &str =
        "536187429897462135142953768681734952324596817759218643275649381418375296963821574";

    #[test]
    fn test_solve_classic() {
        let (mut handler, results) = create_test_handler();
        let message = Message::new(123, "solve", board_from_givens(CLASSIC_GIVENS)).to_json();
        handler.handle_message(&message, Cancellation::default());

        let results = results.lock().unwrap();
        assert_eq!(results.len(), 1);
        let response = SolutionResponse::from_json(&results[0]).unwrap();
        assert_eq!(response.nonce, 123);
        let expected: Vec<usize> = CLASSIC_SOLUTION
            .chars()
            .map(|c| c.to_digit(10).unwrap() as usize)
            .collect();
        assert_eq!(response.solution, expected);
    }

    #[test]
    fn test_check_unique() {
        let (mut handler, results) = create_test_handler();
        let message = Message::new(5, "check", board_from_givens(CLASSIC_GIVENS)).to_json();
        handler.handle_message(&message, Cancellation::default());

        let results = results.lock().unwrap();
        let response = CountResponse::from_json(results.last().unwrap()).unwrap();
        assert_eq!(response.count, 1);
        assert!(response.complete);
        assert!(!response.cancelled);
    }

    #[test]
    fn test_count_empty_4x4() {
        let (mut handler, results) = create_test_handler();
        let message = Message::new(9, "count", BoardData::empty(4)).to_json();
        handler.handle_message(&message, Cancellation::default());

        let results = results.lock().unwrap();
        let response = CountResponse::from_json(results.last().unwrap()).unwrap();
        assert_eq!(response.count, 288);
        assert!(response.complete);
    }

    #[test]
    fn test_true_candidates_unique() {
        let (mut handler, results) = create_test_handler();
        let message =
            Message::new(7, "truecandidates", board_from_givens(CLASSIC_GIVENS)).to_json();
        handler.handle_message(&message, Cancellation::default());

        let results = results.lock().unwrap();
        let response = TrueCandidatesResponse::from_json(results.last().unwrap()).unwrap();
        assert_eq!(response.candidates.len(), 81);
        let expected: Vec<CandidateCell> = CLASSIC_SOLUTION
            .chars()
            .map(|c| CandidateCell::given(c.to_digit(10).unwrap() as usize))
            .collect();
        assert_eq!(response.candidates, expected);
    }

    #[test]
    fn test_step_reports_initial_candidates_first() {
        let (mut handler, results) = create_test_handler();
        let message = Message::new(1, "step", board_from_givens(CLASSIC_GIVENS)).to_json();
        handler.handle_message(&message, Cancellation::default());

        let results = results.lock().unwrap();
        let response = StepResponse::from_json(results.last().unwrap()).unwrap();
        assert_eq!(response.desc, "Initial Candidates");
        assert!(response.changed);
        assert!(!response.invalid);
        assert!(response.candidates.is_some());
    }

    #[test]
    fn test_step_hidden_single() {
        // Center marks equal to the computed candidates, with 9 stripped
        // from r1c2..r1c9: the next step is the hidden single.
        let mut data = BoardData::empty(9);
        let all: Vec<usize> = (1..=9).collect();
        let missing_nine: Vec<usize> = (1..=8).collect();
        for row in 0..9 {
            for col in 0..9 {
                data.grid[row][col].center_pencil_marks = if row == 0 && col > 0 {
                    missing_nine.clone()
                } else {
                    all.clone()
                };
            }
        }

        let (mut handler, results) = create_test_handler();
        let message = Message::new(2, "step", data).to_json();
        handler.handle_message(&message, Cancellation::default());

        let results = results.lock().unwrap();
        let response = StepResponse::from_json(results.last().unwrap()).unwrap();
        assert_eq!(response.desc, "Hidden Single in Row 1: R1C1 = 9.");
        assert!(response.changed);
    }

    #[test]
    fn test_logical_solve_contradiction() {
        // Two non-given 5s in one column
        let mut data = BoardData::empty(9);
        data.grid[0][4].value = 5;
        data.grid[4][4].value = 5;

        let (mut handler, results) = create_test_handler();
        let message = Message::new(3, "logicalsolve", data).to_json();
        handler.handle_message(&message, Cancellation::default());

        let results = results.lock().unwrap();
        let response = LogicalSolveResponse::from_json(results.last().unwrap()).unwrap();
        assert!(response.invalid);
        assert_eq!(response.desc.last().unwrap(), "Board is invalid!");
        assert!(response
            .desc
            .iter()
            .any(|line| line.contains("cannot be set to 5")));
    }

    #[test]
    fn test_cancel_command() {
        let (mut handler, results) = create_test_handler();
        let message = r#"{"nonce": 4, "command": "cancel"}"#;
        handler.handle_message(message, Cancellation::default());

        let results = results.lock().unwrap();
        let response = CancelledResponse::from_json(results.last().unwrap()).unwrap();
        assert_eq!(response.nonce, 4);
        assert_eq!(response.response_type, "cancelled");
    }

    #[test]
    fn test_unknown_command() {
        let (mut handler, results) = create_test_handler();
        let message = Message::new(6, "frobnicate", BoardData::empty(4)).to_json();
        handler.handle_message(&message, Cancellation::default());

        let results = results.lock().unwrap();
        let response = InvalidResponse::from_json(results.last().unwrap()).unwrap();
        assert!(response.message.contains("Unknown command"));
    }
}
