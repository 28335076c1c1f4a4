use serde::{Deserialize, Serialize};

/// One cell of an expanded candidates array: either a given with its value
/// or the list of remaining candidate values, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateCell {
    Given { given: bool, value: usize },
    Values(Vec<usize>),
}

impl CandidateCell {
    pub fn given(value: usize) -> Self {
        CandidateCell::Given { given: true, value }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidResponse {
    pub nonce: i32,
    #[serde(rename = "type")]
    pub response_type: String,
    pub message: String,
}

impl InvalidResponse {
    pub fn new(nonce: i32, message: &str) -> Self {
        Self {
            nonce,
            response_type: "invalid".to_owned(),
            message: message.to_owned(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("response serializes")
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelledResponse {
    pub nonce: i32,
    #[serde(rename = "type")]
    pub response_type: String,
}

impl CancelledResponse {
    pub fn new(nonce: i32) -> Self {
        Self {
            nonce,
            response_type: "cancelled".to_owned(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("response serializes")
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionResponse {
    pub nonce: i32,
    #[serde(rename = "type")]
    pub response_type: String,
    pub solution: Vec<usize>,
}

impl SolutionResponse {
    pub fn new(nonce: i32, solution: &[usize]) -> Self {
        Self {
            nonce,
            response_type: "solution".to_owned(),
            solution: solution.to_owned(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("response serializes")
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoSolutionResponse {
    pub nonce: i32,
    #[serde(rename = "type")]
    pub response_type: String,
}

impl NoSolutionResponse {
    pub fn new(nonce: i32) -> Self {
        Self {
            nonce,
            response_type: "nosolution".to_owned(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("response serializes")
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub nonce: i32,
    #[serde(rename = "type")]
    pub response_type: String,
    pub count: u64,
    pub complete: bool,
    #[serde(default)]
    pub cancelled: bool,
}

impl CountResponse {
    pub fn new(nonce: i32, count: u64, complete: bool, cancelled: bool) -> Self {
        Self {
            nonce,
            response_type: "count".to_owned(),
            count,
            complete,
            cancelled,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("response serializes")
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrueCandidatesResponse {
    pub nonce: i32,
    #[serde(rename = "type")]
    pub response_type: String,
    pub candidates: Vec<CandidateCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<Vec<usize>>,
}

impl TrueCandidatesResponse {
    pub fn new(nonce: i32, candidates: Vec<CandidateCell>, counts: Option<Vec<usize>>) -> Self {
        Self {
            nonce,
            response_type: "truecandidates".to_owned(),
            candidates,
            counts,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("response serializes")
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResponse {
    pub nonce: i32,
    #[serde(rename = "type")]
    pub response_type: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<CandidateCell>>,
    pub invalid: bool,
    pub changed: bool,
}

impl StepResponse {
    pub fn new(
        nonce: i32,
        desc: &str,
        candidates: Option<Vec<CandidateCell>>,
        invalid: bool,
        changed: bool,
    ) -> Self {
        Self {
            nonce,
            response_type: "step".to_owned(),
            desc: desc.to_owned(),
            candidates,
            invalid,
            changed,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("response serializes")
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogicalSolveResponse {
    pub nonce: i32,
    #[serde(rename = "type")]
    pub response_type: String,
    pub desc: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<CandidateCell>>,
    pub invalid: bool,
    pub changed: bool,
}

impl LogicalSolveResponse {
    pub fn new(
        nonce: i32,
        desc: Vec<String>,
        candidates: Option<Vec<CandidateCell>>,
        invalid: bool,
        changed: bool,
    ) -> Self {
        Self {
            nonce,
            response_type: "logicalsolve".to_owned(),
            desc,
            candidates,
            invalid,
            changed,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("response serializes")
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_candidate_cell_encoding() {
        let given = CandidateCell::given(5);
        assert_eq!(
            serde_json::to_string(&given).unwrap(),
            r#"{"given":true,"value":5}"#
        );

        let values = CandidateCell::Values(vec![1, 2, 9]);
        assert_eq!(serde_json::to_string(&values).unwrap(), "[1,2,9]");

        let decoded: CandidateCell = serde_json::from_str("[3,4]").unwrap();
        assert_eq!(decoded, CandidateCell::Values(vec![3, 4]));
        let decoded: CandidateCell = serde_json::from_str(r#"{"given":true,"value":7}"#).unwrap();
        assert_eq!(decoded, CandidateCell::given(7));
    }

    #[test]
    fn test_count_response_round_trip() {
        let response = CountResponse::new(7, 1234, false, false);
        let decoded = CountResponse::from_json(&response.to_json()).unwrap();
        assert_eq!(decoded.count, 1234);
        assert!(!decoded.complete);
        assert_eq!(decoded.response_type, "count");
    }
}
