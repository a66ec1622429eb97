use crate::error::GenesisError;
use serde::{Deserialize, Serialize};

/// Value carried along circuit edges.
///
/// Gate functions only understand booleans; anything else is dropped when
/// incoming signals are flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Signal {
    Bool(bool),
    Bits(Vec<bool>),
    Number(f64),
}

impl Signal {
    /// Flatten a sequence of signals into one ordered boolean sequence.
    pub fn flatten(signals: &[Signal]) -> Vec<bool> {
        let mut bools = Vec::with_capacity(signals.len());
        for signal in signals {
            match signal {
                Signal::Bool(b) => bools.push(*b),
                Signal::Bits(bits) => bools.extend_from_slice(bits),
                Signal::Number(_) => {}
            }
        }
        bools
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Signal::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Default for Signal {
    fn default() -> Self {
        Signal::Bool(false)
    }
}

impl From<bool> for Signal {
    fn from(value: bool) -> Self {
        Signal::Bool(value)
    }
}

impl From<Vec<bool>> for Signal {
    fn from(value: Vec<bool>) -> Self {
        Signal::Bits(value)
    }
}

impl From<&[bool]> for Signal {
    fn from(value: &[bool]) -> Self {
        Signal::Bits(value.to_vec())
    }
}

/// Input signal and the output a circuit is expected to produce for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: Signal,
    pub expected: Signal,
}

impl TestCase {
    pub fn new(input: impl Into<Signal>, expected: impl Into<Signal>) -> Self {
        Self {
            input: input.into(),
            expected: expected.into(),
        }
    }
}

/// Non-empty, ordered list of test cases. Fixed for one evolutionary run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TestCase>", into = "Vec<TestCase>")]
pub struct TestSuite {
    cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(cases: Vec<TestCase>) -> Result<Self, GenesisError> {
        if cases.is_empty() {
            return Err(GenesisError::EmptyTestSuite);
        }
        Ok(Self { cases })
    }

    /// Build a suite from a boolean truth function over every `width`-bit input.
    pub fn truth_table<F>(width: usize, function: F) -> Result<Self, GenesisError>
    where
        F: Fn(&[bool]) -> bool,
    {
        let cases = all_inputs(width)?
            .into_iter()
            .map(|bits| {
                let expected = function(&bits);
                TestCase::new(bits, expected)
            })
            .collect();
        Self::new(cases)
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl TryFrom<Vec<TestCase>> for TestSuite {
    type Error = GenesisError;

    fn try_from(cases: Vec<TestCase>) -> Result<Self, Self::Error> {
        Self::new(cases)
    }
}

impl From<TestSuite> for Vec<TestCase> {
    fn from(suite: TestSuite) -> Self {
        suite.cases
    }
}

impl<'a> IntoIterator for &'a TestSuite {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

/// Every `width`-bit boolean vector, most significant bit first.
pub fn all_inputs(width: usize) -> Result<Vec<Vec<bool>>, GenesisError> {
    if width >= usize::BITS as usize {
        return Err(GenesisError::Configuration(format!(
            "Truth table width {} exceeds {} bits",
            width,
            usize::BITS - 1
        )));
    }
    Ok((0..1usize << width)
        .map(|n| (0..width).rev().map(|bit| (n >> bit) & 1 == 1).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_discards_non_boolean() {
        let signals = vec![
            Signal::Bool(true),
            Signal::Number(3.5),
            Signal::Bits(vec![false, true]),
        ];
        assert_eq!(Signal::flatten(&signals), vec![true, false, true]);
    }

    #[test]
    fn test_empty_suite_rejected() {
        assert!(matches!(TestSuite::new(vec![]), Err(GenesisError::EmptyTestSuite)));
    }

    #[test]
    fn test_truth_table_order() {
        let suite = TestSuite::truth_table(2, |b| b[0] != b[1]).unwrap();
        assert_eq!(suite.len(), 4);
        assert_eq!(suite.cases()[0], TestCase::new(vec![false, false], false));
        assert_eq!(suite.cases()[1], TestCase::new(vec![false, true], true));
        assert_eq!(suite.cases()[3], TestCase::new(vec![true, true], false));
    }

    #[test]
    fn test_oversized_truth_table_rejected() {
        let result = TestSuite::truth_table(usize::BITS as usize, |_| true);
        assert!(matches!(result, Err(GenesisError::Configuration(_))));
        assert!(all_inputs(200).is_err());
        assert_eq!(all_inputs(0).unwrap(), vec![Vec::<bool>::new()]);
    }

    #[test]
    fn test_suite_deserialization_validates() {
        let json = r#"[{"input": [true, false], "expected": true}]"#;
        let suite: TestSuite = serde_json::from_str(json).unwrap();
        assert_eq!(suite.cases()[0].input, Signal::Bits(vec![true, false]));
        assert_eq!(suite.cases()[0].expected, Signal::Bool(true));

        let empty: Result<TestSuite, _> = serde_json::from_str("[]");
        assert!(empty.is_err());
    }
}
