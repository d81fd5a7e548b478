//! Batch code generation
//!
//! Codes look like `YYYYMMDD-HHMM-XXX`: the UTC date and time of generation
//! followed by a random base-36 suffix. There is no collision check: two codes
//! generated in the same minute collide with probability 1 in 46,656.

use chrono::{DateTime, Utc};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::types::SterilizationBatch;

const SUFFIX_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 3;

static BATCH_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{8}-\d{4}-[A-Z0-9]{3}$").expect("batch code pattern is valid")
});

/// Immutable record of one code generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCodeGeneration {
    pub code: String,
    pub generated_at: DateTime<Utc>,
    pub operator: String,
    pub tool_count: usize,
    pub is_single_tool: bool,
}

/// Generates batch codes and keeps an append-only history of them
#[derive(Debug, Default)]
pub struct BatchCodeGenerator {
    history: Vec<BatchCodeGeneration>,
}

impl BatchCodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_batch_code(&mut self, operator: &str, tool_count: usize) -> String {
        self.generate_batch_code_at(operator, tool_count, Utc::now())
    }

    pub fn generate_batch_code_at(
        &mut self,
        operator: &str,
        tool_count: usize,
        now: DateTime<Utc>,
    ) -> String {
        let code = format!(
            "{}-{}-{}",
            now.format("%Y%m%d"),
            now.format("%H%M"),
            random_suffix(&mut rand::rng())
        );

        tracing::debug!(code = %code, operator = %operator, tool_count, "Generated batch code");

        self.history.push(BatchCodeGeneration {
            code: code.clone(),
            generated_at: now,
            operator: operator.to_string(),
            tool_count,
            is_single_tool: tool_count == 1,
        });

        code
    }

    pub fn history(&self) -> &[BatchCodeGeneration] {
        &self.history
    }

    pub fn last_generated(&self) -> Option<&BatchCodeGeneration> {
        self.history.last()
    }
}

fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// Format check only; the date and time parts are not checked for sense.
pub fn validate_batch_code(code: &str) -> bool {
    BATCH_CODE_PATTERN.is_match(code)
}

pub fn get_batch_by_code<'a>(
    code: &str,
    batches: &'a [SterilizationBatch],
) -> Option<&'a SterilizationBatch> {
    batches.iter().find(|b| b.batch_code == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_code_uses_utc_date_and_time() {
        let mut generator = BatchCodeGenerator::new();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 42).unwrap();
        let code = generator.generate_batch_code_at("Dr. Smith", 3, now);

        assert!(code.starts_with("20240301-0905-"), "unexpected code {code}");
        assert!(validate_batch_code(&code));
    }

    #[test]
    fn test_history_is_appended() {
        let mut generator = BatchCodeGenerator::new();
        let first = generator.generate_batch_code("Dr. Smith", 1);
        let second = generator.generate_batch_code("Dr. Smith", 4);

        assert_eq!(generator.history().len(), 2);
        assert_eq!(generator.history()[0].code, first);
        assert!(generator.history()[0].is_single_tool);
        assert!(!generator.history()[1].is_single_tool);
        assert_eq!(generator.last_generated().unwrap().code, second);
    }

    #[test]
    fn test_zero_tools_is_not_single_tool() {
        let mut generator = BatchCodeGenerator::new();
        generator.generate_batch_code("Dr. Smith", 0);
        assert!(!generator.last_generated().unwrap().is_single_tool);
    }

    #[test]
    fn test_validate_batch_code_format() {
        assert!(validate_batch_code("20240301-1030-A1B"));
        // Not a real date, still accepted
        assert!(validate_batch_code("99999999-9999-ZZZ"));

        assert!(!validate_batch_code("20240301-1030-a1b"));
        assert!(!validate_batch_code("2024031-1030-A1B"));
        assert!(!validate_batch_code("20240301-1030-A1BC"));
        assert!(!validate_batch_code("20240301_1030_A1B"));
        assert!(!validate_batch_code(" 20240301-1030-A1B"));
        assert!(!validate_batch_code(""));
    }

    #[test]
    fn test_get_batch_by_code_returns_first_match() {
        let now = Utc::now();
        let batches = vec![
            SterilizationBatch::new("20240301-1030-AAA", "Dr. Smith", now),
            SterilizationBatch::new("20240301-1030-BBB", "Dr. Smith", now),
            SterilizationBatch::new("20240301-1030-BBB", "Nurse Lee", now),
        ];

        let found = get_batch_by_code("20240301-1030-BBB", &batches).unwrap();
        assert_eq!(found.created_by, "Dr. Smith");
        assert!(get_batch_by_code("20240301-1030-CCC", &batches).is_none());
        assert!(get_batch_by_code("20240301-1030-bbb", &batches).is_none());
    }
}
