// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::U256;
use std::{fmt, time::Duration};

/// What a case expects of its decrypted result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expectation {
    Equals(U256),
    /// Strictly below the bound
    Below(U256),
    /// Any value, as long as the handle decrypts
    Decrypts,
    /// Only that a non-zero handle came back. Not decrypted.
    HandlePresent,
}

impl Expectation {
    pub fn bool(value: bool) -> Self {
        Expectation::Equals(U256::from(value as u8))
    }

    pub fn needs_decryption(&self) -> bool {
        !matches!(self, Expectation::HandlePresent)
    }

    pub fn check(&self, actual: U256) -> Result<(), String> {
        match self {
            Expectation::Equals(expected) if actual != *expected => {
                Err(format!("expected {expected}, got {actual}"))
            }
            Expectation::Below(bound) if actual >= *bound => {
                Err(format!("expected a value below {bound}, got {actual}"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Equals(v) => write!(f, "= {v}"),
            Expectation::Below(v) => write!(f, "< {v}"),
            Expectation::Decrypts => write!(f, "decrypts"),
            Expectation::HandlePresent => write!(f, "handle"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CaseOutcome {
    pub name: String,
    pub passed: bool,
    pub detail: String,
    pub elapsed: Duration,
}

/// Per case results of one scenario run. A failed case does not stop the
/// others.
#[derive(Clone, Debug, Default)]
pub struct ScenarioReport {
    pub scenario: String,
    pub cases: Vec<CaseOutcome>,
}

impl ScenarioReport {
    pub fn new(scenario: &str) -> Self {
        Self {
            scenario: scenario.to_string(),
            cases: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &str, elapsed: Duration, result: anyhow::Result<String>) {
        let (passed, detail) = match result {
            Ok(detail) => (true, detail),
            Err(e) => (false, format!("{e:#}")),
        };
        self.cases.push(CaseOutcome {
            name: name.to_string(),
            passed,
            detail,
            elapsed,
        });
    }

    pub fn passed(&self) -> bool {
        self.cases.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.cases.iter().filter(|c| !c.passed)
    }

    pub fn to_table(&self) -> String {
        if self.cases.is_empty() {
            return format!("{}: no cases run\n", self.scenario);
        }
        let width = self
            .cases
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(4)
            .max(4);

        let mut output = format!("{}\n", self.scenario);
        output.push_str(&format!(
            "{:<width$} | {:<4} | {:>8} | {}\n",
            "Case", "", "Time", "Detail"
        ));
        output.push_str(&format!("{:-<width$}-+------+----------+-{:-<10}\n", "", ""));
        for case in &self.cases {
            output.push_str(&format!(
                "{:<width$} | {:<4} | {:>8} | {}\n",
                case.name,
                if case.passed { "ok" } else { "FAIL" },
                format_duration(case.elapsed),
                case.detail
            ));
        }
        let failed = self.failures().count();
        output.push_str(&format!(
            "{} passed, {} failed\n",
            self.cases.len() - failed,
            failed
        ));
        output
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_table())
    }
}

fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
