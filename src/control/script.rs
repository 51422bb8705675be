//! JSON edit scripts
//!
//! A script is a JSON array of tagged operations applied in order:
//!
//! ```json
//! [
//!   { "op": "cut", "target": "b", "start": 0, "end": 4410 },
//!   { "op": "swap", "start": 0, "end": 22050 },
//!   { "op": "shuffle", "width": 1024 },
//!   { "op": "info" }
//! ]
//! ```
//!
//! Failures keep the per-call isolation of the live control surface: a
//! rejected operation is reported and counted, and the pass moves on
//! to the next one.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::control::{Dispatcher, Request};
use crate::editor::Target;
use crate::error::Result;
use crate::host::Host;

/// One scripted operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ScriptOp {
    Info,
    Rename { name: String },
    Cut { target: Target, start: f64, end: f64 },
    Swap { start: f64, end: f64 },
    Shuffle { width: f64 },
}

impl From<ScriptOp> for Request {
    fn from(op: ScriptOp) -> Self {
        match op {
            ScriptOp::Info => Request::Inspect,
            ScriptOp::Rename { name } => Request::Rename { name },
            ScriptOp::Cut { target, start, end } => Request::Cut { target, start, end },
            ScriptOp::Swap { start, end } => Request::Swap { start, end },
            ScriptOp::Shuffle { width } => Request::Shuffle { width },
        }
    }
}

/// Counts from one script pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptOutcome {
    pub applied: usize,
    pub failed: usize,
}

/// Load a script from a JSON file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptOp>> {
    let file = File::open(path)?;
    let ops = serde_json::from_reader(BufReader::new(file))?;
    Ok(ops)
}

/// Parse a script from a JSON string.
pub fn parse_script(json: &str) -> Result<Vec<ScriptOp>> {
    Ok(serde_json::from_str(json)?)
}

/// Apply every operation in order against the host.
///
/// Each failure has already been reported on the host error channel by
/// the time it is counted here.
pub fn run_script(
    dispatcher: &mut Dispatcher,
    host: &dyn Host,
    ops: &[ScriptOp],
) -> ScriptOutcome {
    let mut outcome = ScriptOutcome::default();
    for op in ops {
        match dispatcher.apply(host, op.clone().into()) {
            Ok(()) => outcome.applied += 1,
            Err(_) => outcome.failed += 1,
        }
    }
    info!(
        "script pass: {} applied, {} failed",
        outcome.applied, outcome.failed
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn test_parse_script_tags() {
        let ops = parse_script(
            r#"[
                { "op": "cut", "target": "a", "start": 0, "end": 2 },
                { "op": "swap", "start": 1, "end": 3 },
                { "op": "shuffle", "width": 2 },
                { "op": "rename", "name": "other" },
                { "op": "info" }
            ]"#,
        )
        .unwrap();

        assert_eq!(ops.len(), 5);
        assert_eq!(
            ops[0],
            ScriptOp::Cut {
                target: Target::A,
                start: 0.0,
                end: 2.0
            }
        );
        assert_eq!(ops[4], ScriptOp::Info);
    }

    #[test]
    fn test_parse_rejects_unknown_op() {
        assert!(parse_script(r#"[{ "op": "reverse" }]"#).is_err());
    }

    #[test]
    fn test_run_script_continues_after_failure() {
        let mut host = MemoryHost::new();
        host.insert_samples("a", (0..16).map(|i| i as f32).collect());
        host.insert_samples("b", vec![5.0; 16]);
        let mut dispatcher = Dispatcher::new("a", "b");

        let ops = vec![
            // out of range: 99 > 8 frames
            ScriptOp::Cut {
                target: Target::A,
                start: 0.0,
                end: 99.0,
            },
            ScriptOp::Cut {
                target: Target::A,
                start: 0.0,
                end: 2.0,
            },
        ];
        let outcome = run_script(&mut dispatcher, &host, &ops);

        assert_eq!(outcome, ScriptOutcome { applied: 1, failed: 1 });
        let a = host.samples("a").unwrap();
        assert_eq!(&a[0..4], &[0.0; 4]);
        assert_eq!(a[4], 4.0);
    }

    #[test]
    fn test_script_round_trip() {
        let ops = vec![
            ScriptOp::Swap { start: 0.0, end: 4.0 },
            ScriptOp::Rename {
                name: "spare".to_string(),
            },
        ];
        let json = serde_json::to_string(&ops).unwrap();
        assert_eq!(parse_script(&json).unwrap(), ops);
    }
}
