//! Control surface
//!
//! The host delivers operations as selector-plus-atoms messages, one at
//! a time. A static registry binds each selector name to its expected
//! arity and parser (bound once, at registration); parsed messages
//! become typed [`Request`]s applied to a [`BufferPair`] by the
//! [`Dispatcher`].

pub mod script;

use log::debug;

use crate::editor::{BufferPair, Target};
use crate::error::{Result, SpliceError};
use crate::host::Host;

// ============================================================================
// Message Atoms
// ============================================================================

/// One untrusted message argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Float(f64),
    Symbol(String),
}

impl Atom {
    /// Numeric value of this atom, if it is one
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Atom::Float(f) => Some(*f),
            Atom::Symbol(_) => None,
        }
    }

    /// Symbol value of this atom, if it is one
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Atom::Float(_) => None,
            Atom::Symbol(s) => Some(s),
        }
    }
}

/// Pull a float argument out of a message, by position.
fn float_arg(selector: &str, args: &[Atom], index: usize) -> Result<f64> {
    args[index].as_float().ok_or_else(|| SpliceError::BadMessage {
        selector: selector.to_string(),
        reason: format!("argument {} must be a number", index + 1),
    })
}

/// Pull a symbol argument out of a message, by position.
fn symbol_arg(selector: &str, args: &[Atom], index: usize) -> Result<String> {
    args[index]
        .as_symbol()
        .map(str::to_string)
        .ok_or_else(|| SpliceError::BadMessage {
            selector: selector.to_string(),
            reason: format!("argument {} must be a symbol", index + 1),
        })
}

// ============================================================================
// Requests
// ============================================================================

/// A parsed control message.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// "bang": log both buffers' name, frame count and validity
    Inspect,
    /// "name": re-point buffer B at another array
    Rename { name: String },
    /// "cut": zero a frame range of the selected buffer
    Cut { target: Target, start: f64, end: f64 },
    /// "swap": exchange a frame range between the buffers
    Swap { start: f64, end: f64 },
    /// "shuffle": block-interleave the buffers
    Shuffle { width: f64 },
}

// ============================================================================
// Operation Registry
// ============================================================================

/// One registered operation: selector name, argument count, parser.
pub struct OpSpec {
    pub name: &'static str,
    pub arity: usize,
    parse: fn(&[Atom]) -> Result<Request>,
}

fn parse_bang(_args: &[Atom]) -> Result<Request> {
    Ok(Request::Inspect)
}

fn parse_name(args: &[Atom]) -> Result<Request> {
    Ok(Request::Rename {
        name: symbol_arg("name", args, 0)?,
    })
}

fn parse_cut(args: &[Atom]) -> Result<Request> {
    Ok(Request::Cut {
        target: Target::from_selector(float_arg("cut", args, 0)?)?,
        start: float_arg("cut", args, 1)?,
        end: float_arg("cut", args, 2)?,
    })
}

fn parse_swap(args: &[Atom]) -> Result<Request> {
    Ok(Request::Swap {
        start: float_arg("swap", args, 0)?,
        end: float_arg("swap", args, 1)?,
    })
}

fn parse_shuffle(args: &[Atom]) -> Result<Request> {
    Ok(Request::Shuffle {
        width: float_arg("shuffle", args, 0)?,
    })
}

/// The operation table, bound once at startup.
static OPERATIONS: [OpSpec; 5] = [
    OpSpec {
        name: "bang",
        arity: 0,
        parse: parse_bang,
    },
    OpSpec {
        name: "name",
        arity: 1,
        parse: parse_name,
    },
    OpSpec {
        name: "cut",
        arity: 3,
        parse: parse_cut,
    },
    OpSpec {
        name: "swap",
        arity: 2,
        parse: parse_swap,
    },
    OpSpec {
        name: "shuffle",
        arity: 1,
        parse: parse_shuffle,
    },
];

/// The registered operation table.
pub fn registry() -> &'static [OpSpec] {
    &OPERATIONS
}

/// Parse a raw selector-plus-atoms message into a [`Request`].
pub fn parse_message(selector: &str, args: &[Atom]) -> Result<Request> {
    let spec = registry()
        .iter()
        .find(|op| op.name == selector)
        .ok_or_else(|| SpliceError::UnknownOperation {
            selector: selector.to_string(),
        })?;

    if args.len() != spec.arity {
        return Err(SpliceError::BadMessage {
            selector: selector.to_string(),
            reason: format!("expected {} arguments, got {}", spec.arity, args.len()),
        });
    }

    (spec.parse)(args)
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Applies control messages to one buffer pair.
pub struct Dispatcher {
    pair: BufferPair,
}

impl Dispatcher {
    /// Create a dispatcher over a new pair of array names.
    pub fn new(a_name: impl Into<String>, b_name: impl Into<String>) -> Self {
        Dispatcher {
            pair: BufferPair::new(a_name, b_name),
        }
    }

    /// The underlying pair
    pub fn pair(&self) -> &BufferPair {
        &self.pair
    }

    /// Parse and apply one raw message.
    ///
    /// Parse failures are reported on the host error channel here;
    /// operation failures have already been reported by the editor.
    pub fn dispatch(&mut self, host: &dyn Host, selector: &str, args: &[Atom]) -> Result<()> {
        let request = parse_message(selector, args).map_err(|e| {
            host.report_error(&e.to_string());
            e
        })?;
        self.apply(host, request)
    }

    /// Apply an already-parsed request.
    pub fn apply(&mut self, host: &dyn Host, request: Request) -> Result<()> {
        debug!("dispatch: {:?}", request);
        match request {
            Request::Inspect => self.pair.info(host).map(|_| ()),
            Request::Rename { name } => {
                self.pair.rename_b(name);
                Ok(())
            }
            Request::Cut { target, start, end } => self.pair.cut(host, target, start, end),
            Request::Swap { start, end } => self.pair.swap(host, start, end),
            Request::Shuffle { width } => self.pair.shuffle(host, width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn test_parse_known_operations() {
        let req = parse_message("bang", &[]).unwrap();
        assert_eq!(req, Request::Inspect);

        let req = parse_message("swap", &[Atom::Float(0.0), Atom::Float(8.0)]).unwrap();
        assert_eq!(req, Request::Swap { start: 0.0, end: 8.0 });

        let req = parse_message(
            "cut",
            &[Atom::Float(1.0), Atom::Float(2.0), Atom::Float(5.0)],
        )
        .unwrap();
        assert_eq!(
            req,
            Request::Cut {
                target: Target::B,
                start: 2.0,
                end: 5.0
            }
        );
    }

    #[test]
    fn test_parse_unknown_selector() {
        let err = parse_message("reverse", &[]).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_OPERATION");
    }

    #[test]
    fn test_parse_arity_mismatch() {
        let err = parse_message("swap", &[Atom::Float(0.0)]).unwrap_err();
        assert_eq!(err.error_code(), "BAD_MESSAGE");
    }

    #[test]
    fn test_parse_type_mismatch() {
        let err = parse_message(
            "swap",
            &[Atom::Symbol("zero".to_string()), Atom::Float(8.0)],
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "BAD_MESSAGE");
    }

    #[test]
    fn test_parse_negative_cut_selector() {
        let err = parse_message(
            "cut",
            &[Atom::Float(-1.0), Atom::Float(0.0), Atom::Float(4.0)],
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TARGET");
    }

    #[test]
    fn test_dispatch_reports_parse_failures() {
        let mut host = MemoryHost::new();
        host.insert("a", 8);
        host.insert("b", 8);
        let mut dispatcher = Dispatcher::new("a", "b");

        assert!(dispatcher.dispatch(&host, "reverse", &[]).is_err());
        assert_eq!(host.errors().len(), 1);
    }

    #[test]
    fn test_dispatch_rename_then_swap_uses_new_name() {
        let mut host = MemoryHost::new();
        host.insert_samples("a", vec![1.0; 8]);
        host.insert_samples("b", vec![2.0; 8]);
        host.insert_samples("c", vec![3.0; 8]);
        let mut dispatcher = Dispatcher::new("a", "b");

        dispatcher
            .dispatch(&host, "name", &[Atom::Symbol("c".to_string())])
            .unwrap();
        dispatcher
            .dispatch(&host, "swap", &[Atom::Float(0.0), Atom::Float(4.0)])
            .unwrap();

        assert_eq!(host.samples("a").unwrap()[0], 3.0);
        assert_eq!(host.samples("c").unwrap()[0], 1.0);
        assert_eq!(host.samples("b").unwrap(), vec![2.0; 8]);
    }

    #[test]
    fn test_registry_names() {
        let names: Vec<&str> = registry().iter().map(|op| op.name).collect();
        assert_eq!(names, vec!["bang", "name", "cut", "swap", "shuffle"]);
    }
}
