pub use instrumentation_diagnostics::{Diagnostic, Severity, Span, codes, explain};
