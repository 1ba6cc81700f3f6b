//! Domain-specific assertion macros for pcap-agent harnesses.
//!
//! These add context-rich failure messages that show the whole prompt when a
//! line or section is missing.

// ---------------------------------------------------------------------------
// Prompt assertions
// ---------------------------------------------------------------------------

/// Assert that the prompt contains `line` as a complete line.
///
/// ```rust
/// assert_prompt_line!(prompt, "- TCP: 9000");
/// ```
#[macro_export]
macro_rules! assert_prompt_line {
    ($prompt:expr, $line:expr) => {{
        let prompt: &str = &$prompt;
        let line: &str = $line;
        if !prompt.lines().any(|l| l == line) {
            panic!(
                "assert_prompt_line! failed: line {:?} not found.\n--- prompt ---\n{}",
                line, prompt
            );
        }
    }};
}

/// Assert the number of `- ` bullet lines under a section header.
///
/// ```rust
/// assert_section_len!(prompt, "Alerts / anomalies:", 12);
/// ```
#[macro_export]
macro_rules! assert_section_len {
    ($prompt:expr, $header:expr, $expected:expr) => {{
        let prompt: &str = &$prompt;
        let header: &str = $header;
        let expected: usize = $expected;
        let actual = prompt
            .lines()
            .skip_while(|l| *l != header)
            .skip(1)
            .take_while(|l| l.starts_with("- "))
            .count();
        if !prompt.lines().any(|l| l == header) {
            panic!(
                "assert_section_len! failed: header {:?} missing.\n--- prompt ---\n{}",
                header, prompt
            );
        }
        if actual != expected {
            panic!(
                "assert_section_len! failed under {:?}:\n  expected: {}\n  actual:   {}\n--- prompt ---\n{}",
                header, expected, actual, prompt
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Service assertions
// ---------------------------------------------------------------------------

/// Assert that a `Result<_, ServiceError>` failed with the given variant.
///
/// ```rust
/// assert_service_err!(result, ServiceError::Status { status: 500, .. });
/// ```
#[macro_export]
macro_rules! assert_service_err {
    ($result:expr, $pattern:pat) => {{
        match $result {
            Err(ref e @ $pattern) => e.to_string(),
            Err(other) => panic!(
                "assert_service_err! failed: unexpected error variant: {:?}",
                other
            ),
            Ok(_) => panic!("assert_service_err! failed: call succeeded"),
        }
    }};
}
