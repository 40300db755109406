// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_lines(count: usize) -> String {
    (1..=count)
        .map(|n| format!("line {n}: some representative source text;\n"))
        .collect()
}
