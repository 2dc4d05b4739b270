//! Breaking text into lines.

use super::metrics::TextMetrics;


/// Break the text into lines that fit given width when rendered at given size.
///
/// This is a greedy word wrap: words are added to the current line
/// for as long as it still fits. A single word that is wider than `max_width`
/// gets a line of its own and is never split.
/// Explicit line breaks in the text are kept.
///
/// Empty (or whitespace-only) text produces no lines.
pub fn wrap<M: TextMetrics + ?Sized>(text: &str, metrics: &M,
                                     size: u32, max_width: u32) -> Vec<String> {
    text.lines()
        .flat_map(|line| wrap_single_line(line, metrics, size, max_width))
        .collect()
}

/// Break a single line into multiple lines.
/// The line should not contain explicit line breaks.
fn wrap_single_line<M: TextMetrics + ?Sized>(s: &str, metrics: &M,
                                             size: u32, max_width: u32) -> Vec<String> {
    let mut result = vec![];

    let mut current_line = String::new();
    for word in s.split_whitespace() {
        if current_line.is_empty() {
            current_line.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current_line, word);
        if metrics.measure(&candidate, size).width > max_width {
            trace!("Line break before `{}` ({} px max)", word, max_width);
            result.push(current_line);
            current_line = word.to_owned();
        } else {
            current_line = candidate;
        }
    }
    if !current_line.is_empty() {
        result.push(current_line);
    }

    result
}
