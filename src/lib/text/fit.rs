//! Finding a font size at which the text fits.

use super::metrics::TextMetrics;
use super::wrap::wrap;


/// A single line of fitted text, along with its measured width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FittedLine {
    pub text: String,
    pub width: u32,
}

/// Text broken into lines at the size it fits in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FittedText {
    /// Lines of text, in order.
    pub lines: Vec<FittedLine>,
    /// Font size the lines were measured at.
    pub font_size: u32,
    /// Height of each line at `font_size`.
    pub line_height: u32,
}

impl FittedText {
    /// Width of the widest line.
    #[inline]
    pub fn width(&self) -> u32 {
        self.lines.iter().map(|l| l.width).max().unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}


/// Find the largest font size (starting at `initial_size`, going down in `step`s)
/// at which the text, once wrapped, fits within `max_width`.
///
/// If the text still doesn't fit at `min_size`, it is returned at that size anyway.
/// Callers who need a guaranteed fit should compare `font_size` with `min_size`
/// and check `FittedText::width`.
pub fn fit<M: TextMetrics + ?Sized>(text: &str, metrics: &M, max_width: u32,
                                    initial_size: u32, min_size: u32, step: u32) -> FittedText {
    let min_size = min_size.max(1);
    let step = step.max(1);

    let mut size = initial_size.max(min_size);
    loop {
        let lines: Vec<_> = wrap(text, metrics, size, max_width).into_iter()
            .map(|line| {
                let width = metrics.measure(&line, size).width;
                FittedLine{text: line, width}
            })
            .collect();
        let widest = lines.iter().map(|l| l.width).max().unwrap_or(0);

        if widest <= max_width || size <= min_size {
            if widest > max_width {
                warn!("Text doesn't fit in {} px even at the minimum font size of {} \
                      (widest line is {} px)", max_width, size, widest);
            } else {
                trace!("Text fits in {} line(s) at font size {}", lines.len(), size);
            }
            let line_height = metrics.line_height(size);
            return FittedText{lines, font_size: size, line_height};
        }

        trace!("Widest line is {} px > {} px at font size {}, shrinking",
            widest, max_width, size);
        size = size.saturating_sub(step).max(min_size);
    }
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use crate::testing::{test_font, Monospace};
    use crate::text::TextMetrics;
    use super::fit;

    #[test]
    fn fits_right_away() {
        let fitted = fit("HELLO", &Monospace, 100, 20, 5, 1);
        assert_eq!(20, fitted.font_size);
        assert_eq!(1, fitted.lines.len());
        assert_eq!(50, fitted.lines[0].width);
        assert_eq!(20, fitted.line_height);
    }

    #[test]
    fn shrinks_until_it_fits() {
        // The longest word has 10 characters, so it fits at size <= 20.
        let fitted = fit("WAYTOOLONG WORD", &Monospace, 100, 50, 5, 1);
        assert_eq!(20, fitted.font_size);
        assert_that!(fitted.width()).is_less_than_or_equal_to(100);
    }

    #[test]
    fn shrinks_in_steps() {
        let fitted = fit("WAYTOOLONG", &Monospace, 100, 50, 5, 7);
        // 50 -> 43 -> 36 -> 29 -> 22 -> 15
        assert_eq!(15, fitted.font_size);
    }

    #[test]
    fn stops_at_floor() {
        let fitted = fit("WAYTOOLONG", &Monospace, 10, 50, 8, 5);
        assert_eq!(8, fitted.font_size);
        assert_that!(fitted.width()).is_greater_than(10);
        assert_eq!(vec!["WAYTOOLONG"],
            fitted.lines.iter().map(|l| l.text.as_str()).collect::<Vec<_>>());
    }

    #[test]
    fn never_goes_below_floor() {
        let fitted = fit("WAYTOOLONG", &Monospace, 10, 50, 10, 45);
        assert_eq!(10, fitted.font_size);
    }

    #[test]
    fn initial_size_below_floor() {
        let fitted = fit("X", &Monospace, 100, 3, 10, 1);
        assert_eq!(10, fitted.font_size);
    }

    #[test]
    fn empty_text() {
        let fitted = fit("", &Monospace, 100, 30, 10, 1);
        assert_that!(fitted.is_empty()).is_true();
        assert_eq!(30, fitted.font_size);
    }

    #[test]
    fn monotonic_in_initial_size() {
        let text = "ALL YOUR BASE ARE BELONG TO US";
        let needed = fit(text, &Monospace, 80, 1000, 1, 1).font_size;
        let mut previous = None;
        for initial in needed..needed + 40 {
            let size = fit(text, &Monospace, 80, initial, 1, 1).font_size;
            if let Some(prev) = previous {
                assert_that!(size).is_less_than_or_equal_to(prev);
            }
            previous = Some(size);
        }
    }

    #[test]
    fn hello_world_on_wide_canvas() {
        let font = test_font();
        let canvas_width = 1312;
        let max_width = (canvas_width as f32 * 0.95) as u32;
        let fitted = fit("HELLO WORLD", &font, max_width, 150, 10, 1);

        let full_width = font.measure("HELLO WORLD", 150).width;
        if full_width <= max_width {
            assert_eq!(1, fitted.lines.len());
            assert_eq!(150, fitted.font_size);
        } else {
            assert_eq!(2, fitted.lines.len());
            assert_that!(fitted.font_size).is_less_than_or_equal_to(150);
        }
        assert_that!(fitted.width()).is_less_than_or_equal_to(max_width);
    }
}
