//! Plot directive helpers: argument splitting and sampling.

/// Brackets in plot arguments that do not balance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlotArgumentError {
    #[error("unexpected '{found}' at offset {offset}")]
    UnexpectedClose { found: char, offset: usize },

    #[error("{depth} unclosed bracket(s)")]
    Unclosed { depth: usize },
}

/// Split a comma-separated argument list on top-level commas only.
///
/// `(`, `[` and `{` all nest, so `sin(x, y), x` is two arguments. Each
/// argument is trimmed. Blank text has no arguments.
pub fn split_arguments(text: &str) -> Result<Vec<String>, PlotArgumentError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut arguments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (offset, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(PlotArgumentError::UnexpectedClose { found: c, offset })?;
            }
            ',' if depth == 0 => {
                arguments.push(text[start..offset].trim().to_string());
                start = offset + 1;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(PlotArgumentError::Unclosed { depth });
    }

    arguments.push(text[start..].trim().to_string());
    Ok(arguments)
}

/// `count` evenly spaced values over `[start, end]`. The first value is
/// exactly `start` and the last exactly `end`.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = count - 1;
            let step = (end - start) / last as f64;
            (0..count)
                .map(|i| {
                    if i == last {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}
