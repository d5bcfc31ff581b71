//! Interactive page-range prompt for batch mode.

use std::io::{BufRead, Write};

use grocer_core::PageRange;

/// Invalid answers tolerated before giving up.
const MAX_PROMPTS: usize = 5;

/// Asks for a page range within `[1, total_pages]` until a valid one is
/// entered, at most [`MAX_PROMPTS`] times.
///
/// Accepts `FROM-TO`, `FROM TO`, or a single page number.
///
/// # Errors
///
/// Fails when the category has no pages, input ends, reading fails, or
/// every attempt was invalid.
pub(super) fn prompt_page_range<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    total_pages: u32,
) -> anyhow::Result<PageRange> {
    if total_pages == 0 {
        anyhow::bail!("category has no pages to fetch");
    }

    for _ in 0..MAX_PROMPTS {
        write!(output, "Enter page range to fetch (1-{total_pages}), e.g. 1-{total_pages}: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("no page range entered (input closed)");
        }

        match parse_range(&line).and_then(|(from, to)| PageRange::within(from, to, total_pages)) {
            Some(range) => return Ok(range),
            None => {
                writeln!(
                    output,
                    "Invalid page range \"{}\": expected FROM-TO with 1 <= FROM <= TO <= {total_pages}",
                    line.trim()
                )?;
            }
        }
    }

    anyhow::bail!("no valid page range after {MAX_PROMPTS} attempts")
}

fn parse_range(line: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = line
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [single] => {
            let page = single.parse().ok()?;
            Some((page, page))
        }
        [from, to] => Some((from.parse().ok()?, to.parse().ok()?)),
        _ => None,
    }
}
