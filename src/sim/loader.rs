use log::trace;

use super::RawRecord;
use crate::error::InputError;

/// Parse the textual process table.
///
/// The first line is a header and is skipped. Every following line holds
/// `pid arrival burst priority` as whitespace-separated integers; blank
/// lines and `#` comments are ignored. Any other line is rejected rather
/// than silently ending the table.
pub fn parse_records(input: &str) -> Result<Vec<RawRecord>, InputError> {
    input
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}

fn parse_line(line_no: usize, line: &str) -> Result<RawRecord, InputError> {
    let malformed = || InputError::Malformed {
        line: line_no,
        text: line.to_owned(),
    };

    let fields = line
        .split_whitespace()
        .map(|field| field.parse::<i64>().map_err(|_| malformed()))
        .collect::<Result<Vec<_>, _>>()?;
    let &[pid, arrival, burst, priority] = fields.as_slice() else {
        return Err(malformed());
    };

    trace!("line {line_no}: pid={pid} arrival={arrival} burst={burst} priority={priority}");
    Ok(RawRecord::new(pid, arrival, burst, priority))
}
