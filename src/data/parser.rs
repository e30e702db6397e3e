// ---------------------------------------------------------------------------
// Lenient CSV scanner
// ---------------------------------------------------------------------------

/// Parse raw CSV text into rows of string fields.
///
/// Single left-to-right scan with one character of lookahead:
/// * `"` toggles quoted mode; `""` inside a quoted field emits a literal `"`
/// * `,` outside quotes closes the current field
/// * `\n`, `\r` or `\r\n` outside quotes closes the current row
///   (a CRLF pair is consumed as one terminator)
/// * anything else, including commas and newlines inside quotes, is taken
///   literally
///
/// Published sheet exports are not always well formed, so this never fails:
/// an unterminated quote swallows the rest of the input as quoted text, and
/// rows may end up ragged. Input without a trailing terminator still yields
/// its final row.
pub fn parse_csv(input: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut field));
            }
            '\r' | '\n' if !in_quotes => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    // No trailing terminator: flush the dangling field/row.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
