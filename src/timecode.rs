//! `MM:SS` offsets as authored in the catalog.

/// Parse an `MM:SS` offset into `minutes * 60 + seconds`.
///
/// Neither field is range-checked (`75:30` is 4530s, `01:75` is 135s) and a blank field counts as zero.
/// Only the first two fields are read. `None` when a field isn't a number or the seconds field is missing.
pub fn parse_offset(offset: &str) -> Option<u32> {
  let mut fields = offset.split(':');
  let minutes = parse_field(fields.next()?)?;
  let seconds = parse_field(fields.next()?)?;
  minutes.checked_mul(60)?.checked_add(seconds)
}

fn parse_field(field: &str) -> Option<u32> {
  let field = field.trim();
  if field.is_empty() {
    return Some(0);
  }
  field.parse().ok()
}

/// Seconds to seek to for an offset. Malformed offsets seek to the start.
pub fn offset_seconds(offset: &str) -> u32 {
  parse_offset(offset).unwrap_or(0)
}

/// Format seconds back into `MM:SS` (minutes zero-padded to two digits, unbounded above).
pub fn format_offset(total: u32) -> String {
  format!("{:02}:{:02}", total / 60, total % 60)
}
