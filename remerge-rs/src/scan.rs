//! Alignment scanning for user-edited regions.
//!
//! The scanner isolates the contiguous run of observed lines that falls
//! between two baseline anchor points - the user's edited or added content
//! for one baseline-aligned block. It has no side effects and runs in time
//! linear in the slice length.

/// Result of scanning an observed slice for an anchor line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Lines collected before the anchor (or the entire slice).
    pub captured: Vec<String>,
    /// How many lines of the slice were consumed. The anchor itself, when
    /// found, is not consumed.
    pub consumed: usize,
}

impl ScanResult {
    /// Returns true if the scan stopped at the anchor rather than running
    /// off the end of the slice.
    pub fn found_anchor(&self, slice_len: usize) -> bool {
        self.consumed < slice_len
    }
}

/// Scans `observed` in order, collecting lines until `anchor` is found.
///
/// The anchor line itself is not captured or consumed. If the slice is
/// exhausted first, the captured lines are the entire slice. An absent
/// anchor means the entire remaining slice is captured.
pub fn scan_to_anchor(observed: &[String], anchor: Option<&str>) -> ScanResult {
    let mut captured = Vec::new();
    let mut consumed = 0;

    for line in observed {
        if anchor == Some(line.as_str()) {
            break;
        }
        captured.push(line.clone());
        consumed += 1;
    }

    ScanResult { captured, consumed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scan_stops_at_anchor() {
        let observed = lines(&["b1", "b2", "c", "d"]);
        let result = scan_to_anchor(&observed, Some("c"));

        assert_eq!(result.captured, lines(&["b1", "b2"]));
        assert_eq!(result.consumed, 2);
        assert!(result.found_anchor(observed.len()));
    }

    #[test]
    fn test_scan_anchor_at_start_consumes_nothing() {
        let observed = lines(&["c", "d"]);
        let result = scan_to_anchor(&observed, Some("c"));

        assert!(result.captured.is_empty());
        assert_eq!(result.consumed, 0);
        assert!(result.found_anchor(observed.len()));
    }

    #[test]
    fn test_scan_exhausts_slice_when_anchor_missing() {
        let observed = lines(&["x", "y"]);
        let result = scan_to_anchor(&observed, Some("z"));

        assert_eq!(result.captured, observed);
        assert_eq!(result.consumed, 2);
        assert!(!result.found_anchor(observed.len()));
    }

    #[test]
    fn test_scan_absent_anchor_captures_everything() {
        let observed = lines(&["x", "y", "z"]);
        let result = scan_to_anchor(&observed, None);

        assert_eq!(result.captured, observed);
        assert_eq!(result.consumed, 3);
    }

    #[test]
    fn test_scan_empty_slice() {
        let result = scan_to_anchor(&[], Some("a"));
        assert!(result.captured.is_empty());
        assert_eq!(result.consumed, 0);
    }

    #[test]
    fn test_scan_empty_line_is_not_absent_anchor() {
        // An empty anchor line is a real line, not the absent marker.
        let observed = lines(&["x", "", "y"]);
        let result = scan_to_anchor(&observed, Some(""));

        assert_eq!(result.captured, lines(&["x"]));
        assert_eq!(result.consumed, 1);
    }
}
