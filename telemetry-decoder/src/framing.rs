//! Packet framing
//!
//! Packets look like `+...$`. The raw text is cut into candidate packets on
//! line feeds and on direct `$+` boundaries, then each candidate is checked
//! against the framing markers. Candidates that fail the check are noise.

/// Marks the first character of a packet
pub const START_MARKER: char = '+';

/// Marks the last character of a packet
pub const END_MARKER: char = '$';

/// Separates packets in the stream
pub const LINE_SEPARATOR: char = '\n';

/// Tells whether a line has packet framing
///
/// The first run of whitespace is ignored when looking for the start marker.
/// Only a leading run can change the first character, so trimming the start
/// is equivalent. The end marker must be the very last character of the
/// unmodified line.
pub fn is_packet(line: &str) -> bool {
    line.trim_start().starts_with(START_MARKER) && line.ends_with(END_MARKER)
}

/// Split a buffered payload into candidate packets, in input order
///
/// Splits on line feeds first, then after every end marker that is directly
/// followed by a start marker, so `A$+B$` yields `A$` and `+B$`.
pub fn split_packets(payload: &str) -> impl Iterator<Item = &str> {
    payload.split(LINE_SEPARATOR).flat_map(BoundarySplit::new)
}

/// Iterator over the pieces of one line cut at `$+` boundaries
struct BoundarySplit<'a> {
    rest: Option<&'a str>,
}

impl<'a> BoundarySplit<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: Some(line) }
    }
}

impl<'a> Iterator for BoundarySplit<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        let boundary = rest
            .char_indices()
            .zip(rest.chars().skip(1))
            .find(|((_, c), next)| *c == END_MARKER && *next == START_MARKER)
            .map(|((idx, _), _)| idx);

        match boundary {
            Some(idx) => {
                // Both markers are ASCII, so idx + 1 is a char boundary
                let (head, tail) = rest.split_at(idx + 1);
                self.rest = Some(tail);
                Some(head)
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_packet_accepts_framed_lines() {
        assert!(is_packet("+IN,DeviceInfo,1,2,3,2021-01-14T15:05:10,0035$"));
        assert!(is_packet("   +IN,Error$"));
        assert!(is_packet("\t+$"));
    }

    #[test]
    fn test_is_packet_rejects_noise() {
        assert!(!is_packet(""));
        assert!(!is_packet("   "));
        assert!(!is_packet("AABBAA"));
        assert!(!is_packet("+IN,DeviceInfo,1"));
        assert!(!is_packet("IN,DeviceInfo$"));
        assert!(!is_packet("+IN,DeviceInfo$ "));
        assert!(!is_packet("+IN,DeviceInfo$\r"));
        // Whitespace after a non-marker character does not help
        assert!(!is_packet("x +IN$"));
    }

    #[test]
    fn test_split_packets_on_lines() {
        let parts: Vec<&str> = split_packets("+a$\nnoise\n\n+b$").collect();
        assert_eq!(parts, vec!["+a$", "noise", "", "+b$"]);
    }

    #[test]
    fn test_split_packets_on_boundary() {
        let parts: Vec<&str> = split_packets("+a,1$+b,2$+c,3$\n+d$").collect();
        assert_eq!(parts, vec!["+a,1$", "+b,2$", "+c,3$", "+d$"]);
    }

    #[test]
    fn test_split_packets_keeps_lone_markers() {
        // `$` not followed by `+`, and `+` not preceded by `$`, are not boundaries
        let parts: Vec<&str> = split_packets("+a$b+c$ +d$").collect();
        assert_eq!(parts, vec!["+a$b+c$ +d$"]);
    }

    #[test]
    fn test_split_packets_empty_payload() {
        let parts: Vec<&str> = split_packets("").collect();
        assert_eq!(parts, vec![""]);
    }
}
