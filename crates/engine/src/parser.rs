//! Conntrack table row parsing

use ctreuse_common::{ConnEntry, ConnParams, MonitorError, MonitorResult};

/// Entries with this many remaining seconds or more are not near expiry and
/// are of no interest to the monitor.
const EXPIRY_CEILING: u64 = 120;

/// A parseable row carries at least the protocol columns, expiry, state,
/// and both tuples. The kernel appends variable flag columns after these.
const MIN_TOKENS: usize = 15;

/// Convert one whitespace-split table row into an entry, or reject it.
///
/// Rejections (`Ok(None)`) are routine filtering: short rows, non-TCP
/// transport, a destination that does not match the filter, or an entry too
/// far from expiry. Only an expiry token that fails to parse as base-10 is
/// an error, since that means the table format itself changed.
pub fn parse_row(tokens: &[&str], filter: Option<&str>) -> MonitorResult<Option<ConnEntry>> {
    if tokens.len() < MIN_TOKENS {
        return Ok(None);
    }

    // Only TCP slots are tracked.
    if tokens[2] != "tcp" {
        return Ok(None);
    }

    let params = ConnParams {
        net_proto_name: tokens[0].to_string(),
        net_proto_code: tokens[1].to_string(),
        transport_name: tokens[2].to_string(),
        transport_code: tokens[3].to_string(),
        state: strip_key(tokens[5]).to_string(),
        from_ip: strip_key(tokens[6]).to_string(),
        to_ip: strip_key(tokens[7]).to_string(),
        from_port: strip_key(tokens[8]).to_string(),
        to_port: strip_key(tokens[9]).to_string(),
        dest_ip: strip_key(tokens[10]).to_string(),
        reply_ip: strip_key(tokens[11]).to_string(),
        dest_port: strip_key(tokens[12]).to_string(),
        reply_port: strip_key(tokens[13]).to_string(),
    };

    if let Some(ip) = filter {
        if !ip.is_empty() && params.to_ip != ip {
            return Ok(None);
        }
    }

    let expiry: u64 = tokens[4].parse().map_err(|_| MonitorError::MalformedExpiry {
        token: tokens[4].to_string(),
    })?;

    if expiry >= EXPIRY_CEILING {
        return Ok(None);
    }

    Ok(Some(ConnEntry::new(params, expiry)))
}

/// Strip the `key=` prefix from a token; tokens without `=` pass through.
fn strip_key(token: &str) -> &str {
    match token.find('=') {
        Some(idx) => &token[idx + 1..],
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(line: &str) -> Vec<&str> {
        line.split_whitespace().collect()
    }

    fn sample_row(transport: &str, expiry: &str, dst: &str) -> String {
        format!(
            "ipv4     2 {}      6 {} ESTABLISHED src=10.0.0.1 dst={} sport=48123 dport=443 \
             src={} dst=10.0.0.1 sport=443 dport=48123 [ASSURED] mark=0 use=1",
            transport, expiry, dst, dst
        )
    }

    #[test]
    fn parses_valid_tcp_row() {
        let line = sample_row("tcp", "30", "10.0.0.5");
        let entry = parse_row(&tokenize(&line), None).unwrap().unwrap();
        assert_eq!(entry.expiry, 30);
        assert_eq!(entry.params.net_proto_name, "ipv4");
        assert_eq!(entry.params.transport_code, "6");
        assert_eq!(entry.params.state, "ESTABLISHED");
        assert_eq!(entry.params.from_ip, "10.0.0.1");
        assert_eq!(entry.params.to_ip, "10.0.0.5");
        assert_eq!(entry.params.from_port, "48123");
        assert_eq!(entry.params.to_port, "443");
        assert_eq!(entry.params.dest_ip, "10.0.0.5");
        assert_eq!(entry.params.reply_ip, "10.0.0.1");
        assert_eq!(entry.params.dest_port, "443");
        assert_eq!(entry.params.reply_port, "48123");
    }

    #[test]
    fn rejects_short_row() {
        let row = parse_row(&tokenize("ipv4 2 tcp 6 30 ESTABLISHED src=10.0.0.1"), None);
        assert!(row.unwrap().is_none());
    }

    #[test]
    fn rejects_blank_row() {
        assert!(parse_row(&tokenize("   "), None).unwrap().is_none());
        assert!(parse_row(&[], None).unwrap().is_none());
    }

    #[test]
    fn rejects_udp_row() {
        let line = sample_row("udp", "30", "10.0.0.5");
        assert!(parse_row(&tokenize(&line), None).unwrap().is_none());
    }

    #[test]
    fn rejects_expiry_at_or_above_ceiling() {
        let line = sample_row("tcp", "120", "10.0.0.5");
        assert!(parse_row(&tokenize(&line), None).unwrap().is_none());

        let line = sample_row("tcp", "431999", "10.0.0.5");
        assert!(parse_row(&tokenize(&line), None).unwrap().is_none());
    }

    #[test]
    fn accepts_expiry_below_ceiling() {
        let line = sample_row("tcp", "119", "10.0.0.5");
        assert_eq!(parse_row(&tokenize(&line), None).unwrap().unwrap().expiry, 119);
    }

    #[test]
    fn rejects_filtered_destination() {
        let line = sample_row("tcp", "30", "10.0.0.9");
        assert!(parse_row(&tokenize(&line), Some("10.0.0.5")).unwrap().is_none());
    }

    #[test]
    fn keeps_matching_destination() {
        let line = sample_row("tcp", "30", "10.0.0.5");
        assert!(parse_row(&tokenize(&line), Some("10.0.0.5")).unwrap().is_some());
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let line = sample_row("tcp", "30", "10.0.0.9");
        assert!(parse_row(&tokenize(&line), Some("")).unwrap().is_some());
    }

    #[test]
    fn malformed_expiry_is_an_error() {
        let line = sample_row("tcp", "abc", "10.0.0.5");
        let err = parse_row(&tokenize(&line), None).unwrap_err();
        match err {
            MonitorError::MalformedExpiry { token } => assert_eq!(token, "abc"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn filtered_row_with_malformed_expiry_is_skipped() {
        // The filter check runs before the expiry parse, matching the
        // original table consumer.
        let line = sample_row("tcp", "abc", "10.0.0.9");
        assert!(parse_row(&tokenize(&line), Some("10.0.0.5")).unwrap().is_none());
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let line = format!("{} extra tokens here", sample_row("tcp", "30", "10.0.0.5"));
        assert!(parse_row(&tokenize(&line), None).unwrap().is_some());
    }

    #[test]
    fn strip_key_removes_prefix() {
        assert_eq!(strip_key("src=10.0.0.1"), "10.0.0.1");
        assert_eq!(strip_key("sport=443"), "443");
        assert_eq!(strip_key("ESTABLISHED"), "ESTABLISHED");
        assert_eq!(strip_key("mark="), "");
    }
}
