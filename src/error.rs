use anyhow::anyhow;
use reqwest::StatusCode;

const BODY_SNIPPET: usize = 200;

pub(crate) fn format_http_error(status: StatusCode, url: &str, body: &str) -> anyhow::Error {
    let snippet = snippet(body);

    // Quicklook files are only published for days EVE has data; a gap is common.
    if status == StatusCode::NOT_FOUND {
        return anyhow!(
            "No EVE quicklook file for this day (HTTP 404).\n- LASP only publishes Level 0CS quicklook files for days with data; older or future days may be missing\n- Check the requested time range\n\nrequest: {}",
            url
        );
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return anyhow!(
            "LASP refused the download (HTTP {}).\n- The archive is public; a proxy or firewall may be rejecting the request\n\nServer message: {}\nrequest: {}",
            status.as_u16(),
            snippet,
            url
        );
    }

    if status.is_server_error() {
        return anyhow!(
            "LASP server error (HTTP {}). The archive may be down; try again later.\n\nServer message: {}\nrequest: {}",
            status.as_u16(),
            snippet,
            url
        );
    }

    anyhow!(
        "download failed: HTTP {} for url ({})\n{}",
        status.as_u16(),
        url,
        snippet
    )
}

fn snippet(body: &str) -> &str {
    let body = body.trim();
    match body.char_indices().nth(BODY_SNIPPET) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://lasp.example/2016/20160101_EVE_L0CS_DIODES_1m.txt";

    #[test]
    fn not_found_explains_missing_day() {
        let msg = format_http_error(StatusCode::NOT_FOUND, URL, "").to_string();
        assert!(msg.contains("HTTP 404"));
        assert!(msg.contains(URL));
    }

    #[test]
    fn server_error_and_forbidden() {
        let msg = format_http_error(StatusCode::BAD_GATEWAY, URL, "upstream").to_string();
        assert!(msg.contains("server error (HTTP 502)"));
        assert!(msg.contains("upstream"));

        let msg = format_http_error(StatusCode::FORBIDDEN, URL, "").to_string();
        assert!(msg.contains("refused"));
    }

    #[test]
    fn other_statuses_fall_through() {
        let body = "x".repeat(1000);
        let msg = format_http_error(StatusCode::IM_A_TEAPOT, URL, &body).to_string();
        assert!(msg.starts_with("download failed: HTTP 418"));
        assert!(msg.len() < 400);
    }
}
