use ga_tracker::{
    HitRequest, Options, Parameters, StaticEnvironment, Tracker, TrackingError, Transport,
    TransportErrorKind, UreqTransport,
};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// One-shot HTTP server: accepts a single connection, answers with
/// `status_line` and hands back the raw request head.
fn serve_once(status_line: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }
        let mut stream = stream;
        let body = "gif";
        write!(
            stream,
            "{status_line}\r\nContent-Type: image/gif\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
        tx.send(head).unwrap();
    });

    (format!("http://{addr}/collect"), rx)
}

fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        k.trim()
            .eq_ignore_ascii_case(name)
            .then(|| v.trim())
    })
}

fn make_tracker() -> Tracker {
    let mut opts = Options::new("UA-1234-1", "example.com");
    opts.user_agent = Some("TestAgent/1.0".to_string());
    opts.timeout = Duration::from_secs(2);
    Tracker::new(opts, &StaticEnvironment::default())
}

#[test]
fn sends_get_with_encoded_query_and_headers() {
    let (url, rx) = serve_once("HTTP/1.1 200 OK");
    let tracker = make_tracker();
    let parameters: Parameters = [("t", "pageview"), ("dp", "/home")].into_iter().collect();

    let result = tracker.dispatch(&url, parameters, None).unwrap();
    assert!(result.success());

    let head = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let request_line = head.lines().next().unwrap();
    assert_eq!(request_line, "GET /collect?t=pageview&dp=%2Fhome& HTTP/1.1");
    assert_eq!(header(&head, "Referer"), Some("http://example.com/"));
    assert_eq!(header(&head, "User-Agent"), Some("TestAgent/1.0"));
}

#[test]
fn not_found_response_is_success() {
    let (url, rx) = serve_once("HTTP/1.1 404 Not Found");
    let tracker = make_tracker();
    let parameters: Parameters = [("ReferralUrl", "http://example.com/page")]
        .into_iter()
        .collect();

    let result = tracker.dispatch(&url, parameters, None).unwrap();
    assert!(result.success());
    assert!(result.error().is_none());

    let head = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(header(&head, "Referer"), Some("http://example.com/page"));
}

#[test]
fn server_error_status_is_reported_by_transport() {
    let (url, _rx) = serve_once("HTTP/1.1 503 Service Unavailable");
    let transport = UreqTransport::new(Duration::from_secs(2));
    let request = HitRequest {
        target: format!("{url}?t=pageview&"),
        referer: "http://example.com/".to_string(),
        user_agent: "TestAgent/1.0".to_string(),
    };
    assert_eq!(transport.send(&request).unwrap(), 503);
}

#[test]
fn connection_refused_is_transport_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let url = format!("http://{addr}/collect");

    let transport = UreqTransport::new(Duration::from_secs(2));
    let request = HitRequest {
        target: format!("{url}?t=pageview&"),
        referer: "http://example.com/".to_string(),
        user_agent: "TestAgent/1.0".to_string(),
    };
    let err = transport.send(&request).unwrap_err();
    assert_eq!(err.kind(), TransportErrorKind::Connect);
    assert!(std::error::Error::source(&err).is_some());

    let tracker = make_tracker();
    let result = tracker
        .dispatch(&url, [("t", "pageview")].into_iter().collect(), None)
        .unwrap();
    assert!(!result.success());
    assert!(result.error().unwrap().is_transport());

    let mut opts = Options::new("UA-1234-1", "example.com");
    opts.throw_on_errors = true;
    let throwing = Tracker::new(opts, &StaticEnvironment::default());
    let err = throwing
        .dispatch(&url, [("t", "pageview")].into_iter().collect(), None)
        .unwrap_err();
    assert!(err.is_transport());
}

#[test]
fn non_ascii_header_is_rejected_before_io() {
    let transport = UreqTransport::new(Duration::from_secs(2));
    // Nothing listens on port 9; a bad header must fail before connecting.
    let request = HitRequest {
        target: "http://127.0.0.1:9/collect?t=pageview&".to_string(),
        referer: "http://example.com/página".to_string(),
        user_agent: "Agent/ü".to_string(),
    };

    let err = transport.send(&request).unwrap_err();
    assert_eq!(err.kind(), TransportErrorKind::InvalidRequest);
    assert!(matches!(
        TrackingError::from(err),
        TrackingError::RequestConstruction(_)
    ));
}
