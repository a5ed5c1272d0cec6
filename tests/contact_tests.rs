//! Integration tests for the contact form lifecycle, driven through a mock
//! submitter.

use std::cell::{Cell, RefCell};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use folio::contact::SubmitResponse;
use folio::{
    ContactConfig, ContactError, ContactForm, FormClient, FormStatus, SubmitWorker, Submission,
    Submitter,
};

/// Records what it was asked to send and answers with a fixed reply.
struct Recorder {
    reply: Result<SubmitResponse, ContactError>,
    calls: Cell<u32>,
    last: RefCell<Option<Submission>>,
}

impl Recorder {
    fn new(reply: Result<SubmitResponse, ContactError>) -> Self {
        Self {
            reply,
            calls: Cell::new(0),
            last: RefCell::new(None),
        }
    }

    fn success() -> Self {
        Self::new(Ok(SubmitResponse {
            success: true,
            message: "Email sent successfully!".into(),
        }))
    }
}

impl Submitter for Recorder {
    fn submit(&self, submission: &Submission) -> Result<SubmitResponse, ContactError> {
        self.calls.set(self.calls.get() + 1);
        *self.last.borrow_mut() = Some(submission.clone());
        self.reply.clone()
    }
}

fn filled() -> ContactForm {
    let mut form = ContactForm::new(Duration::from_secs(3));
    form.name = "Grace".into();
    form.email = "grace@example.com".into();
    form.message = "Loved the portfolio".into();
    form
}

// ============================================================================
// Success path
// ============================================================================

#[test]
fn test_submission_carries_fields() {
    let mut form = filled();
    let recorder = Recorder::success();
    form.submit_with(&recorder).unwrap();

    let sent = recorder.last.borrow().clone().unwrap();
    assert_eq!(sent.name, "Grace");
    assert_eq!(sent.email, "grace@example.com");
    assert_eq!(sent.message, "Loved the portfolio");
    assert_eq!(recorder.calls.get(), 1);
}

#[test]
fn test_sent_returns_to_idle_after_window() {
    let mut form = filled();
    form.submit_with(&Recorder::success()).unwrap();
    assert_eq!(form.status(), &FormStatus::Sent);
    assert_eq!(form.status().message(), None);

    for _ in 0..187 {
        form.tick(Duration::from_millis(16));
    }
    assert_eq!(form.status(), &FormStatus::Sent);
    form.tick(Duration::from_millis(16));
    assert_eq!(form.status(), &FormStatus::Idle);
}

// ============================================================================
// Failure paths
// ============================================================================

#[test]
fn test_rejected_message() {
    let mut form = filled();
    let recorder = Recorder::new(Ok(SubmitResponse {
        success: false,
        message: "Invalid access key".into(),
    }));
    let err = form.submit_with(&recorder).unwrap_err();

    assert_eq!(err, ContactError::Rejected("Invalid access key".into()));
    assert_eq!(
        form.status().message(),
        Some("Failed to send message. Please try again.")
    );
    assert_eq!(form.name, "Grace");
}

#[test]
fn test_transport_and_bad_body_messages() {
    for failure in [
        ContactError::Transport("connection refused".into()),
        ContactError::InvalidResponse("expected value".into()),
    ] {
        let mut form = filled();
        form.submit_with(&Recorder::new(Err(failure))).unwrap_err();
        assert_eq!(
            form.status().message(),
            Some("Error sending message. Please try again.")
        );
        assert_eq!(form.message, "Loved the portfolio");
    }
}

#[test]
fn test_retry_after_error() {
    let mut form = filled();
    form.submit_with(&Recorder::new(Err(ContactError::Transport("down".into()))))
        .unwrap_err();
    form.submit_with(&Recorder::success()).unwrap();
    assert_eq!(form.status(), &FormStatus::Sent);
}

#[test]
fn test_outstanding_submission_blocks_second() {
    let mut form = filled();
    let recorder = Recorder::success();
    form.begin_submit().unwrap();

    assert_eq!(form.submit_with(&recorder), Err(ContactError::AlreadySending));
    assert_eq!(recorder.calls.get(), 0);
    assert!(form.is_loading());
}

#[test]
fn test_stray_result_ignored() {
    let mut form = filled();
    assert_eq!(form.finish(Err(ContactError::Transport("late".into()))), Ok(()));
    assert_eq!(form.status(), &FormStatus::Idle);
}

#[test]
fn test_unreachable_endpoint_is_transport_error() {
    // Port 9 on localhost (discard) is closed on test machines.
    let config = ContactConfig::default().with_endpoint("http://127.0.0.1:9/submit");
    let client = FormClient::new(&config);
    let mut form = filled();
    let err = form.submit_with(&client).unwrap_err();
    assert!(matches!(err, ContactError::Transport(_)), "{err:?}");
}

// ============================================================================
// Form endpoint over a local socket
// ============================================================================

/// What the fixture server received.
struct Request {
    request_line: String,
    content_type: String,
    body: String,
}

/// Serve one HTTP exchange on an ephemeral port with a canned JSON reply.
/// Returns the endpoint URL and a handle yielding the request.
fn serve_once(status: &'static str, reply: &'static str) -> (String, JoinHandle<Request>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/submit", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut content_type = String::new();
        let mut length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    length = value.trim().parse().unwrap();
                } else if name.eq_ignore_ascii_case("content-type") {
                    content_type = value.trim().to_string();
                }
            }
        }
        let mut body = vec![0; length];
        reader.read_exact(&mut body).unwrap();

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
            reply.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        Request {
            request_line: request_line.trim_end().to_string(),
            content_type,
            body: String::from_utf8(body).unwrap(),
        }
    });
    (url, handle)
}

fn client_for(url: &str) -> FormClient {
    FormClient::new(&ContactConfig::default().with_endpoint(url).with_access_key("test-key"))
}

fn awkward() -> Submission {
    Submission {
        name: "A b".into(),
        email: "a@b.c".into(),
        message: "hi&x".into(),
    }
}

#[test]
fn test_client_posts_urlencoded_form() {
    let (url, server) = serve_once("200 OK", r#"{"success":true,"message":"Email sent successfully!"}"#);
    let response = client_for(&url).submit(&awkward()).unwrap();
    let request = server.join().unwrap();

    assert_eq!(request.request_line, "POST /submit HTTP/1.1");
    assert_eq!(request.content_type, "application/x-www-form-urlencoded");
    assert_eq!(request.body, "name=A+b&email=a%40b.c&message=hi%26x&access_key=test-key");
    assert_eq!(
        response,
        SubmitResponse {
            success: true,
            message: "Email sent successfully!".into(),
        }
    );
}

#[test]
fn test_error_status_body_still_parsed() {
    let (url, server) = serve_once("400 Bad Request", r#"{"success":false,"message":"bad key"}"#);
    let response = client_for(&url).submit(&awkward());
    server.join().unwrap();

    assert_eq!(
        response,
        Ok(SubmitResponse {
            success: false,
            message: "bad key".into(),
        })
    );

    // The form turns that into a rejection
    let (url, server) = serve_once("400 Bad Request", r#"{"success":false,"message":"bad key"}"#);
    let mut form = filled();
    let err = form.submit_with(&client_for(&url)).unwrap_err();
    server.join().unwrap();
    assert_eq!(err, ContactError::Rejected("bad key".into()));
}

#[test]
fn test_non_json_body_is_invalid_response() {
    let (url, server) = serve_once("502 Bad Gateway", "<html>gateway</html>");
    let err = client_for(&url).submit(&awkward()).unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, ContactError::InvalidResponse(_)), "{err:?}");
}

// ============================================================================
// Background worker
// ============================================================================

/// Thread-safe canned reply.
struct Canned(Result<SubmitResponse, ContactError>);

impl Submitter for Canned {
    fn submit(&self, _: &Submission) -> Result<SubmitResponse, ContactError> {
        self.0.clone()
    }
}

fn wait_for(worker: &mut SubmitWorker) -> Result<SubmitResponse, ContactError> {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(result) = worker.poll() {
            return result;
        }
        assert!(Instant::now() < deadline, "worker never answered");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_worker_answers_in_order() {
    let reply = SubmitResponse {
        success: true,
        message: "ok".into(),
    };
    let mut worker = SubmitWorker::spawn(Canned(Ok(reply.clone()))).unwrap();
    assert!(worker.poll().is_none());

    worker.send(awkward()).unwrap();
    worker.send(awkward()).unwrap();
    assert_eq!(worker.pending(), 2);
    assert_eq!(wait_for(&mut worker), Ok(reply.clone()));
    assert_eq!(wait_for(&mut worker), Ok(reply));
    assert_eq!(worker.pending(), 0);
    assert!(worker.poll().is_none());
}

#[test]
fn test_worker_drives_form_through_http() {
    let (url, server) = serve_once("200 OK", r#"{"success":true,"message":"Email sent successfully!"}"#);
    let mut worker = SubmitWorker::spawn(client_for(&url)).unwrap();
    let mut form = filled();

    worker.send(form.begin_submit().unwrap()).unwrap();
    assert_eq!(form.status(), &FormStatus::Loading);

    form.finish(wait_for(&mut worker)).unwrap();
    assert_eq!(form.status(), &FormStatus::Sent);
    assert!(form.name.is_empty());
    assert!(server.join().unwrap().body.starts_with("name=Grace&"));
}
