// Fetch module tests.

use std::time::Duration;

use crate::error_handling::FetchError;
use crate::fetch::{fetch_with_retry, FetchSettings, RetryPolicy};
use crate::testing::{html_body, transport_error, ScriptedTransport};

const PAGE: &str = "https://x.com/p/1";

fn settings(attempts: usize, delay_ms: u64) -> FetchSettings {
    FetchSettings {
        retry: RetryPolicy::new(attempts, Duration::from_millis(delay_ms)),
        timeout: Duration::from_secs(5),
        max_bytes: 1024 * 1024,
    }
}

#[tokio::test(start_paused = true)]
async fn test_succeeds_on_third_attempt_after_two_delays() {
    let transport = ScriptedTransport::new();
    transport.script(
        PAGE,
        vec![
            transport_error(),
            transport_error(),
            html_body(PAGE, "<html></html>"),
        ],
    );

    let result = fetch_with_retry(&transport, PAGE, &settings(3, 750)).await;
    let body = result.expect("third attempt should succeed");
    assert_eq!(body.text(), "<html></html>");

    let calls = transport.calls_for(PAGE);
    assert_eq!(calls.len(), 3);
    // Paused time only advances through sleeps, so each gap is exactly one delay
    assert_eq!(calls[1] - calls[0], Duration::from_millis(750));
    assert_eq!(calls[2] - calls[1], Duration::from_millis(750));
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_return_no_response() {
    let transport = ScriptedTransport::new();
    transport.script(PAGE, vec![transport_error()]);

    let start = tokio::time::Instant::now();
    let result = fetch_with_retry(&transport, PAGE, &settings(3, 100)).await;
    let no_response = result.expect_err("every attempt fails");
    assert_eq!(no_response.attempts, 3);
    assert_eq!(
        no_response.last_error,
        FetchError::Transport("connection reset".to_string())
    );
    // Three attempts, two sleeps, no trailing sleep after the last failure
    assert_eq!(start.elapsed(), Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn test_single_attempt_never_sleeps() {
    let transport = ScriptedTransport::new();
    transport.script(PAGE, vec![transport_error()]);

    let start = tokio::time::Instant::now();
    let result = fetch_with_retry(&transport, PAGE, &settings(1, 5000)).await;
    assert_eq!(result.expect_err("single attempt fails").attempts, 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_non_success_status_is_retried() {
    let transport = ScriptedTransport::new();
    transport.script(
        PAGE,
        vec![
            Err(FetchError::Status {
                status: 503,
                url: PAGE.to_string(),
            }),
            html_body(PAGE, "<p>ok</p>"),
        ],
    );

    let result = fetch_with_retry(&transport, PAGE, &settings(2, 10)).await;
    assert!(result.is_ok());
    assert_eq!(transport.calls_for(PAGE).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_oversized_body_is_not_retried() {
    let transport = ScriptedTransport::new();
    transport.script(PAGE, vec![html_body(PAGE, &"x".repeat(64))]);

    let tight = FetchSettings {
        max_bytes: 16,
        ..settings(3, 10)
    };
    let result = fetch_with_retry(&transport, PAGE, &tight).await;
    let no_response = result.expect_err("body exceeds cap");
    assert_eq!(no_response.attempts, 1);
    assert!(matches!(
        no_response.last_error,
        FetchError::TooLarge { size: 64, limit: 16 }
    ));
}

#[test]
fn test_retry_policy_clamps_zero_attempts() {
    let policy = RetryPolicy::new(0, Duration::from_secs(1));
    assert_eq!(policy.attempts, 1);
    assert_eq!(policy.strategy().count(), 0);
}

#[test]
fn test_retry_policy_strategy_is_fixed() {
    let policy = RetryPolicy::new(4, Duration::from_millis(300));
    let delays: Vec<Duration> = policy.strategy().collect();
    assert_eq!(delays, vec![Duration::from_millis(300); 3]);
}

#[test]
fn test_no_response_display() {
    let no_response = crate::fetch::NoResponse {
        attempts: 2,
        last_error: FetchError::Timeout(PAGE.to_string()),
    };
    assert_eq!(
        no_response.to_string(),
        "no response after 2 attempt(s): Request to https://x.com/p/1 timed out"
    );
}
