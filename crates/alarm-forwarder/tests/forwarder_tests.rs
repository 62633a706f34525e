//! End-to-end tests for the forwarder.
//!
//! A wiremock server plays the Slack webhook; every test builds its own
//! webhook directory, so nothing here reads the process environment.

use alarm_forwarder::{
    lookup_key, ForwardResponse, Forwarder, ForwarderError, SnsEnvelope, WebhookDirectory,
};
use serde_json::{json, Value};
use slack_webhook::WebhookClient;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn alarm(state: &str) -> Value {
    json!({
        "AlarmName": "prod-high-cpu",
        "NewStateValue": state,
        "NewStateReason": "CPU > 90%",
        "Region": "us-east-1",
        "StateChangeTime": "2024-01-01T00:00:00Z",
        "AlarmDescription": "{\"slack_channel\":\"infra\"}"
    })
}

fn sns_event(alarm: &Value) -> Value {
    json!({
        "Records": [{
            "EventSource": "aws:sns",
            "Sns": {
                "MessageId": "95df01b4-ee98-5cb9-9903-4c221d41eb5e",
                "TopicArn": "arn:aws:sns:us-east-1:123456789012:cloudwatch-alarms",
                "Subject": "ALARM: \"prod-high-cpu\" in US East (N. Virginia)",
                "Message": alarm.to_string()
            }
        }]
    })
}

fn expected_payload(state: &str, color: &str, channel: &str) -> Value {
    json!({
        "channel": format!("#{}", channel),
        "attachments": [{
            "color": color,
            "title": "CloudWatch Alarm: prod-high-cpu",
            "fields": [
                {"title": "Status", "value": state, "short": true},
                {"title": "Region", "value": "us-east-1", "short": true},
                {"title": "Environment", "value": "prod", "short": true},
                {"title": "Channel", "value": channel, "short": true},
                {"title": "Reason", "value": "CPU > 90%", "short": false}
            ],
            "footer": "AWS CloudWatch Alarm",
            "ts": 1_704_067_200
        }]
    })
}

fn forwarder(directory: WebhookDirectory) -> Forwarder {
    Forwarder::new(directory, WebhookClient::new().unwrap())
}

#[tokio::test]
async fn test_alarm_routes_to_channel_webhook() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/infra"))
        .and(header("content-type", "application/json"))
        .and(body_json(expected_payload("ALARM", "#FF0000", "infra")))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let directory = WebhookDirectory::default()
        .with("SLACK_WEBHOOK_URL_INFRA", format!("{}/infra", server.uri()));

    let response = forwarder(directory)
        .handle_value(sns_event(&alarm("ALARM")))
        .await
        .unwrap();

    assert_eq!(response, ForwardResponse::success());
    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn test_ok_state_is_green() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/infra"))
        .and(body_json(expected_payload("OK", "#36A64F", "infra")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let directory = WebhookDirectory::default()
        .with(lookup_key("infra"), format!("{}/infra", server.uri()));

    forwarder(directory)
        .handle_value(sns_event(&alarm("OK")))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_missing_description_uses_default_webhook() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/default"))
        .and(body_json(expected_payload("ALARM", "#FF0000", "general")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut message = alarm("ALARM");
    message.as_object_mut().unwrap().remove("AlarmDescription");

    let directory = WebhookDirectory::from_vars([
        ("SLACK_WEBHOOK_URL".to_string(), format!("{}/default", server.uri())),
        ("SLACK_WEBHOOK_URL_INFRA".to_string(), format!("{}/infra", server.uri())),
    ]);

    let response = forwarder(directory)
        .handle_value(sns_event(&message))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn test_unresolved_destination_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = forwarder(WebhookDirectory::default())
        .handle_value(sns_event(&alarm("ALARM")))
        .await
        .unwrap_err();

    match &err {
        ForwarderError::UnresolvedDestination { channel } => assert_eq!(channel, "infra"),
        other => panic!("Expected UnresolvedDestination, got {:?}", other),
    }
    assert!(err.to_string().contains("infra"));
}

#[tokio::test]
async fn test_channel_lookup_ignores_case_and_separators() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/team"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let directory = WebhookDirectory::default()
        .with("SLACK_WEBHOOK_URL_MY_TEAM", format!("{}/team", server.uri()));
    let forwarder = forwarder(directory);

    for channel in ["my-team", "MY_TEAM"] {
        let mut message = alarm("ALARM");
        message["AlarmDescription"] = json!(json!({ "slack_channel": channel }).to_string());
        forwarder.handle_value(sns_event(&message)).await.unwrap();
    }
}

#[tokio::test]
async fn test_webhook_rejection_is_delivery_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("invalid_token"))
        .expect(1)
        .mount(&server)
        .await;

    let directory = WebhookDirectory::default()
        .with("SLACK_WEBHOOK_URL", format!("{}/default", server.uri()));

    let err = forwarder(directory)
        .handle_value(sns_event(&alarm("ALARM")))
        .await
        .unwrap_err();

    match err {
        ForwarderError::Delivery(inner) => {
            assert_eq!(inner.status().map(|s| s.as_u16()), Some(403));
        }
        other => panic!("Expected Delivery error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_field_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut message = alarm("ALARM");
    message.as_object_mut().unwrap().remove("NewStateReason");

    let directory = WebhookDirectory::default()
        .with("SLACK_WEBHOOK_URL", format!("{}/default", server.uri()));

    let err = forwarder(directory)
        .handle_value(sns_event(&message))
        .await
        .unwrap_err();

    assert!(matches!(err, ForwarderError::MissingField("NewStateReason")));
}

#[tokio::test]
async fn test_malformed_envelopes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let directory = WebhookDirectory::default()
        .with("SLACK_WEBHOOK_URL", format!("{}/default", server.uri()));
    let forwarder = forwarder(directory);

    let cases = [
        json!({}),
        json!({"Records": []}),
        json!({"Records": [{"Sns": {}}]}),
        json!({"Records": [{"Sns": {"Message": "not json"}}]}),
        json!("just a string"),
    ];

    for payload in cases {
        let err = forwarder.handle_value(payload.clone()).await.unwrap_err();
        assert!(
            matches!(err, ForwarderError::MalformedEvent(_)),
            "payload {} gave {:?}",
            payload,
            err
        );
    }
}

#[tokio::test]
async fn test_only_first_record_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(expected_payload("ALARM", "#FF0000", "infra")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut second = alarm("OK");
    second["AlarmName"] = json!("dev-disk");

    let mut envelope: SnsEnvelope = serde_json::from_value(sns_event(&alarm("ALARM"))).unwrap();
    envelope
        .records
        .extend(SnsEnvelope::single(second.to_string()).records);
    assert_eq!(envelope.records.len(), 2);

    let directory = WebhookDirectory::default()
        .with("SLACK_WEBHOOK_URL_INFRA", format!("{}/infra", server.uri()));

    forwarder(directory).handle_envelope(&envelope).await.unwrap();
}

#[test]
fn test_fixture_event_formats() {
    let envelope: SnsEnvelope =
        serde_json::from_str(include_str!("../fixtures/sns_alarm.json")).unwrap();
    let notification = envelope.first_notification().unwrap();
    let event = alarm_forwarder::AlarmEvent::from_message(&notification.message).unwrap();
    let message = alarm_forwarder::transform(&event);

    assert_eq!(message.channel.as_deref(), Some("#infra"));
    assert_eq!(message.attachments[0].color, "#FF0000");
    assert_eq!(message.attachments[0].ts, Some(1_704_067_200));
    assert_eq!(message.attachments[0].fields[1].value, "US East (N. Virginia)");
}
