// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Requests parsed from JSON and run through the orchestrator.

use davcal_core::{Orchestrator, Request, Response};
use serde_json::json;

use crate::common::{SpyTransport, test_config};

fn request(value: serde_json::Value) -> Request {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn requests_full_event_cycle() {
    // Arrange
    let spy = SpyTransport::new();
    let orchestrator = Orchestrator::new(spy.clone(), test_config());

    // Act - calendar
    let calendar = orchestrator
        .execute(request(json!({
            "resource": "calendar",
            "operation": "create",
            "name": "Work",
            "color": "#3366ff",
        })))
        .await
        .unwrap();

    // Assert - calendar
    let calendar = serde_json::to_value(&calendar).unwrap();
    assert_eq!(calendar["displayName"], "Work");
    assert_eq!(calendar["url"], "/calendars/alice/work/");
    assert_eq!(calendar["color"], "#3366ff");
    assert!(calendar.get("timezone").is_none());

    // Act - create
    let created = orchestrator
        .execute(request(json!({
            "resource": "event",
            "operation": "create",
            "calendar": "Work",
            "title": "Kickoff",
            "start": "2025-06-02T09:00:00Z",
            "end": "2025-06-02T10:00:00Z",
            "location": "Room 1",
        })))
        .await
        .unwrap();
    let Response::Event(created) = created else {
        panic!("expected an event, got {created:?}");
    };
    let uid = created.uid().to_string();

    // Act - update clearing the location
    let updated = orchestrator
        .execute(request(json!({
            "resource": "event",
            "operation": "update",
            "calendar": "Work",
            "uid": uid,
            "location": null,
        })))
        .await
        .unwrap();

    // Assert - update
    let Response::Event(updated) = updated else {
        panic!("expected an event, got {updated:?}");
    };
    assert_eq!(updated.event.title, "Kickoff");
    assert_eq!(updated.event.location, None);
    assert_ne!(updated.etag, created.etag);

    // Act - search
    let found = orchestrator
        .execute(request(json!({
            "resource": "event",
            "operation": "search",
            "calendar": "Work",
            "term": "KICK",
            "start": "2025-06-01T00:00:00Z",
            "end": "2025-06-30T00:00:00Z",
        })))
        .await
        .unwrap();
    assert!(matches!(&found, Response::Events(list) if list.len() == 1));

    // Act - delete
    let deleted = orchestrator
        .execute(request(json!({
            "resource": "event",
            "operation": "delete",
            "calendar": "Work",
            "uid": uid,
        })))
        .await
        .unwrap();

    // Assert - delete
    assert_eq!(
        serde_json::to_value(&deleted).unwrap(),
        json!({"success": true, "uid": uid})
    );
    assert_eq!(spy.object_count(), 0);
}

#[tokio::test]
async fn requests_event_serializes_camel_case() {
    // Arrange
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    let orchestrator = Orchestrator::new(spy, test_config());

    // Act
    let response = orchestrator
        .execute(request(json!({
            "resource": "event",
            "operation": "create",
            "calendar": "Work",
            "title": "Lunch",
            "start": "2025-06-02T12:00:00Z",
            "end": "2025-06-02T13:00:00Z",
        })))
        .await
        .unwrap();

    // Assert
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["title"], "Lunch");
    assert_eq!(value["start"], "2025-06-02T12:00:00Z");
    assert_eq!(value["organizer"]["email"], "alice@example.com");
    assert!(value["url"].as_str().unwrap().ends_with(".ics"));
    assert!(value["etag"].is_string());
}

#[tokio::test]
async fn requests_calendar_delete_response() {
    // Arrange
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    let orchestrator = Orchestrator::new(spy, test_config());

    // Act
    let response = orchestrator
        .execute(request(json!({
            "resource": "calendar",
            "operation": "delete",
            "name": "Work",
        })))
        .await
        .unwrap();

    // Assert
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"success": true})
    );
}
